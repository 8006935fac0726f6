//! SQLite storage backend: one local database file, two tables.

mod connection;
mod goal_repository;
mod transaction_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::DbConnection;
pub use goal_repository::GoalRepository;
pub use transaction_repository::TransactionRepository;
