pub mod sqlite;
pub mod traits;

pub use sqlite::{DbConnection, GoalRepository, TransactionRepository};
pub use traits::{GoalStorage, TransactionStorage};
