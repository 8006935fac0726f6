//! Storage abstraction traits.
//!
//! The domain layer works against these traits so a different backend could
//! be substituted without touching the services. All operations are
//! synchronous: this is a single-user desktop store, every write completes
//! before the triggering handler returns.

use anyhow::Result;

use crate::domain::models::goal::{Goal, NewGoal};
use crate::domain::models::transaction::{NewTransaction, Transaction};

/// Interface for transaction storage operations.
pub trait TransactionStorage: Send + Sync {
    /// Insert a new transaction and return the stored row with its
    /// auto-assigned id.
    fn store_transaction(&self, transaction: &NewTransaction) -> Result<Transaction>;

    /// All stored transactions. Order is unspecified; callers that need an
    /// order must sort.
    fn list_transactions(&self) -> Result<Vec<Transaction>>;

    /// Delete one transaction by id. Returns false (not an error) when the
    /// id was not present.
    fn delete_transaction(&self, id: i64) -> Result<bool>;
}

/// Interface for goal storage operations.
pub trait GoalStorage: Send + Sync {
    /// Insert a new goal and return the stored row with its auto-assigned id.
    fn store_goal(&self, goal: &NewGoal) -> Result<Goal>;

    /// All stored goals, in unspecified order.
    fn list_goals(&self) -> Result<Vec<Goal>>;

    /// Delete one goal by id. Returns false when the id was not present.
    fn delete_goal(&self, id: i64) -> Result<bool>;
}
