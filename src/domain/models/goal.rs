//! Domain model for a savings goal.

use serde::{Deserialize, Serialize};

/// A named savings target. Goals carry no semantic validation of progress:
/// `current_amount` may exceed the target or go negative, and nothing links
/// a goal to the transactions that fund it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    /// ISO-8601 calendar date (`YYYY-MM-DD`).
    pub deadline: String,
}

/// A goal that has not been stored yet; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: String,
}
