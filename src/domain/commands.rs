//! Command types carried from the UI dialogs into the domain services.
//!
//! Everything the user types arrives as raw text; the services parse and
//! validate before anything touches the store. Dates come from a date
//! picker, so they are already `YYYY-MM-DD`, but they are still checked.

use serde::{Deserialize, Serialize};

/// Submission of the add-transaction dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTransactionCommand {
    /// Raw amount field, must parse as a real number.
    pub amount: String,
    pub category: String,
    /// Calendar date from the picker, `YYYY-MM-DD`.
    pub date: String,
    /// Raw type field; only "Income" / "Expense" are accepted.
    pub transaction_type: String,
}

/// Submission of the add-goal dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddGoalCommand {
    pub title: String,
    /// Raw target amount field, must parse as a real number.
    pub target_amount: String,
    /// Raw progress field; an empty field means "start from zero".
    pub current_amount: String,
    /// Calendar date from the picker, `YYYY-MM-DD`.
    pub deadline: String,
}
