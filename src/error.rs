//! Error taxonomy surfaced to the embedding UI.
//!
//! Every user-triggered operation returns `Result<_, AppError>`; the UI
//! renders `Display` as the message box text. Errors are terminal to the
//! single triggering action only and never leave the store half-written.

use thiserror::Error;

/// Rejections of raw dialog input. Nothing is persisted when one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Amount must be a number")]
    NonNumericAmount,
    #[error("Transaction type must be Income or Expense, got '{0}'")]
    InvalidTransactionType(String),
    #[error("Category cannot be empty")]
    EmptyCategory,
    #[error("Goal title cannot be empty")]
    EmptyTitle,
    #[error("Date must be in YYYY-MM-DD format, got '{0}'")]
    InvalidDate(String),
}

/// Top-level error for every operation the UI can trigger.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A chart was requested with no matching transactions. Shown to the
    /// user instead of rendering an empty chart.
    #[error("No data available to build this chart")]
    NoData,

    /// Export could not complete; no partial file is left behind.
    #[error("Export failed: {0}")]
    Export(String),

    /// Anything unexpected. Logged at the boundary and shown as a generic
    /// failure; the application stays usable.
    #[error("Something went wrong, the operation was not completed")]
    Internal(#[from] anyhow::Error),
}
