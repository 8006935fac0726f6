//! Domain model for a transaction.

use serde::{Deserialize, Serialize};

/// Closed set of transaction kinds. The persistence schema enforces the same
/// set with a CHECK constraint, so nothing else can reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Label used in the database column and in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }

    /// Parse the label back. Free text from the add dialog goes through
    /// here, so anything outside the two known kinds is rejected before a
    /// write is ever attempted.
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

/// One dated cash movement as stored. Transactions are immutable once
/// created; there is no update path, only delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: f64,
    pub category: String,
    /// ISO-8601 calendar date (`YYYY-MM-DD`), no timezone.
    pub date: String,
    pub transaction_type: TransactionType,
}

/// Field set for a transaction that has not been stored yet; the id is
/// assigned by the store on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub category: String,
    pub date: String,
    pub transaction_type: TransactionType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_round_trip() {
        assert_eq!(
            TransactionType::from_string("Income").unwrap(),
            TransactionType::Income
        );
        assert_eq!(
            TransactionType::from_string("expense").unwrap(),
            TransactionType::Expense
        );
        assert_eq!(TransactionType::Income.as_str(), "Income");
        assert_eq!(TransactionType::Expense.as_str(), "Expense");
    }

    #[test]
    fn test_transaction_type_rejects_unknown_labels() {
        assert!(TransactionType::from_string("Transfer").is_err());
        assert!(TransactionType::from_string("").is_err());
    }
}
