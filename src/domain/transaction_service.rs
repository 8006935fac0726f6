//! Transaction service domain logic.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::commands::AddTransactionCommand;
use crate::domain::models::transaction::{NewTransaction, Transaction, TransactionType};
use crate::error::{AppError, ValidationError};
use crate::storage::traits::TransactionStorage;

#[derive(Clone)]
pub struct TransactionService {
    transaction_repository: Arc<dyn TransactionStorage>,
}

impl TransactionService {
    pub fn new(transaction_repository: Arc<dyn TransactionStorage>) -> Self {
        Self {
            transaction_repository,
        }
    }

    /// Validate the raw dialog input and persist the transaction. Nothing
    /// is written when validation fails.
    pub fn add_transaction(
        &self,
        command: AddTransactionCommand,
    ) -> Result<Transaction, AppError> {
        let new_transaction = validate(command)?;
        let stored = self
            .transaction_repository
            .store_transaction(&new_transaction)?;
        info!(
            id = stored.id,
            category = %stored.category,
            amount = stored.amount,
            kind = stored.transaction_type.as_str(),
            "stored transaction"
        );
        Ok(stored)
    }

    /// All transactions, in store order (unspecified).
    pub fn list_transactions(&self) -> Result<Vec<Transaction>, AppError> {
        Ok(self.transaction_repository.list_transactions()?)
    }

    /// Delete one transaction. The id always comes from a displayed row, so
    /// a missing id is the uninteresting case and reported as `false`.
    pub fn delete_transaction(&self, id: i64) -> Result<bool, AppError> {
        let deleted = self.transaction_repository.delete_transaction(id)?;
        if deleted {
            info!(id, "deleted transaction");
        }
        Ok(deleted)
    }
}

fn validate(command: AddTransactionCommand) -> Result<NewTransaction, ValidationError> {
    let amount = command
        .amount
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::NonNumericAmount)?;

    let transaction_type = TransactionType::from_string(&command.transaction_type)
        .map_err(|_| ValidationError::InvalidTransactionType(command.transaction_type.clone()))?;

    let category = command.category.trim();
    if category.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }

    if NaiveDate::parse_from_str(&command.date, "%Y-%m-%d").is_err() {
        return Err(ValidationError::InvalidDate(command.date.clone()));
    }

    Ok(NewTransaction {
        amount,
        category: category.to_string(),
        date: command.date,
        transaction_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::test_utils::TestHelper;

    fn setup_test() -> (TransactionService, TestHelper) {
        let helper = TestHelper::new().expect("Failed to set up test env");
        let service = TransactionService::new(Arc::new(helper.transaction_repo.clone()));
        (service, helper)
    }

    fn command(amount: &str, category: &str, kind: &str) -> AddTransactionCommand {
        AddTransactionCommand {
            amount: amount.to_string(),
            category: category.to_string(),
            date: "2024-03-10".to_string(),
            transaction_type: kind.to_string(),
        }
    }

    #[test]
    fn test_add_transaction_persists_submitted_fields() {
        let (service, _helper) = setup_test();

        let before = service.list_transactions().expect("list failed");
        let stored = service
            .add_transaction(command("42.5", "Food", "Expense"))
            .expect("add failed");
        let after = service.list_transactions().expect("list failed");

        assert_eq!(after.len(), before.len() + 1);
        let row = after.iter().find(|t| t.id == stored.id).expect("row missing");
        assert_eq!(row.amount, 42.5);
        assert_eq!(row.category, "Food");
        assert_eq!(row.date, "2024-03-10");
        assert_eq!(row.transaction_type, TransactionType::Expense);
    }

    #[test]
    fn test_non_numeric_amount_is_rejected_without_writing() {
        let (service, _helper) = setup_test();

        let err = service
            .add_transaction(command("abc", "Food", "Expense"))
            .expect_err("should reject");
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::NonNumericAmount)
        ));
        assert!(service.list_transactions().expect("list failed").is_empty());
    }

    #[test]
    fn test_unknown_type_is_rejected_at_the_boundary() {
        let (service, _helper) = setup_test();

        let err = service
            .add_transaction(command("10", "Food", "Transfer"))
            .expect_err("should reject");
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::InvalidTransactionType(_))
        ));
        assert!(service.list_transactions().expect("list failed").is_empty());
    }

    #[test]
    fn test_empty_category_is_rejected() {
        let (service, _helper) = setup_test();

        let err = service
            .add_transaction(command("10", "   ", "Income"))
            .expect_err("should reject");
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::EmptyCategory)
        ));
    }

    #[test]
    fn test_delete_leaves_other_rows_untouched() {
        let (service, _helper) = setup_test();

        let first = service
            .add_transaction(command("10", "Food", "Expense"))
            .expect("add failed");
        let second = service
            .add_transaction(command("20", "Transport", "Expense"))
            .expect("add failed");

        assert!(service.delete_transaction(first.id).expect("delete failed"));

        let remaining = service.list_transactions().expect("list failed");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);

        // Deleting an id that is already gone is a quiet no-op.
        assert!(!service.delete_transaction(first.id).expect("delete failed"));
    }
}
