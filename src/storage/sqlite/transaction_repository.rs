//! SQLite-backed transaction repository.

use anyhow::{anyhow, Result};
use rusqlite::params;

use super::connection::DbConnection;
use crate::domain::models::transaction::{NewTransaction, Transaction, TransactionType};
use crate::storage::traits::TransactionStorage;

#[derive(Debug, Clone)]
pub struct TransactionRepository {
    connection: DbConnection,
}

impl TransactionRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }
}

impl TransactionStorage for TransactionRepository {
    fn store_transaction(&self, transaction: &NewTransaction) -> Result<Transaction> {
        let conn = self.connection.lock();
        conn.execute(
            "INSERT INTO transactions (amount, category, date, type) VALUES (?1, ?2, ?3, ?4)",
            params![
                transaction.amount,
                transaction.category,
                transaction.date,
                transaction.transaction_type.as_str(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(Transaction {
            id,
            amount: transaction.amount,
            category: transaction.category.clone(),
            date: transaction.date.clone(),
            transaction_type: transaction.transaction_type,
        })
    }

    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.connection.lock();
        let mut stmt =
            conn.prepare("SELECT id, amount, category, date, type FROM transactions")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut transactions = Vec::new();
        for row in rows {
            let (id, amount, category, date, type_text) = row?;
            // The CHECK constraint makes this infallible for rows we wrote,
            // but a hand-edited file still fails loudly instead of being
            // silently misread.
            let transaction_type =
                TransactionType::from_string(&type_text).map_err(|e| anyhow!(e))?;
            transactions.push(Transaction {
                id,
                amount,
                category,
                date,
                transaction_type,
            });
        }
        Ok(transactions)
    }

    fn delete_transaction(&self, id: i64) -> Result<bool> {
        let deleted = self
            .connection
            .lock()
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::test_utils::TestHelper;

    fn sample(amount: f64, category: &str, date: &str, kind: TransactionType) -> NewTransaction {
        NewTransaction {
            amount,
            category: category.to_string(),
            date: date.to_string(),
            transaction_type: kind,
        }
    }

    #[test]
    fn test_store_assigns_unique_ids_and_preserves_fields() {
        let helper = TestHelper::new().expect("Failed to set up test env");
        let repo = &helper.transaction_repo;

        let first = repo
            .store_transaction(&sample(50.0, "Food", "2024-02-01", TransactionType::Expense))
            .expect("store failed");
        let second = repo
            .store_transaction(&sample(900.0, "Salary", "2024-02-02", TransactionType::Income))
            .expect("store failed");

        assert_ne!(first.id, second.id);

        let all = repo.list_transactions().expect("list failed");
        assert_eq!(all.len(), 2);
        let stored = all.iter().find(|t| t.id == first.id).expect("row missing");
        assert_eq!(stored.amount, 50.0);
        assert_eq!(stored.category, "Food");
        assert_eq!(stored.date, "2024-02-01");
        assert_eq!(stored.transaction_type, TransactionType::Expense);
    }

    #[test]
    fn test_delete_removes_only_the_given_row() {
        let helper = TestHelper::new().expect("Failed to set up test env");
        let repo = &helper.transaction_repo;

        let keep = repo
            .store_transaction(&sample(10.0, "Food", "2024-02-01", TransactionType::Expense))
            .expect("store failed");
        let gone = repo
            .store_transaction(&sample(20.0, "Transport", "2024-02-02", TransactionType::Expense))
            .expect("store failed");

        assert!(repo.delete_transaction(gone.id).expect("delete failed"));

        let remaining = repo.list_transactions().expect("list failed");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
    }

    #[test]
    fn test_delete_missing_id_is_a_no_op() {
        let helper = TestHelper::new().expect("Failed to set up test env");
        let repo = &helper.transaction_repo;

        assert!(!repo.delete_transaction(12345).expect("delete failed"));
        assert!(repo.list_transactions().expect("list failed").is_empty());
    }

    #[test]
    fn test_list_is_stable_between_reads() {
        let helper = TestHelper::new().expect("Failed to set up test env");
        let repo = &helper.transaction_repo;

        repo.store_transaction(&sample(10.0, "Food", "2024-02-01", TransactionType::Expense))
            .expect("store failed");
        repo.store_transaction(&sample(20.0, "Rent", "2024-02-02", TransactionType::Expense))
            .expect("store failed");

        let first_read = repo.list_transactions().expect("list failed");
        let second_read = repo.list_transactions().expect("list failed");
        assert_eq!(first_read, second_read);
    }
}
