//! Aggregation of transactions for the analytics charts.
//!
//! Each aggregation fetches the full transaction set fresh from the store,
//! so a chart always reflects the latest write. Sums are plain `f64`
//! addition; the store carries no precision guarantee and neither does this.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::anyhow;
use chrono::NaiveDate;
use tracing::info;

use crate::domain::models::transaction::{Transaction, TransactionType};
use crate::error::AppError;
use crate::storage::traits::TransactionStorage;

/// One slice of the expense pie: a category and its summed amount.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// One row of the categories × {Income, Expense} table. Combinations with
/// no transactions hold zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTypeRow {
    pub category: String,
    pub income: f64,
    pub expense: f64,
}

/// Per-type daily totals in ascending date order. A type with no
/// transactions at all has no series rather than an empty one.
#[derive(Debug, Clone, PartialEq)]
pub struct DateSeries {
    pub income: Option<Vec<(NaiveDate, f64)>>,
    pub expense: Option<Vec<(NaiveDate, f64)>>,
}

#[derive(Clone)]
pub struct AnalyticsService {
    transaction_repository: Arc<dyn TransactionStorage>,
}

impl AnalyticsService {
    pub fn new(transaction_repository: Arc<dyn TransactionStorage>) -> Self {
        Self {
            transaction_repository,
        }
    }

    /// Expense totals grouped by category, for the pie chart. Income rows
    /// are excluded; an all-income (or empty) store is a `NoData` error.
    pub fn expense_by_category(&self) -> Result<Vec<CategoryTotal>, AppError> {
        let transactions = self.transaction_repository.list_transactions()?;
        let totals = expense_totals(&transactions)?;
        info!(categories = totals.len(), "aggregated expenses by category");
        Ok(totals)
    }

    /// Income and expense totals per category, zero-filled, for the bar
    /// chart.
    pub fn totals_by_category_and_type(&self) -> Result<Vec<CategoryTypeRow>, AppError> {
        let transactions = self.transaction_repository.list_transactions()?;
        let table = category_type_table(&transactions)?;
        info!(categories = table.len(), "aggregated totals by category and type");
        Ok(table)
    }

    /// Income and expense totals per calendar date, for the trend line
    /// chart.
    pub fn totals_by_date(&self) -> Result<DateSeries, AppError> {
        let transactions = self.transaction_repository.list_transactions()?;
        let series = date_series(&transactions)?;
        info!("aggregated totals by date and type");
        Ok(series)
    }
}

pub(crate) fn expense_totals(
    transactions: &[Transaction],
) -> Result<Vec<CategoryTotal>, AppError> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for transaction in transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Expense)
    {
        *totals.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
    }
    if totals.is_empty() {
        return Err(AppError::NoData);
    }
    Ok(totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect())
}

pub(crate) fn category_type_table(
    transactions: &[Transaction],
) -> Result<Vec<CategoryTypeRow>, AppError> {
    if transactions.is_empty() {
        return Err(AppError::NoData);
    }
    let mut rows: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for transaction in transactions {
        let entry = rows.entry(transaction.category.as_str()).or_insert((0.0, 0.0));
        match transaction.transaction_type {
            TransactionType::Income => entry.0 += transaction.amount,
            TransactionType::Expense => entry.1 += transaction.amount,
        }
    }
    Ok(rows
        .into_iter()
        .map(|(category, (income, expense))| CategoryTypeRow {
            category: category.to_string(),
            income,
            expense,
        })
        .collect())
}

pub(crate) fn date_series(transactions: &[Transaction]) -> Result<DateSeries, AppError> {
    if transactions.is_empty() {
        return Err(AppError::NoData);
    }

    let mut income: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut expense: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for transaction in transactions {
        let date = NaiveDate::parse_from_str(&transaction.date, "%Y-%m-%d")
            .map_err(|_| anyhow!("unparseable date '{}' in store", transaction.date))?;
        let bucket = match transaction.transaction_type {
            TransactionType::Income => &mut income,
            TransactionType::Expense => &mut expense,
        };
        *bucket.entry(date).or_insert(0.0) += transaction.amount;
    }

    // BTreeMap iteration already yields ascending dates.
    let to_series = |bucket: BTreeMap<NaiveDate, f64>| {
        if bucket.is_empty() {
            None
        } else {
            Some(bucket.into_iter().collect::<Vec<_>>())
        }
    };
    Ok(DateSeries {
        income: to_series(income),
        expense: to_series(expense),
    })
}
