//! Home-finance backend.
//!
//! This crate is the complete core behind a single-user desktop finance
//! tracker: income/expense transactions, savings goals, analytics
//! aggregations for the three chart views, and export to spreadsheet or
//! chart image. The windowing toolkit is an external caller; everything it
//! triggers goes through [`App`], which wires the domain services over the
//! SQLite storage layer.
//!
//! The whole stack is synchronous. Every write completes before the
//! triggering handler returns, and views re-query the store afterwards, so
//! reads are always consistent with the latest write.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::error;

pub mod domain;
pub mod error;
pub mod storage;

pub use domain::analytics_service::{CategoryTotal, CategoryTypeRow, DateSeries};
pub use domain::commands::{AddGoalCommand, AddTransactionCommand};
pub use domain::export_service::ChartKind;
pub use domain::models::goal::Goal;
pub use domain::models::transaction::{Transaction, TransactionType};
pub use error::{AppError, ValidationError};

use domain::{AnalyticsService, ExportService, GoalService, TransactionService};
use storage::sqlite::{DbConnection, GoalRepository, TransactionRepository};
use storage::traits::{GoalStorage, TransactionStorage};

/// Facade over all services, constructed once at startup and shared with
/// the UI. Methods mirror the user-triggered handlers one to one; every
/// failure is logged here at the boundary before it is handed back for
/// display, so no action can crash the running application.
pub struct App {
    transaction_service: TransactionService,
    goal_service: GoalService,
    analytics_service: AnalyticsService,
    export_service: ExportService,
}

impl App {
    /// Open (creating on first run) the database at `db_path` and wire up
    /// the services.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let connection = DbConnection::new(db_path)?;
        let transaction_repository: Arc<dyn TransactionStorage> =
            Arc::new(TransactionRepository::new(connection.clone()));
        let goal_repository: Arc<dyn GoalStorage> = Arc::new(GoalRepository::new(connection));

        let transaction_service = TransactionService::new(transaction_repository.clone());
        let goal_service = GoalService::new(goal_repository);
        let analytics_service = AnalyticsService::new(transaction_repository.clone());
        let export_service =
            ExportService::new(transaction_repository, analytics_service.clone());

        Ok(App {
            transaction_service,
            goal_service,
            analytics_service,
            export_service,
        })
    }

    /// Open the database at the platform data directory
    /// (`<data_dir>/home-finance/finance.db`), creating it on first run.
    pub fn open_default() -> Result<Self> {
        let dir = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("home-finance");
        std::fs::create_dir_all(&dir)?;
        Self::new(dir.join("finance.db"))
    }

    pub fn add_transaction(
        &self,
        command: AddTransactionCommand,
    ) -> Result<Transaction, AppError> {
        self.transaction_service
            .add_transaction(command)
            .inspect_err(|e| error!(error = %e, "add transaction failed"))
    }

    pub fn list_transactions(&self) -> Result<Vec<Transaction>, AppError> {
        self.transaction_service
            .list_transactions()
            .inspect_err(|e| error!(error = %e, "list transactions failed"))
    }

    pub fn delete_transaction(&self, id: i64) -> Result<bool, AppError> {
        self.transaction_service
            .delete_transaction(id)
            .inspect_err(|e| error!(error = %e, id, "delete transaction failed"))
    }

    pub fn add_goal(&self, command: AddGoalCommand) -> Result<Goal, AppError> {
        self.goal_service
            .add_goal(command)
            .inspect_err(|e| error!(error = %e, "add goal failed"))
    }

    pub fn list_goals(&self) -> Result<Vec<Goal>, AppError> {
        self.goal_service
            .list_goals()
            .inspect_err(|e| error!(error = %e, "list goals failed"))
    }

    pub fn delete_goal(&self, id: i64) -> Result<bool, AppError> {
        self.goal_service
            .delete_goal(id)
            .inspect_err(|e| error!(error = %e, id, "delete goal failed"))
    }

    /// Data behind the pie chart.
    pub fn expense_by_category(&self) -> Result<Vec<CategoryTotal>, AppError> {
        self.analytics_service
            .expense_by_category()
            .inspect_err(|e| error!(error = %e, "expense aggregation failed"))
    }

    /// Data behind the bar chart.
    pub fn totals_by_category_and_type(&self) -> Result<Vec<CategoryTypeRow>, AppError> {
        self.analytics_service
            .totals_by_category_and_type()
            .inspect_err(|e| error!(error = %e, "category/type aggregation failed"))
    }

    /// Data behind the trend line chart.
    pub fn totals_by_date(&self) -> Result<DateSeries, AppError> {
        self.analytics_service
            .totals_by_date()
            .inspect_err(|e| error!(error = %e, "date aggregation failed"))
    }

    pub fn export_transactions_xlsx(&self, path: &Path) -> Result<(), AppError> {
        self.export_service
            .export_transactions_xlsx(path)
            .inspect_err(|e| error!(error = %e, path = %path.display(), "spreadsheet export failed"))
    }

    pub fn export_chart(&self, kind: ChartKind, path: &Path) -> Result<(), AppError> {
        self.export_service
            .export_chart(kind, path)
            .inspect_err(|e| error!(error = %e, path = %path.display(), "chart export failed"))
    }
}
