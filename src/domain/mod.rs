//! Domain layer: models, input commands and the services the UI calls.

pub mod analytics_service;
pub mod commands;
pub mod export_service;
pub mod goal_service;
pub mod models;
pub mod transaction_service;

pub use analytics_service::AnalyticsService;
pub use export_service::ExportService;
pub use goal_service::GoalService;
pub use transaction_service::TransactionService;
