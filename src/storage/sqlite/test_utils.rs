//! Test infrastructure for storage and service tests.
//!
//! Provides RAII-based cleanup: the temporary directory holding the database
//! file is removed when the environment is dropped, even if a test panics.

use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use super::connection::DbConnection;
use super::goal_repository::GoalRepository;
use super::transaction_repository::TransactionRepository;

/// A fresh database file inside a temporary directory.
pub struct TestEnvironment {
    pub connection: DbConnection,
    /// Kept for manual inspection if a test needs the path.
    pub base_path: PathBuf,
    _temp_dir: TempDir, // keep alive until drop
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = DbConnection::new(temp_dir.path().join("finance.db"))?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// Environment plus ready-made repositories.
pub struct TestHelper {
    pub env: TestEnvironment,
    pub transaction_repo: TransactionRepository,
    pub goal_repo: GoalRepository,
}

impl TestHelper {
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        let transaction_repo = TransactionRepository::new(env.connection.clone());
        let goal_repo = GoalRepository::new(env.connection.clone());
        Ok(Self {
            env,
            transaction_repo,
            goal_repo,
        })
    }
}
