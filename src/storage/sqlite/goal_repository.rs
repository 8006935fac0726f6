//! SQLite-backed goal repository.

use anyhow::Result;
use rusqlite::params;

use super::connection::DbConnection;
use crate::domain::models::goal::{Goal, NewGoal};
use crate::storage::traits::GoalStorage;

#[derive(Debug, Clone)]
pub struct GoalRepository {
    connection: DbConnection,
}

impl GoalRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }
}

impl GoalStorage for GoalRepository {
    fn store_goal(&self, goal: &NewGoal) -> Result<Goal> {
        let conn = self.connection.lock();
        conn.execute(
            "INSERT INTO goals (title, target_amount, current_amount, deadline)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                goal.title,
                goal.target_amount,
                goal.current_amount,
                goal.deadline,
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(Goal {
            id,
            title: goal.title.clone(),
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            deadline: goal.deadline.clone(),
        })
    }

    fn list_goals(&self) -> Result<Vec<Goal>> {
        let conn = self.connection.lock();
        let mut stmt =
            conn.prepare("SELECT id, title, target_amount, current_amount, deadline FROM goals")?;
        let rows = stmt.query_map([], |row| {
            Ok(Goal {
                id: row.get(0)?,
                title: row.get(1)?,
                target_amount: row.get(2)?,
                current_amount: row.get(3)?,
                deadline: row.get(4)?,
            })
        })?;

        let mut goals = Vec::new();
        for goal in rows {
            goals.push(goal?);
        }
        Ok(goals)
    }

    fn delete_goal(&self, id: i64) -> Result<bool> {
        let deleted = self
            .connection
            .lock()
            .execute("DELETE FROM goals WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}
