//! Goal service domain logic.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::commands::AddGoalCommand;
use crate::domain::models::goal::{Goal, NewGoal};
use crate::error::{AppError, ValidationError};
use crate::storage::traits::GoalStorage;

#[derive(Clone)]
pub struct GoalService {
    goal_repository: Arc<dyn GoalStorage>,
}

impl GoalService {
    pub fn new(goal_repository: Arc<dyn GoalStorage>) -> Self {
        Self { goal_repository }
    }

    /// Validate the raw dialog input and persist the goal. Progress
    /// semantics are deliberately unchecked: the current amount may exceed
    /// the target or be negative.
    pub fn add_goal(&self, command: AddGoalCommand) -> Result<Goal, AppError> {
        let new_goal = validate(command)?;
        let stored = self.goal_repository.store_goal(&new_goal)?;
        info!(
            id = stored.id,
            title = %stored.title,
            target = stored.target_amount,
            "stored goal"
        );
        Ok(stored)
    }

    /// All goals, in store order (unspecified).
    pub fn list_goals(&self) -> Result<Vec<Goal>, AppError> {
        Ok(self.goal_repository.list_goals()?)
    }

    /// Delete one goal; `false` when the id was not present.
    pub fn delete_goal(&self, id: i64) -> Result<bool, AppError> {
        let deleted = self.goal_repository.delete_goal(id)?;
        if deleted {
            info!(id, "deleted goal");
        }
        Ok(deleted)
    }
}

fn validate(command: AddGoalCommand) -> Result<NewGoal, ValidationError> {
    let title = command.title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    let target_amount = command
        .target_amount
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::NonNumericAmount)?;

    // An untouched progress field means the goal starts from zero.
    let current_field = command.current_amount.trim();
    let current_amount = if current_field.is_empty() {
        0.0
    } else {
        current_field
            .parse::<f64>()
            .map_err(|_| ValidationError::NonNumericAmount)?
    };

    if NaiveDate::parse_from_str(&command.deadline, "%Y-%m-%d").is_err() {
        return Err(ValidationError::InvalidDate(command.deadline.clone()));
    }

    Ok(NewGoal {
        title: title.to_string(),
        target_amount,
        current_amount,
        deadline: command.deadline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::test_utils::TestHelper;

    fn setup_test() -> (GoalService, TestHelper) {
        let helper = TestHelper::new().expect("Failed to set up test env");
        let service = GoalService::new(Arc::new(helper.goal_repo.clone()));
        (service, helper)
    }

    fn command(title: &str, target: &str, current: &str) -> AddGoalCommand {
        AddGoalCommand {
            title: title.to_string(),
            target_amount: target.to_string(),
            current_amount: current.to_string(),
            deadline: "2024-12-31".to_string(),
        }
    }

    #[test]
    fn test_add_goal_persists_submitted_fields() {
        let (service, _helper) = setup_test();

        let stored = service
            .add_goal(command("New bike", "600", "150"))
            .expect("add failed");

        let all = service.list_goals().expect("list failed");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], stored);
        assert_eq!(all[0].current_amount, 150.0);
        assert_eq!(all[0].deadline, "2024-12-31");
    }

    #[test]
    fn test_empty_progress_field_defaults_to_zero() {
        let (service, _helper) = setup_test();

        let stored = service
            .add_goal(command("Rainy day fund", "1000", ""))
            .expect("add failed");
        assert_eq!(stored.current_amount, 0.0);
    }

    #[test]
    fn test_non_numeric_target_is_rejected_without_writing() {
        let (service, _helper) = setup_test();

        let err = service
            .add_goal(command("Bad goal", "lots", "0"))
            .expect_err("should reject");
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::NonNumericAmount)
        ));
        assert!(service.list_goals().expect("list failed").is_empty());
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let (service, _helper) = setup_test();

        let err = service
            .add_goal(command("  ", "100", "0"))
            .expect_err("should reject");
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::EmptyTitle)
        ));
    }

    #[test]
    fn test_progress_semantics_are_not_validated() {
        let (service, _helper) = setup_test();

        // Over-funded and negative progress are both accepted as-is.
        let over = service
            .add_goal(command("Over", "100", "250"))
            .expect("add failed");
        assert_eq!(over.current_amount, 250.0);

        let negative = service
            .add_goal(command("Negative", "100", "-40"))
            .expect("add failed");
        assert_eq!(negative.current_amount, -40.0);
    }
}
