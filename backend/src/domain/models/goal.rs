//! Domain model for savings goals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::GoalCategory;
use thiserror::Error;

/// A savings goal owned by the profile.
///
/// `category`, `daily_amount` and `monthly_amount` are derived fields:
/// the goal service recomputes them on creation and on every edit, and the
/// two amounts are rounded to whole currency units before persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainGoal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub emoji: String,
    pub target_amount: f64,
    /// Saved so far. Every mutation clamps this to `target_amount`.
    pub current_amount: f64,
    pub target_date: DateTime<Utc>,
    pub category: GoalCategory,
    pub daily_amount: f64,
    pub monthly_amount: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl DomainGoal {
    /// Progress toward the target as a percentage, 0 when the target is 0.
    pub fn progress_percentage(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount) * 100.0
    }

    /// Amount still needed to reach the target, floored at zero.
    pub fn remaining_amount(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    /// Whether the goal is fully funded.
    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

/// Validation errors for goal operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GoalValidationError {
    #[error("Goal name cannot be empty")]
    EmptyName,

    #[error("Goal target amount must be positive")]
    NonPositiveTarget,

    #[error("Goal target date must be in the future")]
    TargetDateNotInFuture,

    #[error("Contribution amount must be positive")]
    NonPositiveContribution,
}

/// Raised when a goal ID does not match any stored goal.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Goal not found: {0}")]
pub struct GoalNotFound(pub String);
