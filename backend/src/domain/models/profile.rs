//! Domain model for the user's financial profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::RiskProfile;
use thiserror::Error;

/// The single user profile captured by the quick assessment.
///
/// The profile owns the engagement streak fields; goals reference the
/// profile through their `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainProfile {
    pub id: String,
    pub name: String,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub risk_profile: RiskProfile,
    /// Consecutive-day engagement streak.
    pub streak_days: u32,
    /// Timestamp of the last streak-qualifying event.
    pub last_check_in: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl DomainProfile {
    /// Monthly surplus available for goal contributions.
    pub fn surplus(&self) -> f64 {
        self.monthly_income - self.monthly_expenses
    }

    /// Assumed annual return for this profile's risk appetite.
    pub fn annual_return(&self) -> f64 {
        self.risk_profile.annual_return()
    }
}

/// Validation errors for profile operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileValidationError {
    #[error("Profile name cannot be empty")]
    EmptyName,

    #[error("Monthly income cannot be negative")]
    NegativeIncome,

    #[error("Monthly expenses cannot be negative")]
    NegativeExpenses,
}

/// Raised when an operation needs a profile and none has been created.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("No profile found. Complete the assessment first.")]
pub struct ProfileNotFound;
