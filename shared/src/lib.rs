//! # Shared Types
//!
//! Value types shared between the finbuddy backend and its frontends:
//! risk/category enums with storage string codecs, the contribution plan and
//! projection value types, milestone queries, and the built-in goal
//! templates. Everything here is plain data with serde derives; all business
//! logic lives in the backend crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Investment risk appetite chosen during the profile assessment.
///
/// Each profile maps to an assumed annual return used by every contribution
/// calculation. The mapping is fixed; there is no per-user override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskProfile {
    /// Assumed annual return for this risk appetite.
    pub fn annual_return(&self) -> f64 {
        match self {
            RiskProfile::Conservative => 0.07,
            RiskProfile::Moderate => 0.12,
            RiskProfile::Aggressive => 0.15,
        }
    }

    /// Monthly return derived from the annual assumption.
    pub fn monthly_return(&self) -> f64 {
        self.annual_return() / 12.0
    }

    /// Convert to string representation for storage
    pub fn to_string(&self) -> String {
        match self {
            RiskProfile::Conservative => "conservative".to_string(),
            RiskProfile::Moderate => "moderate".to_string(),
            RiskProfile::Aggressive => "aggressive".to_string(),
        }
    }

    /// Parse from string representation (from storage)
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s {
            "conservative" => Ok(RiskProfile::Conservative),
            "moderate" => Ok(RiskProfile::Moderate),
            "aggressive" => Ok(RiskProfile::Aggressive),
            _ => Err(format!("Invalid risk profile: {}", s)),
        }
    }
}

/// Goal time-horizon bucket, derived from the months remaining to the
/// target date (never set directly by callers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Short,
    Medium,
    Long,
}

impl GoalCategory {
    /// Convert to string representation for storage
    pub fn to_string(&self) -> String {
        match self {
            GoalCategory::Short => "short".to_string(),
            GoalCategory::Medium => "medium".to_string(),
            GoalCategory::Long => "long".to_string(),
        }
    }

    /// Parse from string representation (from storage)
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s {
            "short" => Ok(GoalCategory::Short),
            "medium" => Ok(GoalCategory::Medium),
            "long" => Ok(GoalCategory::Long),
            _ => Err(format!("Invalid goal category: {}", s)),
        }
    }
}

/// Result of planning contributions for a goal.
///
/// Amounts are unrounded; rounding to whole currency units happens at
/// persistence time in the goal service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionPlan {
    /// Required monthly contribution to reach the target on time.
    pub monthly_amount: f64,
    /// Monthly amount spread over a fixed 30-day month.
    pub daily_amount: f64,
    /// Whether the monthly amount fits within 80% of the user's surplus.
    pub is_feasible: bool,
    /// Monthly amount as a percentage of surplus. `None` when the user has
    /// no surplus (the plan is infeasible by definition in that case).
    pub surplus_percentage: Option<f64>,
}

/// One point of a goal projection series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Months from now, starting at 0 (today's balance).
    pub month: u32,
    /// Projected balance at that month.
    pub projected_value: f64,
}

/// Progress milestones reported for every goal.
pub const MILESTONE_PERCENTAGES: [u8; 4] = [25, 50, 75, 100];

/// Milestone progress for a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneStatus {
    /// Milestones already reached, in ascending order.
    pub achieved: Vec<u8>,
    /// Current progress percentage (uncapped input, capped at 100 here).
    pub current_percentage: f64,
}

impl MilestoneStatus {
    /// Compute milestone status from a progress percentage.
    pub fn from_percentage(progress: f64) -> Self {
        let capped = progress.min(100.0).max(0.0);
        let achieved = MILESTONE_PERCENTAGES
            .iter()
            .copied()
            .filter(|m| capped >= *m as f64)
            .collect();
        MilestoneStatus {
            achieved,
            current_percentage: capped,
        }
    }
}

/// A built-in goal template offered by the goal creation flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalTemplate {
    pub name: &'static str,
    pub emoji: &'static str,
    pub suggested_amount: f64,
    pub suggested_months: u32,
}

/// Built-in goal templates with suggested amounts and horizons.
///
/// "Custom" is the blank template: the caller supplies both the amount and
/// the horizon.
pub const GOAL_TEMPLATES: [GoalTemplate; 6] = [
    GoalTemplate { name: "Foreign Trip", emoji: "✈️", suggested_amount: 500_000.0, suggested_months: 24 },
    GoalTemplate { name: "Dream Home", emoji: "🏠", suggested_amount: 5_000_000.0, suggested_months: 60 },
    GoalTemplate { name: "Car Purchase", emoji: "🚗", suggested_amount: 1_000_000.0, suggested_months: 36 },
    GoalTemplate { name: "Education", emoji: "🎓", suggested_amount: 800_000.0, suggested_months: 48 },
    GoalTemplate { name: "Wedding", emoji: "💍", suggested_amount: 1_500_000.0, suggested_months: 24 },
    GoalTemplate { name: "Custom Goal", emoji: "🎯", suggested_amount: 0.0, suggested_months: 12 },
];

/// Look up a built-in template by name.
pub fn find_template(name: &str) -> Option<&'static GoalTemplate> {
    GOAL_TEMPLATES.iter().find(|t| t.name == name)
}

/// Generate a goal ID from an epoch-millisecond timestamp.
pub fn generate_goal_id(epoch_millis: u64) -> String {
    format!("goal::{}", epoch_millis)
}

/// Parse a goal ID back into its timestamp.
pub fn parse_goal_id(id: &str) -> Result<u64, GoalIdError> {
    let parts: Vec<&str> = id.split("::").collect();
    if parts.len() != 2 || parts[0] != "goal" {
        return Err(GoalIdError::InvalidFormat);
    }
    parts[1].parse::<u64>().map_err(|_| GoalIdError::InvalidTimestamp)
}

#[derive(Debug, Clone, PartialEq)]
pub enum GoalIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for GoalIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalIdError::InvalidFormat => write!(f, "Invalid goal ID format"),
            GoalIdError::InvalidTimestamp => write!(f, "Invalid timestamp in goal ID"),
        }
    }
}

impl std::error::Error for GoalIdError {}

/// Generate a profile ID from an epoch-millisecond timestamp.
pub fn generate_profile_id(epoch_millis: u64) -> String {
    format!("profile::{}", epoch_millis)
}

/// Parse a profile ID back into its timestamp.
pub fn parse_profile_id(id: &str) -> Result<u64, ProfileIdError> {
    let parts: Vec<&str> = id.split("::").collect();
    if parts.len() != 2 || parts[0] != "profile" {
        return Err(ProfileIdError::InvalidFormat);
    }
    parts[1].parse::<u64>().map_err(|_| ProfileIdError::InvalidTimestamp)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for ProfileIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileIdError::InvalidFormat => write!(f, "Invalid profile ID format"),
            ProfileIdError::InvalidTimestamp => write!(f, "Invalid timestamp in profile ID"),
        }
    }
}

impl std::error::Error for ProfileIdError {}
