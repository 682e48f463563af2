//! Command and result structs for domain service operations.
//!
//! Each service takes a command struct in and hands a result struct back,
//! keeping the service method signatures stable as fields evolve.

pub mod profile {
    use crate::domain::models::profile::DomainProfile;
    use shared::RiskProfile;

    #[derive(Debug, Clone)]
    pub struct CreateProfileCommand {
        pub name: String,
        pub monthly_income: f64,
        pub monthly_expenses: f64,
        pub risk_profile: RiskProfile,
    }

    /// Partial update: `None` fields are left untouched.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateProfileCommand {
        pub name: Option<String>,
        pub monthly_income: Option<f64>,
        pub monthly_expenses: Option<f64>,
        pub risk_profile: Option<RiskProfile>,
    }

    #[derive(Debug, Clone)]
    pub struct CreateProfileResult {
        pub profile: DomainProfile,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateProfileResult {
        pub profile: DomainProfile,
    }
}

pub mod goal {
    use crate::domain::models::goal::DomainGoal;
    use chrono::{DateTime, Months, Utc};
    use shared::{ContributionPlan, GoalTemplate, ProjectionPoint};

    #[derive(Debug, Clone)]
    pub struct CreateGoalCommand {
        pub name: String,
        /// Falls back to 🎯 when empty.
        pub emoji: String,
        pub target_amount: f64,
        pub target_date: DateTime<Utc>,
    }

    impl CreateGoalCommand {
        /// Prefill a creation command from a built-in template. The target
        /// date is the template's suggested horizon from `now`; callers may
        /// adjust any field before submitting.
        pub fn from_template(template: &GoalTemplate, now: DateTime<Utc>) -> Self {
            Self {
                name: template.name.to_string(),
                emoji: template.emoji.to_string(),
                target_amount: template.suggested_amount,
                target_date: now + Months::new(template.suggested_months),
            }
        }
    }

    /// Partial update: `None` fields are left untouched. Derived fields
    /// (category, contribution amounts) are always recomputed.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateGoalCommand {
        pub goal_id: String,
        pub target_amount: Option<f64>,
        pub target_date: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Clone)]
    pub struct AddContributionCommand {
        pub goal_id: String,
        pub amount: f64,
    }

    #[derive(Debug, Clone)]
    pub struct CreateGoalResult {
        pub goal: DomainGoal,
        /// The unrounded plan the stored amounts were derived from.
        pub plan: ContributionPlan,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateGoalResult {
        pub goal: DomainGoal,
        pub plan: ContributionPlan,
    }

    #[derive(Debug, Clone)]
    pub struct AddContributionResult {
        pub goal: DomainGoal,
        /// Streak movement caused by this contribution, if any. Same-day
        /// contributions do not touch the streak.
        pub streak: Option<super::checkin::StreakUpdate>,
    }

    #[derive(Debug, Clone)]
    pub struct GoalProjectionResult {
        pub goal: DomainGoal,
        pub plan: ContributionPlan,
        pub months_remaining: i64,
        pub points: Vec<ProjectionPoint>,
    }

    /// Aggregate numbers for the dashboard header.
    #[derive(Debug, Clone, PartialEq)]
    pub struct DashboardSummary {
        pub active_goals: usize,
        pub total_saved: f64,
        pub total_target: f64,
        /// Total saved over total target, as a percentage; 0 with no goals.
        pub overall_progress: f64,
        /// Summed daily contribution target across active goals.
        pub daily_target: f64,
        pub checked_in_today: bool,
    }
}

pub mod checkin {
    use crate::domain::models::profile::DomainProfile;

    #[derive(Debug, Clone)]
    pub struct CheckInCommand {
        /// Amount the user reports having saved today. Carried through to
        /// the result for display; not applied to any goal balance.
        pub amount_saved: f64,
    }

    #[derive(Debug, Clone)]
    pub struct CheckInResult {
        pub profile: DomainProfile,
        pub amount_saved: f64,
        pub streak: StreakUpdate,
    }

    /// Streak position after a qualifying engagement event.
    #[derive(Debug, Clone, PartialEq)]
    pub struct StreakUpdate {
        pub streak_days: u32,
        /// True every seventh consecutive day.
        pub weekly_milestone: bool,
    }
}
