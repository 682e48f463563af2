//! Goal service domain logic.
//!
//! Core business logic for savings goals: creation and progress-aware
//! edits, contributions with streak integration, lifecycle changes, and
//! derived views (milestones, projections, the dashboard summary).
//!
//! ## Business Rules
//!
//! - Creation plans contributions from a zero balance; edits replan from
//!   the live balance. Both paths share one schedule function and differ
//!   only in the `current` argument.
//! - Contributions never replan; the stored contribution amounts only move
//!   on create and edit.
//! - `current_amount` is clamped to the target on every mutation; excess
//!   contribution money is silently discarded.
//! - Contribution amounts are rounded to whole currency units at
//!   persistence time only; the unrounded plan is returned alongside.

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::goal::{
    AddContributionCommand, AddContributionResult, CreateGoalCommand, CreateGoalResult,
    DashboardSummary, GoalProjectionResult, UpdateGoalCommand, UpdateGoalResult,
};
use crate::domain::finance;
use crate::domain::models::goal::{DomainGoal, GoalNotFound, GoalValidationError};
use crate::domain::models::profile::DomainProfile;
use crate::domain::profile_service::ProfileService;
use crate::domain::streak_service::StreakService;
use crate::storage::csv::{CsvConnection, GoalRepository};
use crate::storage::GoalStorage;

use shared::MilestoneStatus;

const DEFAULT_EMOJI: &str = "🎯";

/// Service for managing goals and goal-related calculations
#[derive(Clone)]
pub struct GoalService {
    goal_repository: GoalRepository,
    profile_service: ProfileService,
    streak_service: StreakService,
}

impl GoalService {
    /// Create a new GoalService
    pub fn new(
        csv_conn: Arc<CsvConnection>,
        profile_service: ProfileService,
        streak_service: StreakService,
    ) -> Self {
        Self {
            goal_repository: GoalRepository::new(csv_conn),
            profile_service,
            streak_service,
        }
    }

    /// Create a new goal
    pub fn create_goal(&self, command: CreateGoalCommand) -> Result<CreateGoalResult> {
        info!("Creating goal: {:?}", command);

        if command.name.trim().is_empty() {
            return Err(anyhow::Error::new(GoalValidationError::EmptyName));
        }
        if command.target_amount <= 0.0 {
            return Err(anyhow::Error::new(GoalValidationError::NonPositiveTarget));
        }

        let profile = self.profile_service.require_profile()?;

        let now = Utc::now();
        let horizon = finance::horizon_months(command.target_date, now);
        if horizon <= 0 {
            return Err(anyhow::Error::new(GoalValidationError::TargetDateNotInFuture));
        }

        // New goals always plan from a zero balance.
        let plan = finance::compute_contribution_schedule(
            command.target_amount,
            0.0,
            horizon,
            profile.risk_profile,
            profile.surplus(),
        );

        let emoji = if command.emoji.trim().is_empty() {
            DEFAULT_EMOJI.to_string()
        } else {
            command.emoji
        };

        let goal = DomainGoal {
            id: shared::generate_goal_id(now.timestamp_millis() as u64),
            user_id: profile.id.clone(),
            name: command.name.trim().to_string(),
            emoji,
            target_amount: command.target_amount,
            current_amount: 0.0,
            target_date: command.target_date,
            category: finance::category_of(horizon),
            daily_amount: plan.daily_amount.round(),
            monthly_amount: plan.monthly_amount.round(),
            is_active: true,
            created_at: now,
        };

        self.goal_repository.store_goal(&goal)?;

        Ok(CreateGoalResult { goal, plan })
    }

    /// Edit a goal's target amount and/or date, replanning from progress
    pub fn update_goal(&self, command: UpdateGoalCommand) -> Result<UpdateGoalResult> {
        info!("Updating goal: {:?}", command);

        let mut goal = self.require_goal(&command.goal_id)?;
        let profile = self.profile_service.require_profile()?;

        if let Some(target_amount) = command.target_amount {
            if target_amount <= 0.0 {
                return Err(anyhow::Error::new(GoalValidationError::NonPositiveTarget));
            }
            goal.target_amount = target_amount;
        }
        if let Some(target_date) = command.target_date {
            goal.target_date = target_date;
        }

        // A shrunken target may leave the goal over-funded.
        goal.current_amount = goal.current_amount.min(goal.target_amount);

        let now = Utc::now();
        let horizon = finance::horizon_months(goal.target_date, now);

        // Unlike creation, edits replan from the live balance; a horizon of
        // zero falls into the pay-remaining-now branch instead of erroring.
        let plan = finance::compute_contribution_schedule(
            goal.target_amount,
            goal.current_amount,
            horizon,
            profile.risk_profile,
            profile.surplus(),
        );

        goal.category = finance::category_of(horizon);
        goal.daily_amount = plan.daily_amount.round();
        goal.monthly_amount = plan.monthly_amount.round();

        self.goal_repository.update_goal(&goal)?;

        Ok(UpdateGoalResult { goal, plan })
    }

    /// Add money to a goal. Never replans; may move the streak
    pub fn add_contribution(&self, command: AddContributionCommand) -> Result<AddContributionResult> {
        info!("Adding contribution: {:?}", command);

        if command.amount <= 0.0 {
            return Err(anyhow::Error::new(GoalValidationError::NonPositiveContribution));
        }

        let mut goal = self.require_goal(&command.goal_id)?;

        // Hard clamp at the target: only the shortfall is accepted and any
        // excess is silently discarded.
        let accepted = command.amount.min(goal.remaining_amount());
        if accepted < command.amount {
            warn!(
                "Contribution of {} overshoots goal {}; accepting {}",
                command.amount, goal.id, accepted
            );
        }
        goal.current_amount += accepted;

        self.goal_repository.update_goal(&goal)?;

        let streak = self.streak_service.record_contribution()?;

        Ok(AddContributionResult { goal, streak })
    }

    /// Flag a goal inactive without removing it
    pub fn deactivate_goal(&self, goal_id: &str) -> Result<DomainGoal> {
        let mut goal = self.require_goal(goal_id)?;
        goal.is_active = false;
        self.goal_repository.update_goal(&goal)?;
        info!("Deactivated goal {}", goal_id);
        Ok(goal)
    }

    /// Remove a goal from the collection entirely
    pub fn remove_goal(&self, goal_id: &str) -> Result<()> {
        if !self.goal_repository.delete_goal(goal_id)? {
            return Err(anyhow::Error::new(GoalNotFound(goal_id.to_string())));
        }
        Ok(())
    }

    /// Get a goal by ID
    pub fn get_goal(&self, goal_id: &str) -> Result<DomainGoal> {
        self.require_goal(goal_id)
    }

    /// List all goals in insertion order
    pub fn list_goals(&self) -> Result<Vec<DomainGoal>> {
        self.goal_repository.list_goals()
    }

    /// Milestone progress for a goal
    pub fn milestone_status(goal: &DomainGoal) -> MilestoneStatus {
        MilestoneStatus::from_percentage(goal.progress_percentage())
    }

    /// Replan a goal from its live balance and project it month by month
    pub fn projection(&self, goal_id: &str) -> Result<GoalProjectionResult> {
        let goal = self.require_goal(goal_id)?;
        let profile = self.profile_service.require_profile()?;

        let now = Utc::now();
        let months_remaining = finance::horizon_months(goal.target_date, now);
        let plan = finance::compute_contribution_schedule(
            goal.target_amount,
            goal.current_amount,
            months_remaining,
            profile.risk_profile,
            profile.surplus(),
        );

        let points = finance::projection_series(
            goal.current_amount,
            plan.monthly_amount,
            months_remaining.max(0) as u32,
            profile.risk_profile.monthly_return(),
        )
        .collect();

        Ok(GoalProjectionResult {
            goal,
            plan,
            months_remaining,
            points,
        })
    }

    /// Aggregate numbers for the dashboard header
    pub fn dashboard_summary(&self) -> Result<DashboardSummary> {
        let profile = self.profile_service.require_profile()?;
        let goals = self.goal_repository.list_goals()?;

        let active: Vec<&DomainGoal> = goals.iter().filter(|g| g.is_active).collect();
        let total_saved: f64 = goals.iter().map(|g| g.current_amount).sum();
        let total_target: f64 = goals.iter().map(|g| g.target_amount).sum();
        let overall_progress = if total_target > 0.0 {
            (total_saved / total_target) * 100.0
        } else {
            0.0
        };
        let daily_target: f64 = active.iter().map(|g| g.daily_amount).sum();

        Ok(DashboardSummary {
            active_goals: active.len(),
            total_saved,
            total_target,
            overall_progress,
            daily_target,
            checked_in_today: Self::checked_in_today(&profile, Utc::now()),
        })
    }

    fn checked_in_today(profile: &DomainProfile, now: chrono::DateTime<Utc>) -> bool {
        profile.last_check_in.date_naive() == now.date_naive()
    }

    fn require_goal(&self, goal_id: &str) -> Result<DomainGoal> {
        self.goal_repository
            .get_goal(goal_id)?
            .ok_or_else(|| anyhow::Error::new(GoalNotFound(goal_id.to_string())))
    }
}
