//! Contribution schedule math for savings goals.
//!
//! Pure functions only: no clock reads, no storage, no logging. The goal
//! service is responsible for choosing the `current` argument (zero at
//! creation, the live balance on edits) and for rounding amounts before
//! persistence.

use chrono::{DateTime, Utc};
use shared::{ContributionPlan, GoalCategory, ProjectionPoint, RiskProfile};

/// Share of the monthly surplus a plan may consume and still be feasible.
pub const FEASIBLE_SURPLUS_SHARE: f64 = 0.8;

/// Fixed month length used to spread monthly amounts into daily ones.
/// Calendar months are deliberately not used here.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Compute the contribution schedule for a goal.
///
/// Inverts the future value of an ordinary annuity: contributions are made
/// at the end of each month and compound at the monthly return until the
/// horizon. With `horizon_months <= 0` the full remaining amount is due in
/// one period. An already-funded goal requires nothing.
pub fn compute_contribution_schedule(
    target_amount: f64,
    current_amount: f64,
    horizon_months: i64,
    risk_profile: RiskProfile,
    monthly_surplus: f64,
) -> ContributionPlan {
    let remaining = (target_amount - current_amount).max(0.0);
    let monthly_return = risk_profile.monthly_return();

    let monthly_amount = if horizon_months <= 0 {
        remaining
    } else {
        let growth = (1.0 + monthly_return).powi(horizon_months as i32);
        let annuity_factor = (growth - 1.0) / monthly_return;
        remaining / annuity_factor
    };
    let daily_amount = monthly_amount / DAYS_PER_MONTH;

    let (is_feasible, surplus_percentage) = if monthly_surplus > 0.0 {
        (
            monthly_amount <= FEASIBLE_SURPLUS_SHARE * monthly_surplus,
            Some((monthly_amount / monthly_surplus) * 100.0),
        )
    } else {
        // No surplus: no meaningful ratio, and nothing is affordable.
        (false, None)
    };

    ContributionPlan {
        monthly_amount,
        daily_amount,
        is_feasible,
        surplus_percentage,
    }
}

/// Derive the time-horizon category from the months remaining.
pub fn category_of(horizon_months: i64) -> GoalCategory {
    if horizon_months <= 24 {
        GoalCategory::Short
    } else if horizon_months <= 48 {
        GoalCategory::Medium
    } else {
        GoalCategory::Long
    }
}

/// Whole months between now and the target date.
///
/// Days are rounded up to whole days first, then divided by the fixed
/// 30-day month and rounded up again. Past dates yield 0.
pub fn horizon_months(target_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (target_date - now).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    let days = (seconds as f64 / 86_400.0).ceil();
    (days / DAYS_PER_MONTH).ceil() as i64
}

/// Projected goal balance month by month.
///
/// Yields `months_remaining + 1` points. Point 0 is today's balance; each
/// subsequent month adds the contribution first and then applies one month
/// of growth to the whole balance.
pub fn projection_series(
    current_amount: f64,
    monthly_amount: f64,
    months_remaining: u32,
    monthly_return: f64,
) -> ProjectionSeries {
    ProjectionSeries {
        value: current_amount,
        monthly_amount,
        monthly_return,
        month: 0,
        months_remaining,
    }
}

/// Finite iterator produced by [`projection_series`].
#[derive(Debug, Clone)]
pub struct ProjectionSeries {
    value: f64,
    monthly_amount: f64,
    monthly_return: f64,
    month: u32,
    months_remaining: u32,
}

impl Iterator for ProjectionSeries {
    type Item = ProjectionPoint;

    fn next(&mut self) -> Option<ProjectionPoint> {
        if self.month > self.months_remaining {
            return None;
        }
        let point = ProjectionPoint {
            month: self.month,
            projected_value: self.value,
        };
        if self.month < self.months_remaining {
            self.value = (self.value + self.monthly_amount) * (1.0 + self.monthly_return);
        }
        self.month += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.months_remaining + 1).saturating_sub(self.month) as usize;
        (left, Some(left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_moderate_two_year_plan() {
        // 500 000 over 24 months at 12% annual with a 35 000 surplus.
        let plan = compute_contribution_schedule(500_000.0, 0.0, 24, RiskProfile::Moderate, 35_000.0);

        assert_eq!(plan.monthly_amount.round(), 18_537.0);
        assert_eq!(plan.daily_amount.round(), 618.0);
        assert!(plan.is_feasible);
        let pct = plan.surplus_percentage.unwrap();
        assert!(pct > 52.0 && pct < 54.0, "surplus percentage was {pct}");
    }

    #[test]
    fn test_infeasible_when_over_surplus_threshold() {
        // Same goal but a 20 000 surplus: 18 537 > 0.8 * 20 000.
        let plan = compute_contribution_schedule(500_000.0, 0.0, 24, RiskProfile::Moderate, 20_000.0);
        assert!(!plan.is_feasible);
        assert!(plan.surplus_percentage.unwrap() > 90.0);
    }

    #[test]
    fn test_degenerate_horizon_pays_remaining_in_full() {
        let plan = compute_contribution_schedule(500_000.0, 120_000.0, 0, RiskProfile::Moderate, 35_000.0);
        assert_eq!(plan.monthly_amount, 380_000.0);
        assert_eq!(plan.daily_amount, 380_000.0 / 30.0);

        let negative = compute_contribution_schedule(500_000.0, 120_000.0, -3, RiskProfile::Moderate, 35_000.0);
        assert_eq!(negative.monthly_amount, 380_000.0);
    }

    #[test]
    fn test_already_funded_goal_requires_nothing() {
        let plan = compute_contribution_schedule(500_000.0, 600_000.0, 24, RiskProfile::Moderate, 35_000.0);
        assert_eq!(plan.monthly_amount, 0.0);
        assert_eq!(plan.daily_amount, 0.0);
        assert!(plan.is_feasible);
        assert_eq!(plan.surplus_percentage, Some(0.0));
    }

    #[test]
    fn test_no_surplus_is_infeasible_without_ratio() {
        let zero = compute_contribution_schedule(500_000.0, 0.0, 24, RiskProfile::Moderate, 0.0);
        assert!(!zero.is_feasible);
        assert_eq!(zero.surplus_percentage, None);

        let negative = compute_contribution_schedule(500_000.0, 0.0, 24, RiskProfile::Moderate, -5_000.0);
        assert!(!negative.is_feasible);
        assert_eq!(negative.surplus_percentage, None);
    }

    #[test]
    fn test_higher_risk_lowers_required_contribution() {
        let conservative =
            compute_contribution_schedule(500_000.0, 0.0, 24, RiskProfile::Conservative, 35_000.0);
        let aggressive =
            compute_contribution_schedule(500_000.0, 0.0, 24, RiskProfile::Aggressive, 35_000.0);
        assert!(aggressive.monthly_amount < conservative.monthly_amount);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(category_of(1), GoalCategory::Short);
        assert_eq!(category_of(24), GoalCategory::Short);
        assert_eq!(category_of(25), GoalCategory::Medium);
        assert_eq!(category_of(48), GoalCategory::Medium);
        assert_eq!(category_of(49), GoalCategory::Long);
        assert_eq!(category_of(120), GoalCategory::Long);
    }

    #[test]
    fn test_horizon_months() {
        let now = Utc::now();
        assert_eq!(horizon_months(now + Duration::days(720), now), 24);
        assert_eq!(horizon_months(now + Duration::days(30), now), 1);
        // 31 whole days spill into a second 30-day month.
        assert_eq!(horizon_months(now + Duration::days(31), now), 2);
        // Partial days round up before the division.
        assert_eq!(horizon_months(now + Duration::hours(12), now), 1);
        assert_eq!(horizon_months(now - Duration::days(10), now), 0);
        assert_eq!(horizon_months(now, now), 0);
    }

    #[test]
    fn test_projection_series_length_and_first_point() {
        let points: Vec<_> = projection_series(10_000.0, 1_000.0, 24, 0.01).collect();
        assert_eq!(points.len(), 25);
        assert_eq!(points[0].month, 0);
        assert_eq!(points[0].projected_value, 10_000.0);
        assert_eq!(points[24].month, 24);
    }

    #[test]
    fn test_projection_contribution_then_growth() {
        let points: Vec<_> = projection_series(1_000.0, 100.0, 2, 0.01).collect();
        // Month 1: (1000 + 100) * 1.01
        assert!((points[1].projected_value - 1_111.0).abs() < 1e-9);
        // Month 2: (1111 + 100) * 1.01
        assert!((points[2].projected_value - 1_223.11).abs() < 1e-9);
    }

    #[test]
    fn test_projection_zero_months_is_single_point() {
        let points: Vec<_> = projection_series(5_000.0, 1_000.0, 0, 0.01).collect();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].projected_value, 5_000.0);
    }

    #[test]
    fn test_projection_is_restartable() {
        let series = projection_series(1_000.0, 100.0, 12, 0.01);
        let first: Vec<_> = series.clone().collect();
        let second: Vec<_> = series.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_projection_with_planned_contribution_reaches_target() {
        // The plan assumes end-of-month contributions while the projection
        // credits growth in the contribution month, so projecting the
        // planned amount lands exactly one month of growth above target.
        let plan = compute_contribution_schedule(500_000.0, 0.0, 24, RiskProfile::Moderate, 35_000.0);
        let last = projection_series(0.0, plan.monthly_amount, 24, RiskProfile::Moderate.monthly_return())
            .last()
            .unwrap();
        assert!((last.projected_value - 505_000.0).abs() < 1e-6);
    }
}
