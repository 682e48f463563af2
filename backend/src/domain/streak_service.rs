//! Engagement streak state machine.
//!
//! The streak lives on the profile as `(streak_days, last_check_in)` and
//! moves through exactly two named transitions:
//!
//! - **explicit check-in** (the daily check-in flow): a same-day repeat
//!   leaves the streak count alone but still refreshes `last_check_in`;
//!   exactly one elapsed day extends the streak; a longer gap resets it
//!   to 1.
//! - **contribution check-in** (triggered by adding money to a goal):
//!   gated on at least one elapsed day. A same-day contribution is a full
//!   no-op on both fields.
//!
//! The two transitions deliberately disagree on the same-day case and are
//! not unified. Day distance is whole elapsed days between the two
//! timestamps, not calendar dates.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::sync::Arc;

use crate::domain::commands::checkin::{CheckInCommand, CheckInResult, StreakUpdate};
use crate::domain::models::profile::{DomainProfile, ProfileNotFound};
use crate::storage::csv::{CsvConnection, ProfileRepository};
use crate::storage::ProfileStorage;

/// Streak length divisor for the weekly reward signal.
const WEEKLY_MILESTONE_DAYS: u32 = 7;

/// Whole days elapsed since the profile's last qualifying event.
pub fn days_since_last_check_in(profile: &DomainProfile, now: DateTime<Utc>) -> i64 {
    (now - profile.last_check_in).num_days()
}

/// Apply the explicit daily check-in transition.
pub fn apply_explicit_check_in(profile: &mut DomainProfile, now: DateTime<Utc>) {
    let days = days_since_last_check_in(profile, now);
    profile.streak_days = match days {
        0 => profile.streak_days,
        1 => profile.streak_days + 1,
        _ => 1,
    };
    // Refreshed even on a same-day repeat.
    profile.last_check_in = now;
}

/// Apply the contribution-triggered transition.
///
/// Returns false when the gate (at least one elapsed day) is not met; the
/// profile is untouched in that case.
pub fn apply_contribution_check_in(profile: &mut DomainProfile, now: DateTime<Utc>) -> bool {
    let days = days_since_last_check_in(profile, now);
    if days < 1 {
        return false;
    }
    profile.streak_days = if days == 1 { profile.streak_days + 1 } else { 1 };
    profile.last_check_in = now;
    true
}

/// Whether a streak length triggers the weekly reward signal.
///
/// Fires on every multiple of seven, including a streak of 0 (reachable
/// through a same-day first check-in). Suppressing the zero case is the
/// presentation layer's call, not made here.
pub fn is_weekly_milestone(streak_days: u32) -> bool {
    streak_days % WEEKLY_MILESTONE_DAYS == 0
}

/// Service owning streak transitions over the persisted profile
#[derive(Clone)]
pub struct StreakService {
    profile_repository: ProfileRepository,
}

impl StreakService {
    /// Create a new StreakService
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        Self {
            profile_repository: ProfileRepository::new(csv_conn),
        }
    }

    /// Record an explicit daily check-in
    pub fn check_in(&self, command: CheckInCommand) -> Result<CheckInResult> {
        let mut profile = self
            .profile_repository
            .load_profile()?
            .ok_or_else(|| anyhow::Error::new(ProfileNotFound))?;

        let now = Utc::now();
        apply_explicit_check_in(&mut profile, now);
        self.profile_repository.save_profile(&profile)?;

        let streak = StreakUpdate {
            streak_days: profile.streak_days,
            weekly_milestone: is_weekly_milestone(profile.streak_days),
        };
        info!(
            "Check-in recorded: streak {} days, amount saved {}",
            streak.streak_days, command.amount_saved
        );

        Ok(CheckInResult {
            profile,
            amount_saved: command.amount_saved,
            streak,
        })
    }

    /// Record the streak effect of a goal contribution, if any
    pub fn record_contribution(&self) -> Result<Option<StreakUpdate>> {
        let mut profile = self
            .profile_repository
            .load_profile()?
            .ok_or_else(|| anyhow::Error::new(ProfileNotFound))?;

        let now = Utc::now();
        if !apply_contribution_check_in(&mut profile, now) {
            debug!("Same-day contribution, streak untouched");
            return Ok(None);
        }
        self.profile_repository.save_profile(&profile)?;

        Ok(Some(StreakUpdate {
            streak_days: profile.streak_days,
            weekly_milestone: is_weekly_milestone(profile.streak_days),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::RiskProfile;
    use tempfile::TempDir;

    fn profile_with_streak(streak_days: u32, last_check_in: DateTime<Utc>) -> DomainProfile {
        DomainProfile {
            id: shared::generate_profile_id(1702516122000),
            name: "Asha".to_string(),
            monthly_income: 60_000.0,
            monthly_expenses: 25_000.0,
            risk_profile: RiskProfile::Moderate,
            streak_days,
            last_check_in,
            created_at: last_check_in,
        }
    }

    #[test]
    fn test_explicit_check_in_transition_table() {
        let now = Utc::now();

        // 0 days since: streak unchanged, timestamp refreshed anyway
        let mut profile = profile_with_streak(5, now - Duration::hours(5));
        apply_explicit_check_in(&mut profile, now);
        assert_eq!(profile.streak_days, 5);
        assert_eq!(profile.last_check_in, now);

        // 1 day since: streak extends
        let mut profile = profile_with_streak(5, now - Duration::days(1));
        apply_explicit_check_in(&mut profile, now);
        assert_eq!(profile.streak_days, 6);

        // 3 days since: streak resets to 1
        let mut profile = profile_with_streak(10, now - Duration::days(3));
        apply_explicit_check_in(&mut profile, now);
        assert_eq!(profile.streak_days, 1);
        assert_eq!(profile.last_check_in, now);
    }

    #[test]
    fn test_day_distance_is_elapsed_time_not_calendar() {
        let now = Utc::now();
        // 25 hours ago is exactly one whole elapsed day
        let mut profile = profile_with_streak(2, now - Duration::hours(25));
        apply_explicit_check_in(&mut profile, now);
        assert_eq!(profile.streak_days, 3);

        // 23 hours ago is zero whole days even across midnight
        let mut profile = profile_with_streak(2, now - Duration::hours(23));
        apply_explicit_check_in(&mut profile, now);
        assert_eq!(profile.streak_days, 2);
    }

    #[test]
    fn test_contribution_check_in_same_day_is_a_full_noop() {
        let now = Utc::now();
        let last = now - Duration::hours(5);
        let mut profile = profile_with_streak(4, last);

        assert!(!apply_contribution_check_in(&mut profile, now));
        assert_eq!(profile.streak_days, 4);
        // Unlike the explicit path, the timestamp is not refreshed
        assert_eq!(profile.last_check_in, last);
    }

    #[test]
    fn test_contribution_check_in_extends_and_resets() {
        let now = Utc::now();

        let mut profile = profile_with_streak(4, now - Duration::days(1));
        assert!(apply_contribution_check_in(&mut profile, now));
        assert_eq!(profile.streak_days, 5);
        assert_eq!(profile.last_check_in, now);

        let mut profile = profile_with_streak(4, now - Duration::days(10));
        assert!(apply_contribution_check_in(&mut profile, now));
        assert_eq!(profile.streak_days, 1);
    }

    #[test]
    fn test_same_day_gate_discrepancy_between_paths() {
        let now = Utc::now();
        let last = now - Duration::hours(2);

        let mut explicit = profile_with_streak(3, last);
        apply_explicit_check_in(&mut explicit, now);

        let mut contribution = profile_with_streak(3, last);
        let moved = apply_contribution_check_in(&mut contribution, now);

        // Same starting state, same instant: the explicit path refreshes
        // the timestamp, the contribution path does nothing at all.
        assert!(!moved);
        assert_eq!(explicit.last_check_in, now);
        assert_eq!(contribution.last_check_in, last);
        assert_eq!(explicit.streak_days, contribution.streak_days);
    }

    #[test]
    fn test_weekly_milestone() {
        assert!(is_weekly_milestone(0));
        assert!(!is_weekly_milestone(6));
        assert!(is_weekly_milestone(7));
        assert!(!is_weekly_milestone(8));
        assert!(is_weekly_milestone(14));
    }

    #[test]
    fn test_same_day_first_check_in_signals_at_zero_streak() {
        let now = Utc::now();
        // Fresh profile: streak 0, last_check_in stamped within the day
        let mut profile = profile_with_streak(0, now - Duration::hours(1));
        apply_explicit_check_in(&mut profile, now);

        assert_eq!(profile.streak_days, 0);
        assert!(is_weekly_milestone(profile.streak_days));
    }

    fn setup_test_service() -> (StreakService, ProfileRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let csv_conn = Arc::new(CsvConnection::new(temp_dir.path()).unwrap());
        let service = StreakService::new(csv_conn.clone());
        let repo = ProfileRepository::new(csv_conn);
        (service, repo, temp_dir)
    }

    #[test]
    fn test_check_in_without_profile_fails() {
        let (service, _repo, _temp_dir) = setup_test_service();
        let err = service.check_in(CheckInCommand { amount_saved: 500.0 }).unwrap_err();
        assert!(err.downcast_ref::<ProfileNotFound>().is_some());
    }

    #[test]
    fn test_check_in_persists_streak() {
        let (service, repo, _temp_dir) = setup_test_service();
        let yesterday = Utc::now() - Duration::days(1);
        repo.save_profile(&profile_with_streak(6, yesterday)).unwrap();

        let result = service.check_in(CheckInCommand { amount_saved: 500.0 }).unwrap();
        assert_eq!(result.streak.streak_days, 7);
        assert!(result.streak.weekly_milestone);
        assert_eq!(result.amount_saved, 500.0);

        let stored = repo.load_profile().unwrap().unwrap();
        assert_eq!(stored.streak_days, 7);
        assert!(stored.last_check_in > yesterday);
    }

    #[test]
    fn test_record_contribution_same_day_persists_nothing() {
        let (service, repo, _temp_dir) = setup_test_service();
        let earlier_today = Utc::now() - Duration::hours(3);
        let profile = profile_with_streak(4, earlier_today);
        repo.save_profile(&profile).unwrap();

        assert!(service.record_contribution().unwrap().is_none());
        let stored = repo.load_profile().unwrap().unwrap();
        assert_eq!(stored.streak_days, 4);
        assert_eq!(stored.last_check_in, profile.last_check_in);
    }

    #[test]
    fn test_record_contribution_next_day_extends() {
        let (service, repo, _temp_dir) = setup_test_service();
        repo.save_profile(&profile_with_streak(4, Utc::now() - Duration::days(1)))
            .unwrap();

        let update = service.record_contribution().unwrap().unwrap();
        assert_eq!(update.streak_days, 5);
        assert!(!update.weekly_milestone);
        assert_eq!(repo.load_profile().unwrap().unwrap().streak_days, 5);
    }
}
