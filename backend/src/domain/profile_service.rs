//! Profile service domain logic.
//!
//! Handles the quick-assessment lifecycle: creating the single user
//! profile, partial edits, and lookups. Streak fields are initialized here
//! but only ever moved by the streak service.

use anyhow::Result;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::domain::commands::profile::{
    CreateProfileCommand, CreateProfileResult, UpdateProfileCommand, UpdateProfileResult,
};
use crate::domain::models::profile::{DomainProfile, ProfileNotFound, ProfileValidationError};
use crate::storage::csv::{CsvConnection, ProfileRepository};
use crate::storage::ProfileStorage;

/// Service for managing the user profile
#[derive(Clone)]
pub struct ProfileService {
    profile_repository: ProfileRepository,
}

impl ProfileService {
    /// Create a new ProfileService
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        Self {
            profile_repository: ProfileRepository::new(csv_conn),
        }
    }

    /// Create the profile from the assessment answers
    pub fn create_profile(&self, command: CreateProfileCommand) -> Result<CreateProfileResult> {
        info!("Creating profile: {:?}", command);

        Self::validate_name(&command.name)?;
        Self::validate_amounts(command.monthly_income, command.monthly_expenses)?;

        let now = Utc::now();
        let profile = DomainProfile {
            id: shared::generate_profile_id(now.timestamp_millis() as u64),
            name: command.name.trim().to_string(),
            monthly_income: command.monthly_income,
            monthly_expenses: command.monthly_expenses,
            risk_profile: command.risk_profile,
            streak_days: 0,
            last_check_in: now,
            created_at: now,
        };

        self.profile_repository.save_profile(&profile)?;

        Ok(CreateProfileResult { profile })
    }

    /// Apply a partial update to the profile
    pub fn update_profile(&self, command: UpdateProfileCommand) -> Result<UpdateProfileResult> {
        info!("Updating profile: {:?}", command);

        let mut profile = self.require_profile()?;

        if let Some(name) = command.name {
            Self::validate_name(&name)?;
            profile.name = name.trim().to_string();
        }
        if let Some(income) = command.monthly_income {
            profile.monthly_income = income;
        }
        if let Some(expenses) = command.monthly_expenses {
            profile.monthly_expenses = expenses;
        }
        Self::validate_amounts(profile.monthly_income, profile.monthly_expenses)?;
        if let Some(risk_profile) = command.risk_profile {
            profile.risk_profile = risk_profile;
        }

        self.profile_repository.save_profile(&profile)?;

        Ok(UpdateProfileResult { profile })
    }

    /// Get the profile, if one has been created
    pub fn get_profile(&self) -> Result<Option<DomainProfile>> {
        self.profile_repository.load_profile()
    }

    /// Get the profile or fail with `ProfileNotFound`
    pub fn require_profile(&self) -> Result<DomainProfile> {
        self.get_profile()?
            .ok_or_else(|| anyhow::Error::new(ProfileNotFound))
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow::Error::new(ProfileValidationError::EmptyName));
        }
        Ok(())
    }

    fn validate_amounts(income: f64, expenses: f64) -> Result<()> {
        if income < 0.0 {
            return Err(anyhow::Error::new(ProfileValidationError::NegativeIncome));
        }
        if expenses < 0.0 {
            return Err(anyhow::Error::new(ProfileValidationError::NegativeExpenses));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::RiskProfile;
    use tempfile::TempDir;

    fn setup_test_service() -> (ProfileService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let csv_conn = Arc::new(CsvConnection::new(temp_dir.path()).unwrap());
        (ProfileService::new(csv_conn), temp_dir)
    }

    fn create_command() -> CreateProfileCommand {
        CreateProfileCommand {
            name: "Asha".to_string(),
            monthly_income: 60_000.0,
            monthly_expenses: 25_000.0,
            risk_profile: RiskProfile::Moderate,
        }
    }

    #[test]
    fn test_create_profile() {
        let (service, _temp_dir) = setup_test_service();
        let result = service.create_profile(create_command()).unwrap();

        assert_eq!(result.profile.name, "Asha");
        assert_eq!(result.profile.streak_days, 0);
        assert_eq!(result.profile.surplus(), 35_000.0);
        assert!(result.profile.id.starts_with("profile::"));

        let loaded = service.get_profile().unwrap().unwrap();
        assert_eq!(loaded, result.profile);
    }

    #[test]
    fn test_create_profile_validation() {
        let (service, _temp_dir) = setup_test_service();

        let mut command = create_command();
        command.name = "   ".to_string();
        let err = service.create_profile(command).unwrap_err();
        assert!(err.downcast_ref::<ProfileValidationError>().is_some());

        let mut command = create_command();
        command.monthly_income = -1.0;
        assert!(service.create_profile(command).is_err());

        let mut command = create_command();
        command.monthly_expenses = -1.0;
        assert!(service.create_profile(command).is_err());

        // Nothing was persisted
        assert!(service.get_profile().unwrap().is_none());
    }

    #[test]
    fn test_update_profile_partial() {
        let (service, _temp_dir) = setup_test_service();
        let created = service.create_profile(create_command()).unwrap().profile;

        let result = service
            .update_profile(UpdateProfileCommand {
                monthly_expenses: Some(30_000.0),
                risk_profile: Some(RiskProfile::Aggressive),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(result.profile.name, "Asha");
        assert_eq!(result.profile.monthly_expenses, 30_000.0);
        assert_eq!(result.profile.risk_profile, RiskProfile::Aggressive);
        assert_eq!(result.profile.created_at, created.created_at);
    }

    #[test]
    fn test_update_profile_revalidates() {
        let (service, _temp_dir) = setup_test_service();
        service.create_profile(create_command()).unwrap();

        let err = service
            .update_profile(UpdateProfileCommand {
                monthly_income: Some(-100.0),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.downcast_ref::<ProfileValidationError>().is_some());

        // Stored profile untouched
        let loaded = service.get_profile().unwrap().unwrap();
        assert_eq!(loaded.monthly_income, 60_000.0);
    }

    #[test]
    fn test_update_without_profile_fails() {
        let (service, _temp_dir) = setup_test_service();
        let err = service.update_profile(UpdateProfileCommand::default()).unwrap_err();
        assert!(err.downcast_ref::<ProfileNotFound>().is_some());
    }
}
