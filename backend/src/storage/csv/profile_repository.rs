use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::sync::Arc;

use crate::domain::models::profile::DomainProfile;
use crate::storage::traits::ProfileStorage;
use super::connection::CsvConnection;

/// Intermediate struct for YAML serialization with string date fields
#[derive(Debug, Clone, Serialize, Deserialize)]
struct YamlProfile {
    id: String,
    name: String,
    monthly_income: f64,
    monthly_expenses: f64,
    risk_profile: String,
    streak_days: u32,
    last_check_in: String, // RFC 3339 for YAML
    created_at: String,    // RFC 3339 for YAML
}

impl From<&DomainProfile> for YamlProfile {
    fn from(profile: &DomainProfile) -> Self {
        YamlProfile {
            id: profile.id.clone(),
            name: profile.name.clone(),
            monthly_income: profile.monthly_income,
            monthly_expenses: profile.monthly_expenses,
            risk_profile: profile.risk_profile.to_string(),
            streak_days: profile.streak_days,
            last_check_in: profile.last_check_in.to_rfc3339(),
            created_at: profile.created_at.to_rfc3339(),
        }
    }
}

impl TryFrom<YamlProfile> for DomainProfile {
    type Error = anyhow::Error;

    fn try_from(yaml: YamlProfile) -> Result<Self> {
        shared::parse_profile_id(&yaml.id)
            .map_err(|e| anyhow::anyhow!("Invalid profile ID {:?}: {}", yaml.id, e))?;
        Ok(DomainProfile {
            id: yaml.id,
            name: yaml.name,
            monthly_income: yaml.monthly_income,
            monthly_expenses: yaml.monthly_expenses,
            risk_profile: shared::RiskProfile::from_string(&yaml.risk_profile)
                .map_err(|e| anyhow::anyhow!("Failed to parse risk profile: {}", e))?,
            streak_days: yaml.streak_days,
            last_check_in: chrono::DateTime::parse_from_rfc3339(&yaml.last_check_in)
                .map_err(|e| anyhow::anyhow!("Failed to parse last_check_in: {}", e))?
                .with_timezone(&chrono::Utc),
            created_at: chrono::DateTime::parse_from_rfc3339(&yaml.created_at)
                .map_err(|e| anyhow::anyhow!("Failed to parse created_at: {}", e))?
                .with_timezone(&chrono::Utc),
        })
    }
}

/// YAML-backed single-record profile repository
#[derive(Clone)]
pub struct ProfileRepository {
    connection: Arc<CsvConnection>,
}

impl ProfileRepository {
    /// Create a new profile repository
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }
}

impl ProfileStorage for ProfileRepository {
    fn load_profile(&self) -> Result<Option<DomainProfile>> {
        let yaml_path = self.connection.profile_file_path();

        if !yaml_path.exists() {
            debug!("No profile file at {:?}", yaml_path);
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(&yaml_path)
            .with_context(|| format!("Failed to read profile file {:?}", yaml_path))?;
        let yaml_profile: YamlProfile = serde_yaml::from_str(&yaml_content)
            .context("Failed to parse profile YAML")?;

        Ok(Some(DomainProfile::try_from(yaml_profile)?))
    }

    fn save_profile(&self, profile: &DomainProfile) -> Result<()> {
        let yaml_path = self.connection.profile_file_path();
        let yaml_profile = YamlProfile::from(profile);
        let yaml_content = serde_yaml::to_string(&yaml_profile)
            .context("Failed to serialize profile to YAML")?;

        // Atomic write using temp file
        let temp_path = yaml_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)
            .with_context(|| format!("Failed to write profile file {:?}", temp_path))?;
        fs::rename(&temp_path, &yaml_path)?;

        info!("Saved profile {} ({})", profile.name, profile.id);
        Ok(())
    }
}
