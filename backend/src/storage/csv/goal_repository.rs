use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::sync::Arc;

use crate::domain::models::goal::DomainGoal;
use crate::storage::traits::GoalStorage;
use super::connection::CsvConnection;

/// Flat CSV row representation of a goal with string date fields
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GoalRecord {
    id: String,
    user_id: String,
    name: String,
    emoji: String,
    target_amount: f64,
    current_amount: f64,
    target_date: String, // RFC 3339 for CSV
    category: String,
    daily_amount: f64,
    monthly_amount: f64,
    is_active: bool,
    created_at: String, // RFC 3339 for CSV
}

impl From<&DomainGoal> for GoalRecord {
    fn from(goal: &DomainGoal) -> Self {
        GoalRecord {
            id: goal.id.clone(),
            user_id: goal.user_id.clone(),
            name: goal.name.clone(),
            emoji: goal.emoji.clone(),
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            target_date: goal.target_date.to_rfc3339(),
            category: goal.category.to_string(),
            daily_amount: goal.daily_amount,
            monthly_amount: goal.monthly_amount,
            is_active: goal.is_active,
            created_at: goal.created_at.to_rfc3339(),
        }
    }
}

impl TryFrom<GoalRecord> for DomainGoal {
    type Error = anyhow::Error;

    fn try_from(record: GoalRecord) -> Result<Self> {
        shared::parse_goal_id(&record.id)
            .map_err(|e| anyhow::anyhow!("Invalid goal ID {:?}: {}", record.id, e))?;
        Ok(DomainGoal {
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            emoji: record.emoji,
            target_amount: record.target_amount,
            current_amount: record.current_amount,
            target_date: chrono::DateTime::parse_from_rfc3339(&record.target_date)
                .map_err(|e| anyhow::anyhow!("Failed to parse target_date: {}", e))?
                .with_timezone(&chrono::Utc),
            category: shared::GoalCategory::from_string(&record.category)
                .map_err(|e| anyhow::anyhow!("Failed to parse category: {}", e))?,
            daily_amount: record.daily_amount,
            monthly_amount: record.monthly_amount,
            is_active: record.is_active,
            created_at: chrono::DateTime::parse_from_rfc3339(&record.created_at)
                .map_err(|e| anyhow::anyhow!("Failed to parse created_at: {}", e))?
                .with_timezone(&chrono::Utc),
        })
    }
}

/// A CSV-based repository for storing and retrieving goals.
#[derive(Clone)]
pub struct GoalRepository {
    connection: Arc<CsvConnection>,
}

impl GoalRepository {
    /// Create a new goal repository
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }

    fn read_goals(&self) -> Result<Vec<DomainGoal>> {
        let file_path = self.connection.goals_file_path();
        if !file_path.exists() {
            debug!("No goals file at {:?}", file_path);
            return Ok(Vec::new());
        }

        let mut rdr = csv::Reader::from_path(&file_path)
            .with_context(|| format!("Failed to open goals file {:?}", file_path))?;
        let mut goals = Vec::new();
        for result in rdr.deserialize() {
            let record: GoalRecord = result.context("Failed to parse goal record")?;
            goals.push(DomainGoal::try_from(record)?);
        }
        Ok(goals)
    }

    fn write_goals(&self, goals: &[DomainGoal]) -> Result<()> {
        let file_path = self.connection.goals_file_path();

        // Atomic rewrite through a temp file
        let temp_path = file_path.with_extension("tmp");
        {
            let mut wtr = csv::Writer::from_path(&temp_path)
                .with_context(|| format!("Failed to create goals file {:?}", temp_path))?;
            for goal in goals {
                wtr.serialize(GoalRecord::from(goal))?;
            }
            wtr.flush()?;
        }
        fs::rename(&temp_path, &file_path)?;

        debug!("Wrote {} goals to {:?}", goals.len(), file_path);
        Ok(())
    }
}

impl GoalStorage for GoalRepository {
    fn store_goal(&self, goal: &DomainGoal) -> Result<()> {
        let mut goals = self.read_goals()?;
        goals.push(goal.clone());
        self.write_goals(&goals)?;
        info!("Stored goal {} ({})", goal.name, goal.id);
        Ok(())
    }

    fn get_goal(&self, goal_id: &str) -> Result<Option<DomainGoal>> {
        let goals = self.read_goals()?;
        Ok(goals.into_iter().find(|g| g.id == goal_id))
    }

    fn list_goals(&self) -> Result<Vec<DomainGoal>> {
        self.read_goals()
    }

    fn update_goal(&self, goal: &DomainGoal) -> Result<()> {
        let mut goals = self.read_goals()?;
        match goals.iter_mut().find(|g| g.id == goal.id) {
            Some(g) => *g = goal.clone(),
            None => {
                warn!("Attempted to update a non-existent goal: {}", goal.id);
                return Err(anyhow::anyhow!("Goal not found for update: {}", goal.id));
            }
        }
        self.write_goals(&goals)
    }

    fn delete_goal(&self, goal_id: &str) -> Result<bool> {
        let mut goals = self.read_goals()?;
        let before = goals.len();
        goals.retain(|g| g.id != goal_id);
        if goals.len() == before {
            return Ok(false);
        }
        self.write_goals(&goals)?;
        info!("Deleted goal {}", goal_id);
        Ok(true)
    }

    fn save_goals(&self, goals: &[DomainGoal]) -> Result<()> {
        self.write_goals(goals)
    }
}
