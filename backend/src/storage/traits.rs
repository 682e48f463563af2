//! # Storage Traits
//!
//! Storage abstraction traits that let the domain layer work with different
//! backends without modification. The CSV/YAML file implementation under
//! `csv/` is the one shipped here; all operations are synchronous.

use anyhow::Result;
use crate::domain::models::goal::DomainGoal;
use crate::domain::models::profile::DomainProfile;

/// Trait defining the interface for profile storage operations
///
/// There is at most one profile; loading when none has been saved yet
/// returns `Ok(None)`.
pub trait ProfileStorage: Send + Sync {
    /// Load the profile, if one exists
    fn load_profile(&self) -> Result<Option<DomainProfile>>;

    /// Store the profile, replacing any existing record
    fn save_profile(&self, profile: &DomainProfile) -> Result<()>;
}

/// Trait defining the interface for goal storage operations
///
/// The goal collection is ordered; implementations must preserve insertion
/// order across rewrites.
pub trait GoalStorage: Send + Sync {
    /// Store a new goal at the end of the collection
    fn store_goal(&self, goal: &DomainGoal) -> Result<()>;

    /// Retrieve a specific goal by ID
    fn get_goal(&self, goal_id: &str) -> Result<Option<DomainGoal>>;

    /// List all goals in insertion order
    fn list_goals(&self) -> Result<Vec<DomainGoal>>;

    /// Update an existing goal in place
    fn update_goal(&self, goal: &DomainGoal) -> Result<()>;

    /// Delete a goal by ID
    /// Returns true if the goal was found and deleted, false otherwise
    fn delete_goal(&self, goal_id: &str) -> Result<bool>;

    /// Replace the whole collection in one write
    fn save_goals(&self, goals: &[DomainGoal]) -> Result<()>;
}
