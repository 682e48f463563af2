//! # FinBuddy Backend
//!
//! Goal-planning core for the finbuddy personal finance app. This crate
//! owns the domain logic and file storage and nothing else:
//! - Synchronous operations (no async/await)
//! - Direct access to domain services through [`Backend`]
//! - No network or UI surface; frontends call the services directly
//!
//! Amounts are unitless decimals; currency formatting belongs to the
//! presentation layer.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod storage;

// Re-export commonly used types
pub use storage::csv::CsvConnection;

/// Main backend struct that orchestrates all services
pub struct Backend {
    pub profile_service: domain::ProfileService,
    pub streak_service: domain::StreakService,
    pub goal_service: domain::GoalService,
}

impl Backend {
    /// Create a new backend instance with all services rooted at `data_dir`
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let csv_conn = Arc::new(CsvConnection::new(data_dir)?);

        let profile_service = domain::ProfileService::new(csv_conn.clone());
        let streak_service = domain::StreakService::new(csv_conn.clone());
        let goal_service = domain::GoalService::new(
            csv_conn,
            profile_service.clone(),
            streak_service.clone(),
        );

        Ok(Backend {
            profile_service,
            streak_service,
            goal_service,
        })
    }
}
