//! Domain layer: models, pure financial math, and the services that
//! orchestrate them over storage.

pub mod commands;
pub mod finance;
pub mod goal_service;
pub mod models;
pub mod profile_service;
pub mod streak_service;

pub use goal_service::GoalService;
pub use profile_service::ProfileService;
pub use streak_service::StreakService;
