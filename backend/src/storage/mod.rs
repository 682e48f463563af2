//! Storage layer: abstraction traits plus the file-based implementation.

pub mod csv;
pub mod traits;

pub use traits::{GoalStorage, ProfileStorage};
