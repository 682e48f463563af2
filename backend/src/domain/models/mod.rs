//! Domain models for the finbuddy backend.

pub mod goal;
pub mod profile;
