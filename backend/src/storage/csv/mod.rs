//! # CSV/YAML Storage Module
//!
//! File-based storage for the finbuddy backend. The single profile lives in
//! `profile.yaml`; the goal collection lives in `goals.csv` and is rewritten
//! whole through a temp file on every change, preserving insertion order.
//!
//! ## File Format
//!
//! ```csv
//! id,user_id,name,emoji,target_amount,current_amount,target_date,category,daily_amount,monthly_amount,is_active,created_at
//! goal::1702516122000,profile::1702516120000,Foreign Trip,✈️,500000.0,0.0,2027-12-14T01:08:42+00:00,short,618.0,18537.0,true,2025-12-14T01:08:42+00:00
//! ```

pub mod connection;
pub mod goal_repository;
pub mod profile_repository;

pub use connection::CsvConnection;
pub use goal_repository::GoalRepository;
pub use profile_repository::ProfileRepository;
