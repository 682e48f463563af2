use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// CsvConnection manages the data directory and the file paths inside it.
///
/// One connection is shared (via `Arc`) by every repository so that all of
/// them agree on where the data lives.
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new connection with a base directory, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// The data directory this connection points at
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the single-profile YAML file
    pub fn profile_file_path(&self) -> PathBuf {
        self.base_directory.join("profile.yaml")
    }

    /// Path of the goal collection CSV file
    pub fn goals_file_path(&self) -> PathBuf {
        self.base_directory.join("goals.csv")
    }
}
