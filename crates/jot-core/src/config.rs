//! Storage location configuration.
//!
//! The host platform supplies the base directory at runtime. Resolution
//! order: explicit value, `JOT_DATA_DIR`, the platform data directory, then
//! the current directory.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "JOT_DATA_DIR";

/// Default database file name
pub const DEFAULT_FILE_NAME: &str = "jot.db";

const APP_DIR_NAME: &str = "jot";

/// Where the note database lives on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Base directory holding the database file
    pub data_dir: PathBuf,
    /// Database file name inside `data_dir`
    pub file_name: String,
}

impl StoreConfig {
    /// Use an explicit data directory with the default file name
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    /// Resolve the data directory from the process environment
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        Self::resolve(explicit, std::env::var_os(DATA_DIR_ENV))
    }

    /// Resolve the data directory from an explicit value and an env value
    pub fn resolve(explicit: Option<PathBuf>, env_value: Option<OsString>) -> Self {
        let from_env = env_value
            .filter(|value| !value.to_string_lossy().trim().is_empty())
            .map(PathBuf::from);

        let data_dir = explicit
            .or(from_env)
            .unwrap_or_else(default_data_dir);

        tracing::debug!("Resolved data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Full path to the database file
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    /// Check whether the database file already exists
    pub fn db_exists(&self) -> bool {
        self.db_path().exists()
    }
}

/// Platform data directory for jot
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .map_or_else(|| PathBuf::from("."), |base| base.join(APP_DIR_NAME))
}
