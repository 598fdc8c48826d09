//! Path management
//!
//! Resolves where the settings file lives when no explicit path is given.
//!
//! ## Resolution order
//!
//! 1. `BUDGETSYNC_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory via `directories`
//!    (`~/.config/budgetsync` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{SyncError, SyncResult};

/// Manages the configuration directory
#[derive(Debug, Clone)]
pub struct AppPaths {
    base_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> SyncResult<Self> {
        let base_dir = if let Ok(custom) = std::env::var("BUDGETSYNC_CONFIG_DIR") {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "budgetsync")
                .ok_or_else(|| {
                    SyncError::Config("Could not determine a home directory".to_string())
                })?
                .config_dir()
                .to_path_buf()
        };
        Ok(Self { base_dir })
    }

    /// Use a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Path of the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }
}
