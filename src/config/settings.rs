//! Run settings
//!
//! The knobs the engine consumes, stored as a JSON file. Every field has a
//! default, so a missing or partial file always yields a usable
//! configuration. Workbook layout that is fixed by convention (column
//! positions, the data-region width) is not configurable here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

/// User-facing settings for a synchronization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Name of the control tab listing the zones
    #[serde(default = "default_control_tab")]
    pub control_tab: String,

    /// Header rows to skip at the top of the control tab
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,

    /// Rewrite each zone's campaign listing before applying budgets
    #[serde(default = "default_true")]
    pub inventory_refresh: bool,

    /// Record every confirmed budget change on the ledger tab
    #[serde(default = "default_true")]
    pub ledger_enabled: bool,

    /// Name of the ledger tab
    #[serde(default = "default_ledger_tab")]
    pub ledger_tab: String,

    /// Regular expression campaigns must match to be listed or updated
    #[serde(default = "default_filter")]
    pub campaign_name_filter: String,

    /// Debug-level reporting
    #[serde(default)]
    pub verbose: bool,
}

fn default_control_tab() -> String {
    "KeySheet".to_string()
}

fn default_header_rows() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_ledger_tab() -> String {
    "BudgetHistory".to_string()
}

fn default_filter() -> String {
    ".*".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_tab: default_control_tab(),
            header_rows: default_header_rows(),
            inventory_refresh: true,
            ledger_enabled: true,
            ledger_tab: default_ledger_tab(),
            campaign_name_filter: default_filter(),
            verbose: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults when the file does
    /// not exist yet
    pub fn load_or_create(path: &Path) -> SyncResult<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| SyncError::Io(format!("Failed to read settings file: {}", e)))?;
            serde_json::from_str(&contents)
                .map_err(|e| SyncError::Config(format!("Failed to parse settings file: {}", e)))
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, path: &Path) -> SyncResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SyncError::Io(format!("Failed to create config directory: {}", e)))?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SyncError::Config(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(path, contents)
            .map_err(|e| SyncError::Io(format!("Failed to write settings file: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.control_tab, "KeySheet");
        assert_eq!(settings.header_rows, 1);
        assert!(settings.inventory_refresh);
        assert!(settings.ledger_enabled);
        assert_eq!(settings.ledger_tab, "BudgetHistory");
        assert_eq!(settings.campaign_name_filter, ".*");
        assert!(!settings.verbose);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_or_create(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(settings.control_tab, "KeySheet");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");

        let mut settings = Settings::default();
        settings.campaign_name_filter = "^Brand".to_string();
        settings.inventory_refresh = false;
        settings.save(&path).unwrap();

        let loaded = Settings::load_or_create(&path).unwrap();
        assert_eq!(loaded.campaign_name_filter, "^Brand");
        assert!(!loaded.inventory_refresh);
    }

    #[test]
    fn test_partial_file_uses_defaults_for_the_rest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"ledger_tab": "Changes"}"#).unwrap();

        let loaded = Settings::load_or_create(&path).unwrap();
        assert_eq!(loaded.ledger_tab, "Changes");
        assert_eq!(loaded.control_tab, "KeySheet");
        assert!(loaded.ledger_enabled);
    }

    #[test]
    fn test_garbage_file_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Settings::load_or_create(&path),
            Err(SyncError::Config(_))
        ));
    }
}
