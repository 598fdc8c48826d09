//! Error types for the budget synchronization engine
//!
//! The taxonomy mirrors the blast radius of a failure: `SyncError` covers
//! fatal and infrastructure errors that abort the run, `ZoneError` covers
//! failures that abandon a single zone while the run continues. Row-level
//! outcomes are not errors at all; see `services::reconciler::RowOutcome`.

use thiserror::Error;

/// The main error type for budgetsync operations
#[derive(Error, Debug)]
pub enum SyncError {
    /// The control tab is missing from the workbook. This is the single
    /// condition that aborts an entire run.
    #[error("Control tab '{0}' not found in the workbook")]
    ControlTabMissing(String),

    /// A named tab does not exist in the store
    #[error("Tab '{0}' not found")]
    TabNotFound(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The campaign-name filter does not compile
    #[error("Invalid campaign name filter '{pattern}': {reason}")]
    Filter { pattern: String, reason: String },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Workbook/snapshot persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Ledger export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl SyncError {
    /// Check if this error aborts the whole run when raised by the engine
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ControlTabMissing(_))
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for budgetsync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Failures that abandon one zone and let the run continue
///
/// These are reported against the zone and never propagate across the zone
/// boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneError {
    /// The zone's data tab does not exist
    #[error("data tab '{0}' not found")]
    TabNotFound(String),

    /// The anchor cell reference does not parse
    #[error("invalid anchor cell reference '{0}'")]
    InvalidAnchor(String),

    /// The account directory has no match for the configured id
    #[error("no account matches id '{0}'")]
    AccountNotFound(String),

    /// The data region could not be read
    #[error("failed to read data region: {0}")]
    Region(String),
}
