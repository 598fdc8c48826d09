//! CSV export of the change ledger
//!
//! Writes the same seven columns as the ledger tab, so an exported file can
//! be diffed against the workbook.

use std::path::Path;

use crate::audit::{LedgerEntry, LEDGER_HEADER};
use crate::error::{SyncError, SyncResult};

/// Write all entries to a CSV file, header first
pub fn export_ledger(entries: &[LedgerEntry], path: &Path) -> SyncResult<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| SyncError::Export(format!("Failed to create {}: {}", path.display(), e)))?;

    writer
        .write_record(LEDGER_HEADER)
        .map_err(|e| SyncError::Export(format!("Failed to write header: {}", e)))?;
    for entry in entries {
        writer
            .write_record(entry.to_row())
            .map_err(|e| SyncError::Export(format!("Failed to write entry: {}", e)))?;
    }
    writer
        .flush()
        .map_err(|e| SyncError::Export(format!("Failed to flush: {}", e)))?;
    Ok(())
}
