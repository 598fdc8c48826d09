//! Control-table parsing
//!
//! Turns the raw rows of the control tab into ordered zone entries. The
//! registry never aborts: malformed rows become skip entries with a reason
//! and the engine reports them. Table order is preserved; there is no
//! reordering or prioritization.

use crate::models::zone::status_is_on;
use crate::models::Zone;

/// Control-tab columns, 0-indexed
pub const COL_ZONE_NAME: usize = 0;
pub const COL_ACCOUNT_ID: usize = 1;
pub const COL_TAB_NAME: usize = 2;
pub const COL_STATUS: usize = 3;
pub const COL_ANCHOR: usize = 4;

/// Outcome of parsing one control row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneEntry {
    /// Enabled and complete; ready to process
    Ready(Zone),
    /// Status column is anything other than "on"
    Disabled { name: String, status: String },
    /// Enabled but the account id column is empty. A configuration error,
    /// never fatal to the run.
    MissingAccount { name: String, tab_name: String },
}

/// Parse the control tab into ordered zone entries
///
/// The first `header_rows` rows are skipped. Rows with empty name, tab and
/// anchor are dropped silently.
pub fn parse(rows: &[Vec<String>], header_rows: usize) -> Vec<ZoneEntry> {
    let mut entries = Vec::new();

    for (idx, row) in rows.iter().enumerate().skip(header_rows) {
        let cell = |col: usize| row.get(col).map(|s| s.trim()).unwrap_or("");
        let name = cell(COL_ZONE_NAME);
        let account_id = cell(COL_ACCOUNT_ID);
        let tab_name = cell(COL_TAB_NAME);
        let status = cell(COL_STATUS);
        let anchor = cell(COL_ANCHOR);

        // Entirely empty rows separate groups in real sheets; not worth a report.
        if name.is_empty() && tab_name.is_empty() && anchor.is_empty() {
            continue;
        }

        if !status_is_on(status) {
            entries.push(ZoneEntry::Disabled {
                name: name.to_string(),
                status: status.to_string(),
            });
            continue;
        }

        if account_id.is_empty() {
            entries.push(ZoneEntry::MissingAccount {
                name: name.to_string(),
                tab_name: tab_name.to_string(),
            });
            continue;
        }

        entries.push(ZoneEntry::Ready(Zone {
            name: name.to_string(),
            account_id: account_id.to_string(),
            tab_name: tab_name.to_string(),
            anchor: anchor.to_string(),
            source_row: idx + 1,
        }));
    }

    entries
}
