//! Append-only change ledger
//!
//! The ledger lives on a dedicated workbook tab. The tab is created once
//! with a fixed header row the first time a change must be recorded; after
//! that, entries are only ever appended. Prior rows are never updated or
//! deleted, and there is no deduplication or retention limit here.

use tracing::debug;

use crate::error::SyncResult;
use crate::grid::TableStore;

use super::entry::LedgerEntry;

/// Header row written once when the ledger tab is created
pub const LEDGER_HEADER: [&str; 7] = [
    "Date",
    "Time",
    "Account Name",
    "Account ID",
    "Campaign Name",
    "Campaign ID",
    "Budget Value Set",
];

/// Appends confirmed budget changes to the audit tab
pub struct ChangeLedger {
    tab: String,
}

impl ChangeLedger {
    pub fn new(tab: impl Into<String>) -> Self {
        Self { tab: tab.into() }
    }

    pub fn tab(&self) -> &str {
        &self.tab
    }

    fn ensure_tab(&self, store: &mut dyn TableStore) -> SyncResult<()> {
        if !store.has_tab(&self.tab) {
            store.create_tab(&self.tab)?;
            let header: Vec<String> = LEDGER_HEADER.iter().map(|s| s.to_string()).collect();
            store.append_row(&self.tab, &header)?;
        }
        Ok(())
    }

    /// Append one confirmed change
    pub fn append(&self, store: &mut dyn TableStore, entry: &LedgerEntry) -> SyncResult<()> {
        self.ensure_tab(store)?;
        store.append_row(&self.tab, &entry.to_row())?;
        debug!(campaign = %entry.campaign_id, tab = %self.tab, "change recorded in ledger");
        Ok(())
    }

    /// All entries, oldest first. A missing tab means an empty ledger;
    /// rows that do not parse are skipped.
    pub fn read_all(&self, store: &dyn TableStore) -> SyncResult<Vec<LedgerEntry>> {
        if !store.has_tab(&self.tab) {
            return Ok(Vec::new());
        }
        let rows = store.read_all(&self.tab)?;
        Ok(rows
            .iter()
            .skip(1)
            .filter_map(|row| LedgerEntry::from_row(row))
            .collect())
    }
}
