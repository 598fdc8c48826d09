//! Tabular storage abstraction
//!
//! The engine treats its configuration surface as an injected grid of text
//! cells grouped into named tabs, so the reconciliation logic can run
//! against an in-memory workbook with no dependency on any hosted
//! spreadsheet service. Rows and columns are 1-indexed at this boundary.

pub mod workbook;

pub use workbook::Workbook;

use crate::error::SyncResult;

/// Narrow interface over a named-tab cell grid
pub trait TableStore {
    fn has_tab(&self, tab: &str) -> bool;

    /// Create an empty tab. Creating an existing tab is a no-op.
    fn create_tab(&mut self, tab: &str) -> SyncResult<()>;

    /// 1-indexed last row carrying any content; 0 for an empty tab
    fn last_row(&self, tab: &str) -> SyncResult<usize>;

    /// Every row of the tab, from row 1
    fn read_all(&self, tab: &str) -> SyncResult<Vec<Vec<String>>>;

    /// Rectangular read; cells outside the tab's current bounds come back
    /// empty
    fn read_region(
        &self,
        tab: &str,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> SyncResult<Vec<Vec<String>>>;

    /// Rectangular write; the tab grows as needed
    fn write_region(
        &mut self,
        tab: &str,
        row: usize,
        col: usize,
        values: &[Vec<String>],
    ) -> SyncResult<()>;

    /// Blank out a rectangle without touching neighbouring columns
    fn clear_region(
        &mut self,
        tab: &str,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> SyncResult<()>;

    /// Append one row directly below the last occupied row
    fn append_row(&mut self, tab: &str, values: &[String]) -> SyncResult<()>;
}
