//! In-memory workbook
//!
//! The shipped `TableStore` implementation: a map of tab name to rows of
//! text cells, (de)serializable so a whole workbook can be loaded from and
//! saved back to a JSON file. Internal storage is 0-indexed; the trait
//! boundary is 1-indexed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::TableStore;
use crate::error::{SyncError, SyncResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    tabs: BTreeMap<String, Vec<Vec<String>>>,
}

fn row_is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by tests and fixtures
    pub fn with_tab(mut self, name: &str, rows: Vec<Vec<String>>) -> Self {
        self.tabs.insert(name.to_string(), rows);
        self
    }

    /// Raw rows of a tab, for assertions and display
    pub fn rows(&self, tab: &str) -> Option<&Vec<Vec<String>>> {
        self.tabs.get(tab)
    }

    pub fn tab_names(&self) -> impl Iterator<Item = &str> {
        self.tabs.keys().map(String::as_str)
    }

    fn tab(&self, name: &str) -> SyncResult<&Vec<Vec<String>>> {
        self.tabs
            .get(name)
            .ok_or_else(|| SyncError::TabNotFound(name.to_string()))
    }

    fn tab_mut(&mut self, name: &str) -> SyncResult<&mut Vec<Vec<String>>> {
        self.tabs
            .get_mut(name)
            .ok_or_else(|| SyncError::TabNotFound(name.to_string()))
    }
}

impl TableStore for Workbook {
    fn has_tab(&self, tab: &str) -> bool {
        self.tabs.contains_key(tab)
    }

    fn create_tab(&mut self, tab: &str) -> SyncResult<()> {
        self.tabs.entry(tab.to_string()).or_default();
        Ok(())
    }

    fn last_row(&self, tab: &str) -> SyncResult<usize> {
        let rows = self.tab(tab)?;
        Ok(rows
            .iter()
            .rposition(|row| !row_is_blank(row))
            .map(|idx| idx + 1)
            .unwrap_or(0))
    }

    fn read_all(&self, tab: &str) -> SyncResult<Vec<Vec<String>>> {
        Ok(self.tab(tab)?.clone())
    }

    fn read_region(
        &self,
        tab: &str,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> SyncResult<Vec<Vec<String>>> {
        let grid = self.tab(tab)?;
        let mut out = Vec::with_capacity(rows);
        for r in 0..rows {
            let source = grid.get(row - 1 + r);
            let mut cells = Vec::with_capacity(cols);
            for c in 0..cols {
                let value = source
                    .and_then(|cells| cells.get(col - 1 + c))
                    .cloned()
                    .unwrap_or_default();
                cells.push(value);
            }
            out.push(cells);
        }
        Ok(out)
    }

    fn write_region(
        &mut self,
        tab: &str,
        row: usize,
        col: usize,
        values: &[Vec<String>],
    ) -> SyncResult<()> {
        let grid = self.tab_mut(tab)?;
        for (r, source) in values.iter().enumerate() {
            let target_row = row - 1 + r;
            if grid.len() <= target_row {
                grid.resize(target_row + 1, Vec::new());
            }
            let target = &mut grid[target_row];
            let needed = col - 1 + source.len();
            if target.len() < needed {
                target.resize(needed, String::new());
            }
            for (c, value) in source.iter().enumerate() {
                target[col - 1 + c] = value.clone();
            }
        }
        Ok(())
    }

    fn clear_region(
        &mut self,
        tab: &str,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> SyncResult<()> {
        let grid = self.tab_mut(tab)?;
        for r in 0..rows {
            let Some(target) = grid.get_mut(row - 1 + r) else {
                break;
            };
            for c in 0..cols {
                if let Some(cell) = target.get_mut(col - 1 + c) {
                    cell.clear();
                }
            }
        }
        Ok(())
    }

    fn append_row(&mut self, tab: &str, values: &[String]) -> SyncResult<()> {
        let next = self.last_row(tab)? + 1;
        self.write_region(tab, next, 1, &[values.to_vec()])
    }
}
