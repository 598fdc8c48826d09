//! Pre-reconciliation inventory snapshot
//!
//! Rewrites the campaign listing columns of a zone's tab from the selected
//! account before budgets are applied, so operators pick targets against
//! fresh names, types, statuses and current budgets. The refresh clears
//! exactly the columns it owns, from the anchor row down to the tab's
//! current last row, so a shrinking campaign list leaves no stale rows
//! behind. Read-then-overwrite: two refreshes over unchanged upstream data
//! produce identical output.

use regex::Regex;
use tracing::{debug, info};

use crate::error::SyncResult;
use crate::grid::TableStore;
use crate::platform::AdsPlatform;

use super::resolver;

/// Output columns, 1-indexed: Name | Type | Status | CurrentBudget | Id
pub const OUTPUT_COL_FIRST: usize = 1;
pub const OUTPUT_COLS: usize = 5;

/// Refresh one zone's inventory listing. Returns the number of rows written.
pub fn refresh(
    platform: &dyn AdsPlatform,
    store: &mut dyn TableStore,
    tab: &str,
    anchor_row: usize,
    filter: &Regex,
) -> SyncResult<usize> {
    let last = store.last_row(tab)?;
    if last >= anchor_row {
        let stale_rows = last - anchor_row + 1;
        debug!(tab, rows = stale_rows, "clearing previous inventory output");
        store.clear_region(tab, anchor_row, OUTPUT_COL_FIRST, stale_rows, OUTPUT_COLS)?;
    }

    let rows: Vec<Vec<String>> = resolver::resolve_all(platform)
        .into_iter()
        .filter(|campaign| filter.is_match(&campaign.name))
        .map(|campaign| {
            vec![
                campaign.name.clone(),
                campaign.catalog.to_string(),
                if campaign.enabled { "ENABLED" } else { "PAUSED" }.to_string(),
                campaign.budget.plain(),
                campaign.id,
            ]
        })
        .collect();

    if rows.is_empty() {
        info!(tab, "no campaigns matched the filter; nothing to write");
        return Ok(0);
    }

    store.write_region(tab, anchor_row, OUTPUT_COL_FIRST, &rows)?;
    info!(tab, count = rows.len(), "inventory refreshed");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Workbook;
    use crate::models::Money;
    use crate::platform::{
        AccountHandle, AccountSnapshot, CampaignRecord, CatalogKind, PlatformSnapshot,
        SnapshotPlatform,
    };

    fn campaign(id: &str, name: &str, catalog: CatalogKind, cents: i64, enabled: bool) -> CampaignRecord {
        CampaignRecord {
            id: id.to_string(),
            name: name.to_string(),
            catalog,
            budget: Money::from_cents(cents),
            enabled,
        }
    }

    fn platform_with(campaigns: Vec<CampaignRecord>) -> SnapshotPlatform {
        let mut platform = SnapshotPlatform::new(PlatformSnapshot {
            parent: AccountHandle {
                customer_id: "1000000000".into(),
                name: "Parent".into(),
            },
            accounts: vec![AccountSnapshot {
                customer_id: "1234567890".into(),
                name: "Client A".into(),
                campaigns,
            }],
        });
        let client = platform.find_accounts("1234567890").remove(0);
        platform.select_account(&client);
        platform
    }

    fn match_all() -> Regex {
        Regex::new(".*").unwrap()
    }

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_writes_name_type_status_budget_id() {
        let platform = platform_with(vec![
            campaign("2", "Beta", CatalogKind::Shopping, 2000, false),
            campaign("1", "Alpha", CatalogKind::Generic, 1000, true),
        ]);
        let mut workbook = Workbook::new().with_tab("Tab1", Vec::new());
        let filter = match_all();
        let written = refresh(&platform, &mut workbook, "Tab1", 2, &filter).unwrap();
        assert_eq!(written, 2);

        let rows = workbook.rows("Tab1").unwrap();
        assert_eq!(rows[1], strings(&["Alpha", "Generic", "ENABLED", "10.00", "1"]));
        assert_eq!(rows[2], strings(&["Beta", "Shopping", "PAUSED", "20.00", "2"]));
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let platform = platform_with(vec![campaign(
            "1",
            "Alpha",
            CatalogKind::Generic,
            1000,
            true,
        )]);
        let mut workbook = Workbook::new().with_tab("Tab1", Vec::new());
        let filter = match_all();
        refresh(&platform, &mut workbook, "Tab1", 2, &filter).unwrap();
        let first = workbook.rows("Tab1").unwrap().clone();
        refresh(&platform, &mut workbook, "Tab1", 2, &filter).unwrap();
        assert_eq!(workbook.rows("Tab1").unwrap(), &first);
    }

    #[test]
    fn test_stale_rows_are_cleared_when_the_listing_shrinks() {
        let big = platform_with(vec![
            campaign("1", "Alpha", CatalogKind::Generic, 1000, true),
            campaign("2", "Beta", CatalogKind::Generic, 2000, true),
        ]);
        let small = platform_with(vec![campaign(
            "1",
            "Alpha",
            CatalogKind::Generic,
            1000,
            true,
        )]);
        let mut workbook = Workbook::new().with_tab("Tab1", Vec::new());
        let filter = match_all();
        refresh(&big, &mut workbook, "Tab1", 2, &filter).unwrap();
        refresh(&small, &mut workbook, "Tab1", 2, &filter).unwrap();

        let rows = workbook.rows("Tab1").unwrap();
        assert_eq!(rows[1][0], "Alpha");
        assert!(rows[2].iter().all(|cell| cell.is_empty()));
    }

    #[test]
    fn test_clearing_never_touches_the_data_columns() {
        let platform = platform_with(vec![campaign(
            "1",
            "Alpha",
            CatalogKind::Generic,
            1000,
            true,
        )]);
        // Column G (7) holds operator-entered budget data.
        let mut workbook = Workbook::new().with_tab(
            "Tab1",
            vec![
                strings(&["header", "", "", "", "", "", ""]),
                strings(&["old", "old", "old", "old", "old", "", "1"]),
                strings(&["old", "old", "old", "old", "old", "", "75.00"]),
            ],
        );
        let filter = match_all();
        refresh(&platform, &mut workbook, "Tab1", 2, &filter).unwrap();

        let rows = workbook.rows("Tab1").unwrap();
        assert_eq!(rows[1][6], "1");
        assert_eq!(rows[2][6], "75.00");
        assert!(rows[2][..5].iter().all(|cell| cell.is_empty()));
    }

    #[test]
    fn test_filter_limits_the_listing() {
        let platform = platform_with(vec![
            campaign("1", "Brand Alpha", CatalogKind::Generic, 1000, true),
            campaign("2", "Test Beta", CatalogKind::Generic, 2000, true),
        ]);
        let mut workbook = Workbook::new().with_tab("Tab1", Vec::new());
        let filter = Regex::new("^Brand").unwrap();
        let written = refresh(&platform, &mut workbook, "Tab1", 2, &filter).unwrap();
        assert_eq!(written, 1);
        assert_eq!(workbook.rows("Tab1").unwrap()[1][0], "Brand Alpha");
    }

    #[test]
    fn test_missing_tab_is_an_error() {
        let platform = platform_with(Vec::new());
        let mut workbook = Workbook::new();
        let filter = match_all();
        assert!(refresh(&platform, &mut workbook, "Nope", 2, &filter).is_err());
    }
}
