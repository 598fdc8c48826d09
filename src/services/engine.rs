//! Run orchestration
//!
//! One run: parse the control tab, then for each ready zone optionally
//! refresh the inventory listing, reconcile every budget row and record
//! confirmed changes in the ledger, all inside that zone's account scope.
//! Zone and row failures are reported and contained; only a missing
//! control tab aborts the run. Zones are processed strictly one at a time,
//! in table order.

use regex::Regex;
use tracing::{debug, error, info, warn};

use crate::audit::{ChangeLedger, LedgerEntry};
use crate::config::Settings;
use crate::error::{SyncError, SyncResult, ZoneError};
use crate::grid::TableStore;
use crate::models::{BudgetRow, CellRef, Zone};
use crate::platform::{AccountHandle, AdsPlatform};

use super::context;
use super::inventory;
use super::reconciler::{Reconciler, RowOutcome};
use super::registry::{self, ZoneEntry};

/// Row tallies for one processed zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneStats {
    pub rows: usize,
    pub applied: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
    pub ledgered: usize,
}

/// What happened to one control-table entry
#[derive(Debug)]
pub enum ZoneDisposition {
    Completed(ZoneStats),
    /// Data tab exists but holds no rows at or below the anchor
    Empty,
    Abandoned(ZoneError),
    Disabled { status: String },
    MissingAccount,
}

/// Per-zone line of the run report
#[derive(Debug)]
pub struct ZoneReport {
    pub name: String,
    pub account_id: String,
    pub disposition: ZoneDisposition,
}

/// Everything a run did, zone by zone
#[derive(Debug, Default)]
pub struct RunSummary {
    pub zones: Vec<ZoneReport>,
}

impl RunSummary {
    /// Row tallies summed over every completed zone
    pub fn totals(&self) -> ZoneStats {
        let mut totals = ZoneStats::default();
        for report in &self.zones {
            if let ZoneDisposition::Completed(stats) = &report.disposition {
                totals.rows += stats.rows;
                totals.applied += stats.applied;
                totals.unchanged += stats.unchanged;
                totals.skipped += stats.skipped;
                totals.failed += stats.failed;
                totals.ledgered += stats.ledgered;
            }
        }
        totals
    }

    pub fn zones_processed(&self) -> usize {
        self.zones
            .iter()
            .filter(|report| {
                matches!(
                    report.disposition,
                    ZoneDisposition::Completed(_) | ZoneDisposition::Empty
                )
            })
            .count()
    }
}

/// The multi-account budget synchronization engine
pub struct SyncEngine<'a> {
    platform: &'a mut dyn AdsPlatform,
    settings: &'a Settings,
    filter: Regex,
    ledger: Option<ChangeLedger>,
}

impl<'a> SyncEngine<'a> {
    /// Compile the campaign-name filter and set up the ledger
    ///
    /// An invalid filter pattern is a configuration error, not a per-row
    /// condition.
    pub fn new(platform: &'a mut dyn AdsPlatform, settings: &'a Settings) -> SyncResult<Self> {
        let filter =
            Regex::new(&settings.campaign_name_filter).map_err(|err| SyncError::Filter {
                pattern: settings.campaign_name_filter.clone(),
                reason: err.to_string(),
            })?;
        let ledger = settings
            .ledger_enabled
            .then(|| ChangeLedger::new(settings.ledger_tab.clone()));
        Ok(Self {
            platform,
            settings,
            filter,
            ledger,
        })
    }

    /// Execute the whole process once
    pub fn run(&mut self, store: &mut dyn TableStore) -> SyncResult<RunSummary> {
        info!("starting budget synchronization");
        if !store.has_tab(&self.settings.control_tab) {
            return Err(SyncError::ControlTabMissing(
                self.settings.control_tab.clone(),
            ));
        }
        let control_rows = store.read_all(&self.settings.control_tab)?;
        let entries = registry::parse(&control_rows, self.settings.header_rows);
        info!(
            tab = %self.settings.control_tab,
            entries = entries.len(),
            "control table parsed"
        );

        let mut summary = RunSummary::default();
        for entry in entries {
            match entry {
                ZoneEntry::Disabled { name, status } => {
                    info!(zone = %name, status = %status, "skipping zone (status is not \"on\")");
                    summary.zones.push(ZoneReport {
                        name,
                        account_id: String::new(),
                        disposition: ZoneDisposition::Disabled { status },
                    });
                }
                ZoneEntry::MissingAccount { name, tab_name } => {
                    warn!(
                        zone = %name,
                        tab = %tab_name,
                        "skipping zone: account id column is empty for an active zone"
                    );
                    summary.zones.push(ZoneReport {
                        name,
                        account_id: String::new(),
                        disposition: ZoneDisposition::MissingAccount,
                    });
                }
                ZoneEntry::Ready(zone) => {
                    info!(
                        zone = %zone.name,
                        account = %zone.account_id,
                        tab = %zone.tab_name,
                        "processing zone"
                    );
                    let disposition = process_zone(
                        &mut *self.platform,
                        store,
                        self.settings,
                        &self.filter,
                        self.ledger.as_ref(),
                        &zone,
                    );
                    summary.zones.push(ZoneReport {
                        name: zone.name,
                        account_id: zone.account_id,
                        disposition,
                    });
                }
            }
        }

        let totals = summary.totals();
        info!(
            zones = summary.zones_processed(),
            applied = totals.applied,
            unchanged = totals.unchanged,
            skipped = totals.skipped,
            failed = totals.failed,
            "synchronization finished"
        );
        Ok(summary)
    }
}

fn process_zone(
    platform: &mut dyn AdsPlatform,
    store: &mut dyn TableStore,
    settings: &Settings,
    filter: &Regex,
    ledger: Option<&ChangeLedger>,
    zone: &Zone,
) -> ZoneDisposition {
    let anchor: CellRef = match zone.anchor.parse() {
        Ok(anchor) => anchor,
        Err(_) => {
            let err = ZoneError::InvalidAnchor(zone.anchor.clone());
            error!(zone = %zone.name, %err, "zone abandoned");
            return ZoneDisposition::Abandoned(err);
        }
    };
    if !store.has_tab(&zone.tab_name) {
        let err = ZoneError::TabNotFound(zone.tab_name.clone());
        error!(zone = %zone.name, %err, "zone abandoned");
        return ZoneDisposition::Abandoned(err);
    }

    let scoped = context::with_account(platform, &zone.account_id, |platform, account| {
        if settings.inventory_refresh {
            if let Err(err) = inventory::refresh(&*platform, store, &zone.tab_name, anchor.row, filter)
            {
                // Reporting-only step; budgets can still be applied.
                error!(zone = %zone.name, %err, "inventory refresh failed");
            }
        }
        reconcile_zone(platform, store, filter, ledger, zone, account, anchor)
    });

    match scoped {
        Ok(Ok(Some(stats))) => ZoneDisposition::Completed(stats),
        Ok(Ok(None)) => ZoneDisposition::Empty,
        Ok(Err(err)) | Err(err) => {
            error!(zone = %zone.name, %err, "zone abandoned");
            ZoneDisposition::Abandoned(err)
        }
    }
}

/// Reconcile every budget row of one zone. Runs with the zone's account
/// selected. `Ok(None)` means the tab held no data at or below the anchor.
fn reconcile_zone(
    platform: &mut dyn AdsPlatform,
    store: &mut dyn TableStore,
    filter: &Regex,
    ledger: Option<&ChangeLedger>,
    zone: &Zone,
    account: &AccountHandle,
    anchor: CellRef,
) -> Result<Option<ZoneStats>, ZoneError> {
    let last = store
        .last_row(&zone.tab_name)
        .map_err(|err| ZoneError::Region(err.to_string()))?;
    if last < anchor.row {
        info!(
            zone = %zone.name,
            tab = %zone.tab_name,
            row = anchor.row,
            "no data at or below the anchor row"
        );
        return Ok(None);
    }

    let region = store
        .read_region(&zone.tab_name, anchor.row, anchor.col, last - anchor.row + 1, 3)
        .map_err(|err| ZoneError::Region(err.to_string()))?;
    let rows: Vec<BudgetRow> = region
        .into_iter()
        .enumerate()
        .map(|(offset, mut cells)| {
            cells.resize(3, String::new());
            let raw_status = cells.pop().unwrap_or_default();
            let raw_budget = cells.pop().unwrap_or_default();
            let campaign_id = cells.pop().unwrap_or_default();
            BudgetRow {
                campaign_id,
                raw_budget,
                raw_status,
                source_row: anchor.row + offset,
            }
        })
        .collect();
    info!(
        zone = %zone.name,
        tab = %zone.tab_name,
        count = rows.len(),
        "found potential campaign rows"
    );

    let reconciler = Reconciler::new(filter);
    let mut stats = ZoneStats {
        rows: rows.len(),
        ..ZoneStats::default()
    };
    for row in &rows {
        let outcome = reconciler.process_row(platform, row);
        report_row(account, row, &outcome);
        match &outcome {
            RowOutcome::Applied {
                campaign,
                new_budget,
                ..
            } => {
                stats.applied += 1;
                if let Some(ledger) = ledger {
                    let entry =
                        LedgerEntry::record(account, &campaign.name, &campaign.id, *new_budget);
                    match ledger.append(store, &entry) {
                        Ok(()) => stats.ledgered += 1,
                        // The budget is already live; losing the audit row
                        // must not fail the zone.
                        Err(err) => error!(campaign = %campaign.id, %err, "ledger append failed"),
                    }
                }
            }
            RowOutcome::NoChange { .. } => stats.unchanged += 1,
            RowOutcome::WriteFailed { .. } => stats.failed += 1,
            _ => stats.skipped += 1,
        }
    }
    Ok(Some(stats))
}

fn report_row(account: &AccountHandle, row: &BudgetRow, outcome: &RowOutcome) {
    match outcome {
        RowOutcome::MissingId => {
            debug!(row = row.source_row, "skipping row: no campaign id");
        }
        RowOutcome::RowDisabled { status } => {
            info!(
                campaign = %row.campaign_id,
                status = %status,
                "skipping row: status is not \"on\""
            );
        }
        RowOutcome::InvalidBudget { raw } => {
            info!(
                campaign = %row.campaign_id,
                value = %raw,
                "skipping row: invalid budget value"
            );
        }
        RowOutcome::Unresolved { campaign_id } => {
            error!(
                campaign = %campaign_id,
                account = %account.customer_id,
                "campaign not found in the selected account"
            );
        }
        RowOutcome::NameFiltered { campaign, pattern } => {
            info!(
                campaign = %campaign.id,
                name = %campaign.name,
                pattern = %pattern,
                "skipping row: name does not match the filter"
            );
        }
        RowOutcome::NoChange { campaign } => {
            info!(
                campaign = %campaign.id,
                budget = %campaign.budget,
                "no change needed"
            );
        }
        RowOutcome::Applied {
            campaign,
            previous,
            new_budget,
        } => {
            info!(
                campaign = %campaign.id,
                name = %campaign.name,
                old = %previous,
                new = %new_budget,
                "budget updated"
            );
        }
        RowOutcome::WriteFailed { campaign, error } => {
            error!(
                campaign = %campaign.id,
                error = %error,
                "could not set budget"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Workbook;
    use crate::models::Money;
    use crate::platform::{
        AccountSnapshot, CampaignRecord, CatalogKind, PlatformSnapshot, SnapshotPlatform,
    };

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn campaign(id: &str, name: &str, catalog: CatalogKind, cents: i64) -> CampaignRecord {
        CampaignRecord {
            id: id.to_string(),
            name: name.to_string(),
            catalog,
            budget: Money::from_cents(cents),
            enabled: true,
        }
    }

    fn platform_with(accounts: Vec<AccountSnapshot>) -> SnapshotPlatform {
        SnapshotPlatform::new(PlatformSnapshot {
            parent: AccountHandle {
                customer_id: "1000000000".into(),
                name: "Parent MCC".into(),
            },
            accounts,
        })
    }

    fn client_a(campaigns: Vec<CampaignRecord>) -> AccountSnapshot {
        AccountSnapshot {
            customer_id: "1234567890".into(),
            name: "Client A".into(),
            campaigns,
        }
    }

    /// KeySheet with one header row plus the given zone rows, and a data
    /// tab whose region starts at G5 (clear of the inventory columns A-E).
    fn workbook_with(zone_rows: Vec<Vec<String>>, data_rows: Vec<Vec<String>>) -> Workbook {
        let mut key_sheet = vec![strings(&[
            "Zone Name",
            "Account",
            "Tab Name",
            "Status",
            "Reference",
        ])];
        key_sheet.extend(zone_rows);

        let mut tab = vec![Vec::new(); 4];
        for row in data_rows {
            let mut padded = vec![String::new(); 6];
            padded.extend(row);
            tab.push(padded);
        }
        Workbook::new()
            .with_tab("KeySheet", key_sheet)
            .with_tab("Tab1", tab)
    }

    fn settings() -> Settings {
        Settings {
            inventory_refresh: false,
            ..Settings::default()
        }
    }

    fn run(
        platform: &mut SnapshotPlatform,
        settings: &Settings,
        workbook: &mut Workbook,
    ) -> RunSummary {
        let mut engine = SyncEngine::new(platform, settings).unwrap();
        engine.run(workbook).unwrap()
    }

    #[test]
    fn test_missing_control_tab_is_fatal() {
        let mut platform = platform_with(vec![client_a(Vec::new())]);
        let mut workbook = Workbook::new();
        let settings = settings();
        let mut engine = SyncEngine::new(&mut platform, &settings).unwrap();
        assert!(matches!(
            engine.run(&mut workbook),
            Err(SyncError::ControlTabMissing(_))
        ));
    }

    #[test]
    fn test_scenario_apply_and_invalid_budget() {
        let mut platform = platform_with(vec![client_a(vec![
            campaign("111", "Brand Search", CatalogKind::Generic, 1000),
            campaign("222", "Feed", CatalogKind::Shopping, 2000),
        ])]);
        let mut workbook = workbook_with(
            vec![strings(&["Zone A", "123-456-7890", "Tab1", "On", "G5"])],
            vec![strings(&["111", "50.00", "On"]), strings(&["222", "", "On"])],
        );
        let settings = settings();
        let summary = run(&mut platform, &settings, &mut workbook);

        let totals = summary.totals();
        assert_eq!(totals.rows, 2);
        assert_eq!(totals.applied, 1);
        assert_eq!(totals.skipped, 1);
        assert_eq!(totals.ledgered, 1);

        let client = platform.find_accounts("1234567890").remove(0);
        platform.select_account(&client);
        let updated = platform.find_campaign(CatalogKind::Generic, "111").unwrap();
        assert_eq!(updated.budget, Money::from_cents(5000));

        let history = workbook.rows("BudgetHistory").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1][5], "111");
        assert_eq!(history[1][6], "50.00");
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let mut platform = platform_with(vec![client_a(vec![campaign(
            "111",
            "Brand Search",
            CatalogKind::Generic,
            1000,
        )])]);
        let mut workbook = workbook_with(
            vec![strings(&["Zone A", "123-456-7890", "Tab1", "On", "G5"])],
            vec![strings(&["111", "50.00", "On"])],
        );
        let settings = settings();

        let first = run(&mut platform, &settings, &mut workbook);
        assert_eq!(first.totals().applied, 1);

        let second = run(&mut platform, &settings, &mut workbook);
        assert_eq!(second.totals().applied, 0);
        assert_eq!(second.totals().unchanged, 1);

        // One ledger row from the first run, none from the second.
        assert_eq!(workbook.rows("BudgetHistory").unwrap().len(), 2);
    }

    #[test]
    fn test_unresolvable_account_abandons_the_zone() {
        let mut platform = platform_with(vec![client_a(vec![campaign(
            "111",
            "Brand Search",
            CatalogKind::Generic,
            1000,
        )])]);
        let mut workbook = workbook_with(
            vec![strings(&["Zone A", "999-999-9999", "Tab1", "On", "G5"])],
            vec![strings(&["111", "50.00", "On"])],
        );
        let settings = settings();
        let summary = run(&mut platform, &settings, &mut workbook);

        assert!(matches!(
            summary.zones[0].disposition,
            ZoneDisposition::Abandoned(ZoneError::AccountNotFound(_))
        ));
        let client = platform.find_accounts("1234567890").remove(0);
        platform.select_account(&client);
        let untouched = platform.find_campaign(CatalogKind::Generic, "111").unwrap();
        assert_eq!(untouched.budget, Money::from_cents(1000));
    }

    #[test]
    fn test_failing_row_does_not_stop_the_zone() {
        let mut platform = platform_with(vec![client_a(vec![
            campaign("111", "First", CatalogKind::Generic, 1000),
            campaign("222", "Second", CatalogKind::Generic, 1000),
        ])]);
        platform.fail_writes_for("111");
        let mut workbook = workbook_with(
            vec![strings(&["Zone A", "123-456-7890", "Tab1", "On", "G5"])],
            vec![
                strings(&["111", "50.00", "On"]),
                strings(&["222", "60.00", "On"]),
            ],
        );
        let settings = settings();
        let summary = run(&mut platform, &settings, &mut workbook);

        let totals = summary.totals();
        assert_eq!(totals.failed, 1);
        assert_eq!(totals.applied, 1);
        assert_eq!(totals.ledgered, 1);
    }

    #[test]
    fn test_abandoned_zone_does_not_stop_later_zones() {
        let mut platform = platform_with(vec![client_a(vec![campaign(
            "111",
            "Brand Search",
            CatalogKind::Generic,
            1000,
        )])]);
        let mut workbook = workbook_with(
            vec![
                strings(&["Bad zone", "999-999-9999", "Tab1", "On", "G5"]),
                strings(&["Zone A", "123-456-7890", "Tab1", "On", "G5"]),
            ],
            vec![strings(&["111", "50.00", "On"])],
        );
        let settings = settings();
        let summary = run(&mut platform, &settings, &mut workbook);

        assert!(matches!(
            summary.zones[0].disposition,
            ZoneDisposition::Abandoned(_)
        ));
        assert!(matches!(
            summary.zones[1].disposition,
            ZoneDisposition::Completed(_)
        ));
        assert_eq!(summary.totals().applied, 1);
    }

    #[test]
    fn test_parent_account_is_restored_after_every_zone() {
        let mut platform = platform_with(vec![client_a(vec![campaign(
            "111",
            "Brand Search",
            CatalogKind::Generic,
            1000,
        )])]);
        let mut workbook = workbook_with(
            vec![strings(&["Zone A", "123-456-7890", "Tab1", "On", "G5"])],
            vec![strings(&["111", "50.00", "On"])],
        );
        let settings = settings();
        run(&mut platform, &settings, &mut workbook);
        assert_eq!(platform.current_account().customer_id, "1000000000");
    }

    #[test]
    fn test_disabled_and_unaccounted_zones_never_write() {
        let mut platform = platform_with(vec![client_a(vec![campaign(
            "111",
            "Brand Search",
            CatalogKind::Generic,
            1000,
        )])]);
        let mut workbook = workbook_with(
            vec![
                strings(&["Zone off", "123-456-7890", "Tab1", "Off", "G5"]),
                strings(&["Zone blank", "", "Tab1", "On", "G5"]),
            ],
            vec![strings(&["111", "50.00", "On"])],
        );
        let settings = settings();
        let summary = run(&mut platform, &settings, &mut workbook);

        assert!(matches!(
            summary.zones[0].disposition,
            ZoneDisposition::Disabled { .. }
        ));
        assert!(matches!(
            summary.zones[1].disposition,
            ZoneDisposition::MissingAccount
        ));
        let client = platform.find_accounts("1234567890").remove(0);
        platform.select_account(&client);
        let untouched = platform.find_campaign(CatalogKind::Generic, "111").unwrap();
        assert_eq!(untouched.budget, Money::from_cents(1000));
    }

    #[test]
    fn test_missing_tab_and_bad_anchor_abandon_the_zone() {
        let mut platform = platform_with(vec![client_a(Vec::new())]);
        let mut workbook = workbook_with(
            vec![
                strings(&["No tab", "123-456-7890", "Elsewhere", "On", "G5"]),
                strings(&["Bad anchor", "123-456-7890", "Tab1", "On", "5G"]),
            ],
            Vec::new(),
        );
        let settings = settings();
        let summary = run(&mut platform, &settings, &mut workbook);

        assert!(matches!(
            summary.zones[0].disposition,
            ZoneDisposition::Abandoned(ZoneError::TabNotFound(_))
        ));
        assert!(matches!(
            summary.zones[1].disposition,
            ZoneDisposition::Abandoned(ZoneError::InvalidAnchor(_))
        ));
    }

    #[test]
    fn test_tab_without_data_below_the_anchor_is_empty() {
        let mut platform = platform_with(vec![client_a(Vec::new())]);
        let mut workbook = workbook_with(
            vec![strings(&["Zone A", "123-456-7890", "Tab1", "On", "G5"])],
            Vec::new(),
        );
        let settings = settings();
        let summary = run(&mut platform, &settings, &mut workbook);
        assert!(matches!(
            summary.zones[0].disposition,
            ZoneDisposition::Empty
        ));
    }

    #[test]
    fn test_ledger_can_be_disabled() {
        let mut platform = platform_with(vec![client_a(vec![campaign(
            "111",
            "Brand Search",
            CatalogKind::Generic,
            1000,
        )])]);
        let mut workbook = workbook_with(
            vec![strings(&["Zone A", "123-456-7890", "Tab1", "On", "G5"])],
            vec![strings(&["111", "50.00", "On"])],
        );
        let settings = Settings {
            inventory_refresh: false,
            ledger_enabled: false,
            ..Settings::default()
        };
        let summary = run(&mut platform, &settings, &mut workbook);
        assert_eq!(summary.totals().applied, 1);
        assert_eq!(summary.totals().ledgered, 0);
        assert!(!workbook.has_tab("BudgetHistory"));
    }

    #[test]
    fn test_inventory_refresh_runs_inside_the_account_scope() {
        let mut platform = platform_with(vec![client_a(vec![campaign(
            "111",
            "Brand Search",
            CatalogKind::Generic,
            1000,
        )])]);
        let mut workbook = workbook_with(
            vec![strings(&["Zone A", "123-456-7890", "Tab1", "On", "G5"])],
            vec![strings(&["111", "50.00", "On"])],
        );
        let settings = Settings::default();
        let summary = run(&mut platform, &settings, &mut workbook);
        assert_eq!(summary.totals().applied, 1);

        // Row 5 carries the listing for Client A's only campaign.
        let rows = workbook.rows("Tab1").unwrap();
        assert_eq!(rows[4][0], "Brand Search");
        assert_eq!(rows[4][4], "111");
        // The data columns were not clobbered by the refresh.
        assert_eq!(rows[4][6], "111");
    }

    #[test]
    fn test_invalid_filter_is_a_configuration_error() {
        let mut platform = platform_with(Vec::new());
        let settings = Settings {
            campaign_name_filter: "(".into(),
            ..Settings::default()
        };
        assert!(matches!(
            SyncEngine::new(&mut platform, &settings),
            Err(SyncError::Filter { .. })
        ));
    }

    #[test]
    fn test_name_filter_gates_the_write_path() {
        let mut platform = platform_with(vec![client_a(vec![
            campaign("111", "Brand Search", CatalogKind::Generic, 1000),
            campaign("222", "Test Campaign", CatalogKind::Generic, 1000),
        ])]);
        let mut workbook = workbook_with(
            vec![strings(&["Zone A", "123-456-7890", "Tab1", "On", "G5"])],
            vec![
                strings(&["111", "50.00", "On"]),
                strings(&["222", "60.00", "On"]),
            ],
        );
        let settings = Settings {
            inventory_refresh: false,
            campaign_name_filter: "^Brand".into(),
            ..Settings::default()
        };
        let summary = run(&mut platform, &settings, &mut workbook);
        assert_eq!(summary.totals().applied, 1);
        assert_eq!(summary.totals().skipped, 1);
    }
}
