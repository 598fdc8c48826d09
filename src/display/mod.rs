//! Terminal output formatting
//!
//! Renders the run summary and the change ledger for the operator. The run
//! summary is plain text; ledger listings use a table.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::audit::LedgerEntry;
use crate::services::engine::{RunSummary, ZoneDisposition};

/// Format the per-zone results and totals of a run
pub fn format_run_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str("Run summary\n");
    out.push_str(&"=".repeat(60));
    out.push('\n');

    for report in &summary.zones {
        let line = match &report.disposition {
            ZoneDisposition::Completed(stats) => format!(
                "{} ({}): {} row(s) - {} applied, {} unchanged, {} skipped, {} failed",
                report.name,
                report.account_id,
                stats.rows,
                stats.applied,
                stats.unchanged,
                stats.skipped,
                stats.failed
            ),
            ZoneDisposition::Empty => format!(
                "{} ({}): no data below the anchor row",
                report.name, report.account_id
            ),
            ZoneDisposition::Abandoned(err) => {
                format!("{}: abandoned - {}", report.name, err)
            }
            ZoneDisposition::Disabled { status } => {
                format!("{}: skipped (status \"{}\")", report.name, status)
            }
            ZoneDisposition::MissingAccount => {
                format!("{}: skipped (no account id)", report.name)
            }
        };
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }

    let totals = summary.totals();
    out.push_str(&format!(
        "{} zone(s) processed: {} applied, {} unchanged, {} skipped, {} failed, {} ledgered\n",
        summary.zones_processed(),
        totals.applied,
        totals.unchanged,
        totals.skipped,
        totals.failed,
        totals.ledgered
    ));
    out
}

#[derive(Tabled)]
struct LedgerLine {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Campaign")]
    campaign: String,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Budget")]
    budget: String,
}

/// Format ledger entries as a table, oldest first
pub fn format_ledger(entries: &[LedgerEntry]) -> String {
    let lines = entries.iter().map(|entry| LedgerLine {
        date: entry.timestamp.format("%Y-%m-%d").to_string(),
        time: entry.timestamp.format("%H:%M:%S").to_string(),
        account: format!("{} ({})", entry.account_name, entry.account_id),
        campaign: entry.campaign_name.clone(),
        id: entry.campaign_id.clone(),
        budget: entry.new_budget.to_string(),
    });
    Table::new(lines).with(Style::psql()).to_string()
}
