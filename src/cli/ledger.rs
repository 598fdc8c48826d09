//! Ledger CLI commands
//!
//! Read-only views over the audit tab of a workbook: a recent-entries table
//! and a CSV export.

use std::path::PathBuf;

use clap::Subcommand;

use crate::audit::ChangeLedger;
use crate::config::Settings;
use crate::display;
use crate::error::SyncResult;
use crate::export;
use crate::storage;

/// Ledger subcommands
#[derive(Subcommand)]
pub enum LedgerCommands {
    /// Show the most recent ledger entries
    Show {
        /// Workbook JSON file
        #[arg(long, value_name = "FILE")]
        workbook: PathBuf,

        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Export the full ledger to a CSV file
    Export {
        /// Workbook JSON file
        #[arg(long, value_name = "FILE")]
        workbook: PathBuf,

        /// Output CSV path
        output: PathBuf,
    },
}

/// Handle a ledger command
pub fn handle_ledger_command(settings: &Settings, cmd: LedgerCommands) -> SyncResult<()> {
    let ledger = ChangeLedger::new(settings.ledger_tab.clone());

    match cmd {
        LedgerCommands::Show { workbook, count } => {
            let workbook = storage::load_workbook(&workbook)?;
            let entries = ledger.read_all(&workbook)?;
            if entries.is_empty() {
                println!("The ledger is empty.");
                return Ok(());
            }
            let start = entries.len().saturating_sub(count);
            println!("{}", display::format_ledger(&entries[start..]));
            println!("{} of {} entries", entries.len() - start, entries.len());
        }
        LedgerCommands::Export { workbook, output } => {
            let workbook = storage::load_workbook(&workbook)?;
            let entries = ledger.read_all(&workbook)?;
            export::csv::export_ledger(&entries, &output)?;
            println!("Exported {} entries to {}", entries.len(), output.display());
        }
    }
    Ok(())
}
