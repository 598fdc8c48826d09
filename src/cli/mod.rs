//! CLI command handlers

pub mod ledger;
pub mod run;

pub use ledger::{handle_ledger_command, LedgerCommands};
pub use run::{handle_run_command, RunArgs};
