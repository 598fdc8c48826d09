//! The `run` command
//!
//! Loads the workbook and the account snapshot, executes the engine once
//! and saves both back so inventory listings, ledger rows and applied
//! budgets persist for the next run.

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::display;
use crate::error::SyncResult;
use crate::platform::SnapshotPlatform;
use crate::services::SyncEngine;
use crate::storage;

/// Arguments for the `run` subcommand
#[derive(Args)]
pub struct RunArgs {
    /// Workbook JSON file (control tab plus data tabs)
    #[arg(long, value_name = "FILE")]
    pub workbook: PathBuf,

    /// Account snapshot JSON file (parent plus managed accounts)
    #[arg(long, value_name = "FILE")]
    pub snapshot: PathBuf,
}

/// Run the whole synchronization process once
pub fn handle_run_command(settings: &Settings, args: &RunArgs) -> SyncResult<()> {
    let mut workbook = storage::load_workbook(&args.workbook)?;
    let snapshot = storage::load_snapshot(&args.snapshot)?;
    let mut platform = SnapshotPlatform::new(snapshot);

    let summary = {
        let mut engine = SyncEngine::new(&mut platform, settings)?;
        engine.run(&mut workbook)?
    };

    storage::save_workbook(&args.workbook, &workbook)?;
    storage::save_snapshot(&args.snapshot, platform.snapshot())?;

    print!("{}", display::format_run_summary(&summary));
    Ok(())
}
