use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use budgetsync::cli::{handle_ledger_command, handle_run_command, LedgerCommands, RunArgs};
use budgetsync::config::{AppPaths, Settings};

#[derive(Parser)]
#[command(
    name = "budgetsync",
    version,
    about = "Spreadsheet-driven daily budget synchronization for managed ad accounts",
    long_about = "budgetsync reads a control tab that lists zones (one per managed \
                  sub-account), switches into each account, resolves campaigns across \
                  the typed catalogs and applies the budget changes the workbook asks \
                  for, recording every confirmed change in an append-only ledger."
)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug-level reporting
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the whole synchronization process once
    Run(RunArgs),

    /// Inspect or export the change ledger
    #[command(subcommand)]
    Ledger(LedgerCommands),

    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_path = match &cli.config {
        Some(path) => path.clone(),
        None => AppPaths::new()?.settings_file(),
    };
    let settings = Settings::load_or_create(&settings_path)?;

    init_reporting(cli.verbose || settings.verbose);

    match cli.command {
        Commands::Run(args) => {
            handle_run_command(&settings, &args)?;
        }
        Commands::Ledger(cmd) => {
            handle_ledger_command(&settings, cmd)?;
        }
        Commands::Config => {
            println!("budgetsync configuration");
            println!("========================");
            println!("Settings file:      {}", settings_path.display());
            println!();
            println!("Control tab:        {}", settings.control_tab);
            println!("Header rows:        {}", settings.header_rows);
            println!("Inventory refresh:  {}", settings.inventory_refresh);
            println!("Ledger enabled:     {}", settings.ledger_enabled);
            println!("Ledger tab:         {}", settings.ledger_tab);
            println!("Name filter:        {}", settings.campaign_name_filter);
            println!("Verbose:            {}", settings.verbose);
        }
    }

    Ok(())
}

/// Route engine reports through tracing; RUST_LOG overrides the default
/// level, the verbose flag lowers it to debug.
fn init_reporting(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
