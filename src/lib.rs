//! budgetsync - spreadsheet-driven campaign budget synchronization
//!
//! Synchronizes advertising-campaign daily budgets across many client
//! accounts managed by a parent account. A control tab enumerates zones
//! (one per managed sub-account); each zone points at a data region of
//! campaign ids, target budgets and per-row switches. The engine walks the
//! zones, selects each account in turn, resolves campaigns across the
//! typed catalogs and applies only the budget changes that are needed,
//! safe and filtered-in, keeping an append-only audit trail of everything
//! it changed.
//!
//! # Architecture
//!
//! - `config`: settings and path management
//! - `error`: the error taxonomy (fatal / zone / row)
//! - `models`: cell references, currency amounts, zone records
//! - `grid`: the injected tabular store and the in-memory workbook
//! - `platform`: the ad-platform trait and its snapshot implementation
//! - `services`: registry, account scope, resolver, reconciler, inventory
//!   and the run engine
//! - `audit`: the append-only change ledger
//! - `storage`: JSON persistence for workbooks and snapshots
//! - `display`, `export`: operator-facing output

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod grid;
pub mod models;
pub mod platform;
pub mod services;
pub mod storage;

pub use error::{SyncError, SyncResult};
