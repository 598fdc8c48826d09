//! Engine service layer
//!
//! The synchronization logic proper: control-table parsing, scoped account
//! selection, campaign resolution, per-row reconciliation, inventory
//! refresh and the run orchestration that ties them together.

pub mod context;
pub mod engine;
pub mod inventory;
pub mod reconciler;
pub mod registry;
pub mod resolver;

pub use engine::{RunSummary, SyncEngine};
