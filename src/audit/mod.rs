//! Audit trail for budget changes
//!
//! Every confirmed budget write is recorded on an append-only workbook tab.
//! Skips and no-ops are never ledgered; the trail answers "what actually
//! changed, when, and in which account".

pub mod entry;
pub mod ledger;

pub use entry::LedgerEntry;
pub use ledger::{ChangeLedger, LEDGER_HEADER};
