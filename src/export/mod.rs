//! Export functionality for the change ledger

pub mod csv;
