//! Ledger entry record
//!
//! One confirmed budget change. Entries render to and from the seven
//! columns of the ledger tab; the timestamp is split into date and time
//! columns so the tab stays filterable by hand.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::models::Money;
use crate::platform::AccountHandle;

/// A single confirmed budget change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// When the write was confirmed (UTC)
    pub timestamp: DateTime<Utc>,
    pub account_name: String,
    pub account_id: String,
    pub campaign_name: String,
    pub campaign_id: String,
    /// The budget value that was set
    pub new_budget: Money,
}

impl LedgerEntry {
    /// Record a confirmed write against the selected account, stamped now
    pub fn record(
        account: &AccountHandle,
        campaign_name: impl Into<String>,
        campaign_id: impl Into<String>,
        new_budget: Money,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            account_name: account.name.clone(),
            account_id: account.customer_id.clone(),
            campaign_name: campaign_name.into(),
            campaign_id: campaign_id.into(),
            new_budget,
        }
    }

    /// Render as a ledger tab row
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.format("%Y-%m-%d").to_string(),
            self.timestamp.format("%H:%M:%S").to_string(),
            self.account_name.clone(),
            self.account_id.clone(),
            self.campaign_name.clone(),
            self.campaign_id.clone(),
            self.new_budget.plain(),
        ]
    }

    /// Parse a ledger tab row back into an entry. Returns `None` for rows
    /// that do not carry a full, well-formed entry (the header included).
    pub fn from_row(row: &[String]) -> Option<Self> {
        if row.len() < 7 {
            return None;
        }
        let stamp = format!("{} {}", row[0], row[1]);
        let timestamp = NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H:%M:%S")
            .ok()?
            .and_utc();
        let new_budget = Money::parse(&row[6]).ok()?;
        Some(Self {
            timestamp,
            account_name: row[2].clone(),
            account_id: row[3].clone(),
            campaign_name: row[4].clone(),
            campaign_id: row[5].clone(),
            new_budget,
        })
    }
}
