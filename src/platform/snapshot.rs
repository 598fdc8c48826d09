//! In-memory ad platform built from a serde snapshot
//!
//! Stands in for the hosted account directory and campaign catalogs in
//! tests and offline runs. Budget writes mutate the snapshot, so a second
//! run over unchanged inputs sees the budgets the first run set.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{AccountHandle, AdsPlatform, CampaignRecord, CatalogKind, PlatformError};
use crate::models::Money;

/// One managed account and its campaigns, as loaded from a snapshot file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub customer_id: String,
    pub name: String,
    #[serde(default)]
    pub campaigns: Vec<CampaignRecord>,
}

/// Serialized platform state: the parent account plus the accounts it
/// manages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSnapshot {
    pub parent: AccountHandle,
    #[serde(default)]
    pub accounts: Vec<AccountSnapshot>,
}

/// `AdsPlatform` over a `PlatformSnapshot`
#[derive(Debug, Clone)]
pub struct SnapshotPlatform {
    snapshot: PlatformSnapshot,
    /// Customer id of the selected account; starts at the parent
    current: String,
    /// Campaign ids whose writes are rejected. Test hook.
    fail_writes: HashSet<String>,
}

fn canonical(id: &str) -> String {
    id.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

impl SnapshotPlatform {
    pub fn new(snapshot: PlatformSnapshot) -> Self {
        let current = snapshot.parent.customer_id.clone();
        Self {
            snapshot,
            current,
            fail_writes: HashSet::new(),
        }
    }

    /// Reject every budget write for the given campaign id
    pub fn fail_writes_for(&mut self, campaign_id: &str) {
        self.fail_writes.insert(campaign_id.to_string());
    }

    /// The (possibly mutated) snapshot, for persisting after a run
    pub fn snapshot(&self) -> &PlatformSnapshot {
        &self.snapshot
    }

    fn selected(&self) -> Option<&AccountSnapshot> {
        self.snapshot
            .accounts
            .iter()
            .find(|account| account.customer_id == self.current)
    }
}

impl AdsPlatform for SnapshotPlatform {
    fn current_account(&self) -> AccountHandle {
        match self.selected() {
            Some(account) => AccountHandle {
                customer_id: account.customer_id.clone(),
                name: account.name.clone(),
            },
            None => self.snapshot.parent.clone(),
        }
    }

    fn find_accounts(&self, customer_id: &str) -> Vec<AccountHandle> {
        let wanted = canonical(customer_id);
        self.snapshot
            .accounts
            .iter()
            .filter(|account| canonical(&account.customer_id) == wanted)
            .map(|account| AccountHandle {
                customer_id: account.customer_id.clone(),
                name: account.name.clone(),
            })
            .collect()
    }

    fn select_account(&mut self, account: &AccountHandle) {
        self.current = account.customer_id.clone();
    }

    fn find_campaign(&self, catalog: CatalogKind, campaign_id: &str) -> Option<CampaignRecord> {
        self.selected()?
            .campaigns
            .iter()
            .find(|campaign| campaign.catalog == catalog && campaign.id == campaign_id)
            .cloned()
    }

    fn list_campaigns(&self, catalog: CatalogKind) -> Vec<CampaignRecord> {
        self.selected()
            .map(|account| {
                account
                    .campaigns
                    .iter()
                    .filter(|campaign| campaign.catalog == catalog)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn set_budget(&mut self, campaign_id: &str, amount: Money) -> Result<(), PlatformError> {
        if self.fail_writes.contains(campaign_id) {
            return Err(PlatformError::WriteRejected(format!(
                "write rejected for campaign {}",
                campaign_id
            )));
        }
        let current = self.current.clone();
        let campaign = self
            .snapshot
            .accounts
            .iter_mut()
            .find(|account| account.customer_id == current)
            .and_then(|account| {
                account
                    .campaigns
                    .iter_mut()
                    .find(|campaign| campaign.id == campaign_id)
            })
            .ok_or_else(|| PlatformError::UnknownCampaign(campaign_id.to_string()))?;
        campaign.budget = amount;
        Ok(())
    }
}
