//! Ad-platform collaborators
//!
//! The account directory, the type-partitioned campaign catalogs and the
//! budget write sit behind a single trait so the engine can run against the
//! hosted service or an in-memory snapshot. Every campaign operation is
//! scoped to the currently selected account; campaign ids are unique within
//! an account but may recur across accounts.

pub mod snapshot;

pub use snapshot::{AccountSnapshot, PlatformSnapshot, SnapshotPlatform};

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Money;

/// A selectable account visible from the parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHandle {
    pub customer_id: String,
    pub name: String,
}

/// The type-partitioned catalog a campaign belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogKind {
    PerformanceMax,
    Shopping,
    Video,
    /// Search, Display and every other standard type
    Generic,
}

/// Catalog probe order for id resolution: typed catalogs before the
/// catch-all generic catalog, so a campaign surfaced by both keeps its
/// specific type.
pub const PROBE_ORDER: [CatalogKind; 4] = [
    CatalogKind::PerformanceMax,
    CatalogKind::Shopping,
    CatalogKind::Video,
    CatalogKind::Generic,
];

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::PerformanceMax => write!(f, "Performance Max"),
            CatalogKind::Shopping => write!(f, "Shopping"),
            CatalogKind::Video => write!(f, "Video"),
            CatalogKind::Generic => write!(f, "Generic"),
        }
    }
}

/// A campaign resolved within the selected account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub id: String,
    pub name: String,
    pub catalog: CatalogKind,
    /// Current daily budget
    pub budget: Money,
    pub enabled: bool,
}

/// Errors surfaced by the platform on a budget write
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("budget write rejected: {0}")]
    WriteRejected(String),

    #[error("no campaign with id '{0}' in the selected account")]
    UnknownCampaign(String),
}

/// The external ad platform, seen from a parent (manager) account
pub trait AdsPlatform {
    /// The ambient account. Exactly one account is selected at any time.
    fn current_account(&self) -> AccountHandle;

    /// Accounts matching a separator-stripped customer id
    fn find_accounts(&self, customer_id: &str) -> Vec<AccountHandle>;

    fn select_account(&mut self, account: &AccountHandle);

    /// Look up one campaign in one catalog of the selected account
    fn find_campaign(&self, catalog: CatalogKind, campaign_id: &str) -> Option<CampaignRecord>;

    /// All campaigns in one catalog of the selected account
    fn list_campaigns(&self, catalog: CatalogKind) -> Vec<CampaignRecord>;

    /// Write a new daily budget for a campaign of the selected account
    fn set_budget(&mut self, campaign_id: &str, amount: Money) -> Result<(), PlatformError>;
}
