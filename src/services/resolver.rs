//! Campaign resolution across typed catalogs
//!
//! The platform partitions campaigns into typed catalogs, and the generic
//! catalog may also surface campaigns that belong to a more specific type.
//! Resolution therefore probes the typed catalogs first and the generic
//! catalog last; the first hit wins and the remaining catalogs are not
//! consulted.

use std::collections::HashSet;

use crate::platform::{AdsPlatform, CampaignRecord, PROBE_ORDER};

/// Find a campaign by id within the selected account
///
/// `None` is a normal, frequently-occurring outcome, not a failure.
pub fn resolve(platform: &dyn AdsPlatform, campaign_id: &str) -> Option<CampaignRecord> {
    PROBE_ORDER
        .iter()
        .find_map(|kind| platform.find_campaign(*kind, campaign_id))
}

/// Every campaign in the selected account, merged across all catalogs
///
/// Each id is kept once, labeled with the catalog it first appeared in
/// (probe order, so duplicates keep their most specific type), and the
/// result is ordered by campaign name, case-insensitively. Used only for
/// read-only reporting, never on the write path.
pub fn resolve_all(platform: &dyn AdsPlatform) -> Vec<CampaignRecord> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for kind in PROBE_ORDER {
        for campaign in platform.list_campaigns(kind) {
            if seen.insert(campaign.id.clone()) {
                merged.push(campaign);
            }
        }
    }
    merged.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    merged
}
