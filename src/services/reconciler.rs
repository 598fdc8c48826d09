//! Per-row budget reconciliation
//!
//! Every budget row runs an ordered guard sequence and lands in exactly one
//! terminal state. Rows are independent: a failure is reported and the next
//! row proceeds; nothing a row does can abort its zone or the run.

use regex::Regex;

use crate::models::zone::status_is_on;
use crate::models::{BudgetRow, Money};
use crate::platform::{AdsPlatform, CampaignRecord};

use super::resolver;

/// Terminal state of one budget row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Campaign id cell is empty; the row is inert
    MissingId,
    /// Row switch is anything other than "on"
    RowDisabled { status: String },
    /// Budget cell does not parse to a finite amount greater than zero
    InvalidBudget { raw: String },
    /// No catalog of the selected account carries the id
    Unresolved { campaign_id: String },
    /// Resolved, but the campaign name fails the configured filter
    NameFiltered {
        campaign: CampaignRecord,
        pattern: String,
    },
    /// Target equals the current budget; nothing written, nothing ledgered
    NoChange { campaign: CampaignRecord },
    /// Budget written and confirmed
    Applied {
        campaign: CampaignRecord,
        previous: Money,
        new_budget: Money,
    },
    /// The platform rejected the write; processing continues
    WriteFailed {
        campaign: CampaignRecord,
        error: String,
    },
}

/// The pure gates: everything decidable without touching the platform
///
/// Returns the parsed target budget when the row is actionable.
pub fn validate_row(row: &BudgetRow) -> Result<Money, RowOutcome> {
    if row.campaign_id.trim().is_empty() {
        return Err(RowOutcome::MissingId);
    }
    if !status_is_on(&row.raw_status) {
        return Err(RowOutcome::RowDisabled {
            status: row.raw_status.trim().to_string(),
        });
    }
    let target = Money::parse(&row.raw_budget).map_err(|_| RowOutcome::InvalidBudget {
        raw: row.raw_budget.clone(),
    })?;
    if !target.is_positive() {
        return Err(RowOutcome::InvalidBudget {
            raw: row.raw_budget.clone(),
        });
    }
    Ok(target)
}

/// Runs the full guard sequence for budget rows of the selected account
pub struct Reconciler<'a> {
    filter: &'a Regex,
}

impl<'a> Reconciler<'a> {
    pub fn new(filter: &'a Regex) -> Self {
        Self { filter }
    }

    pub fn process_row(&self, platform: &mut dyn AdsPlatform, row: &BudgetRow) -> RowOutcome {
        let target = match validate_row(row) {
            Ok(target) => target,
            Err(outcome) => return outcome,
        };

        let id = row.campaign_id.trim();
        let Some(campaign) = resolver::resolve(platform, id) else {
            return RowOutcome::Unresolved {
                campaign_id: id.to_string(),
            };
        };

        if !self.filter.is_match(&campaign.name) {
            return RowOutcome::NameFiltered {
                campaign,
                pattern: self.filter.as_str().to_string(),
            };
        }

        // Exact comparison: both sides are integer cents.
        if campaign.budget == target {
            return RowOutcome::NoChange { campaign };
        }

        let previous = campaign.budget;
        match platform.set_budget(&campaign.id, target) {
            Ok(()) => RowOutcome::Applied {
                campaign,
                previous,
                new_budget: target,
            },
            Err(err) => RowOutcome::WriteFailed {
                campaign,
                error: err.to_string(),
            },
        }
    }
}
