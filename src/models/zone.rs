//! Zone and budget-row records read from the workbook
//!
//! A zone is one control-table row: a managed sub-account plus the tab that
//! carries its per-campaign budget data. Budget rows keep their cell text
//! raw so skip reports can show the offending value verbatim.

/// One enabled control-table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    /// Human-readable zone label from the control tab
    pub name: String,
    /// Customer id of the account to select (separators allowed)
    pub account_id: String,
    /// Tab holding this zone's data region
    pub tab_name: String,
    /// Raw anchor reference ("B5"). Parsed when the zone is processed so a
    /// bad reference abandons only that zone.
    pub anchor: String,
    /// 1-indexed control-tab row, for reports
    pub source_row: usize,
}

/// One entry of a zone's data region: campaign id, target budget, row switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetRow {
    pub campaign_id: String,
    pub raw_budget: String,
    pub raw_status: String,
    /// 1-indexed row in the data tab, for reports
    pub source_row: usize,
}

/// The actionable-status literal check used by both the control table and
/// the per-row switch: trimmed, case-insensitive "on".
pub fn status_is_on(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_literal() {
        assert!(status_is_on("on"));
        assert!(status_is_on("On"));
        assert!(status_is_on("ON "));
        assert!(status_is_on("  oN"));
        assert!(!status_is_on("off"));
        assert!(!status_is_on("yes"));
        assert!(!status_is_on(""));
        assert!(!status_is_on("on!"));
    }
}
