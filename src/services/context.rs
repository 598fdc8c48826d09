//! Scoped account selection
//!
//! The platform carries one ambient "currently selected account".
//! `with_account` saves it, selects the zone's account and restores the
//! original on every exit path; the guard's `Drop` runs on early returns
//! and panics alike, so the parent account is never left selected-away at
//! a zone boundary. Nested selection is a design error and trips an
//! assertion.

use std::cell::Cell;

use tracing::{debug, info};

use crate::error::ZoneError;
use crate::platform::{AccountHandle, AdsPlatform};

thread_local! {
    static SELECTION_DEPTH: Cell<u32> = Cell::new(0);
}

/// Strip separators (hyphens and anything else non-alphanumeric) from a
/// customer id before directory lookup
pub fn clean_account_id(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

struct AccountScope<'a> {
    platform: &'a mut dyn AdsPlatform,
    original: AccountHandle,
}

impl<'a> AccountScope<'a> {
    fn enter(platform: &'a mut dyn AdsPlatform, target: &AccountHandle) -> Self {
        SELECTION_DEPTH.with(|depth| {
            assert_eq!(depth.get(), 0, "re-entrant account selection");
            depth.set(depth.get() + 1);
        });
        let original = platform.current_account();
        platform.select_account(target);
        Self { platform, original }
    }
}

impl Drop for AccountScope<'_> {
    fn drop(&mut self) {
        self.platform.select_account(&self.original);
        SELECTION_DEPTH.with(|depth| depth.set(depth.get() - 1));
        debug!(account = %self.original.customer_id, "restored original account");
    }
}

/// Run `body` with the zone's account selected
///
/// Resolves the cleaned id via the directory; if nothing matches, the body
/// never executes and the zone is abandoned. When several accounts match,
/// the first one is selected.
pub fn with_account<T>(
    platform: &mut dyn AdsPlatform,
    account_id: &str,
    body: impl FnOnce(&mut dyn AdsPlatform, &AccountHandle) -> T,
) -> Result<T, ZoneError> {
    let cleaned = clean_account_id(account_id);
    let target = platform
        .find_accounts(&cleaned)
        .into_iter()
        .next()
        .ok_or_else(|| ZoneError::AccountNotFound(account_id.to_string()))?;

    let mut scope = AccountScope::enter(platform, &target);
    info!(
        account = %target.name,
        customer_id = %target.customer_id,
        "switched to account"
    );
    Ok(body(&mut *scope.platform, &target))
}
