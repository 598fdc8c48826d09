//! Currency amounts for campaign budgets
//!
//! Budgets are stored as integer cents so the "no change needed" comparison
//! in the reconciler is exact. Sheet cells arrive as text; `parse` accepts
//! plain decimals with an optional currency symbol and rejects everything
//! non-numeric, which is what makes a budget row actionable or not.

use serde::{Deserialize, Serialize};
use std::fmt;

use thiserror::Error;

/// A currency-scale amount stored as cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create an amount from cents
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whether the amount is strictly greater than zero
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parse an amount from raw cell text
    ///
    /// Accepts `"50"`, `"50.5"`, `"50.00"`, `"$50.00"` and negative forms.
    /// Fractions beyond two digits are truncated to cents. Empty and
    /// non-numeric text is rejected.
    pub fn parse(raw: &str) -> Result<Self, MoneyParseError> {
        let s = raw.trim();
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let s = s.strip_prefix('$').unwrap_or(s);
        if s.is_empty() {
            return Err(MoneyParseError(raw.to_string()));
        }

        let (whole, fraction) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
            || (whole.is_empty() && fraction.is_empty())
        {
            return Err(MoneyParseError(raw.to_string()));
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| MoneyParseError(raw.to_string()))?
        };
        let cents_part: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().unwrap_or(0) * 10,
            _ => fraction[..2].parse::<i64>().unwrap_or(0),
        };

        let cents = units * 100 + cents_part;
        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Render without a currency symbol, for sheet cells ("50.00")
    pub fn plain(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-${}", self.plain().trim_start_matches('-'))
        } else {
            write!(f, "${}", self.plain())
        }
    }
}

/// Error type for budget parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid amount: '{0}'")]
pub struct MoneyParseError(pub String);
