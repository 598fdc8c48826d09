//! A1-style cell references
//!
//! The control table points at each zone's data region with a single anchor
//! cell like `"B5"`. References are parsed into 1-indexed row/column pairs;
//! multi-letter columns (`AA`, `AB`, ...) are supported.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A 1-indexed (row, column) position in a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Error type for cell reference parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cell reference '{0}'")]
pub struct CellRefParseError(pub String);

impl FromStr for CellRef {
    type Err = CellRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .char_indices()
            .find(|(_, c)| !c.is_ascii_alphabetic())
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());

        let (letters, digits) = trimmed.split_at(split);
        if letters.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(CellRefParseError(s.to_string()));
        }

        let col = letters.chars().fold(0usize, |acc, c| {
            acc * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1)
        });
        let row: usize = digits
            .parse()
            .map_err(|_| CellRefParseError(s.to_string()))?;
        if row == 0 {
            return Err(CellRefParseError(s.to_string()));
        }

        Ok(Self { row, col })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut n = self.col;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        letters.reverse();
        let col: String = letters.into_iter().collect();
        write!(f, "{}{}", col, self.row)
    }
}
