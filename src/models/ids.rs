//! Strongly-typed ID wrapper for expense records
//!
//! Expense ids are assigned by whatever system owns the records. They are
//! opaque to the report engine and only used as a stable tie-break key.
//! Spreadsheet cells hold numbers as f64, so ids beyond 2^53 in magnitude
//! are written to the report as text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an expense record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    /// Create an ID from its raw value
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ExpenseId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
