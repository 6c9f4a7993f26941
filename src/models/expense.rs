//! Expense record model
//!
//! An expense record is one logged spending event. Records are owned by the
//! caller; the statistics engine and report builder only ever read them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::ids::ExpenseId;

/// A single logged expense
///
/// Preconditions (not re-checked here): `amount` is positive and finite,
/// `category` is non-empty. Records violating them are still aggregated
/// as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique identifier, also the tie-break key for ordering
    pub id: ExpenseId,

    /// Amount spent, in currency units
    pub amount: f64,

    /// Grouping label (case-sensitive)
    pub category: String,

    /// Optional free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Logical date of the expense
    pub date: NaiveDateTime,
}

impl ExpenseRecord {
    /// Create a new expense record without a description
    pub fn new(
        id: impl Into<ExpenseId>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            category: category.into(),
            description: None,
            date,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description text, empty when absent
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Ordering used for listings: most recent first, higher id first on ties
    pub fn newest_first(a: &Self, b: &Self) -> Ordering {
        b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id))
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {:.2}",
            self.date.format("%Y-%m-%d"),
            self.id,
            self.category,
            self.amount
        )?;
        if let Some(desc) = self.description.as_deref().filter(|d| !d.is_empty()) {
            write!(f, " ({})", desc)?;
        }
        Ok(())
    }
}

/// Sort records in place, most recent first (ties broken by id descending)
pub fn sort_newest_first(records: &mut [ExpenseRecord]) {
    records.sort_by(ExpenseRecord::newest_first);
}
