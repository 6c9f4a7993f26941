//! Core data models for expense-report
//!
//! Expense records are supplied by an external owner (a database, an API, a
//! file). The crate never mutates them.

pub mod expense;
pub mod ids;

pub use expense::{sort_newest_first, ExpenseRecord};
pub use ids::ExpenseId;
