//! Reports module for expense-report
//!
//! Provides the statistics engine: aggregate figures over all expenses and
//! per-category summaries.

pub mod statistics;

pub use statistics::{compute, compute_for_category, CategorySummary, StatisticsResult};
