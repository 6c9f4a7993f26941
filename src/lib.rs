//! expense-report - expense statistics and spreadsheet report export
//!
//! Given a collection of expense records, this crate computes a deterministic
//! set of aggregate and per-category statistics, and renders the records and
//! statistics into an xlsx workbook with formatted tables and charts.
//!
//! # Architecture
//!
//! - `models`: Expense records and ids
//! - `reports`: Statistics engine (pure, no I/O)
//! - `export`: Spreadsheet report builder and summary exporters
//! - `storage`: Loading expense files, atomic report writes
//! - `config`: Paths, settings and logging for the command-line front end
//! - `display`, `cli`: Terminal output and command handlers
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_report::export::ReportBuilder;
//! use expense_report::reports::compute;
//!
//! let stats = compute(&records);
//! let bytes = ReportBuilder::new().build(&records, &stats)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
