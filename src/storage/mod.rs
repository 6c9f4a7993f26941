//! Storage layer for expense-report
//!
//! Loads expense records from files and writes finished reports with atomic
//! renames.

pub mod expenses;
pub mod file_io;

pub use expenses::{load_expenses, parse_expense_date, validate_record, InputFormat};
pub use file_io::{read_json_required, write_bytes_atomic};
