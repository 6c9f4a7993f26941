//! Expense file loading
//!
//! Reads expense records from JSON or CSV files. This is the upstream side of
//! the statistics engine: records are validated here, before they reach it.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;

use super::file_io::read_json_required;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseId, ExpenseRecord};

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted shapes of an expenses JSON file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExpenseFile {
    List(Vec<ExpenseRecord>),
    Wrapped { expenses: Vec<ExpenseRecord> },
}

/// One CSV row, before date parsing
#[derive(Debug, Deserialize)]
struct CsvExpense {
    id: i64,
    date: String,
    category: String,
    description: Option<String>,
    amount: f64,
}

/// Input file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Guess the format from the file extension (JSON unless `.csv`)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Load and validate expense records from a JSON or CSV file
pub fn load_expenses<P: AsRef<Path>>(path: P) -> ExpenseResult<Vec<ExpenseRecord>> {
    let path = path.as_ref();

    let records = match InputFormat::from_path(path) {
        InputFormat::Json => match read_json_required::<ExpenseFile, _>(path)? {
            ExpenseFile::List(records) => records,
            ExpenseFile::Wrapped { expenses } => expenses,
        },
        InputFormat::Csv => load_csv(path)?,
    };

    for record in &records {
        validate_record(record)?;
    }

    tracing::info!(path = %path.display(), count = records.len(), "loaded expenses");

    Ok(records)
}

fn load_csv(path: &Path) -> ExpenseResult<Vec<ExpenseRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<CsvExpense>().enumerate() {
        // Header is line 1
        let line = index + 2;
        let row = row.map_err(|e| ExpenseError::parse(format!("line {}", line), e.to_string()))?;

        let date = parse_expense_date(&row.date)
            .ok_or_else(|| ExpenseError::parse(format!("line {}", line), format!("invalid date '{}'", row.date)))?;

        records.push(ExpenseRecord {
            id: ExpenseId::new(row.id),
            amount: row.amount,
            category: row.category,
            description: row.description.filter(|d| !d.is_empty()),
            date,
        });
    }

    Ok(records)
}

/// Parse a date or date-time string
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, RFC 3339 (converted
/// to UTC) and a bare `YYYY-MM-DD` (midnight).
pub fn parse_expense_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    for format in DATE_TIME_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(s, format) {
            return Some(date);
        }
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.naive_utc());
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Check the preconditions the statistics engine relies on
pub fn validate_record(record: &ExpenseRecord) -> ExpenseResult<()> {
    if !record.amount.is_finite() || record.amount <= 0.0 {
        return Err(ExpenseError::Validation(format!(
            "expense {} has a non-positive amount: {}",
            record.id, record.amount
        )));
    }

    if record.category.trim().is_empty() {
        return Err(ExpenseError::Validation(format!(
            "expense {} has an empty category",
            record.id
        )));
    }

    Ok(())
}
