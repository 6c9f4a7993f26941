//! JSON summary export
//!
//! The lightweight summary path: statistics without a spreadsheet.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::StatisticsResult;

/// Current summary schema version
pub const SUMMARY_SCHEMA_VERSION: &str = "1.0.0";

/// Statistics wrapped with export metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// When the summary was produced
    pub generated_at: NaiveDateTime,

    /// Version of the crate that produced the summary
    pub app_version: String,

    #[serde(flatten)]
    pub statistics: StatisticsResult,
}

impl SummaryExport {
    pub fn new(statistics: StatisticsResult, generated_at: NaiveDateTime) -> Self {
        Self {
            schema_version: SUMMARY_SCHEMA_VERSION.to_string(),
            generated_at,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            statistics,
        }
    }
}

/// Write the summary as JSON
pub fn export_summary_json<W: Write>(
    summary: &SummaryExport,
    writer: &mut W,
    pretty: bool,
) -> ExpenseResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, summary)?;
    } else {
        serde_json::to_writer(&mut *writer, summary)?;
    }
    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(())
}
