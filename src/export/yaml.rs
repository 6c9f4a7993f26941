//! YAML summary export
//!
//! Same content as the JSON summary, for human-readable output.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::SummaryExport;

/// Write the summary as YAML with a short comment header
pub fn export_summary_yaml<W: Write>(summary: &SummaryExport, writer: &mut W) -> ExpenseResult<()> {
    writeln!(writer, "# Expense Statistics Summary")
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", summary.generated_at)
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, summary).map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
