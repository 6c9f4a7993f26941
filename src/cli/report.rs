//! CLI commands for statistics and listings
//!
//! The summary query path: statistics without producing a spreadsheet.

use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use clap::ValueEnum;

use crate::config::Settings;
use crate::display::format_expense_register;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_summary_json, export_summary_yaml, SummaryExport};
use crate::models::sort_newest_first;
use crate::reports::{compute, compute_for_category};
use crate::storage::load_expenses;

/// Output format for the summary command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// Human-readable table
    #[default]
    Text,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

/// Print aggregate statistics for every expense in `input`
pub fn handle_summary(input: &Path, format: SummaryFormat, pretty: bool) -> ExpenseResult<()> {
    let records = load_expenses(input)?;
    let stats = compute(&records);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        SummaryFormat::Text => {
            write!(out, "{}", stats.format_terminal())
                .map_err(|e| ExpenseError::Io(e.to_string()))?;
        }
        SummaryFormat::Json => {
            let summary = SummaryExport::new(stats, Local::now().naive_local());
            export_summary_json(&summary, &mut out, pretty)?;
        }
        SummaryFormat::Yaml => {
            let summary = SummaryExport::new(stats, Local::now().naive_local());
            export_summary_yaml(&summary, &mut out)?;
        }
    }

    Ok(())
}

/// Print statistics for a single category (exact, case-sensitive match)
pub fn handle_category(input: &Path, category: &str) -> ExpenseResult<()> {
    let records = load_expenses(input)?;
    let summary = compute_for_category(&records, category);
    print!("{}", summary.format_terminal());
    Ok(())
}

/// List expenses newest first, optionally filtered by category
///
/// `offset` records are skipped before `limit` is applied.
pub fn handle_list(
    input: &Path,
    category: Option<&str>,
    offset: usize,
    limit: Option<usize>,
    settings: &Settings,
) -> ExpenseResult<()> {
    let mut records = load_expenses(input)?;

    if let Some(category) = category {
        records.retain(|r| r.category == category);
    }
    sort_newest_first(&mut records);
    records.drain(..offset.min(records.len()));
    if let Some(limit) = limit {
        records.truncate(limit);
    }

    print!("{}", format_expense_register(&records, &settings.date_format));
    Ok(())
}
