//! Report sheet layout
//!
//! The cell contents of the three data sheets, derived from the records and
//! their statistics before anything is written to a workbook. Charts are not
//! part of the layout: they only reference ranges on the category sheet.

use chrono::NaiveDateTime;

use crate::models::{sort_newest_first, ExpenseId, ExpenseRecord};
use crate::reports::StatisticsResult;

pub const EXPENSES_SHEET: &str = "Expenses";
pub const STATISTICS_SHEET: &str = "Statistics";
pub const CATEGORY_SHEET: &str = "Category Breakdown";
pub const CHARTS_SHEET: &str = "Charts";

const EXPENSE_HEADERS: &[&str] = &["ID", "Date", "Category", "Description", "Amount"];
const EXPENSE_WIDTHS: &[f64] = &[8.0, 20.0, 15.0, 30.0, 12.0];

const STATISTICS_HEADERS: &[&str] = &["Metric", "Value"];
const STATISTICS_WIDTHS: &[f64] = &[25.0, 15.0];

const CATEGORY_HEADERS: &[&str] = &["Category", "Total Amount", "Count", "Average"];
const CATEGORY_WIDTHS: &[f64] = &[20.0, 15.0, 10.0, 15.0];

/// Longest string a single xlsx cell can hold, in characters
pub const MAX_CELL_CHARS: usize = 32_767;

/// Largest integer an f64 cell holds exactly (2^53)
const MAX_EXACT_ID: i64 = 1 << 53;

/// Column of the category label on the category sheet
pub const CATEGORY_LABEL_COL: u16 = 0;
/// Column of the summed amount on the category sheet
pub const CATEGORY_TOTAL_COL: u16 = 1;
/// Column of the record count on the category sheet
pub const CATEGORY_COUNT_COL: u16 = 2;
/// Column of the average amount on the category sheet
pub const CATEGORY_AVERAGE_COL: u16 = 3;

/// A typed cell value with its rendering convention
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    /// Plain number, no number format
    Number(f64),
    /// Number rendered with the currency format
    Currency(f64),
    /// Timestamp rendered with the date-time format
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Text cell, cut to the first `MAX_CELL_CHARS` characters
    pub fn text(value: &str) -> Self {
        match value.char_indices().nth(MAX_CELL_CHARS) {
            Some((end, _)) => Cell::Text(value[..end].to_string()),
            None => Cell::Text(value.to_string()),
        }
    }

    /// Id cell: a number while it fits an f64 exactly, text beyond that
    pub fn id(id: ExpenseId) -> Self {
        let value = id.value();
        if (-MAX_EXACT_ID..=MAX_EXACT_ID).contains(&value) {
            Cell::Number(value as f64)
        } else {
            Cell::Text(value.to_string())
        }
    }
}

/// One data sheet: a header row followed by data rows
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub name: &'static str,
    pub headers: &'static [&'static str],
    pub column_widths: &'static [f64],
    pub rows: Vec<Vec<Cell>>,
}

impl SheetTable {
    /// Number of data rows (header excluded)
    pub fn data_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Contents of the Expenses, Statistics and Category Breakdown sheets
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub expenses: SheetTable,
    pub statistics: SheetTable,
    pub categories: SheetTable,
}

impl ReportLayout {
    /// Lay out the data sheets for a set of records and their statistics
    pub fn new(records: &[ExpenseRecord], stats: &StatisticsResult) -> Self {
        Self {
            expenses: expenses_table(records),
            statistics: statistics_table(stats),
            categories: categories_table(stats),
        }
    }

    /// Data sheets in workbook order
    pub fn tables(&self) -> [&SheetTable; 3] {
        [&self.expenses, &self.statistics, &self.categories]
    }
}

fn expenses_table(records: &[ExpenseRecord]) -> SheetTable {
    let mut sorted = records.to_vec();
    sort_newest_first(&mut sorted);

    let rows = sorted
        .iter()
        .map(|record| {
            vec![
                Cell::id(record.id),
                Cell::DateTime(record.date),
                Cell::text(&record.category),
                Cell::text(record.description_or_empty()),
                Cell::Currency(record.amount),
            ]
        })
        .collect();

    SheetTable {
        name: EXPENSES_SHEET,
        headers: EXPENSE_HEADERS,
        column_widths: EXPENSE_WIDTHS,
        rows,
    }
}

fn statistics_table(stats: &StatisticsResult) -> SheetTable {
    let metrics = [
        ("Total Expenses", stats.total),
        ("Total Count", stats.count as f64),
        ("Average Expense", stats.average),
        ("Median Expense", stats.median),
        ("Min Expense", stats.min),
        ("Max Expense", stats.max),
        ("Standard Deviation", stats.std_deviation),
    ];

    let rows = metrics
        .into_iter()
        .map(|(metric, value)| {
            let value = if metric.contains("Expense") {
                Cell::Currency(value)
            } else {
                Cell::Number(value)
            };
            vec![Cell::text(metric), value]
        })
        .collect();

    SheetTable {
        name: STATISTICS_SHEET,
        headers: STATISTICS_HEADERS,
        column_widths: STATISTICS_WIDTHS,
        rows,
    }
}

fn categories_table(stats: &StatisticsResult) -> SheetTable {
    let rows = stats
        .category_totals
        .iter()
        .map(|(category, total)| {
            let count = stats.category_counts.get(category).copied().unwrap_or(0);
            vec![
                Cell::text(category),
                Cell::Currency(*total),
                Cell::Number(count as f64),
                Cell::Currency(stats.category_average(category)),
            ]
        })
        .collect();

    SheetTable {
        name: CATEGORY_SHEET,
        headers: CATEGORY_HEADERS,
        column_widths: CATEGORY_WIDTHS,
        rows,
    }
}
