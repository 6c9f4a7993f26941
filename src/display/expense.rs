//! Expense display formatting
//!
//! Register-style listing of expense records for terminal output.

use crate::models::ExpenseRecord;

const CATEGORY_WIDTH: usize = 15;
const DESCRIPTION_WIDTH: usize = 30;

/// Format a single expense as a register row
pub fn format_expense_row(record: &ExpenseRecord, date_format: &str) -> String {
    format!(
        "{:>6}  {:16}  {}  {}  {:>12.2}",
        record.id,
        record.date.format(date_format).to_string(),
        pad_truncate(&record.category, CATEGORY_WIDTH),
        pad_truncate(record.description_or_empty(), DESCRIPTION_WIDTH),
        record.amount
    )
}

/// Format a list of expenses as a register, in the order given
pub fn format_expense_register(records: &[ExpenseRecord], date_format: &str) -> String {
    if records.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>6}  {:16}  {:cat$}  {:desc$}  {:>12}\n",
        "ID",
        "Date",
        "Category",
        "Description",
        "Amount",
        cat = CATEGORY_WIDTH,
        desc = DESCRIPTION_WIDTH,
    ));
    output.push_str(&"-".repeat(6 + 16 + CATEGORY_WIDTH + DESCRIPTION_WIDTH + 12 + 8));
    output.push('\n');

    for record in records {
        output.push_str(&format_expense_row(record, date_format));
        output.push('\n');
    }

    let total: f64 = records.iter().map(|r| r.amount).sum();
    output.push_str(&format!("{} expenses, total {:.2}\n", records.len(), total));

    output
}

/// Pad or truncate to exactly `width` characters
fn pad_truncate(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len <= width {
        format!("{:width$}", s, width = width)
    } else {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
