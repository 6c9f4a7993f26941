//! Expense statistics
//!
//! Aggregate and per-category statistics over a slice of expense records.
//! Both entry points are pure: no I/O, no shared state, and the input is
//! never modified. Empty input yields an all-zero result, never an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::ExpenseRecord;

/// Aggregate statistics over a set of expenses
///
/// `std_deviation` is the population standard deviation (divides by
/// `count`). Category maps are keyed by the exact category label and iterate
/// in sorted key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResult {
    #[serde(rename = "total_expenses")]
    pub total: f64,
    #[serde(rename = "total_count")]
    pub count: usize,
    #[serde(rename = "average_expense")]
    pub average: f64,
    #[serde(rename = "median_expense")]
    pub median: f64,
    #[serde(rename = "min_expense")]
    pub min: f64,
    #[serde(rename = "max_expense")]
    pub max: f64,
    pub std_deviation: f64,
    /// Summed amount per category
    #[serde(rename = "category_breakdown")]
    pub category_totals: BTreeMap<String, f64>,
    /// Number of records per category
    pub category_counts: BTreeMap<String, usize>,
}

/// Statistics for the records of a single category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total: f64,
    pub count: usize,
    pub average: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

/// Reductions shared by the overall and per-category statistics
#[derive(Debug, Clone, Copy, Default)]
struct AmountSummary {
    total: f64,
    count: usize,
    average: f64,
    median: f64,
    min: f64,
    max: f64,
    std_deviation: f64,
}

impl AmountSummary {
    fn from_amounts(mut amounts: Vec<f64>) -> Self {
        if amounts.is_empty() {
            return Self::default();
        }

        amounts.sort_by(f64::total_cmp);

        let count = amounts.len();
        let n = count as f64;
        let total: f64 = amounts.iter().sum();
        let average = total / n;
        let variance = amounts.iter().map(|a| (a - average).powi(2)).sum::<f64>() / n;

        Self {
            total,
            count,
            average,
            median: median_of_sorted(&amounts),
            min: amounts[0],
            max: amounts[count - 1],
            std_deviation: variance.sqrt(),
        }
    }
}

/// Median of a non-empty, ascending slice
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Compute statistics over every record
pub fn compute(records: &[ExpenseRecord]) -> StatisticsResult {
    let summary = AmountSummary::from_amounts(records.iter().map(|r| r.amount).collect());

    let mut category_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut category_counts: BTreeMap<String, usize> = BTreeMap::new();

    for record in records {
        *category_totals.entry(record.category.clone()).or_insert(0.0) += record.amount;
        *category_counts.entry(record.category.clone()).or_insert(0) += 1;
    }

    tracing::debug!(
        count = summary.count,
        categories = category_totals.len(),
        "computed expense statistics"
    );

    StatisticsResult {
        total: summary.total,
        count: summary.count,
        average: summary.average,
        median: summary.median,
        min: summary.min,
        max: summary.max,
        std_deviation: summary.std_deviation,
        category_totals,
        category_counts,
    }
}

/// Compute statistics over the records whose category equals `category`
///
/// The match is exact and case-sensitive. No matching records gives an
/// all-zero summary carrying the requested category name.
pub fn compute_for_category(records: &[ExpenseRecord], category: &str) -> CategorySummary {
    let amounts: Vec<f64> = records
        .iter()
        .filter(|r| r.category == category)
        .map(|r| r.amount)
        .collect();
    let summary = AmountSummary::from_amounts(amounts);

    CategorySummary {
        category: category.to_string(),
        total: summary.total,
        count: summary.count,
        average: summary.average,
        median: summary.median,
        min: summary.min,
        max: summary.max,
    }
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Average")]
    average: String,
}

impl StatisticsResult {
    /// Average amount for one category, `0.0` if the category is unknown
    pub fn category_average(&self, category: &str) -> f64 {
        match (
            self.category_totals.get(category),
            self.category_counts.get(category),
        ) {
            (Some(total), Some(&count)) if count > 0 => total / count as f64,
            _ => 0.0,
        }
    }

    /// Check whether any expenses were aggregated
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Format the statistics for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Expense Statistics\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>15.2}\n", "Total Expenses", self.total));
        output.push_str(&format!("{:<20} {:>15}\n", "Total Count", self.count));
        output.push_str(&format!("{:<20} {:>15.2}\n", "Average Expense", self.average));
        output.push_str(&format!("{:<20} {:>15.2}\n", "Median Expense", self.median));
        output.push_str(&format!("{:<20} {:>15.2}\n", "Min Expense", self.min));
        output.push_str(&format!("{:<20} {:>15.2}\n", "Max Expense", self.max));
        output.push_str(&format!(
            "{:<20} {:>15.2}\n",
            "Standard Deviation", self.std_deviation
        ));

        if self.category_totals.is_empty() {
            output.push_str("\nNo expenses recorded.\n");
            return output;
        }

        let rows: Vec<CategoryRow> = self
            .category_totals
            .iter()
            .map(|(category, total)| CategoryRow {
                category: category.clone(),
                total: format!("{:.2}", total),
                count: self.category_counts.get(category).copied().unwrap_or(0),
                average: format!("{:.2}", self.category_average(category)),
            })
            .collect();

        output.push('\n');
        output.push_str(&Table::new(rows).with(Style::psql()).to_string());
        output.push('\n');

        output
    }
}

impl CategorySummary {
    /// Format the summary for terminal display
    pub fn format_terminal(&self) -> String {
        if self.count == 0 {
            return format!("No expenses found in category '{}'.\n", self.category);
        }

        let mut output = String::new();
        output.push_str(&format!("Category: {}\n", self.category));
        output.push_str(&format!("  Total:   {:.2}\n", self.total));
        output.push_str(&format!("  Count:   {}\n", self.count));
        output.push_str(&format!("  Average: {:.2}\n", self.average));
        output.push_str(&format!("  Median:  {:.2}\n", self.median));
        output.push_str(&format!("  Min:     {:.2}\n", self.min));
        output.push_str(&format!("  Max:     {:.2}\n", self.max));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    const EPS: f64 = 1e-9;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn record(id: i64, amount: f64, category: &str) -> ExpenseRecord {
        ExpenseRecord::new(id, amount, category, day(1 + (id as u32 % 28)))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= EPS * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let stats = compute(&[]);

        assert_eq!(stats, StatisticsResult::default());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.total, 0.0);
        assert_eq!(stats.std_deviation, 0.0);
        assert!(stats.category_totals.is_empty());
        assert!(stats.category_counts.is_empty());
        assert!(stats.is_empty());
    }

    #[test]
    fn test_single_record() {
        let stats = compute(&[record(1, 50.0, "Food")]);

        assert_eq!(stats.total, 50.0);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.average, 50.0);
        assert_eq!(stats.median, 50.0);
        assert_eq!(stats.min, 50.0);
        assert_eq!(stats.max, 50.0);
        assert_eq!(stats.std_deviation, 0.0);
        assert_eq!(stats.category_totals.get("Food"), Some(&50.0));
        assert_eq!(stats.category_counts.get("Food"), Some(&1));
    }

    #[test]
    fn test_two_records_same_category() {
        let stats = compute(&[record(1, 10.0, "A"), record(2, 30.0, "A")]);

        assert_eq!(stats.total, 40.0);
        assert_eq!(stats.average, 20.0);
        assert_eq!(stats.median, 20.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 30.0);
        assert_eq!(stats.category_totals.get("A"), Some(&40.0));
        assert_eq!(stats.category_counts.get("A"), Some(&2));
    }

    #[test]
    fn test_std_deviation_is_population_not_sample() {
        // Population: sqrt(((10-20)^2 + (30-20)^2) / 2) = 10.
        // A sample deviation would divide by 1 and give ~14.142.
        let stats = compute(&[record(1, 10.0, "A"), record(2, 30.0, "A")]);
        assert!(approx(stats.std_deviation, 10.0));
        assert!(!approx(stats.std_deviation, 200.0_f64.sqrt()));
    }

    #[test]
    fn test_mixed_categories() {
        let records = vec![record(1, 10.0, "A"), record(2, 20.0, "B"), record(3, 30.0, "A")];
        let stats = compute(&records);

        assert_eq!(stats.category_totals.get("A"), Some(&40.0));
        assert_eq!(stats.category_totals.get("B"), Some(&20.0));
        assert_eq!(stats.category_counts.get("A"), Some(&2));
        assert_eq!(stats.category_counts.get("B"), Some(&1));
        assert_eq!(stats.category_average("A"), 20.0);
        assert_eq!(stats.category_average("B"), 20.0);
        assert_eq!(stats.category_average("C"), 0.0);
    }

    #[test]
    fn test_categories_are_case_sensitive() {
        let stats = compute(&[record(1, 5.0, "food"), record(2, 7.0, "Food")]);
        assert_eq!(stats.category_totals.len(), 2);
        assert_eq!(stats.category_counts.get("food"), Some(&1));
        assert_eq!(stats.category_counts.get("Food"), Some(&1));
    }

    #[test]
    fn test_median_odd_and_even_counts() {
        let odd = compute(&[record(1, 9.0, "A"), record(2, 1.0, "A"), record(3, 4.0, "A")]);
        assert_eq!(odd.median, 4.0);

        let even = compute(&[
            record(1, 9.0, "A"),
            record(2, 1.0, "A"),
            record(3, 4.0, "A"),
            record(4, 2.0, "A"),
        ]);
        assert_eq!(even.median, 3.0);
    }

    #[test]
    fn test_aggregate_invariants() {
        let amounts = [12.34, 0.99, 150.0, 42.42, 7.5, 7.5, 1000.01, 3.33, 64.0];
        let categories = ["Food", "Transport", "Rent", "Food", "Fun", "Fun", "Rent", "Misc", "Food"];
        let records: Vec<_> = amounts
            .iter()
            .zip(categories.iter())
            .enumerate()
            .map(|(i, (a, c))| record(i as i64, *a, c))
            .collect();

        let stats = compute(&records);

        assert_eq!(stats.count, records.len());
        let category_sum: f64 = stats.category_totals.values().sum();
        assert!(approx(category_sum, stats.total));
        assert_eq!(stats.category_counts.values().sum::<usize>(), stats.count);
        assert!(stats.min <= stats.average && stats.average <= stats.max);
        assert!(stats.min <= stats.median && stats.median <= stats.max);
        assert_eq!(stats.category_totals.len(), stats.category_counts.len());
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut records = vec![record(1, 3.0, "A"), record(2, 8.0, "B"), record(3, 1.0, "A")];
        let forward = compute(&records);
        records.reverse();
        let backward = compute(&records);

        assert_eq!(forward.median, backward.median);
        assert_eq!(forward.category_counts, backward.category_counts);
        assert!(approx(forward.total, backward.total));
        assert!(approx(forward.std_deviation, backward.std_deviation));
    }

    #[test]
    fn test_compute_for_category() {
        let records = vec![
            record(1, 10.0, "A"),
            record(2, 20.0, "B"),
            record(3, 30.0, "A"),
            record(4, 50.0, "A"),
        ];

        let summary = compute_for_category(&records, "A");
        assert_eq!(summary.category, "A");
        assert_eq!(summary.total, 90.0);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, 30.0);
        assert_eq!(summary.median, 30.0);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 50.0);
    }

    #[test]
    fn test_compute_for_missing_category() {
        let records = vec![record(1, 10.0, "A")];

        let summary = compute_for_category(&records, "a");
        assert_eq!(summary.category, "a");
        assert_eq!(summary.count, 0);
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.median, 0.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let stats = compute(&[record(1, 50.0, "Food")]);
        let value = serde_json::to_value(&stats).unwrap();

        assert_eq!(value["total_expenses"], 50.0);
        assert_eq!(value["total_count"], 1);
        assert_eq!(value["category_breakdown"]["Food"], 50.0);
        assert_eq!(value["category_counts"]["Food"], 1);
    }

    #[test]
    fn test_format_terminal() {
        let stats = compute(&[record(1, 10.0, "Food"), record(2, 30.0, "Rent")]);
        let text = stats.format_terminal();
        assert!(text.contains("Total Expenses"));
        assert!(text.contains("40.00"));
        assert!(text.contains("Food"));
        assert!(text.contains("Rent"));

        let empty = compute(&[]).format_terminal();
        assert!(empty.contains("No expenses recorded."));
    }
}
