use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "expense-report";

const EXPENSES_JSON: &str = r#"[
  {"id": 1, "amount": 10.0, "category": "A", "date": "2025-01-01T09:00:00"},
  {"id": 2, "amount": 20.0, "category": "B", "description": "bus pass", "date": "2025-01-03T09:00:00"},
  {"id": 3, "amount": 30.0, "category": "A", "date": "2025-01-02T09:00:00"}
]"#;

fn command(base: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("EXPENSE_REPORT_DIR", base)
        .env_remove("EXPENSE_REPORT_OUTPUT_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn summary_prints_statistics_table() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "expenses.json", EXPENSES_JSON);

    command(dir.path())
        .arg("summary")
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("Total Expenses").and(contains("60.00")))
        .stdout(contains("Standard Deviation"));
}

#[test]
fn summary_json_matches_statistics() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "expenses.json", EXPENSES_JSON);

    let output = command(dir.path())
        .args(["summary", "--format", "json"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total_expenses"], 60.0);
    assert_eq!(value["total_count"], 3);
    assert_eq!(value["median_expense"], 20.0);
    assert_eq!(value["category_breakdown"]["A"], 40.0);
    assert_eq!(value["category_counts"]["B"], 1);
}

#[test]
fn summary_of_empty_file_is_all_zero() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "expenses.json", "[]");

    command(dir.path())
        .args(["summary", "--format", "json"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("\"total_count\":0"));
}

#[test]
fn category_command_scopes_to_one_category() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "expenses.json", EXPENSES_JSON);

    command(dir.path())
        .arg("category")
        .arg(&input)
        .arg("A")
        .assert()
        .success()
        .stdout(contains("Category: A").and(contains("Count:   2")));

    command(dir.path())
        .arg("category")
        .arg(&input)
        .arg("a")
        .assert()
        .success()
        .stdout(contains("No expenses found in category 'a'"));
}

#[test]
fn list_is_newest_first() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "expenses.json", EXPENSES_JSON);

    let output = command(dir.path())
        .arg("list")
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let third = stdout.find("2025-01-03").unwrap();
    let second = stdout.find("2025-01-02").unwrap();
    let first = stdout.find("2025-01-01").unwrap();
    assert!(third < second && second < first);
}

#[test]
fn list_filters_by_category_and_limit() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "expenses.json", EXPENSES_JSON);

    command(dir.path())
        .args(["list", "--category", "A", "--limit", "1"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("1 expenses, total 30.00"));
}

#[test]
fn list_offset_skips_before_limit() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "expenses.json", EXPENSES_JSON);

    let output = command(dir.path())
        .args(["list", "--offset", "1", "--limit", "1"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("2025-01-02"));
    assert!(!stdout.contains("2025-01-03"));
    assert!(!stdout.contains("2025-01-01"));
    assert!(stdout.contains("1 expenses, total 30.00"));

    command(dir.path())
        .args(["list", "--offset", "10"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("No expenses found"));
}

#[test]
fn export_writes_xlsx_to_output_dir() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "expenses.csv", "id,date,category,description,amount\n1,2025-01-02,Food,,12.00\n");
    let out_dir = dir.path().join("reports");

    command(dir.path())
        .arg("export")
        .arg(&input)
        .arg("--output-dir")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(contains("Exported 1 expenses to:"));

    let entries: Vec<_> = fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].starts_with("expenses_export_"));
    assert!(entries[0].ends_with(".xlsx"));
}

#[test]
fn export_defaults_to_configured_directory() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "expenses.json", "[]");

    command(dir.path())
        .arg("export")
        .arg(&input)
        .assert()
        .success();

    assert_eq!(fs::read_dir(dir.path().join("exports")).unwrap().count(), 1);
}

#[test]
fn invalid_record_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "expenses.json",
        r#"[{"id": 1, "amount": -5.0, "category": "A", "date": "2025-01-01T09:00:00"}]"#,
    );

    command(dir.path())
        .arg("summary")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();

    command(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Export directory:").and(contains("exports")));
}

#[test]
fn init_writes_settings_and_directories() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("base");

    command(&base)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Settings written to:"));

    assert!(base.join("exports").is_dir());
    let settings: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(base.join("config.json")).unwrap()).unwrap();
    assert_eq!(settings["log_filter"], "expense_report=info");
}
