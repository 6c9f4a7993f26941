//! CLI command for the spreadsheet report

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseResult;
use crate::export::export_report;
use crate::storage::{load_expenses, write_bytes_atomic};

/// Build the report for `input` and write it under its suggested filename
///
/// The target directory is `output_dir` if given, otherwise the configured
/// export directory. Returns the path of the written report.
pub fn handle_export(
    input: &Path,
    output_dir: Option<PathBuf>,
    paths: &ExpensePaths,
    settings: &Settings,
) -> ExpenseResult<PathBuf> {
    let records = load_expenses(input)?;
    let artifact = export_report(&records, Local::now().naive_local())?;

    let dir = output_dir.unwrap_or_else(|| settings.resolve_export_dir(paths));
    let target = dir.join(&artifact.filename);
    write_bytes_atomic(&target, &artifact.bytes)?;

    tracing::info!(
        path = %target.display(),
        content_type = artifact.content_type,
        "exported expense report"
    );
    println!(
        "Exported {} expenses to: {}",
        records.len(),
        target.display()
    );

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_handle_export_writes_report() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("expenses.json");
        fs::write(
            &input,
            r#"[{"id": 1, "amount": 20.0, "category": "Food", "date": "2025-01-02T08:00:00"}]"#,
        )
        .unwrap();

        let paths = ExpensePaths::with_base_dir(temp_dir.path().join("base"));
        let out_dir = temp_dir.path().join("out");

        let target = handle_export(&input, Some(out_dir.clone()), &paths, &Settings::default())
            .unwrap();

        assert!(target.starts_with(&out_dir));
        let name = target.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("expenses_export_"));
        assert!(name.ends_with(".xlsx"));
        assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 1);
        assert!(fs::read(&target).unwrap().starts_with(b"PK"));
    }
}
