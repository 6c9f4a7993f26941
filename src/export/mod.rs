//! Export module for expense-report
//!
//! - Workbook: the multi-sheet xlsx report with charts
//! - JSON/YAML: the statistics summary without a spreadsheet

pub mod json;
pub mod layout;
pub mod workbook;
pub mod yaml;

pub use json::{export_summary_json, SummaryExport, SUMMARY_SCHEMA_VERSION};
pub use layout::{Cell, ReportLayout, SheetTable};
pub use workbook::{export_filename, export_report, ExportArtifact, ReportBuilder, XLSX_CONTENT_TYPE};
pub use yaml::export_summary_yaml;
