//! CLI command handlers
//!
//! Bridges clap argument parsing with the statistics engine and report
//! builder. Each handler loads the input file, runs the core, and writes the
//! result to stdout or disk.

pub mod export;
pub mod report;

pub use export::handle_export;
pub use report::{handle_category, handle_list, handle_summary, SummaryFormat};
