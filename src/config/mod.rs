//! Configuration module for expense-report
//!
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Logging setup

pub mod logging;
pub mod paths;
pub mod settings;

pub use logging::init_tracing;
pub use paths::ExpensePaths;
pub use settings::Settings;
