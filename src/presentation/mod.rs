//! Presentation layer turning snapshots into printable reports.

/// Command-line driver.
pub mod app;
/// Per-snapshot reports.
pub mod report;

pub use app::{App, OutputOptions};
pub use report::ContentReport;
