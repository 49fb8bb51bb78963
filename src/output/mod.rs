//! Output writers for reports and plots.
//!
//! This module handles writing data to disk:
//! - JSON reports
//! - SVG latency plots
//! - Output path resolution

pub mod json;
pub mod path;
pub mod svg;

// Re-export main functions
pub use json::{build_report, read_report, report_to_string, write_report};
pub use path::{resolve_output_path, validate_path};
pub use svg::write_svg;
