//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod capture;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use analyze::{execute_analyze, validate_analyze_args, validate_plot_config, AnalyzeOutcome};
pub use capture::{execute_capture, validate_capture_args};
pub use models::{AnalyzeArgs, CaptureArgs};
pub use utils::{display_schema, display_version, validate_report_file};
