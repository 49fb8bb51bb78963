//! Traceroute invocation and transcript storage.

pub mod runner;
pub mod store;

pub use runner::TracerouteRunner;
pub use store::{reset_results_dir, transcript_path, write_transcript};
