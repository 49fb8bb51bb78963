//! Transcript parsing and schema definitions.
//!
//! This module handles:
//! - Parsing individual traceroute lines
//! - Reading whole run transcripts
//! - Defining the report schema

pub mod line;
pub mod schema;
pub mod transcript;

// Re-export main types
pub use line::parse_line;
pub use schema::{
    HopNumber, HopObservation, HopRecord, HostCandidate, LineObservation, Report, RunObservation,
};
pub use transcript::{parse_transcript, read_run, sources_from_dir, TranscriptSource};
