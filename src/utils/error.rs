//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors raised for a single transcript line
///
/// Never fatal: the run reader logs and skips the line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("Malformed line (no valid hop number): {0:?}")]
    MalformedLine(String),
}

/// Errors that can occur while reading a run transcript
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Transcript source unavailable: {source_name}: {error}")]
    SourceUnavailable {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("Transcript has no data lines after the header: {0}")]
    EmptyTranscript(String),
}

/// Errors that can occur while invoking traceroute
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to start traceroute: {0}")]
    SpawnFailed(#[from] std::io::Error),

    #[error("traceroute exited with {status}: {stderr}")]
    NonZeroExit { status: String, stderr: String },

    #[error("traceroute output is not valid UTF-8: {0}")]
    InvalidOutput(#[from] std::string::FromUtf8Error),
}

/// Errors that can occur during latency plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("No latency samples to plot")]
    EmptySeries,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
