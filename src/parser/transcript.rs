//! Run reader: one traceroute transcript to one `RunObservation`.
//!
//! The first line of a transcript is the banner printed by the utility
//! (`traceroute to host (addr), 30 hops max, ...`) and is always skipped.
//! Every later non-empty line goes through the line parser; lines that
//! fail to parse are logged and dropped without aborting the run.

use super::line::parse_line;
use super::schema::RunObservation;
use crate::utils::config::{GRAPH_FILE_NAME, REPORT_FILE_NAME};
use crate::utils::error::TranscriptError;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a transcript's text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptSource {
    /// A transcript file on disk
    File(PathBuf),

    /// An in-memory transcript with a label for diagnostics
    Memory { name: String, content: String },
}

impl TranscriptSource {
    pub fn memory(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Memory {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Label used in logs and errors
    pub fn name(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Memory { name, .. } => name.clone(),
        }
    }

    /// Load the full transcript text
    ///
    /// # Errors
    /// * `TranscriptError::SourceUnavailable` - file cannot be opened or read
    pub fn load(&self) -> Result<String, TranscriptError> {
        match self {
            Self::File(path) => {
                fs::read_to_string(path).map_err(|error| TranscriptError::SourceUnavailable {
                    source_name: self.name(),
                    error,
                })
            }
            Self::Memory { content, .. } => Ok(content.clone()),
        }
    }
}

/// Read and parse one transcript
///
/// **Public** - main entry point for the run reader
///
/// # Arguments
/// * `source` - Transcript file or in-memory text
///
/// # Returns
/// Per-hop hosts and samples observed in this run
///
/// # Errors
/// * `TranscriptError::SourceUnavailable` - source cannot be read
/// * `TranscriptError::EmptyTranscript` - no lines after the header
///
/// # Example
/// ```ignore
/// let run = read_run(&TranscriptSource::File("results/result-run1.out".into()))?;
/// println!("{} hops, {} samples", run.hops.len(), run.sample_count());
/// ```
pub fn read_run(source: &TranscriptSource) -> Result<RunObservation, TranscriptError> {
    let text = source.load()?;
    parse_transcript(&source.name(), &text)
}

/// Parse transcript text that has already been loaded
///
/// A transcript whose data lines are all malformed still parses: it just
/// contributes no hops.
pub fn parse_transcript(name: &str, text: &str) -> Result<RunObservation, TranscriptError> {
    let lines: Vec<&str> = text.trim().lines().collect();

    if lines.len() < 2 {
        return Err(TranscriptError::EmptyTranscript(name.to_string()));
    }

    let mut run = RunObservation::new(name);
    let mut skipped = 0usize;

    for (index, line) in lines.iter().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(observation) => run.record(observation),
            Err(e) => {
                skipped += 1;
                debug!("{}:{}: skipping line: {}", name, index + 1, e);
            }
        }
    }

    debug!(
        "Parsed {}: {} hops, {} samples, {} lines skipped",
        name,
        run.hops.len(),
        run.sample_count(),
        skipped
    );

    Ok(run)
}

/// List the transcript files in a directory, in run order
///
/// **Public** - turns a results directory into pipeline input
///
/// Files are ordered by the first number in their name (`result-run2.out`
/// before `result-run10.out`), then by name. Sub-directories are ignored,
/// as are the report and graph this tool writes (`data.json`, `output.svg`),
/// so a directory can serve as both input and output.
///
/// # Errors
/// * `TranscriptError::SourceUnavailable` - directory cannot be listed
pub fn sources_from_dir(dir: impl AsRef<Path>) -> Result<Vec<TranscriptSource>, TranscriptError> {
    let dir = dir.as_ref();
    let unavailable = |error| TranscriptError::SourceUnavailable {
        source_name: dir.display().to_string(),
        error,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(unavailable)? {
        let path = entry.map_err(unavailable)?.path();
        if path.is_file() && !is_generated_output(&path) {
            files.push(path);
        }
    }

    files.sort_by_cached_key(|path| run_sort_key(path));

    debug!("Found {} transcripts in {}", files.len(), dir.display());

    Ok(files.into_iter().map(TranscriptSource::File).collect())
}

fn is_generated_output(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name == REPORT_FILE_NAME || name == GRAPH_FILE_NAME)
}

fn run_sort_key(path: &Path) -> (u64, String) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let number = name
        .split(|c: char| !c.is_ascii_digit())
        .find(|part| !part.is_empty())
        .and_then(|digits| digits.parse::<u64>().ok())
        .unwrap_or(u64::MAX);

    (number, name)
}
