//! Persists raw run transcripts as `result-run<N>.out` files.
//!
//! `reset_results_dir` deletes the transcripts of a previous capture before a
//! new one starts, and the aggregation later reads the directory back through
//! `sources_from_dir`.

use crate::output::path::validate_path;
use crate::utils::config::{TRANSCRIPT_EXTENSION, TRANSCRIPT_PREFIX};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the transcript for a 1-based run number
pub fn transcript_path(dir: impl AsRef<Path>, run_number: usize) -> PathBuf {
    dir.as_ref().join(format!(
        "{}{}.{}",
        TRANSCRIPT_PREFIX, run_number, TRANSCRIPT_EXTENSION
    ))
}

/// Remove the transcripts of a previous capture, creating `dir` if missing
///
/// Only files named `result-run<N>.out` are deleted; anything else in the
/// directory is left in place.
pub fn reset_results_dir(dir: impl AsRef<Path>) -> Result<(), OutputError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut removed = 0usize;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_transcript = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_transcript_name);

        if is_transcript && path.is_file() {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }

    debug!("Removed {} previous transcripts from {}", removed, dir.display());
    Ok(())
}

/// `result-run<N>.out` with a non-empty decimal run number
fn is_transcript_name(name: &str) -> bool {
    name.strip_prefix(TRANSCRIPT_PREFIX)
        .and_then(|rest| rest.strip_suffix(TRANSCRIPT_EXTENSION))
        .and_then(|rest| rest.strip_suffix('.'))
        .is_some_and(|number| !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()))
}

/// Write one run's transcript, one line per source line
///
/// **Public** - called after each traceroute run
pub fn write_transcript(
    dir: impl AsRef<Path>,
    run_number: usize,
    transcript: &str,
) -> Result<PathBuf, OutputError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let path = transcript_path(dir, run_number);
    validate_path(&path)?;

    let mut content = String::with_capacity(transcript.len() + 1);
    for line in transcript.trim().lines() {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(&path, content)?;

    info!("Saved run {} to {}", run_number, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_path() {
        let path = transcript_path("results", 3);
        assert_eq!(path, PathBuf::from("results/result-run3.out"));
    }

    #[test]
    fn test_write_normalizes_lines() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_transcript(temp_dir.path(), 1, "\nheader\r\n 1  a (1.1.1.1)  1.0 ms\n\n").unwrap();

        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "header\n 1  a (1.1.1.1)  1.0 ms\n"
        );
    }

    #[test]
    fn test_reset_clears_old_runs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let results = temp_dir.path().join("results");

        write_transcript(&results, 1, "header\n 1  * * *").unwrap();
        reset_results_dir(&results).unwrap();

        assert!(results.is_dir());
        assert_eq!(fs::read_dir(&results).unwrap().count(), 0);
    }

    #[test]
    fn test_reset_keeps_unrelated_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let results = temp_dir.path();

        write_transcript(results, 1, "header\n 1  * * *").unwrap();
        write_transcript(results, 12, "header\n 1  * * *").unwrap();
        fs::write(results.join("thesis.tex"), "\\documentclass{article}").unwrap();
        fs::write(results.join("result-run-notes.out"), "keep").unwrap();
        fs::create_dir(results.join("figures")).unwrap();

        reset_results_dir(results).unwrap();

        assert!(!transcript_path(results, 1).exists());
        assert!(!transcript_path(results, 12).exists());
        assert!(results.join("thesis.tex").is_file());
        assert!(results.join("result-run-notes.out").is_file());
        assert!(results.join("figures").is_dir());
    }

    #[test]
    fn test_reset_creates_missing_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let results = temp_dir.path().join("nested").join("results");

        reset_results_dir(&results).unwrap();
        assert!(results.is_dir());
    }

    #[test]
    fn test_is_transcript_name() {
        assert!(is_transcript_name("result-run1.out"));
        assert!(is_transcript_name("result-run42.out"));
        assert!(!is_transcript_name("result-run.out"));
        assert!(!is_transcript_name("result-run1.outx"));
        assert!(!is_transcript_name("data.json"));
    }
}
