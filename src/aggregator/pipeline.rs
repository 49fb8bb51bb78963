//! End-to-end aggregation over a batch of transcripts.
//!
//! Transcripts are parsed in parallel but merged strictly in the order
//! the caller listed them, so host ordering in the output is stable.
//! Any unreadable or empty transcript fails the whole batch.

use super::hops::{HopAccumulator, HopSeries};
use super::metrics::reduce_all;
use crate::parser::schema::{HopRecord, RunObservation};
use crate::parser::transcript::{read_run, TranscriptSource};
use crate::utils::error::TranscriptError;
use log::{debug, info, warn};
use rayon::prelude::*;

/// Everything downstream collaborators need from one aggregation
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Number of transcripts merged
    pub runs: usize,

    /// Per-hop statistics, ascending, hops without samples left out
    pub records: Vec<HopRecord>,

    /// Per-hop raw samples for plotting, same hops and order as `records`
    pub series: Vec<HopSeries>,
}

impl Aggregation {
    /// True when no hop in any run produced a sample
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Run the full pipeline over an ordered list of sources
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `sources` - Transcripts in run order (files or in-memory text)
///
/// # Returns
/// Run count, one `HopRecord` per hop with samples, and the plot series
///
/// # Errors
/// * `TranscriptError::SourceUnavailable` - a source could not be read
/// * `TranscriptError::EmptyTranscript` - a source had no data lines
///
/// # Example
/// ```ignore
/// let sources = sources_from_dir("results")?;
/// let aggregation = aggregate_sources(&sources)?;
/// println!("{} runs, {} hops", aggregation.runs, aggregation.records.len());
/// ```
pub fn aggregate_sources(sources: &[TranscriptSource]) -> Result<Aggregation, TranscriptError> {
    info!("Aggregating {} transcripts", sources.len());

    // collect() into Result keeps source order and stops on the first failure
    let runs: Vec<RunObservation> = sources
        .par_iter()
        .map(read_run)
        .collect::<Result<_, _>>()?;

    Ok(aggregate_runs(&runs))
}

/// Merge and reduce runs that are already parsed
pub fn aggregate_runs(runs: &[RunObservation]) -> Aggregation {
    let mut accumulator = HopAccumulator::new();
    for run in runs {
        accumulator.merge_run(run);
    }

    let records = reduce_all(&accumulator);
    let series = accumulator.sample_series();

    if records.is_empty() {
        warn!("No latency samples found in {} runs", accumulator.runs());
    } else {
        debug!(
            "Aggregated {} hops with data (hops {}..={})",
            records.len(),
            records[0].hop,
            records[records.len() - 1].hop
        );
    }

    Aggregation {
        runs: accumulator.runs(),
        records,
        series,
    }
}
