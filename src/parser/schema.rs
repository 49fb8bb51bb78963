//! Data model for parsed transcripts and the exported report.
//!
//! Parse-side types (`LineObservation`, `HopObservation`, `RunObservation`)
//! live only for the duration of one transcript read. `HopRecord` and
//! `Report` are what gets written to disk.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 1-based distance from the probing host
pub type HopNumber = u32;

/// One responder seen at a hop during one probe
///
/// Serialized as a two-element array `["name", "address"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct HostCandidate {
    pub name: String,
    pub address: String,
}

impl HostCandidate {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// True when either half is blank; such entries are never accumulated
    pub fn is_placeholder(&self) -> bool {
        self.name.trim().is_empty() || self.address.trim().is_empty()
    }
}

impl From<(String, String)> for HostCandidate {
    fn from((name, address): (String, String)) -> Self {
        Self { name, address }
    }
}

impl From<HostCandidate> for (String, String) {
    fn from(host: HostCandidate) -> Self {
        (host.name, host.address)
    }
}

/// Everything extracted from one transcript line
#[derive(Debug, Clone, PartialEq)]
pub struct LineObservation {
    pub hop: HopNumber,

    /// Host markers in order of appearance, duplicates kept
    pub hosts: Vec<HostCandidate>,

    /// RTT values in milliseconds, in order of appearance
    pub samples: Vec<f64>,

    /// Number of `*` markers on the line
    pub timeouts: usize,
}

/// Hosts and samples captured for one hop within one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HopObservation {
    pub hosts: Vec<HostCandidate>,
    pub samples: Vec<f64>,
}

impl HopObservation {
    /// Append a parsed line's data, keeping order and duplicates
    pub fn absorb(&mut self, line: LineObservation) {
        self.hosts.extend(line.hosts);
        self.samples.extend(line.samples);
    }
}

/// Per-run mapping from hop number to what that run saw there
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunObservation {
    /// Opaque label of the transcript this came from (file path, buffer name)
    pub source: String,

    pub hops: BTreeMap<HopNumber, HopObservation>,
}

impl RunObservation {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            hops: BTreeMap::new(),
        }
    }

    /// Fold one parsed line into its hop's observation
    pub fn record(&mut self, line: LineObservation) {
        self.hops.entry(line.hop).or_default().absorb(line);
    }

    pub fn sample_count(&self) -> usize {
        self.hops.values().map(|h| h.samples.len()).sum()
    }
}

/// Final per-hop statistics, one entry of the exported report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopRecord {
    pub hop: HopNumber,

    /// Unique responders, first-seen order
    pub host: Vec<HostCandidate>,

    /// Number of RTT samples behind the statistics
    #[serde(default)]
    pub count: usize,

    pub min: f64,
    pub max: f64,

    /// Arithmetic mean
    pub avg: f64,

    /// Median
    pub med: f64,
}

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated (RFC 3339)
    pub generated_at: String,

    /// Number of transcripts aggregated
    pub runs: usize,

    /// Hops with at least one sample, ascending
    pub hops: Vec<HopRecord>,
}
