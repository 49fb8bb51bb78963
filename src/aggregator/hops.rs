//! Merge per-run observations into one accumulated view per hop.
//!
//! Runs are folded in the order given. For each hop:
//! - hosts are appended run by run and kept only on first sighting
//!   (equality on the full name/address pair, placeholders dropped)
//! - samples are concatenated as-is; equal latencies from different
//!   probes are distinct samples
//!
//! A hop missing from some runs is aggregated from the runs that have it.

use crate::parser::schema::{HopNumber, HopObservation, HostCandidate, RunObservation};
use log::debug;
use std::collections::BTreeMap;

/// Cross-run state for a single hop
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccumulatedHop {
    /// Unique hosts in first-seen order
    pub hosts: Vec<HostCandidate>,

    /// Every RTT sample from every run, in run order
    pub samples: Vec<f64>,
}

impl AccumulatedHop {
    /// Insert a host unless it is a placeholder or already present
    pub fn add_host(&mut self, host: &HostCandidate) {
        if host.is_placeholder() || self.hosts.contains(host) {
            return;
        }
        self.hosts.push(host.clone());
    }

    pub fn merge(&mut self, observation: &HopObservation) {
        for host in &observation.hosts {
            self.add_host(host);
        }
        self.samples.extend_from_slice(&observation.samples);
    }

    pub fn has_samples(&self) -> bool {
        !self.samples.is_empty()
    }
}

/// One hop's flat sample list, as handed to the plot renderer
#[derive(Debug, Clone, PartialEq)]
pub struct HopSeries {
    pub hop: HopNumber,
    pub samples: Vec<f64>,
}

/// Accumulation state owned by one pipeline invocation
#[derive(Debug, Clone, Default)]
pub struct HopAccumulator {
    hops: BTreeMap<HopNumber, AccumulatedHop>,
    runs: usize,
}

impl HopAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one run into the accumulated state
    ///
    /// **Public** - call once per run, in run order
    pub fn merge_run(&mut self, run: &RunObservation) {
        for (hop, observation) in &run.hops {
            self.hops.entry(*hop).or_default().merge(observation);
        }
        self.runs += 1;

        debug!(
            "Merged run {} ({}): {} hops accumulated",
            self.runs,
            run.source,
            self.hops.len()
        );
    }

    /// Number of runs merged so far
    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn get(&self, hop: HopNumber) -> Option<&AccumulatedHop> {
        self.hops.get(&hop)
    }

    /// All accumulated hops, ascending, including ones without samples
    pub fn hops(&self) -> impl Iterator<Item = (HopNumber, &AccumulatedHop)> {
        self.hops.iter().map(|(hop, acc)| (*hop, acc))
    }

    /// Per-hop sample lists for plotting, ascending, empty hops left out
    pub fn sample_series(&self) -> Vec<HopSeries> {
        self.hops()
            .filter(|(_, acc)| acc.has_samples())
            .map(|(hop, acc)| HopSeries {
                hop,
                samples: acc.samples.clone(),
            })
            .collect()
    }
}

/// Merge a whole ordered batch of runs
///
/// **Public** - convenience over repeated `merge_run`
pub fn merge_runs<'a>(runs: impl IntoIterator<Item = &'a RunObservation>) -> HopAccumulator {
    let mut accumulator = HopAccumulator::new();
    for run in runs {
        accumulator.merge_run(run);
    }
    accumulator
}
