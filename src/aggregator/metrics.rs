//! Reduce accumulated hops to latency statistics.
//!
//! Every emitted figure is rounded to `RTT_PRECISION` decimal places.
//! Hops without samples produce no record at all.

use super::hops::{AccumulatedHop, HopAccumulator};
use crate::parser::schema::{HopNumber, HopRecord};
use crate::utils::config::RTT_PRECISION;
use log::debug;

/// Unrounded summary of a sample list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

impl LatencyStats {
    /// Compute statistics, or `None` for an empty sample list
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let sorted = sorted_samples(samples);
        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;

        Some(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            median: median_of_sorted(&sorted),
        })
    }
}

/// Reduce one accumulated hop to its exported record
///
/// **Public** - the statistics reducer
///
/// Returns `None` when the hop has no samples.
pub fn reduce_hop(hop: HopNumber, accumulated: &AccumulatedHop) -> Option<HopRecord> {
    let stats = LatencyStats::from_samples(&accumulated.samples)?;

    Some(HopRecord {
        hop,
        host: accumulated.hosts.clone(),
        count: stats.count,
        min: round_rtt(stats.min),
        max: round_rtt(stats.max),
        avg: round_rtt(stats.mean),
        med: round_rtt(stats.median),
    })
}

/// Reduce every hop with data, ascending by hop number
pub fn reduce_all(accumulator: &HopAccumulator) -> Vec<HopRecord> {
    let records: Vec<HopRecord> = accumulator
        .hops()
        .filter_map(|(hop, acc)| {
            let record = reduce_hop(hop, acc);
            if record.is_none() {
                debug!("Hop {} has no samples, dropped", hop);
            }
            record
        })
        .collect();

    debug!("Reduced {} hops with data", records.len());
    records
}

/// Round half away from zero to `RTT_PRECISION` places
pub fn round_rtt(value: f64) -> f64 {
    let factor = 10f64.powi(RTT_PRECISION);
    (value * factor).round() / factor
}

/// Order-statistic median; mean of the middle pair for even counts
pub fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Linear-interpolated quantile (`q` in 0..=1) of sorted samples
pub fn quantile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

pub fn sorted_samples(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}
