//! Aggregation of parsed runs into per-hop statistics.
//!
//! This module transforms per-run observations into:
//! - One accumulated host list and sample list per hop
//! - Rounded min/max/mean/median records
//! - Raw per-hop sample series for plotting

pub mod hops;
pub mod metrics;
pub mod pipeline;

// Re-export main types and functions
pub use hops::{merge_runs, AccumulatedHop, HopAccumulator, HopSeries};
pub use metrics::{reduce_all, reduce_hop, round_rtt, LatencyStats};
pub use pipeline::{aggregate_runs, aggregate_sources, Aggregation};
