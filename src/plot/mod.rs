//! Latency plot generation.
//!
//! This module renders per-hop sample series into an SVG box plot and
//! formats aggregated records as a terminal table.

pub mod generator;

// Re-export main types
pub use generator::{generate_boxplot, generate_text_summary, BoxPlotConfig, BoxSummary};
