//! trstats
//!
//! Runs traceroute repeatedly against one destination and reduces the raw
//! transcripts to per-hop latency statistics (min/max/mean/median) plus the
//! hosts seen at each hop, exported as JSON and drawn as a box plot.
//!
//! ## Getting Started
//!
//! ```bash
//! trstats capture -t example.com -n 5 -d 2 -m 30
//! trstats analyze --test ./results -o ./out -g ./out
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use trstats::aggregator::aggregate_sources;
//! use trstats::parser::sources_from_dir;
//!
//! let sources = sources_from_dir("results")?;
//! let aggregation = aggregate_sources(&sources)?;
//! for record in &aggregation.records {
//!     println!("hop {}: median {} ms", record.hop, record.med);
//! }
//! # Ok::<(), trstats::utils::TranscriptError>(())
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod plot;
pub mod probe;
pub mod utils;
