//! Configuration and constants for the CLI.

use std::time::Duration;

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Decimal places kept on every emitted latency figure
pub const RTT_PRECISION: i32 = 3;

// Capture defaults (mirrors the usual `traceroute` knobs)
pub const DEFAULT_NUM_RUNS: usize = 5;
pub const DEFAULT_RUN_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_HOPS: u8 = 30;

/// External utility invoked once per run
pub const TRACEROUTE_PROGRAM: &str = "traceroute";

// Transcript storage: <results dir>/result-run<N>.out
pub const DEFAULT_RESULTS_DIR: &str = "results";
pub const TRANSCRIPT_PREFIX: &str = "result-run";
pub const TRANSCRIPT_EXTENSION: &str = "out";

// Output file names, placed in the user-supplied directory or the cwd
pub const REPORT_FILE_NAME: &str = "data.json";
pub const GRAPH_FILE_NAME: &str = "output.svg";

/// Rows printed by `--summary`; covers the largest `-m` traceroute accepts
pub const SUMMARY_MAX_ROWS: usize = 255;

/// Token traceroute prints for a probe that got no answer
pub const TIMEOUT_MARKER: &str = "*";

/// Unit token that follows every RTT value
pub const RTT_UNIT: &str = "ms";
