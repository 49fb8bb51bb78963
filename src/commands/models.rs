use crate::plot::BoxPlotConfig;
use crate::utils::config::{DEFAULT_MAX_HOPS, DEFAULT_NUM_RUNS, DEFAULT_RESULTS_DIR, DEFAULT_RUN_DELAY};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Directory of transcripts, one file per run
    pub input_dir: PathBuf,

    /// Directory for the JSON report (None = current directory)
    pub output_dir: Option<PathBuf>,

    /// Directory for the SVG plot (None = current directory)
    pub graph_dir: Option<PathBuf>,

    /// Plot configuration
    pub plot_config: BoxPlotConfig,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            output_dir: None,
            graph_dir: None,
            plot_config: BoxPlotConfig::default(),
            print_summary: false,
        }
    }
}

/// Arguments for the capture command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct CaptureArgs {
    /// Destination host name or IP address
    pub target: String,

    /// Number of traceroute runs
    pub num_runs: usize,

    /// Pause between consecutive runs
    pub run_delay: Duration,

    /// Maximum hops per run
    pub max_hops: u8,

    /// Where raw transcripts are kept (cleared before capture)
    pub results_dir: PathBuf,

    /// Executable to run instead of `traceroute`
    pub program: Option<String>,

    /// Aggregation settings applied to the captured transcripts
    pub analyze: AnalyzeArgs,
}

impl Default for CaptureArgs {
    fn default() -> Self {
        Self {
            target: String::new(),
            num_runs: DEFAULT_NUM_RUNS,
            run_delay: DEFAULT_RUN_DELAY,
            max_hops: DEFAULT_MAX_HOPS,
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            program: None,
            analyze: AnalyzeArgs::default(),
        }
    }
}
