//! trstats CLI
//!
//! Per-hop latency statistics from repeated traceroute runs.
//! Produces a JSON report and an SVG latency plot.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::time::Duration;

use trstats::commands::{
    display_schema, display_version, execute_analyze, execute_capture, validate_analyze_args,
    validate_capture_args, validate_report_file, AnalyzeArgs, AnalyzeOutcome, CaptureArgs,
};
use trstats::plot::BoxPlotConfig;
use trstats::utils::config::{
    DEFAULT_MAX_HOPS, DEFAULT_NUM_RUNS, DEFAULT_RESULTS_DIR, DEFAULT_RUN_DELAY,
};

/// trstats - statistics over repeated traceroute runs
#[derive(Parser, Debug)]
#[command(name = "trstats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Output options shared by capture and analyze
#[derive(clap::Args, Debug)]
struct OutputOpts {
    /// Directory for the JSON report (defaults to the current directory)
    #[arg(short = 'o', long = "output")]
    output_dir: Option<PathBuf>,

    /// Directory for the SVG latency plot (defaults to the current directory)
    #[arg(short = 'g', long = "graph")]
    graph_dir: Option<PathBuf>,

    /// Plot title
    #[arg(long)]
    title: Option<String>,

    /// Plot width in pixels
    #[arg(long, default_value = "1000")]
    width: usize,

    /// Plot height in pixels
    #[arg(long, default_value = "600")]
    height: usize,

    /// Print text summary to stdout
    #[arg(long)]
    summary: bool,
}

impl OutputOpts {
    fn into_analyze_args(self, input_dir: PathBuf) -> AnalyzeArgs {
        let mut plot_config = BoxPlotConfig::new().with_size(self.width, self.height);
        if let Some(title) = self.title {
            plot_config = plot_config.with_title(title);
        }

        AnalyzeArgs {
            input_dir,
            output_dir: self.output_dir,
            graph_dir: self.graph_dir,
            plot_config,
            print_summary: self.summary,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run traceroute repeatedly, then analyze the captured runs
    Capture {
        /// Target domain name or IP address
        #[arg(short, long)]
        target: String,

        /// Number of times traceroute will run
        #[arg(short = 'n', long, default_value_t = DEFAULT_NUM_RUNS)]
        num_runs: usize,

        /// Seconds to wait between two consecutive runs
        #[arg(short = 'd', long, default_value_t = DEFAULT_RUN_DELAY.as_secs())]
        run_delay: u64,

        /// Maximum hops per traceroute run
        #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_HOPS)]
        max_hops: u8,

        /// Directory for raw run transcripts (cleared first)
        #[arg(long, default_value = DEFAULT_RESULTS_DIR)]
        results_dir: PathBuf,

        /// traceroute executable to invoke
        #[arg(long, env = "TRSTATS_TRACEROUTE")]
        program: Option<String>,

        #[command(flatten)]
        output: OutputOpts,
    },

    /// Compute statistics over previously captured transcripts
    Analyze {
        /// Directory containing one traceroute transcript per file
        #[arg(long = "test")]
        test_dir: PathBuf,

        #[command(flatten)]
        output: OutputOpts,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Capture {
            target,
            num_runs,
            run_delay,
            max_hops,
            results_dir,
            program,
            output,
        } => {
            let args = CaptureArgs {
                target,
                num_runs,
                run_delay: Duration::from_secs(run_delay),
                max_hops,
                analyze: output.into_analyze_args(results_dir.clone()),
                results_dir,
                program,
            };

            validate_capture_args(&args)?;
            report_outcome(&execute_capture(args)?);
        }

        Commands::Analyze { test_dir, output } => {
            let args = output.into_analyze_args(test_dir);

            validate_analyze_args(&args)?;
            report_outcome(&execute_analyze(&args)?);
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

fn report_outcome(outcome: &AnalyzeOutcome) {
    println!("The JSON file is at {}", outcome.report_path.display());
    match &outcome.graph_path {
        Some(path) => println!("The graph file is at {}", path.display()),
        None => println!("No latency samples were found; no graph was written"),
    }
}
