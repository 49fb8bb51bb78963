//! Capture command implementation.
//!
//! The capture command:
//! 1. Clears the results directory
//! 2. Runs traceroute N times, pausing between runs
//! 3. Saves each transcript
//! 4. Hands the results directory to the analyze command

use super::analyze::{execute_analyze, validate_plot_config, AnalyzeOutcome};
use super::models::{AnalyzeArgs, CaptureArgs};
use crate::probe::{reset_results_dir, write_transcript, TracerouteRunner};
use anyhow::{Context, Result};
use log::{debug, info};
use std::thread;
use std::time::Instant;

/// Execute the capture command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * traceroute missing or failing on any run
/// * transcript or report write failures
/// * aggregation failures (see `execute_analyze`)
pub fn execute_capture(args: CaptureArgs) -> Result<AnalyzeOutcome> {
    let start_time = Instant::now();

    info!(
        "Starting capture to {}: {} runs, {:?} apart, max {} hops",
        args.target, args.num_runs, args.run_delay, args.max_hops
    );

    reset_results_dir(&args.results_dir).with_context(|| {
        format!("Failed to prepare results directory {}", args.results_dir.display())
    })?;

    let mut runner = TracerouteRunner::new(args.max_hops);
    if let Some(program) = &args.program {
        runner = runner.with_program(program.as_str());
    }

    for run_number in 1..=args.num_runs {
        info!("Run {}/{}...", run_number, args.num_runs);

        let transcript = runner
            .run(&args.target)
            .with_context(|| format!("traceroute run {} failed", run_number))?;

        write_transcript(&args.results_dir, run_number, &transcript)
            .with_context(|| format!("Failed to save transcript for run {}", run_number))?;

        if run_number < args.num_runs && !args.run_delay.is_zero() {
            debug!("Sleeping {:?} before next run", args.run_delay);
            thread::sleep(args.run_delay);
        }
    }

    info!(
        "Captured {} runs in {:.2}s",
        args.num_runs,
        start_time.elapsed().as_secs_f64()
    );

    let analyze = AnalyzeArgs {
        input_dir: args.results_dir.clone(),
        ..args.analyze
    };
    execute_analyze(&analyze)
}

/// Validate capture arguments
///
/// **Public** - can be called before execute_capture for early validation
pub fn validate_capture_args(args: &CaptureArgs) -> Result<()> {
    let target = args.target.trim();

    if target.is_empty() {
        anyhow::bail!("Target host cannot be empty");
    }

    if target.starts_with('-') || target.chars().any(char::is_whitespace) {
        anyhow::bail!("Target host is not a valid host name or address: {}", target);
    }

    if args.num_runs == 0 {
        anyhow::bail!("Number of runs must be greater than 0");
    }

    if args.max_hops == 0 {
        anyhow::bail!("Max hops must be greater than 0");
    }

    if args.results_dir.as_os_str().is_empty() {
        anyhow::bail!("Results directory cannot be empty");
    }

    validate_plot_config(&args.analyze.plot_config)
}
