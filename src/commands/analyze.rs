//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Discovers transcripts in the input directory
//! 2. Parses and aggregates them
//! 3. Writes the JSON report
//! 4. Renders and writes the latency plot
//! 5. Optionally prints a text summary

use super::models::AnalyzeArgs;
use crate::aggregator::{aggregate_sources, Aggregation};
use crate::output::{build_report, resolve_output_path, write_report, write_svg};
use crate::parser::sources_from_dir;
use crate::plot::{generate_boxplot, generate_text_summary, BoxPlotConfig};
use crate::utils::config::{GRAPH_FILE_NAME, REPORT_FILE_NAME, SUMMARY_MAX_ROWS};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Where the analyze command put its results
#[derive(Debug, Clone)]
pub struct AnalyzeOutcome {
    pub report_path: PathBuf,

    /// None when there was nothing to plot
    pub graph_path: Option<PathBuf>,

    pub aggregation: Aggregation,
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs and by capture
///
/// # Errors
/// * Input directory or any transcript unreadable
/// * Any transcript without data lines
/// * Report or plot write failures
pub fn execute_analyze(args: &AnalyzeArgs) -> Result<AnalyzeOutcome> {
    let start_time = Instant::now();

    info!("Analyzing transcripts in: {}", args.input_dir.display());

    // Step 1: Discover transcripts
    info!("Step 1/4: Discovering transcripts...");
    let sources = sources_from_dir(&args.input_dir).with_context(|| {
        format!("Failed to list transcripts in {}", args.input_dir.display())
    })?;
    debug!("Found {} transcripts", sources.len());

    // Step 2: Aggregate
    info!("Step 2/4: Aggregating {} runs...", sources.len());
    let aggregation = aggregate_sources(&sources).context("Failed to aggregate transcripts")?;

    // Step 3: Write report (an empty hop list is still a valid report)
    info!("Step 3/4: Writing report...");
    let report_path = resolve_output_path(args.output_dir.as_deref(), REPORT_FILE_NAME);
    let report = build_report(aggregation.runs, aggregation.records.clone());
    write_report(&report, &report_path).context("Failed to write JSON report")?;
    info!("✓ Report written to: {}", report_path.display());

    // Step 4: Plot
    let graph_path = if aggregation.is_empty() {
        warn!("Step 4/4: No latency samples, skipping plot");
        None
    } else {
        info!("Step 4/4: Rendering latency plot...");
        let svg = generate_boxplot(&aggregation.series, Some(&args.plot_config))
            .context("Failed to render latency plot")?;
        let path = resolve_output_path(args.graph_dir.as_deref(), GRAPH_FILE_NAME);
        write_svg(&svg, &path).context("Failed to write latency plot")?;
        info!("✓ Plot written to: {}", path.display());
        Some(path)
    };

    if args.print_summary {
        println!("\n{}", "=".repeat(88));
        println!("TRACEROUTE SUMMARY");
        println!("{}", "=".repeat(88));
        println!("Runs:           {}", aggregation.runs);
        println!("Hops with data: {}", aggregation.records.len());
        println!("\n{}", generate_text_summary(&aggregation.records, SUMMARY_MAX_ROWS));
        println!("{}", "=".repeat(88));
    }

    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(AnalyzeOutcome {
        report_path,
        graph_path,
        aggregation,
    })
}

/// Validate analyze arguments
pub fn validate_analyze_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input_dir.as_os_str().is_empty() {
        anyhow::bail!("Input directory cannot be empty");
    }

    if !args.input_dir.is_dir() {
        anyhow::bail!(
            "Input directory does not exist: {}",
            args.input_dir.display()
        );
    }

    validate_plot_config(&args.plot_config)
}

/// Validate plot settings shared by capture and analyze
pub fn validate_plot_config(config: &BoxPlotConfig) -> Result<()> {
    if config.width == 0 || config.height == 0 {
        anyhow::bail!("Plot width and height must be greater than 0");
    }

    Ok(())
}
