use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)
        .with_context(|| format!("Failed to read report {}", file_path.display()))?;

    if let Some(pair) = report.hops.windows(2).find(|pair| pair[0].hop >= pair[1].hop) {
        anyhow::bail!(
            "Hops are not in ascending order: {} before {}",
            pair[0].hop,
            pair[1].hop
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!("  Runs: {}", report.runs);
    println!("  Hops with data: {}", report.hops.len());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("trstats Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string        - Schema version (e.g., '1.0.0')");
        println!("  generated_at: string   - ISO 8601 timestamp");
        println!("  runs: number           - Number of traceroute runs aggregated");
        println!("  hops: array            - Hops with at least one RTT sample, ascending");
        println!("    hop: number          - Hop number (1-based)");
        println!("    host: array          - Unique [name, address] pairs, first seen first");
        println!("    count: number        - Number of RTT samples");
        println!("    min: number          - Minimum RTT (ms, 3 decimals)");
        println!("    max: number          - Maximum RTT (ms, 3 decimals)");
        println!("    avg: number          - Mean RTT (ms, 3 decimals)");
        println!("    med: number          - Median RTT (ms, 3 decimals)");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("trstats v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Per-hop latency statistics from repeated traceroute runs.");
}
