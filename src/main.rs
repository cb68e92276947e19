//! RuleForge: association rule mining CLI
//!
//! This is the main entrypoint that loads configuration and transactions,
//! runs the mining pipeline and prints the report.

use anyhow::{Context, Result};
use clap::Parser;
use ruleforge::{load_transactions, mine, report, AppConfig, Args};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    let config = AppConfig::load(args.config.as_deref())?;
    init_logging(&config, args.verbose)?;

    let thresholds = config
        .thresholds(args.min_support.as_deref(), args.min_confidence.as_deref())
        .context("Invalid mining thresholds")?;
    info!(
        min_support = thresholds.min_support,
        min_confidence = thresholds.min_confidence,
        "Initializing"
    );

    let start_time = Instant::now();

    let transactions = load_transactions(&args.input)?;
    let mining_report = mine(&transactions, &thresholds)
        .with_context(|| format!("Mining failed for {}", args.input.display()))?;

    print!("{}", report::render(&mining_report, args.format)?);

    info!(
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Pipeline complete"
    );

    Ok(())
}

/// Diagnostics go to stderr so the report on stdout stays clean
fn init_logging(config: &AppConfig, verbose: bool) -> Result<()> {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("ruleforge={}", level)))
        .context("Invalid logging level")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
