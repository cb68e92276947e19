//! Command-line interface definitions and argument parsing

use crate::report::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Frequent items and pairwise association rules from basket data
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON transaction file
    #[arg(short, long, default_value = "data.json")]
    pub input: PathBuf,

    /// Minimum support as a fraction; missing, invalid or zero means 0.2
    #[arg(short = 's', long)]
    pub min_support: Option<String>,

    /// Minimum confidence as a fraction; missing, invalid or zero means 0.3
    #[arg(short = 'c', long)]
    pub min_confidence: Option<String>,

    /// Optional TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
