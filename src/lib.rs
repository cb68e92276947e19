//! RuleForge: frequent items and pairwise association rules from basket data
//!
//! This library counts item and item-pair occurrences across a set of
//! transactions, filters them by minimum support, and derives directional
//! rules filtered by minimum confidence.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod report;

// Re-export public items for easier access
pub use cli::Args;
pub use config::{AppConfig, Thresholds};
pub use data::{load_transactions, Transaction, TransactionSet};
pub use error::MiningError;
pub use model::{mine, MiningReport, Rule};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
