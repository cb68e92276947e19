//! Threshold and logging configuration
//!
//! Values are layered: built-in defaults, an optional TOML file,
//! `RULEFORGE__<SECTION>__<KEY>` environment variables (for example
//! `RULEFORGE__THRESHOLDS__MIN_SUPPORT`), then command-line overrides. A threshold that is
//! missing, unparseable or zero falls back to its default here, so zero is
//! never mistaken for "admit everything" when it comes from a user.

use crate::error::MiningError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Minimum support used when none (or zero) is configured
pub const DEFAULT_MIN_SUPPORT: f64 = 0.2;
/// Minimum confidence used when none (or zero) is configured
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.3;

/// Validated pair of mining thresholds, both fractions in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub min_support: f64,
    pub min_confidence: f64,
}

impl Thresholds {
    pub fn new(min_support: f64, min_confidence: f64) -> Result<Self, MiningError> {
        check_fraction("min_support", min_support)?;
        check_fraction("min_confidence", min_confidence)?;
        Ok(Self {
            min_support,
            min_confidence,
        })
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

fn check_fraction(name: &str, value: f64) -> Result<(), MiningError> {
    if value.is_nan() || !(0.0..=1.0).contains(&value) {
        return Err(MiningError::input(format!(
            "{} must be a fraction in [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

/// Substitute the default for a missing, unparseable, NaN or zero threshold
pub fn resolve_threshold(raw: Option<&str>, default: f64) -> f64 {
    match raw.map(str::trim).and_then(|s| s.parse::<f64>().ok()) {
        Some(value) if !value.is_nan() && value != 0.0 => value,
        _ => default,
    }
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    pub logging: LoggingConfig,
}

/// Raw threshold values as written by the user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThresholdConfig {
    pub min_support: Option<String>,
    pub min_confidence: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env_prefix(path, "RULEFORGE")
    }

    /// Like `load`, reading `<prefix>__SECTION__KEY` environment variables
    pub fn load_with_env_prefix(path: Option<&Path>, prefix: &str) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("logging.level", "warn")
            .context("Failed to set configuration defaults")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix(prefix).separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Apply command-line overrides, then default-substitute and validate
    pub fn thresholds(
        &self,
        min_support: Option<&str>,
        min_confidence: Option<&str>,
    ) -> Result<Thresholds, MiningError> {
        let support = min_support.or(self.thresholds.min_support.as_deref());
        let confidence = min_confidence.or(self.thresholds.min_confidence.as_deref());

        Thresholds::new(
            resolve_threshold(support, DEFAULT_MIN_SUPPORT),
            resolve_threshold(confidence, DEFAULT_MIN_CONFIDENCE),
        )
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdConfig::default(),
            logging: LoggingConfig {
                level: "warn".to_string(),
            },
        }
    }
}
