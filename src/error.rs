//! Error taxonomy for the mining pipeline

use thiserror::Error;

/// Failures that abort a mining run. There is never a partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MiningError {
    /// Bad input: empty or malformed transactions, out-of-range thresholds.
    #[error("input validation failed: {0}")]
    InputValidation(String),

    /// A denominator that must be positive was zero.
    #[error("arithmetic inconsistency: count of item '{item}' is zero while evaluating pair ({pair_a}, {pair_b})")]
    ArithmeticInconsistency {
        item: String,
        pair_a: String,
        pair_b: String,
    },
}

impl MiningError {
    pub(crate) fn input(reason: impl Into<String>) -> Self {
        Self::InputValidation(reason.into())
    }

    pub fn is_input_validation(&self) -> bool {
        matches!(self, Self::InputValidation(_))
    }
}
