//! Transaction loading and validation

use crate::error::MiningError;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// A single market basket: the ordered item labels of one purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    items: Vec<String>,
}

impl Transaction {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Whether the item occurs anywhere in this basket. Repeats are irrelevant.
    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }
}

/// Record shape on disk. `items` may be absent, which is rejected later.
#[derive(Debug, Deserialize)]
struct TransactionRecord {
    items: Option<Vec<String>>,
}

/// Non-empty, read-only collection of transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSet {
    transactions: Vec<Transaction>,
}

impl TransactionSet {
    /// Build a collection, rejecting an empty one
    pub fn new(transactions: Vec<Transaction>) -> Result<Self, MiningError> {
        if transactions.is_empty() {
            return Err(MiningError::input(
                "transaction collection is empty; support is undefined",
            ));
        }
        Ok(Self { transactions })
    }

    /// Parse a JSON array of `{"items": [...]}` records
    pub fn from_json_str(json: &str) -> Result<Self, MiningError> {
        let records: Vec<TransactionRecord> = serde_json::from_str(json)
            .map_err(|e| MiningError::input(format!("invalid transaction data: {}", e)))?;

        let transactions = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                record.items.map(Transaction::new).ok_or_else(|| {
                    MiningError::input(format!(
                        "transaction at index {} has no item sequence",
                        index
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(transactions)
    }

    /// Denominator for every support calculation. Always > 0.
    pub fn total(&self) -> usize {
        self.transactions.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }
}

impl<'a> IntoIterator for &'a TransactionSet {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

/// Load transactions from a JSON file
///
/// # Arguments
/// * `file_path` - Path to a JSON array of `{"items": [...]}` records
///
/// # Returns
/// * Validated `TransactionSet`
pub fn load_transactions<P: AsRef<Path>>(file_path: P) -> crate::Result<TransactionSet> {
    let path = file_path.as_ref();
    debug!(path = %path.display(), "Reading transaction file");

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transaction file {}", path.display()))?;

    let transactions = TransactionSet::from_json_str(&raw)
        .with_context(|| format!("Failed to load transactions from {}", path.display()))?;

    info!(total = transactions.total(), "Transactions loaded");
    Ok(transactions)
}
