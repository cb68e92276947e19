//! Frequent-item counting and pairwise association rule generation
//!
//! The pipeline runs four steps in order and never revisits an earlier one:
//! item universe, frequency counts, support filter, rule generation. Candidate
//! pairs are built from the frequent items only.

use crate::config::Thresholds;
use crate::data::TransactionSet;
use crate::error::MiningError;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

/// Distinct item labels across the collection, in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ItemUniverse {
    items: Vec<String>,
}

impl ItemUniverse {
    pub fn build(transactions: &TransactionSet) -> Self {
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for item in transactions.iter().flat_map(|t| t.items()) {
            if seen.insert(item.as_str()) {
                items.push(item.clone());
            }
        }

        Self { items }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Count of transactions containing `item`
pub fn count_item(transactions: &TransactionSet, item: &str) -> usize {
    transactions.iter().filter(|t| t.contains(item)).count()
}

/// Count of transactions containing both members of `pair`
pub fn count_pair(transactions: &TransactionSet, pair: &Pair) -> usize {
    transactions
        .iter()
        .filter(|t| t.contains(&pair.a) && t.contains(&pair.b))
        .count()
}

/// Item Count Table: raw occurrence count per item, fixed once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCounts {
    counts: HashMap<String, usize>,
}

impl ItemCounts {
    pub fn build(transactions: &TransactionSet, universe: &ItemUniverse) -> Self {
        let counts = universe
            .items()
            .iter()
            .map(|item| (item.clone(), count_item(transactions, item)))
            .collect();
        Self { counts }
    }

    /// Count for `item`, zero when it never occurs
    pub fn get(&self, item: &str) -> usize {
        self.counts.get(item).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(String, usize)> for ItemCounts {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

impl Serialize for ItemCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&str, usize> =
            self.counts.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        sorted.serialize(serializer)
    }
}

/// Fraction of transactions represented by `count`
pub fn support(count: usize, total: usize) -> Result<f64, MiningError> {
    if total == 0 {
        return Err(MiningError::input(
            "total transaction count is zero; support is undefined",
        ));
    }
    Ok(count as f64 / total as f64)
}

/// Inclusive support filter shared by items and pairs
pub fn is_frequent(count: usize, total: usize, min_support: f64) -> Result<bool, MiningError> {
    Ok(support(count, total)? >= min_support)
}

/// Items whose support meets `min_support`, in universe order
pub fn frequent_items(
    universe: &ItemUniverse,
    counts: &ItemCounts,
    total: usize,
    min_support: f64,
) -> Result<Vec<String>, MiningError> {
    let mut frequent = Vec::new();
    for item in universe.items() {
        let count = counts.get(item);
        if is_frequent(count, total, min_support)? {
            frequent.push(item.clone());
        } else {
            debug!(item = %item, count, "Item below minimum support");
        }
    }
    Ok(frequent)
}

/// Unordered pair of two distinct items, stored in generation order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pair {
    pub a: String,
    pub b: String,
}

/// Every 2-combination of `items`, preserving their relative order
pub fn candidate_pairs(items: &[String]) -> Vec<Pair> {
    let mut pairs = Vec::with_capacity(items.len() * items.len().saturating_sub(1) / 2);
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            pairs.push(Pair {
                a: a.clone(),
                b: b.clone(),
            });
        }
    }
    pairs
}

/// A candidate pair that passed the support filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequentPair {
    pub pair: Pair,
    pub count: usize,
    pub support: f64,
}

/// Count each candidate and keep those meeting `min_support`
pub fn frequent_pairs(
    transactions: &TransactionSet,
    candidates: Vec<Pair>,
    min_support: f64,
) -> Result<Vec<FrequentPair>, MiningError> {
    let total = transactions.total();
    let mut frequent = Vec::new();

    for pair in candidates {
        let count = count_pair(transactions, &pair);
        let support = support(count, total)?;
        if support >= min_support {
            frequent.push(FrequentPair {
                pair,
                count,
                support,
            });
        } else {
            debug!(a = %pair.a, b = %pair.b, count, "Pair below minimum support");
        }
    }

    Ok(frequent)
}

/// Directional association rule `antecedent => consequent`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub antecedent: String,
    pub consequent: String,
    /// Support of the pair the rule was derived from
    pub support: f64,
    pub confidence: f64,
}

/// Derive A=>B and B=>A for every frequent pair, keeping those meeting
/// `min_confidence`. Rules follow pair order, A=>B before B=>A.
pub fn generate_rules(
    pairs: &[FrequentPair],
    counts: &ItemCounts,
    min_confidence: f64,
) -> Result<Vec<Rule>, MiningError> {
    let mut rules = Vec::new();

    for fp in pairs {
        let directions = [(&fp.pair.a, &fp.pair.b), (&fp.pair.b, &fp.pair.a)];
        for (antecedent, consequent) in directions {
            let antecedent_count = counts.get(antecedent);
            if antecedent_count == 0 {
                return Err(MiningError::ArithmeticInconsistency {
                    item: antecedent.clone(),
                    pair_a: fp.pair.a.clone(),
                    pair_b: fp.pair.b.clone(),
                });
            }

            let confidence = fp.count as f64 / antecedent_count as f64;
            if confidence >= min_confidence {
                rules.push(Rule {
                    antecedent: antecedent.clone(),
                    consequent: consequent.clone(),
                    support: fp.support,
                    confidence,
                });
            } else {
                debug!(
                    antecedent = %antecedent,
                    consequent = %consequent,
                    confidence,
                    "Rule below minimum confidence"
                );
            }
        }
    }

    Ok(rules)
}

/// Everything one mining run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiningReport {
    pub total_transactions: usize,
    pub thresholds: Thresholds,
    pub universe: ItemUniverse,
    pub item_counts: ItemCounts,
    pub frequent_items: Vec<String>,
    /// Number of pairs built from `frequent_items`
    pub candidate_count: usize,
    pub frequent_pairs: Vec<FrequentPair>,
    pub rules: Vec<Rule>,
}

/// Run the full pipeline over `transactions`
///
/// # Arguments
/// * `transactions` - Non-empty transaction collection
/// * `thresholds` - Minimum support and confidence
///
/// # Returns
/// * `MiningReport` with the intermediate tables and the discovered rules
pub fn mine(
    transactions: &TransactionSet,
    thresholds: &Thresholds,
) -> Result<MiningReport, MiningError> {
    let total = transactions.total();

    let universe = ItemUniverse::build(transactions);
    debug!(distinct_items = universe.len(), "Item universe built");

    let item_counts = ItemCounts::build(transactions, &universe);

    let frequent_items = frequent_items(&universe, &item_counts, total, thresholds.min_support)?;
    info!(
        frequent = frequent_items.len(),
        distinct = universe.len(),
        "Frequent items selected"
    );

    let candidates = candidate_pairs(&frequent_items);
    let candidate_count = candidates.len();
    let frequent_pairs = frequent_pairs(transactions, candidates, thresholds.min_support)?;
    info!(
        candidates = candidate_count,
        frequent = frequent_pairs.len(),
        "Frequent pairs selected"
    );

    let rules = generate_rules(&frequent_pairs, &item_counts, thresholds.min_confidence)?;
    info!(rules = rules.len(), "Rules generated");

    Ok(MiningReport {
        total_transactions: total,
        thresholds: *thresholds,
        universe,
        item_counts,
        frequent_items,
        candidate_count,
        frequent_pairs,
        rules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Transaction;

    fn create_test_transactions() -> TransactionSet {
        TransactionSet::new(vec![
            Transaction::new(["A", "B"]),
            Transaction::new(["A", "B", "C"]),
            Transaction::new(["A"]),
            Transaction::new(["B", "C"]),
        ])
        .unwrap()
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_item_universe_dedupes_in_first_seen_order() {
        let set = TransactionSet::new(vec![
            Transaction::new(["b", "a", "b"]),
            Transaction::new(["c", "a"]),
        ])
        .unwrap();
        let universe = ItemUniverse::build(&set);
        assert_eq!(universe.items(), &["b", "a", "c"]);
    }

    #[test]
    fn test_counts() {
        let set = create_test_transactions();
        let universe = ItemUniverse::build(&set);
        let counts = ItemCounts::build(&set, &universe);

        assert_eq!(counts.get("A"), 3);
        assert_eq!(counts.get("B"), 3);
        assert_eq!(counts.get("C"), 2);
        assert_eq!(counts.get("Z"), 0);

        let pair = Pair {
            a: "A".into(),
            b: "C".into(),
        };
        assert_eq!(count_pair(&set, &pair), 1);
    }

    #[test]
    fn test_duplicates_counted_once_per_transaction() {
        let set = TransactionSet::new(vec![
            Transaction::new(["x", "x", "y"]),
            Transaction::new(["y"]),
        ])
        .unwrap();
        assert_eq!(count_item(&set, "x"), 1);
        let pair = Pair {
            a: "x".into(),
            b: "x".into(),
        };
        assert_eq!(count_pair(&set, &pair), 1);
    }

    #[test]
    fn test_support_zero_total() {
        let err = support(1, 0).unwrap_err();
        assert!(err.is_input_validation());
        assert!(is_frequent(0, 0, 0.0).is_err());
    }

    #[test]
    fn test_is_frequent_inclusive() {
        assert!(is_frequent(2, 4, 0.5).unwrap());
        assert!(!is_frequent(1, 4, 0.5).unwrap());
        assert!(is_frequent(0, 4, 0.0).unwrap());
    }

    #[test]
    fn test_candidate_pairs() {
        let items: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        let pairs = candidate_pairs(&items);
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], Pair { a: "A".into(), b: "B".into() });
        assert_eq!(pairs[5], Pair { a: "C".into(), b: "D".into() });

        assert!(candidate_pairs(&items[..1]).is_empty());
        assert!(candidate_pairs(&[]).is_empty());
    }

    #[test]
    fn test_mine_reference_scenario() {
        let set = create_test_transactions();
        let thresholds = Thresholds::new(0.5, 0.5).unwrap();
        let report = mine(&set, &thresholds).unwrap();

        assert_eq!(report.total_transactions, 4);
        assert_eq!(report.frequent_items, vec!["A", "B", "C"]);
        assert_eq!(report.candidate_count, 3);
        assert_eq!(report.frequent_pairs.len(), 2);
        assert_eq!(report.rules.len(), 4);

        let summary: Vec<(&str, &str)> = report
            .rules
            .iter()
            .map(|r| (r.antecedent.as_str(), r.consequent.as_str()))
            .collect();
        assert_eq!(summary, vec![("A", "B"), ("B", "A"), ("B", "C"), ("C", "B")]);

        assert!(approx_eq(report.rules[0].confidence, 2.0 / 3.0));
        assert!(approx_eq(report.rules[1].confidence, 2.0 / 3.0));
        assert!(approx_eq(report.rules[2].confidence, 2.0 / 3.0));
        assert!(approx_eq(report.rules[3].confidence, 1.0));
        assert!(report.rules.iter().all(|r| approx_eq(r.support, 0.5)));
    }

    #[test]
    fn test_min_support_boundaries() {
        let set = create_test_transactions();

        let everything = mine(&set, &Thresholds::new(0.0, 0.0).unwrap()).unwrap();
        assert_eq!(everything.frequent_items.len(), 3);

        let all_baskets = mine(&set, &Thresholds::new(1.0, 0.0).unwrap()).unwrap();
        assert!(all_baskets.frequent_items.is_empty());
        assert!(all_baskets.rules.is_empty());
    }

    #[test]
    fn test_one_direction_only() {
        let set = create_test_transactions();
        let report = mine(&set, &Thresholds::new(0.5, 0.9).unwrap()).unwrap();
        assert_eq!(report.rules.len(), 1);
        assert_eq!(report.rules[0].antecedent, "C");
        assert_eq!(report.rules[0].consequent, "B");
    }

    #[test]
    fn test_pairs_built_from_frequent_items_only() {
        // D and E appear once each and fall below 50% support
        let set = TransactionSet::new(vec![
            Transaction::new(["A", "B", "D"]),
            Transaction::new(["A", "B", "E"]),
            Transaction::new(["A", "C"]),
            Transaction::new(["B", "C"]),
        ])
        .unwrap();
        let report = mine(&set, &Thresholds::new(0.5, 0.0).unwrap()).unwrap();

        assert_eq!(report.universe.len(), 5);
        assert_eq!(report.frequent_items, vec!["A", "B", "C"]);
        assert_eq!(report.candidate_count, 3);
    }

    #[test]
    fn test_min_confidence_inclusive() {
        let set = create_test_transactions();

        let report = mine(&set, &Thresholds::new(0.5, 1.0).unwrap()).unwrap();
        assert_eq!(report.rules.len(), 1);
        assert_eq!(report.rules[0].antecedent, "C");
        assert_eq!(report.rules[0].consequent, "B");
        assert_eq!(report.rules[0].confidence, 1.0);

        // 2/3 computed the same way as the rule confidence
        let two_thirds = 2.0 / 3.0;
        let report = mine(&set, &Thresholds::new(0.5, two_thirds).unwrap()).unwrap();
        assert_eq!(report.rules.len(), 4);
        assert!(report.rules.iter().any(|r| r.confidence == two_thirds));
    }

    #[test]
    fn test_inconsistent_counts_rejected() {
        let pairs = vec![FrequentPair {
            pair: Pair {
                a: "A".into(),
                b: "B".into(),
            },
            count: 1,
            support: 0.5,
        }];
        let counts: ItemCounts = [("A".to_string(), 2)].into_iter().collect();

        let err = generate_rules(&pairs, &counts, 0.1).unwrap_err();
        assert_eq!(
            err,
            MiningError::ArithmeticInconsistency {
                item: "B".into(),
                pair_a: "A".into(),
                pair_b: "B".into(),
            }
        );
    }

    #[test]
    fn test_item_counts_serialize_sorted() {
        let set = create_test_transactions();
        let counts = ItemCounts::build(&set, &ItemUniverse::build(&set));
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"A":3,"B":3,"C":2}"#);
    }
}
