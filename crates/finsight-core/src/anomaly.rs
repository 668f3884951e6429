//! Per-category z-score anomaly detection
//!
//! Scores every debit transaction against the mean and sample standard
//! deviation of its category, and flags outliers at |z| >= 2. Categories
//! with fewer than three transactions carry too little signal and are
//! skipped entirely. Interpretation: z < -2 unusually low, -2..2 normal,
//! z > 2 unusually high.

use std::collections::{BTreeMap, HashSet};

use crate::models::{round2, AnomalyResult, Category, Direction, Transaction};

/// Minimum transactions a category needs before z-scores mean anything.
pub const MIN_CATEGORY_SAMPLES: usize = 3;

/// Absolute z-score at which a transaction is flagged.
pub const ANOMALY_Z_THRESHOLD: f64 = 2.0;

/// Configurable detector; defaults match the thresholds above.
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    pub min_category_samples: usize,
    pub z_threshold: f64,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self {
            min_category_samples: MIN_CATEGORY_SAMPLES,
            z_threshold: ANOMALY_Z_THRESHOLD,
        }
    }
}

impl AnomalyDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score debit transactions per category.
    ///
    /// Transactions whose id appears in `ignore_ids` are dropped before
    /// statistics are computed. One result is emitted for every surviving
    /// debit in an eligible category, flagged or not; callers filter for
    /// the flagged subset when they want detection-only behavior.
    pub fn detect(
        &self,
        transactions: &[Transaction],
        ignore_ids: &HashSet<String>,
    ) -> Vec<AnomalyResult> {
        let mut by_category: BTreeMap<Category, Vec<&Transaction>> = BTreeMap::new();
        for txn in transactions {
            if txn.direction != Direction::Debit {
                continue;
            }
            if let Some(id) = &txn.id {
                if ignore_ids.contains(id) {
                    continue;
                }
            }
            by_category.entry(txn.effective_category()).or_default().push(txn);
        }

        let mut results = Vec::new();
        for (category, group) in &by_category {
            if group.len() < self.min_category_samples {
                continue;
            }

            let n = group.len() as f64;
            let mean = group.iter().map(|t| t.amount).sum::<f64>() / n;
            let variance = group
                .iter()
                .map(|t| (t.amount - mean).powi(2))
                .sum::<f64>()
                / (n - 1.0);
            let stdev = variance.sqrt();

            for txn in group {
                // A category where every amount is identical is degenerate
                // but valid: all z-scores are zero, nothing is flagged.
                let z = if stdev == 0.0 {
                    0.0
                } else {
                    (txn.amount - mean) / stdev
                };
                results.push(AnomalyResult {
                    date: txn.date,
                    amount: txn.amount,
                    category: category.clone(),
                    score: round2(z),
                    is_anomaly: z.abs() >= self.z_threshold,
                });
            }
        }
        results
    }
}
