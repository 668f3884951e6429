//! Keyword classifier
//!
//! Scores each transaction against the keyword dictionary with
//! frequency-boosted weights and picks the best category, explaining
//! itself along the way. Keywords match as whole words (or whole phrases);
//! substring containment is not enough.

use regex::Regex;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::keywords::CategoryKeywordTable;
use crate::models::{Category, CategoryGuess, Reason, Transaction};
use crate::text;

/// Raw scores below this produce the Uncategorized sentinel.
pub const SCORE_THRESHOLD: f64 = 0.5;

/// Calibration divisor mapping raw scores into [0, 1] for presentation.
/// Raw scores can exceed it, hence the clamp.
pub const SCORE_DIVISOR: f64 = 15.0;

struct CompiledKeyword {
    /// Keyword as declared in the dictionary, used in explanations
    label: String,
    weight: f64,
    /// Whole-word pattern over canonical (tokenized, space-joined) text
    pattern: Regex,
}

struct CompiledCategory {
    category: Category,
    keywords: Vec<CompiledKeyword>,
}

/// A classifier with its dictionary compiled to whole-word patterns.
///
/// Construction validates the dictionary; classification itself cannot
/// fail.
pub struct KeywordClassifier {
    categories: Vec<CompiledCategory>,
}

impl KeywordClassifier {
    pub fn new(table: &CategoryKeywordTable) -> Result<Self> {
        table.validate()?;

        let mut categories = Vec::with_capacity(table.categories.len());
        for entry in &table.categories {
            let mut keywords = Vec::with_capacity(entry.keywords.len());
            for kw in &entry.keywords {
                // Canonicalize the keyword the same way search text is
                // canonicalized, so multi-word phrases line up.
                let canonical: Vec<String> = text::tokenize(&kw.keyword).collect();
                let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&canonical.join(" "))))?;
                keywords.push(CompiledKeyword {
                    label: kw.keyword.clone(),
                    weight: kw.weight,
                    pattern,
                });
            }
            categories.push(CompiledCategory {
                category: Category::from_label(&entry.category),
                keywords,
            });
        }

        Ok(Self { categories })
    }

    /// Classify every transaction, output aligned with input order.
    pub fn classify_all(&self, transactions: &[Transaction]) -> Vec<CategoryGuess> {
        transactions.iter().map(|t| self.classify(t)).collect()
    }

    /// Produce exactly one guess for a transaction.
    pub fn classify(&self, transaction: &Transaction) -> CategoryGuess {
        let search_text = transaction.search_text();
        let tokens: Vec<String> = text::tokenize(&search_text).collect();
        let haystack = tokens.join(" ");

        let mut category_scores = BTreeMap::new();
        let mut matched_keywords = Vec::new();
        let mut best: Option<(&Category, f64)> = None;

        for compiled in &self.categories {
            let mut raw = 0.0;
            for kw in &compiled.keywords {
                let occurrences = kw.pattern.find_iter(&haystack).count();
                if occurrences > 0 {
                    raw += kw.weight * (1.0 + ((occurrences as f64) + 1.0).ln());
                    matched_keywords.push(kw.label.clone());
                }
            }
            category_scores.insert(compiled.category.as_str().to_string(), raw);

            // Strictly-greater keeps the first-declared category on ties.
            match best {
                Some((_, best_raw)) if raw <= best_raw => {}
                _ => best = Some((&compiled.category, raw)),
            }
        }

        let best_raw = best.as_ref().map(|(_, raw)| *raw).unwrap_or(0.0);
        let (category, score) = match best {
            Some((category, raw)) if raw >= SCORE_THRESHOLD => {
                (category.clone(), (raw / SCORE_DIVISOR).min(1.0))
            }
            _ => (Category::Uncategorized, 0.0),
        };

        let notes = format!(
            "Matched {} keyword(s) with score {:.2}",
            matched_keywords.len(),
            best_raw
        );

        CategoryGuess {
            guess_category: category,
            score,
            reason: Reason {
                tokens,
                matched_keywords,
                category_scores,
                notes,
            },
        }
    }
}
