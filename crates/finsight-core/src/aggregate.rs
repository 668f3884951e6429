//! Grouping and summation primitives
//!
//! Pure helpers shared by the summary builder, anomaly detector,
//! forecaster, and merchant insights. Aggregation never invokes the
//! classifier: it groups on the supplied category field (falling back to
//! Uncategorized), and callers compose classification separately if they
//! want it. Empty input yields empty mappings.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{Category, Direction, Transaction};

/// Calendar-month bucket key, "YYYY-MM". Sorts chronologically as a string.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Total debit and credit across all transactions.
pub fn sum_by_direction(transactions: &[Transaction]) -> (f64, f64) {
    let mut total_debit = 0.0;
    let mut total_credit = 0.0;
    for txn in transactions {
        match txn.direction {
            Direction::Debit => total_debit += txn.amount,
            Direction::Credit => total_credit += txn.amount,
        }
    }
    (total_debit, total_credit)
}

/// Group amounts by category for one direction, preserving input order
/// within each category.
pub fn group_by_category(
    transactions: &[Transaction],
    direction: Direction,
) -> BTreeMap<Category, Vec<f64>> {
    let mut groups: BTreeMap<Category, Vec<f64>> = BTreeMap::new();
    for txn in transactions {
        if txn.direction == direction {
            groups
                .entry(txn.effective_category())
                .or_default()
                .push(txn.amount);
        }
    }
    groups
}

/// Group summed amounts by category and calendar month for one direction.
pub fn group_by_category_and_month(
    transactions: &[Transaction],
    direction: Direction,
) -> BTreeMap<Category, BTreeMap<String, f64>> {
    let mut groups: BTreeMap<Category, BTreeMap<String, f64>> = BTreeMap::new();
    for txn in transactions {
        if txn.direction == direction {
            *groups
                .entry(txn.effective_category())
                .or_default()
                .entry(month_key(txn.date))
                .or_insert(0.0) += txn.amount;
        }
    }
    groups
}
