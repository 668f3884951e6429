//! Per-merchant monthly spend insights
//!
//! Groups debit spend by canonical merchant key over a trailing window of
//! calendar months. The window is anchored at the most recent transaction
//! date in the input rather than the wall clock, keeping the engine a pure
//! function of its inputs; the anchor month itself counts as the first of
//! the `months_back` months.

use chrono::Datelike;
use std::collections::BTreeMap;

use crate::aggregate::month_key;
use crate::error::{Error, Result};
use crate::models::{round2, Direction, MerchantMonthlyInsight, MonthlyTotal, Transaction};
use crate::text::normalize_merchant;

/// Inclusive bounds for the `months_back` window parameter.
pub const MONTHS_BACK_RANGE: std::ops::RangeInclusive<u32> = 1..=12;

/// Build per-merchant monthly spend series over the trailing window.
///
/// A transaction's raw merchant string is its `merchant` field, falling
/// back to `description`; both missing normalizes to `"Unknown"`.
/// Merchants with no debit activity inside the window are omitted, and the
/// result is ordered by grand total descending (ties by merchant key).
pub fn merchant_insights(
    transactions: &[Transaction],
    months_back: u32,
) -> Result<Vec<MerchantMonthlyInsight>> {
    if !MONTHS_BACK_RANGE.contains(&months_back) {
        return Err(Error::InvalidData(format!(
            "monthsBack must be in [1, 12], got {}",
            months_back
        )));
    }

    let Some(anchor) = transactions.iter().map(|t| t.date).max() else {
        return Ok(Vec::new());
    };

    let window = trailing_months(anchor.year(), anchor.month(), months_back);

    let mut by_merchant: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for txn in transactions {
        if txn.direction != Direction::Debit {
            continue;
        }
        let month = month_key(txn.date);
        if !window.contains(&month) {
            continue;
        }
        let raw = txn.merchant.as_deref().or(txn.description.as_deref());
        let key = normalize_merchant(raw);
        *by_merchant.entry(key).or_default().entry(month).or_insert(0.0) += txn.amount;
    }

    let mut insights: Vec<MerchantMonthlyInsight> = by_merchant
        .into_iter()
        .map(|(merchant, months)| {
            let total = months.values().sum::<f64>();
            MerchantMonthlyInsight {
                merchant,
                monthly: months
                    .into_iter()
                    .map(|(month, total)| MonthlyTotal {
                        month,
                        total: round2(total),
                    })
                    .collect(),
                total: round2(total),
            }
        })
        .collect();

    insights.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.merchant.cmp(&b.merchant))
    });

    Ok(insights)
}

/// The `count` month keys ending at (and including) the anchor month.
fn trailing_months(anchor_year: i32, anchor_month: u32, count: u32) -> Vec<String> {
    let mut year = anchor_year;
    let mut month = anchor_month as i32;
    let mut keys = Vec::with_capacity(count as usize);
    for _ in 0..count {
        keys.push(format!("{:04}-{:02}", year, month));
        month -= 1;
        if month == 0 {
            month = 12;
            year -= 1;
        }
    }
    keys.reverse();
    keys
}
