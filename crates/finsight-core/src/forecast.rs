//! Next-month spend projection per category
//!
//! With three or more months of debit history a category gets a simple
//! moving average over its last three months ("SMA3"); with less, the most
//! recent month's total is carried forward ("lastValue"). Categories with
//! no debit history are simply absent.

use crate::aggregate;
use crate::models::{round2, Direction, ForecastEntry, ForecastMethod, Transaction};

/// Months averaged by the SMA3 method.
pub const SMA_WINDOW: usize = 3;

/// Forecast next-month spend for every category with debit history.
pub fn forecast(transactions: &[Transaction]) -> Vec<ForecastEntry> {
    let grouped = aggregate::group_by_category_and_month(transactions, Direction::Debit);

    let mut entries = Vec::with_capacity(grouped.len());
    for (category, months) in grouped {
        // BTreeMap keys are "YYYY-MM", so iteration is chronological.
        let totals: Vec<f64> = months.into_values().collect();

        let (predicted, method) = if totals.len() >= SMA_WINDOW {
            let window = &totals[totals.len() - SMA_WINDOW..];
            (
                window.iter().sum::<f64>() / SMA_WINDOW as f64,
                ForecastMethod::Sma3,
            )
        } else {
            // len >= 1: the category would not be in the map otherwise
            (totals[totals.len() - 1], ForecastMethod::LastValue)
        };

        entries.push(ForecastEntry {
            category,
            next_month_forecast: round2(predicted),
            method,
        });
    }
    entries
}
