//! Analytics engine facade
//!
//! One entry point per boundary operation: summarize, categorize, detect
//! anomalies, forecast, merchant insights, plus the composed monthly
//! insight report. The engine owns the compiled keyword dictionary (its
//! only state, read-only for the process lifetime) and every operation is
//! a synchronous pure pass over the caller's transaction list.

use chrono::Datelike;
use std::collections::HashSet;
use tracing::debug;

use crate::anomaly::AnomalyDetector;
use crate::classify::KeywordClassifier;
use crate::error::{Error, Result};
use crate::forecast;
use crate::keywords::CategoryKeywordTable;
use crate::merchant;
use crate::models::{
    AnomalyResult, CategoryGuess, ForecastEntry, MerchantMonthlyInsight, MonthlyInsight, Summary,
    Transaction,
};
use crate::summary;

pub struct AnalyticsEngine {
    classifier: KeywordClassifier,
    detector: AnomalyDetector,
}

impl AnalyticsEngine {
    /// Build an engine around an injected keyword dictionary.
    pub fn new(table: &CategoryKeywordTable) -> Result<Self> {
        Ok(Self {
            classifier: KeywordClassifier::new(table)?,
            detector: AnomalyDetector::new(),
        })
    }

    /// Build an engine with the built-in dictionary.
    pub fn with_builtin_table() -> Self {
        Self::new(&CategoryKeywordTable::builtin())
            .expect("built-in keyword table always validates")
    }

    /// Totals by direction, biggest debit category, top five categories.
    pub fn summarize(&self, transactions: &[Transaction]) -> Result<Summary> {
        check_amounts(transactions)?;
        let result = summary::summarize(transactions);
        debug!(
            transactions = transactions.len(),
            total_debit = result.total_debit,
            total_credit = result.total_credit,
            "Summary built"
        );
        Ok(result)
    }

    /// One category guess per transaction, aligned with input order.
    pub fn categorize(&self, transactions: &[Transaction]) -> Result<Vec<CategoryGuess>> {
        check_amounts(transactions)?;
        let guesses = self.classifier.classify_all(transactions);
        debug!(transactions = transactions.len(), "Categorization complete");
        Ok(guesses)
    }

    /// Z-score every debit in categories with enough history, skipping ids
    /// in the ignore list.
    pub fn detect_anomalies(
        &self,
        transactions: &[Transaction],
        ignore_ids: &[String],
    ) -> Result<Vec<AnomalyResult>> {
        check_amounts(transactions)?;
        let ignore: HashSet<String> = ignore_ids.iter().cloned().collect();
        let results = self.detector.detect(transactions, &ignore);
        debug!(
            transactions = transactions.len(),
            scored = results.len(),
            flagged = results.iter().filter(|r| r.is_anomaly).count(),
            "Anomaly detection complete"
        );
        Ok(results)
    }

    /// Next-month projection per category with debit history.
    pub fn forecast(&self, transactions: &[Transaction]) -> Result<Vec<ForecastEntry>> {
        check_amounts(transactions)?;
        let entries = forecast::forecast(transactions);
        debug!(categories = entries.len(), "Forecast complete");
        Ok(entries)
    }

    /// Per-merchant monthly spend over the trailing `months_back` window.
    pub fn merchant_insights(
        &self,
        transactions: &[Transaction],
        months_back: u32,
    ) -> Result<Vec<MerchantMonthlyInsight>> {
        check_amounts(transactions)?;
        let insights = merchant::merchant_insights(transactions, months_back)?;
        debug!(
            months_back,
            merchants = insights.len(),
            "Merchant insights built"
        );
        Ok(insights)
    }

    /// Composite report for one calendar month: that month's summary and
    /// flagged anomalies, plus forecasts drawn from the full history.
    ///
    /// A month with no transactions yields zeroed totals and empty lists,
    /// not an error.
    pub fn monthly_insight(
        &self,
        transactions: &[Transaction],
        year: i32,
        month: u32,
    ) -> Result<MonthlyInsight> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(format!(
                "month must be in [1, 12], got {}",
                month
            )));
        }
        check_amounts(transactions)?;

        let in_month: Vec<Transaction> = transactions
            .iter()
            .filter(|t| t.date.year() == year && t.date.month() == month)
            .cloned()
            .collect();

        let month_summary = summary::summarize(&in_month);
        let anomalies: Vec<AnomalyResult> = self
            .detector
            .detect(&in_month, &HashSet::new())
            .into_iter()
            .filter(|r| r.is_anomaly)
            .collect();
        let forecast = forecast::forecast(transactions);

        debug!(
            year,
            month,
            in_month = in_month.len(),
            anomalies = anomalies.len(),
            "Monthly insight built"
        );

        Ok(MonthlyInsight {
            month,
            year,
            total_debit: month_summary.total_debit,
            total_credit: month_summary.total_credit,
            biggest_category: month_summary.biggest_category,
            top_categories: month_summary.top_categories,
            anomalies,
            forecast,
        })
    }
}

/// Defensive precondition check: amounts carry their sign in `direction`
/// and must be non-negative finite numbers.
fn check_amounts(transactions: &[Transaction]) -> Result<()> {
    for txn in transactions {
        if !txn.amount.is_finite() || txn.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "transaction amount must be a non-negative number, got {}",
                txn.amount
            )));
        }
    }
    Ok(())
}
