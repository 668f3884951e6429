//! Domain models for the analytics engine
//!
//! Inputs (`Transaction`) are owned by the caller and never retained past a
//! call. Every output record is a plain value built fresh per call; field
//! names serialize to the wire names the reporting layer expects
//! (`totalDebit`, `isAnomaly`, `nextMonthForecast`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Direction of money movement. The amount itself is always non-negative;
/// sign lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Money out
    Debit,
    /// Money in
    Credit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBIT" => Ok(Self::Debit),
            "CREDIT" => Ok(Self::Credit),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A spending category.
///
/// The fallback is an explicit variant rather than a magic string so a real
/// category literally named "Uncategorized" cannot collide with it in code;
/// on the wire both render as their display label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Named(String),
    Uncategorized,
}

impl Category {
    pub const UNCATEGORIZED_LABEL: &'static str = "Uncategorized";

    pub fn named(label: impl Into<String>) -> Self {
        Self::Named(label.into())
    }

    /// Parse a display label back into the tagged form.
    pub fn from_label(label: &str) -> Self {
        if label == Self::UNCATEGORIZED_LABEL {
            Self::Uncategorized
        } else {
            Self::Named(label.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(label) => label,
            Self::Uncategorized => Self::UNCATEGORIZED_LABEL,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// A raw financial transaction as handed over by the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque identifier, only used for anomaly exclusion filtering
    #[serde(default)]
    pub id: Option<String>,
    pub date: NaiveDate,
    /// Non-negative magnitude; callers validate the sign contract
    pub amount: f64,
    /// Caller-supplied category hint; never trusted by the classifier
    #[serde(default)]
    pub category: Option<Category>,
    pub direction: Direction,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub merchant: Option<String>,
}

impl Transaction {
    /// Combined free text for classification: description then merchant,
    /// space separated, missing fields treated as empty.
    pub fn search_text(&self) -> String {
        format!(
            "{} {}",
            self.description.as_deref().unwrap_or(""),
            self.merchant.as_deref().unwrap_or("")
        )
    }

    /// The category used by aggregation: the supplied label, or the fallback.
    pub fn effective_category(&self) -> Category {
        self.category.clone().unwrap_or(Category::Uncategorized)
    }
}

/// Classification result for a single transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGuess {
    pub guess_category: Category,
    /// Normalized presentation score in [0, 1]
    pub score: f64,
    pub reason: Reason,
}

/// Explanation attached to a classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reason {
    /// Tokens extracted from the transaction text
    pub tokens: Vec<String>,
    /// Keywords that matched, in dictionary order
    pub matched_keywords: Vec<String>,
    /// Raw score per category, zero-score categories included
    pub category_scores: BTreeMap<String, f64>,
    /// Human-readable note, e.g. "Matched 2 keyword(s) with score 10.49"
    pub notes: String,
}

/// Per-transaction anomaly score within its category's debit distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyResult {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: Category,
    /// Z-score, rounded to 2 decimal places at this output boundary
    pub score: f64,
    pub is_anomaly: bool,
}

impl AnomalyResult {
    /// Band the z-score for display purposes.
    pub fn interpretation(&self) -> AnomalyBand {
        if self.score <= -crate::anomaly::ANOMALY_Z_THRESHOLD {
            AnomalyBand::UnusuallyLow
        } else if self.score >= crate::anomaly::ANOMALY_Z_THRESHOLD {
            AnomalyBand::UnusuallyHigh
        } else {
            AnomalyBand::Normal
        }
    }
}

/// Human-facing interpretation of a z-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyBand {
    UnusuallyLow,
    Normal,
    UnusuallyHigh,
}

/// Next-month spend projection for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEntry {
    pub category: Category,
    pub next_month_forecast: f64,
    pub method: ForecastMethod,
}

/// How a forecast value was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastMethod {
    /// Simple moving average over the last three months
    #[serde(rename = "SMA3")]
    Sma3,
    /// Most recent month's total, used below three months of history
    #[serde(rename = "lastValue")]
    LastValue,
}

impl ForecastMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sma3 => "SMA3",
            Self::LastValue => "lastValue",
        }
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A category with its summed debit amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Spending summary over a transaction list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_debit: f64,
    pub total_credit: f64,
    /// Absent when there is no debit activity
    pub biggest_category: Option<Category>,
    /// Top categories by debit total, descending, ties by name
    pub top_categories: Vec<CategoryTotal>,
}

/// One month's spend for a merchant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    /// Calendar month key, "YYYY-MM"
    pub month: String,
    pub total: f64,
}

/// Per-merchant monthly spend series over a trailing window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantMonthlyInsight {
    /// Canonical merchant key from the normalizer
    pub merchant: String,
    /// Chronological months with activity inside the window
    pub monthly: Vec<MonthlyTotal>,
    /// Grand total across the window
    pub total: f64,
}

/// Composite report for a single calendar month: summary, flagged anomalies,
/// and per-category forecasts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyInsight {
    pub month: u32,
    pub year: i32,
    pub total_debit: f64,
    pub total_credit: f64,
    pub biggest_category: Option<Category>,
    pub top_categories: Vec<CategoryTotal>,
    pub anomalies: Vec<AnomalyResult>,
    pub forecast: Vec<ForecastEntry>,
}

/// Round a currency-like or score figure to 2 decimal places. Only applied
/// at the output boundary, never mid-calculation.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
