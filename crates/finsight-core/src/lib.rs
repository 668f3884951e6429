//! Finsight Core Library
//!
//! Transaction analytics for personal finance data:
//! - Keyword-based transaction categorization with explainable scores
//! - Period summaries (directional totals, top spending categories)
//! - Per-category z-score anomaly detection
//! - Next-month spend forecasting (SMA3 with last-value fallback)
//! - Per-merchant monthly spend insights
//! - Composed monthly insight reports
//!
//! [`AnalyticsEngine`] is the front door; the individual modules are public
//! for callers that want a single algorithm without the facade.

pub mod aggregate;
pub mod anomaly;
pub mod classify;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod keywords;
pub mod merchant;
pub mod models;
pub mod summary;
pub mod text;

pub use anomaly::{AnomalyDetector, ANOMALY_Z_THRESHOLD, MIN_CATEGORY_SAMPLES};
pub use classify::{KeywordClassifier, SCORE_DIVISOR, SCORE_THRESHOLD};
pub use engine::AnalyticsEngine;
pub use error::{Error, Result};
pub use keywords::{CategoryKeywordTable, CategoryKeywords, KeywordWeight};
pub use models::{
    AnomalyBand, AnomalyResult, Category, CategoryGuess, CategoryTotal, Direction, ForecastEntry,
    ForecastMethod, MerchantMonthlyInsight, MonthlyInsight, MonthlyTotal, Reason, Summary,
    Transaction,
};
pub use summary::TOP_CATEGORY_COUNT;
pub use text::{normalize_merchant, tokenize, UNKNOWN_MERCHANT};
