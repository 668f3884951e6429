//! Integration tests for finsight-core
//!
//! These tests exercise the full categorize → summarize → detect → forecast
//! workflow through the engine facade, on a realistic month of UK spending.

use chrono::NaiveDate;
use finsight_core::{
    AnalyticsEngine, Category, CategoryKeywordTable, Direction, ForecastMethod, Transaction,
};

fn txn(
    id: &str,
    date: &str,
    amount: f64,
    direction: Direction,
    category: Option<&str>,
    description: &str,
    merchant: Option<&str>,
) -> Transaction {
    Transaction {
        id: Some(id.to_string()),
        date: date.parse::<NaiveDate>().expect("valid test date"),
        amount,
        category: category.map(Category::named),
        direction,
        description: Some(description.to_string()),
        merchant: merchant.map(str::to_string),
    }
}

/// Three months of household spending: steady groceries and transport, one
/// December shopping spree that should stand out as an anomaly.
fn household_history() -> Vec<Transaction> {
    vec![
        // October
        txn("t01", "2025-10-03", 62.40, Direction::Debit, Some("Groceries"), "TESCO STORES 3412", Some("Tesco Stores Ltd")),
        txn("t02", "2025-10-10", 58.10, Direction::Debit, Some("Groceries"), "SAINSBURYS S/MKT", Some("Sainsburys")),
        txn("t03", "2025-10-14", 24.00, Direction::Debit, Some("Transport"), "TRAINLINE", Some("Trainline")),
        txn("t04", "2025-10-20", 45.00, Direction::Debit, Some("Shopping"), "AMAZON MARKETPLACE", None),
        txn("t04b", "2025-10-27", 50.00, Direction::Debit, Some("Shopping"), "AMAZON MARKETPLACE", None),
        txn("t05", "2025-10-25", 1200.00, Direction::Debit, Some("Rent"), "STANDING ORDER RENT", None),
        txn("t06", "2025-10-28", 2800.00, Direction::Credit, Some("Salary"), "ACME PAYROLL", None),
        // November
        txn("t07", "2025-11-04", 65.90, Direction::Debit, Some("Groceries"), "TESCO STORES 3412", Some("Tesco Stores Ltd")),
        txn("t08", "2025-11-12", 61.30, Direction::Debit, Some("Groceries"), "ALDI 778", Some("Aldi")),
        txn("t09", "2025-11-15", 26.50, Direction::Debit, Some("Transport"), "TFL TRAVEL CH", Some("TfL")),
        txn("t10", "2025-11-19", 52.00, Direction::Debit, Some("Shopping"), "ARGOS LTD", Some("Argos Ltd")),
        txn("t10b", "2025-11-21", 47.00, Direction::Debit, Some("Shopping"), "AMAZON MARKETPLACE", None),
        txn("t11", "2025-11-25", 1200.00, Direction::Debit, Some("Rent"), "STANDING ORDER RENT", None),
        txn("t12", "2025-11-28", 2800.00, Direction::Credit, Some("Salary"), "ACME PAYROLL", None),
        // December
        txn("t13", "2025-12-02", 59.80, Direction::Debit, Some("Groceries"), "TESCO STORES 3412", Some("Tesco Stores Ltd")),
        txn("t14", "2025-12-09", 63.20, Direction::Debit, Some("Groceries"), "LIDL GB LIVERPOOL", Some("Lidl")),
        txn("t15", "2025-12-12", 25.00, Direction::Debit, Some("Transport"), "MERSEYRAIL", Some("Merseyrail")),
        txn("t16", "2025-12-15", 48.00, Direction::Debit, Some("Shopping"), "ARGOS LTD", Some("Argos Ltd")),
        txn("t16b", "2025-12-17", 51.00, Direction::Debit, Some("Shopping"), "AMAZON MARKETPLACE", None),
        txn("t17", "2025-12-20", 650.00, Direction::Debit, Some("Shopping"), "CURRYS PC WORLD", Some("Currys")),
        txn("t18", "2025-12-25", 1200.00, Direction::Debit, Some("Rent"), "STANDING ORDER RENT", None),
        txn("t19", "2025-12-28", 2800.00, Direction::Credit, Some("Salary"), "ACME PAYROLL", None),
    ]
}

#[test]
fn test_categorize_uk_merchants_with_builtin_table() {
    let engine = AnalyticsEngine::with_builtin_table();
    let txns = vec![
        txn("a", "2025-12-01", 45.0, Direction::Debit, None, "TESCO SUPERSTORE", Some("Tesco")),
        txn("b", "2025-12-02", 12.0, Direction::Debit, None, "NETFLIX.COM SUBSCRIPTION", None),
        txn("c", "2025-12-03", 30.0, Direction::Debit, None, "OCTOPUS ENERGY BILL", None),
        txn("d", "2025-12-04", 9.0, Direction::Debit, None, "XK9 REF 4471", None),
    ];

    let guesses = engine.categorize(&txns).expect("categorize");
    assert_eq!(guesses.len(), 4);

    assert_eq!(guesses[0].guess_category, Category::named("Groceries"));
    assert!(guesses[0].score > 0.0 && guesses[0].score <= 1.0);
    assert!(guesses[0]
        .reason
        .matched_keywords
        .iter()
        .any(|k| k == "tesco"));

    assert_eq!(guesses[1].guess_category, Category::named("Entertainment"));
    assert_eq!(guesses[2].guess_category, Category::named("Utilities"));

    // Nothing matches: sentinel category, zero score, empty matches
    assert_eq!(guesses[3].guess_category, Category::Uncategorized);
    assert_eq!(guesses[3].score, 0.0);
    assert!(guesses[3].reason.matched_keywords.is_empty());
}

#[test]
fn test_summary_over_full_history() {
    let engine = AnalyticsEngine::with_builtin_table();
    let summary = engine.summarize(&household_history()).expect("summarize");

    assert_eq!(summary.total_credit, 8400.0);
    assert_eq!(summary.biggest_category, Some(Category::named("Rent")));

    let labels: Vec<&str> = summary
        .top_categories
        .iter()
        .map(|t| t.category.as_str())
        .collect();
    assert_eq!(labels, vec!["Rent", "Shopping", "Groceries", "Transport"]);
    assert_eq!(summary.top_categories[0].total, 3600.0);
}

#[test]
fn test_anomaly_detection_flags_the_spree() {
    let engine = AnalyticsEngine::with_builtin_table();
    let results = engine
        .detect_anomalies(&household_history(), &[])
        .expect("detect");

    let flagged: Vec<_> = results.iter().filter(|r| r.is_anomaly).collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].amount, 650.0);
    assert_eq!(flagged[0].category, Category::named("Shopping"));

    // Ignoring the spree by id removes the flag entirely
    let without = engine
        .detect_anomalies(&household_history(), &["t17".to_string()])
        .expect("detect");
    assert!(without.iter().all(|r| !r.is_anomaly));
}

#[test]
fn test_forecast_methods_per_category() {
    let engine = AnalyticsEngine::with_builtin_table();
    let entries = engine.forecast(&household_history()).expect("forecast");

    let rent = entries
        .iter()
        .find(|e| e.category == Category::named("Rent"))
        .expect("rent forecast");
    assert_eq!(rent.method, ForecastMethod::Sma3);
    assert_eq!(rent.next_month_forecast, 1200.0);

    let groceries = entries
        .iter()
        .find(|e| e.category == Category::named("Groceries"))
        .expect("groceries forecast");
    assert_eq!(groceries.method, ForecastMethod::Sma3);
    // (120.50 + 127.20 + 123.00) / 3
    assert_eq!(groceries.next_month_forecast, 123.57);

    // Credit-only category never appears
    assert!(entries.iter().all(|e| e.category != Category::named("Salary")));
}

#[test]
fn test_merchant_insights_window_and_grouping() {
    let engine = AnalyticsEngine::with_builtin_table();
    let insights = engine
        .merchant_insights(&household_history(), 3)
        .expect("merchant insights");

    let tesco = insights
        .iter()
        .find(|i| i.merchant == "tesco stores")
        .expect("tesco row");
    // Suffix-stripped key groups October, November and December visits
    assert_eq!(tesco.monthly.len(), 3);
    assert_eq!(tesco.total, 188.1);

    let argos = insights
        .iter()
        .find(|i| i.merchant == "argos")
        .expect("argos row");
    assert_eq!(argos.total, 100.0);

    // Grand totals descending
    for pair in insights.windows(2) {
        assert!(pair[0].total >= pair[1].total);
    }

    // A 1-month window drops everything before December
    let december_only = engine
        .merchant_insights(&household_history(), 1)
        .expect("merchant insights");
    assert!(december_only
        .iter()
        .all(|i| i.monthly.iter().all(|m| m.month == "2025-12")));
}

#[test]
fn test_monthly_insight_composes_the_pipeline() {
    let engine = AnalyticsEngine::with_builtin_table();
    let insight = engine
        .monthly_insight(&household_history(), 2025, 12)
        .expect("monthly insight");

    assert_eq!(insight.year, 2025);
    assert_eq!(insight.month, 12);
    assert!((insight.total_debit - 2097.0).abs() < 1e-9);
    assert_eq!(insight.total_credit, 2800.0);
    assert_eq!(insight.biggest_category, Some(Category::named("Rent")));

    // Only flagged anomalies appear in the report. Within December alone
    // the Shopping spree sits under the z threshold, so the list may be
    // empty; nothing unflagged ever leaks in.
    assert!(insight.anomalies.iter().all(|a| a.is_anomaly));

    // Forecast covers the full history, not just December
    assert!(insight
        .forecast
        .iter()
        .any(|e| e.category == Category::named("Rent")));
}

#[test]
fn test_custom_keyword_table_via_toml() {
    let toml = r#"
[[categories]]
category = "Coffee"

[[categories.keywords]]
keyword = "flat white"
weight = 5.0

[[categories.keywords]]
keyword = "espresso"
weight = 4.0
"#;
    let table = CategoryKeywordTable::from_toml_str(toml).expect("parse table");
    let engine = AnalyticsEngine::new(&table).expect("engine");

    let txns = vec![txn(
        "a",
        "2025-12-01",
        3.4,
        Direction::Debit,
        None,
        "FLAT WHITE + ESPRESSO SHOT",
        None,
    )];
    let guesses = engine.categorize(&txns).expect("categorize");
    assert_eq!(guesses[0].guess_category, Category::named("Coffee"));
    assert_eq!(guesses[0].reason.matched_keywords.len(), 2);
}

#[test]
fn test_wire_format_of_guess() {
    let engine = AnalyticsEngine::with_builtin_table();
    let txns = vec![txn(
        "a",
        "2025-12-01",
        8.5,
        Direction::Debit,
        None,
        "GREGGS BAKERY",
        None,
    )];
    let guesses = engine.categorize(&txns).expect("categorize");
    let json = serde_json::to_value(&guesses[0]).expect("serialize");

    assert_eq!(json["guessCategory"], "Dining");
    assert!(json["score"].as_f64().expect("score") > 0.0);
    assert!(json["reason"]["matchedKeywords"]
        .as_array()
        .expect("matches")
        .iter()
        .any(|k| k == "greggs"));
}
