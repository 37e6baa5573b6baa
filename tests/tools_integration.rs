use neurapay_agent::sources::TransactionFetcher;
use neurapay_agent::tools::{create_default_registry, ToolRegistry};
use neurapay_agent::ToolInput;
use proptest::prelude::*;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const HEADER: &str = "timestamp,type,amount,currency,counterparty,description,category,balance_after";

fn csv_fixture(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}

fn demo_rows() -> Vec<&'static str> {
    vec![
        "2024-03-01T09:00:00Z,receive,2500.00,USD,@employer,Salary,income,3100.00",
        "2024-03-01T12:30:00Z,send,42.50,USD,@cafe,Lunch,food,3057.50",
        "2024-03-02T08:10:00Z,send,1200.00,USD,@landlord,Rent,rent,1857.50",
        "2024-03-03T19:45:00Z,send,65.00,USD,@grocer,Groceries,food,1792.50",
        "2024-03-05T10:00:00Z,send,300.00,USD,@vault,Monthly savings,savings,1492.50",
        "2024-03-07T21:15:00Z,send,18.00,USD,@cinema,Movie,fun,1474.50",
        "2024-03-09T13:00:00Z,send,12.75,USD,@cafe,Coffee beans,food,1461.75",
        "2024-03-12T16:20:00Z,receive,150.00,USD,@bob,Dinner split,,1611.75",
        "2024-03-15T11:00:00Z,send,89.99,USD,@telco,Phone bill,bills,1521.76",
        "2024-03-18T18:40:00Z,send,45.00,USD,@alice,Birthday gift,gifts,1476.76",
        "2024-03-22T09:30:00Z,send,200.00,USD,@vault,Extra savings,savings,1276.76",
    ]
}

fn registry_for(file: &NamedTempFile) -> ToolRegistry {
    create_default_registry(Arc::new(TransactionFetcher::csv_only(file.path())))
}

#[tokio::test]
async fn analyze_spending_from_csv() {
    let file = csv_fixture(&demo_rows());
    let registry = registry_for(&file);

    let output = registry
        .run(&ToolInput::new("analyze_spending", json!({"days": 30, "use_csv": true})))
        .await;

    assert!(output.success, "{:?}", output.error);
    let data = output.data;
    assert_eq!(data["period_days"], 30);
    assert_eq!(data["total_transactions"], 11);
    assert_eq!(data["data_source"], json!({"csv": true, "api": false}));

    let analysis = &data["analysis"];
    assert_eq!(analysis["total_spent"], "1973.24");
    assert_eq!(analysis["total_received"], "2650.00");
    assert_eq!(analysis["net_cashflow"], "676.76");
    assert_eq!(analysis["spend_count"], 9);
    assert_eq!(analysis["velocity"], "moderate");

    let top = analysis["top_categories"].as_array().unwrap();
    assert_eq!(top.len(), 5);
    assert_eq!(top[0]["category"], "rent");
    assert_eq!(top[1]["category"], "savings");
    assert_eq!(top[1]["amount"], "500.00");
}

#[tokio::test]
async fn analyze_spending_with_empty_csv() {
    let file = csv_fixture(&[]);
    let registry = registry_for(&file);

    let output = registry
        .run(&ToolInput::new("analyze_spending", json!({"use_csv": true})))
        .await;

    assert!(output.success);
    assert_eq!(output.data["total_transactions"], 0);
    assert!(output.data["analysis"]["summary"].is_string());
}

#[tokio::test]
async fn money_personality_from_csv() {
    let file = csv_fixture(&demo_rows());
    let registry = registry_for(&file);

    let output = registry
        .run(&ToolInput::new("analyze_money_personality", json!({"use_csv": true})))
        .await;

    assert!(output.success, "{:?}", output.error);
    let data = output.data;
    assert!(data["personality_type"].is_string());
    assert!(data["confidence"].as_str().unwrap().ends_with('%'));
    assert_eq!(data["raw_scores"]["income_response"], 50.0);
    assert_eq!(data["traits"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn money_personality_needs_ten_rows() {
    let rows = demo_rows();
    let file = csv_fixture(&rows[..9]);
    let registry = registry_for(&file);

    let output = registry
        .run(&ToolInput::new("analyze_money_personality", json!({"use_csv": true})))
        .await;

    assert!(!output.success);
    assert_eq!(
        output.error.as_deref(),
        Some("Need at least 10 transactions for accurate personality analysis")
    );
}

#[tokio::test]
async fn csv_transactions_respects_limit() {
    let file = csv_fixture(&demo_rows());
    let registry = registry_for(&file);

    let output = registry
        .run(&ToolInput::new("get_csv_transactions", json!({"limit": 3})))
        .await;

    assert!(output.success);
    assert_eq!(output.data["count"], 3);
    assert_eq!(output.data["source"], "csv");
    assert_eq!(output.data["transactions"][1]["amount"], 42.5);
    assert_eq!(output.data["transactions"][1]["counterparty"], "@cafe");
}

#[tokio::test]
async fn api_source_without_ledger_fails_softly() {
    let file = csv_fixture(&demo_rows());
    let registry = registry_for(&file);

    let output = registry
        .run(&ToolInput::new("analyze_spending", json!({})))
        .await;

    assert!(!output.success);
    assert!(output
        .error
        .unwrap()
        .starts_with("failed to fetch transactions"));
}

#[tokio::test]
async fn string_use_csv_flag_is_rejected() {
    let file = csv_fixture(&demo_rows());
    let registry = registry_for(&file);

    for tool in ["analyze_spending", "analyze_money_personality"] {
        let output = registry
            .run(&ToolInput::new(tool, json!({"use_csv": "true"})))
            .await;

        assert!(!output.success, "{}", tool);
        assert_eq!(
            output.error.as_deref(),
            Some("invalid input: 'use_csv' must be a boolean"),
            "{}",
            tool
        );
    }
}

#[tokio::test]
async fn non_integer_days_is_rejected() {
    let file = csv_fixture(&demo_rows());
    let registry = registry_for(&file);

    let output = registry
        .run(&ToolInput::new("analyze_spending", json!({"days": "7", "use_csv": true})))
        .await;

    assert_eq!(
        output.error.as_deref(),
        Some("invalid input: 'days' must be an integer")
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn reported_window_is_always_positive(days in -400i64..400) {
        let file = csv_fixture(&demo_rows());
        let registry = registry_for(&file);

        let output = tokio_test::block_on(
            registry.run(&ToolInput::new("analyze_spending", json!({"days": days, "use_csv": true}))),
        );

        prop_assert!(output.success);
        let expected = if days > 0 { days } else { 30 };
        prop_assert_eq!(output.data["period_days"].as_i64(), Some(expected));
    }
}
