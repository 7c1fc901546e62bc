// ═══════════════════════════════════════════════════════════════════
// Integration Tests — StockLedger facade over the demo dataset
// ═══════════════════════════════════════════════════════════════════

use stock_ledger_core::errors::CoreError;
use stock_ledger_core::models::holding::HoldingPosition;
use stock_ledger_core::models::monthly_data::MonthlyData;
use stock_ledger_core::models::settings::Settings;
use stock_ledger_core::models::summary::ProfitOutcome;
use stock_ledger_core::models::transaction::Transaction;
use stock_ledger_core::storage::selection::{FileSelectionStore, MemorySelectionStore, SelectionStore};
use stock_ledger_core::StockLedger;

const DEMO: &str = include_str!("../../../demos/data.json");

fn demo() -> StockLedger {
    StockLedger::from_json_str(DEMO).unwrap()
}

#[test]
fn test_demo_months_in_file_order() {
    assert_eq!(demo().months(), vec!["January", "February", "March"]);
}

#[test]
fn test_demo_january() {
    let s = demo().summary("January").unwrap();

    assert_eq!(s.amount_purchased, 3350.0);
    assert_eq!(s.amount_sold, 760.0);
    assert_eq!(s.profit_loss, 160.0);
    assert_eq!(s.cash_delta, -2590.0);
    assert_eq!(s.holding("AAPL"), Some(&HoldingPosition::new(6.0, 900.0)));
    assert_eq!(s.holding("MSFT"), Some(&HoldingPosition::new(5.0, 1850.0)));
}

#[test]
fn test_demo_february_with_rejected_sale() {
    let s = demo().summary("February").unwrap();

    assert_eq!(s.error_count(), 1);
    assert_eq!(
        s.annotated_transactions[1].profit,
        Some(ProfitOutcome::InsufficientShares)
    );
    assert_eq!(
        s.annotated_transactions[2].profit,
        Some(ProfitOutcome::Realized(200.0))
    );
    assert_eq!(s.profit_loss, 360.0);
    assert_eq!(s.amount_sold, 2810.0);
    assert_eq!(s.cash_delta, -1650.0);
    assert!(s.holding("MSFT").is_none());
    assert!(s.holding("TSLA").is_none());
    assert_eq!(s.holding("AAPL"), Some(&HoldingPosition::new(12.0, 2010.0)));
}

#[test]
fn test_demo_march_closes_aapl() {
    let s = demo().summary("March").unwrap();

    assert_eq!(
        s.annotated_transactions[0].profit,
        Some(ProfitOutcome::Realized(60.0))
    );
    assert_eq!(s.holdings.len(), 1);
    assert_eq!(s.holding("NVDA"), Some(&HoldingPosition::new(8.0, 7000.0)));
    assert_eq!(s.amount_purchased, 11460.0);
    assert_eq!(s.amount_sold, 4880.0);
    assert_eq!(s.remaining_in_shares, 6580.0);
    assert_eq!(s.profit_loss, 420.0);
    assert_eq!(s.monthly_series.len(), 3);
}

#[test]
fn test_unknown_month_through_facade() {
    assert!(matches!(
        demo().summary("April"),
        Err(CoreError::UnknownMonth(_))
    ));
}

#[test]
fn test_report_through_facade() {
    let r = demo().report("February").unwrap();
    assert_eq!(r.title, "Summary for February");
    assert_eq!(r.profit_loss, "$360.00");
    assert_eq!(r.shares_remaining, "AAPL: 12");
    assert_eq!(r.rows.len(), 3);
    assert_eq!(r.rows[1].profit, "Error: Insufficient Shares");
}

#[test]
fn test_render_text_through_facade() {
    let text = demo().render_text("March").unwrap();
    assert!(text.contains("Shares Remaining: NVDA: 8"));
    assert!(text.contains("Amount Remaining in Shares: $6580.00"));
}

#[test]
fn test_render_summary_matches_render_text() {
    let ledger = demo();
    let summary = ledger.summary("February").unwrap();
    assert_eq!(
        ledger.render_summary(&summary),
        ledger.render_text("February").unwrap()
    );
}

#[test]
fn test_select_month_persists_choice() {
    let ledger = demo();
    let mut store = MemorySelectionStore::new();

    let s = ledger.select_month(&mut store, "March").unwrap();
    assert_eq!(s.selected_month, "March");
    assert_eq!(store.get("selectedMonth").unwrap().as_deref(), Some("March"));
    assert_eq!(ledger.restore_selection(&store).unwrap().as_deref(), Some("March"));
}

#[test]
fn test_select_unknown_month_persists_nothing() {
    let ledger = demo();
    let mut store = MemorySelectionStore::new();
    store.set("selectedMonth", "February").unwrap();

    assert!(ledger.select_month(&mut store, "Smarch").is_err());
    assert_eq!(
        store.get("selectedMonth").unwrap().as_deref(),
        Some("February")
    );
}

#[test]
fn test_restore_selection_defaults_to_january() {
    let store = MemorySelectionStore::new();
    assert_eq!(
        demo().restore_selection(&store).unwrap().as_deref(),
        Some("January")
    );
}

#[test]
fn test_selection_survives_restart_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");

    {
        let mut store = FileSelectionStore::open(&state).unwrap();
        demo().select_month(&mut store, "February").unwrap();
    }

    let store = FileSelectionStore::open(&state).unwrap();
    assert_eq!(
        demo().restore_selection(&store).unwrap().as_deref(),
        Some("February")
    );
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, DEMO).unwrap();

    let ledger = StockLedger::load_from_file(&path).unwrap();
    assert_eq!(ledger.data().transaction_count(), 8);
}

#[test]
fn test_export_and_reimport() {
    let ledger = demo();
    let json = ledger.export_to_json().unwrap();
    let again = StockLedger::from_json_str(&json).unwrap();
    assert_eq!(again.data(), ledger.data());
    assert_eq!(again.summary("March").unwrap(), ledger.summary("March").unwrap());
}

#[test]
fn test_with_settings_validates() {
    let bad = Settings {
        decimal_places: 20,
        ..Settings::default()
    };
    assert!(StockLedger::with_settings(MonthlyData::new(), bad).is_err());
}

#[test]
fn test_with_settings_validates_transactions() {
    let data = MonthlyData::new().with_month("January", vec![Transaction::buy("2024-01-05", "X", 0.0, 5.0)]);
    match StockLedger::with_settings(data, Settings::default()) {
        Err(CoreError::ValidationError(msg)) => assert!(msg.contains("quantity")),
        other => panic!("Expected ValidationError, got: {:?}", other),
    }
}

#[test]
fn test_new_rejects_invalid_transactions() {
    let data = MonthlyData::new().with_month(
        "January",
        vec![
            Transaction::buy("2024-01-05", "X", 4.0, 5.0),
            Transaction::buy("2024-01-06", "", -3.0, -1.0),
        ],
    );
    match StockLedger::new(data) {
        Err(CoreError::ValidationError(msg)) => assert!(msg.contains("January transaction #1")),
        other => panic!("Expected ValidationError, got: {:?}", other),
    }
}

#[test]
fn test_new_accepts_valid_data() {
    let ledger = StockLedger::new(demo().data().clone()).unwrap();
    assert_eq!(ledger.months(), vec!["January", "February", "March"]);
}

#[test]
fn test_with_settings_changes_formatting() {
    let settings = Settings {
        currency_symbol: "£".into(),
        decimal_places: 0,
        ..Settings::default()
    };
    let ledger = StockLedger::with_settings(demo().data().clone(), settings).unwrap();
    assert_eq!(ledger.report("January").unwrap().amount_purchased, "£3350");
}

#[test]
fn test_from_dated_transactions() {
    let ledger = StockLedger::from_dated_transactions(vec![
        Transaction::buy("2024-01-03", "X", 10.0, 5.0),
        Transaction::sell("2024-02-20", "X", 4.0, 8.0),
    ])
    .unwrap();

    assert_eq!(ledger.months(), vec!["January", "February"]);
    let s = ledger.summary("February").unwrap();
    assert_eq!(s.profit_loss, 12.0);
    assert_eq!(s.monthly_series.len(), 2);
}

#[test]
fn test_from_dated_transactions_rejects_invalid_sale() {
    let result = StockLedger::from_dated_transactions(vec![
        Transaction::buy("2024-01-03", "X", 4.0, 5.0),
        Transaction::sell("2024-01-04", "X", 4.0, 6.0),
        Transaction::sell("2024-01-05", "X", 0.0, 6.0),
        Transaction::buy("2024-01-06", "", -3.0, -1.0),
    ]);
    match result {
        Err(CoreError::ValidationError(msg)) => assert!(msg.contains("quantity")),
        other => panic!("Expected ValidationError, got: {:?}", other),
    }
}

#[test]
fn test_summary_serializes_to_json() {
    let s = demo().summary("February").unwrap();
    let value = serde_json::to_value(&s).unwrap();

    assert_eq!(value["selected_month"], "February");
    assert_eq!(value["holdings"]["AAPL"]["quantity"], 12.0);
    assert_eq!(
        value["annotated_transactions"][1]["profit"]["kind"],
        "insufficient_shares"
    );
    assert_eq!(value["monthly_series"][1]["month"], "February");
}

#[test]
fn test_debug_format() {
    let debug = format!("{:?}", demo());
    assert!(debug.contains("StockLedger"));
    assert!(debug.contains("months: 3"));
}
