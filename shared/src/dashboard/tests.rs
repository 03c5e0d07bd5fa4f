use super::*;
use crate::models::{Credentials, FiscalYear};
use crate::testing::{MockBackend, TEST_EMAIL, TEST_PASSWORD, test_client};
use chrono::NaiveDate;
use serde_json::json;

fn date(s: &str) -> NaiveDate {
    crate::date::parse_date(s).unwrap()
}

fn tx(day: &str, kind: TransactionType, amount: f64, category: Option<&str>) -> Transaction {
    Transaction {
        id: format!("tx-{day}-{amount}"),
        account_id: "acc-1".to_string(),
        category_id: None,
        category_name: category.map(str::to_string),
        partner_id: None,
        transaction_type: kind,
        amount,
        transaction_date: date(day),
        description: None,
        reference_number: None,
    }
}

use TransactionType::{Expense, Income};

// =========================================================
// 月度序列
// =========================================================

#[test]
fn test_monthly_example_scenario() {
    let txs = vec![
        tx("2024-02-10", Income, 500.0, None),
        tx("2024-02-20", Expense, 200.0, None),
        tx("2024-06-01", Income, 100.0, None),
    ];
    let series = monthly_series(MonthKey::new(2024, 1), &txs);

    assert_eq!(series.len(), 12);
    for (i, point) in series.iter().enumerate() {
        assert_eq!(point.month, MonthKey::new(2024, i as u32 + 1));
        match point.month.month {
            2 => assert_eq!((point.income, point.expense, point.net), (500.0, 200.0, 300.0)),
            6 => assert_eq!((point.income, point.expense, point.net), (100.0, 0.0, 100.0)),
            _ => assert_eq!((point.income, point.expense, point.net), (0.0, 0.0, 0.0)),
        }
    }
}

#[test]
fn test_monthly_series_spans_calendar_years() {
    let txs = vec![
        tx("2024-07-01", Expense, 10.0, None),
        tx("2025-06-30", Income, 40.0, None),
        // 财年之外
        tx("2025-07-01", Income, 999.0, None),
        tx("2024-06-30", Income, 999.0, None),
    ];
    let series = monthly_series(MonthKey::new(2024, 7), &txs);
    assert_eq!(series.first().map(|p| p.month), Some(MonthKey::new(2024, 7)));
    assert_eq!(series.last().map(|p| p.month), Some(MonthKey::new(2025, 6)));
    assert_eq!(series[0].expense, 10.0);
    assert_eq!(series[11].income, 40.0);
    let total: f64 = series.iter().map(|p| p.income + p.expense).sum();
    assert_eq!(total, 50.0);
}

#[test]
fn test_monthly_series_empty_input() {
    let series = monthly_series(MonthKey::new(2023, 4), &[]);
    assert_eq!(series.len(), 12);
    assert!(series.iter().all(|p| p.net == 0.0));
}

// =========================================================
// 分类排行
// =========================================================

#[test]
fn test_category_breakdown_rules() {
    let mut txs = vec![
        tx("2024-01-05", Income, 1000.0, Some("Sales")),
        tx("2024-01-06", Expense, 50.0, None),
        tx("2024-01-07", Expense, 25.0, None),
    ];
    for (i, name) in ["Rent", "Salaries", "Fuel", "Food", "Travel", "Office", "Misc"]
        .iter()
        .enumerate()
    {
        txs.push(tx("2024-02-01", Expense, 100.0 * (i as f64 + 1.0), Some(name)));
    }

    let breakdown = category_breakdown(&txs, &[]);
    assert_eq!(breakdown.len(), TOP_CATEGORIES);
    let names: Vec<&str> = breakdown.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Misc", "Office", "Travel", "Food", "Fuel", "Salaries"]);
    assert!(breakdown.windows(2).all(|w| w[0].expense >= w[1].expense));
    // 只有收入的分类不出现
    assert!(!names.contains(&"Sales"));
}

#[test]
fn test_uncategorized_label_and_lookup() {
    let categories: Vec<Category> = serde_json::from_value(json!([
        {"id": "c-1", "name": "Utilities", "transaction_type": "expense", "color": "#ff0000", "is_active": true}
    ]))
    .unwrap();
    let mut by_id = tx("2024-03-01", Expense, 30.0, None);
    by_id.category_id = Some("c-1".to_string());
    let txs = vec![
        by_id,
        tx("2024-03-02", Expense, 70.0, None),
        tx("2024-03-03", Income, 5.0, None),
    ];

    let breakdown = category_breakdown(&txs, &categories);
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].name, UNCATEGORIZED_LABEL);
    assert_eq!((breakdown[0].income, breakdown[0].expense), (5.0, 70.0));
    assert_eq!(breakdown[1].name, "Utilities");
    assert_eq!(breakdown[1].color.as_deref(), Some("#ff0000"));
}

// =========================================================
// 并行加载
// =========================================================

fn seeded_backend() -> MockBackend {
    let backend = MockBackend::new();
    backend.seed(
        "/fiscal-years",
        json!([{
            "id": "fy-2024",
            "year_name": "FY 2024",
            "start_date": "2024-01-01",
            "end_date": "2024-12-31",
            "status": "open",
            "is_current": true,
            "total_income": "600.00",
            "total_expense": "200.00",
            "net_balance": "400.00",
            "active_accounts_count": 2,
            "total_transactions_count": 3
        }]),
    );
    backend.seed(
        "/accounts",
        json!([
            {"id": "a-1", "name": "Till", "account_type": "cash", "opening_balance": 0, "current_balance": "150.50", "is_active": true},
            {"id": "a-2", "name": "Main bank", "account_type": "bank", "opening_balance": 0, "current_balance": 249.5, "is_active": true}
        ]),
    );
    backend.seed(
        "/transactions",
        json!([
            {"id": "t-1", "account_id": "a-1", "transaction_type": "income", "amount": "500", "transaction_date": "2024-02-10", "category_name": "Sales"},
            {"id": "t-2", "account_id": "a-1", "transaction_type": "expense", "amount": 200, "transaction_date": "2024-02-20", "category_id": "c-1"},
            {"id": "t-3", "account_id": "a-2", "transaction_type": "income", "amount": 100, "transaction_date": "2024-06-01"}
        ]),
    );
    backend.seed(
        "/categories",
        json!([{"id": "c-1", "name": "Rent", "transaction_type": "expense", "is_active": true}]),
    );
    backend
}

fn fiscal_year() -> FiscalYear {
    serde_json::from_value(json!({
        "id": "fy-2024",
        "year_name": "FY 2024",
        "start_date": "2024-01-01",
        "end_date": "2024-12-31",
        "status": "open",
        "is_current": true
    }))
    .unwrap()
}

async fn signed_in(backend: MockBackend) -> ApiClient<MockBackend> {
    let client = test_client(backend);
    client
        .login(&Credentials {
            email: TEST_EMAIL.to_string(),
            password: TEST_PASSWORD.to_string(),
        })
        .await
        .unwrap();
    client
}

#[tokio::test]
async fn test_load_dashboard_joins_all_sources() {
    let client = signed_in(seeded_backend()).await;
    let data = load_dashboard(&client, &fiscal_year(), 1000).await.unwrap();

    assert_eq!(data.summary.net_balance, 400.0);
    assert_eq!(data.summary.total_balance, 400.0);
    assert_eq!(data.monthly[1].net, 300.0);
    assert_eq!(data.categories.len(), 1);
    assert_eq!(data.categories[0].name, "Rent");
    assert_eq!(
        data.accounts.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
        ["Till", "Main bank"]
    );
    assert_eq!(data.recent.first().map(|t| t.id.as_str()), Some("t-3"));

    let urls: Vec<String> = client
        .transport()
        .requests()
        .into_iter()
        .map(|(url, ..)| url)
        .collect();
    assert!(urls.iter().any(|u| u.ends_with(
        "/transactions/?start_date=2024-01-01&end_date=2024-12-31&skip=0&limit=1000"
    )));
}

#[tokio::test]
async fn test_dashboard_reads_every_page() {
    let backend = seeded_backend();
    let filler: Vec<serde_json::Value> = (0..120)
        .map(|i| json!({"id": format!("f-{i}"), "name": format!("Filler {i}"), "transaction_type": "expense", "is_active": true}))
        .collect();
    backend.seed("/categories", serde_json::Value::Array(filler));
    backend.seed(
        "/categories",
        json!([{"id": "c-late", "name": "Freight", "transaction_type": "expense", "color": "#00ff00", "is_active": true}]),
    );
    let rows: Vec<serde_json::Value> = (0..1200)
        .map(|i| {
            json!({
                "id": format!("bulk-{i}"),
                "account_id": "a-1",
                "transaction_type": "expense",
                "amount": 1,
                "transaction_date": format!("2024-{:02}-15", i % 12 + 1),
                "category_id": "c-late"
            })
        })
        .collect();
    backend.seed("/transactions", serde_json::Value::Array(rows));

    let client = signed_in(backend).await;
    let data = load_dashboard(&client, &fiscal_year(), 100).await.unwrap();

    let expense: f64 = data.monthly.iter().map(|p| p.expense).sum();
    let income: f64 = data.monthly.iter().map(|p| p.income).sum();
    assert_eq!(expense, 1400.0);
    assert_eq!(income, 600.0);
    assert_eq!(data.categories[0].name, "Freight");
    assert_eq!(data.categories[0].expense, 1200.0);
    assert_eq!(data.categories[0].color.as_deref(), Some("#00ff00"));
    assert!(data.categories.iter().all(|c| c.name != UNCATEGORIZED_LABEL));

    let transaction_pages = client
        .transport()
        .requests()
        .into_iter()
        .filter(|(url, ..)| url.contains("/transactions/"))
        .count();
    // 1203 行，每页 100：12 个满页加 1 个短页
    assert_eq!(transaction_pages, 13);
}

#[tokio::test]
async fn test_any_failure_aborts_dashboard() {
    let backend = seeded_backend();
    backend.fail_next("/accounts/", 500, "database unavailable");
    let client = signed_in(backend).await;
    let err = load_dashboard(&client, &fiscal_year(), 1000).await.unwrap_err();
    assert_eq!(err.user_message("Failed to load dashboard"), "database unavailable");
}
