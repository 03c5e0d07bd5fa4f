//! 财年报表
//!
//! 四种报表共用一个入口，页面按标签切换种类、跟随顶栏切换财年。

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{
    BalanceSheet, CashFlowStatement, IncomeStatement, ReportRequest, TrialBalance,
};
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReportKind {
    #[default]
    IncomeStatement,
    BalanceSheet,
    CashFlow,
    TrialBalance,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::IncomeStatement,
        ReportKind::BalanceSheet,
        ReportKind::CashFlow,
        ReportKind::TrialBalance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::IncomeStatement => "Income Statement",
            ReportKind::BalanceSheet => "Balance Sheet",
            ReportKind::CashFlow => "Cash Flow",
            ReportKind::TrialBalance => "Trial Balance",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    IncomeStatement(IncomeStatement),
    BalanceSheet(BalanceSheet),
    CashFlow(CashFlowStatement),
    TrialBalance(TrialBalance),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::IncomeStatement(_) => ReportKind::IncomeStatement,
            Report::BalanceSheet(_) => ReportKind::BalanceSheet,
            Report::CashFlow(_) => ReportKind::CashFlow,
            Report::TrialBalance(_) => ReportKind::TrialBalance,
        }
    }

    pub fn year_name(&self) -> &str {
        match self {
            Report::IncomeStatement(r) => &r.year_name,
            Report::BalanceSheet(r) => &r.year_name,
            Report::CashFlow(r) => &r.year_name,
            Report::TrialBalance(r) => &r.year_name,
        }
    }
}

pub async fn load_report<T: Transport>(
    client: &ApiClient<T>,
    kind: ReportKind,
    year_id: &str,
) -> ApiResult<Report> {
    let report = match kind {
        ReportKind::IncomeStatement => Report::IncomeStatement(
            client.send(&ReportRequest::<IncomeStatement>::new(year_id)).await?,
        ),
        ReportKind::BalanceSheet => {
            Report::BalanceSheet(client.send(&ReportRequest::<BalanceSheet>::new(year_id)).await?)
        }
        ReportKind::CashFlow => {
            Report::CashFlow(client.send(&ReportRequest::<CashFlowStatement>::new(year_id)).await?)
        }
        ReportKind::TrialBalance => {
            Report::TrialBalance(client.send(&ReportRequest::<TrialBalance>::new(year_id)).await?)
        }
    };
    log::debug!("loaded {} for {}", kind.label(), report.year_name());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiRequest;
    use crate::models::Credentials;
    use crate::testing::{MockBackend, TEST_EMAIL, TEST_PASSWORD, test_client};
    use serde_json::json;

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

    #[test]
    fn test_report_paths() {
        assert_eq!(
            ReportRequest::<CashFlowStatement>::new("fy-1").path(),
            "/reports/cash-flow/fy-1"
        );
        assert_eq!(
            ReportRequest::<TrialBalance>::new("fy-1").path(),
            "/reports/trial-balance/fy-1"
        );
        assert_eq!(
            ReportRequest::<IncomeStatement>::new("fy-1").path(),
            "/reports/income-statement/fy-1"
        );
        assert_eq!(
            ReportRequest::<BalanceSheet>::new("fy-1").path(),
            "/reports/balance-sheet/fy-1"
        );
    }

    #[tokio::test]
    async fn test_income_statement_accepts_decimal_strings() {
        let backend = MockBackend::new();
        backend.mock_response(
            "/reports/income-statement/fy-2024",
            200,
            json!({
                "financial_year_id": "fy-2024",
                "year_name": "FY 2024",
                "period_start": "2024-01-01",
                "period_end": "2024-12-31",
                "income_items": [{"category_name": "Sales", "amount": "600.00", "percentage": 100.0}],
                "expense_items": [
                    {"category_name": "Rent", "amount": "150.00", "percentage": 75.0},
                    {"category_name": "Fuel", "amount": "50.00", "percentage": 25.0}
                ],
                "total_income": "600.00",
                "total_expense": "200.00",
                "net_profit_loss": "400.00",
                "profit_margin_percentage": 66.67
            }),
        );
        let client = signed_in(backend).await;

        let report = load_report(&client, ReportKind::IncomeStatement, "fy-2024").await.unwrap();
        assert_eq!(report.kind(), ReportKind::IncomeStatement);
        let Report::IncomeStatement(statement) = report else {
            panic!("wrong report kind");
        };
        assert_eq!(statement.net_profit_loss, 400.0);
        assert_eq!(statement.expense_items[0].category_name, "Rent");
        assert_eq!(statement.expense_items[1].amount, 50.0);
    }

    #[tokio::test]
    async fn test_trial_balance_flags_imbalance() {
        let backend = MockBackend::new();
        backend.mock_response(
            "/reports/trial-balance/fy-2024",
            200,
            json!({
                "financial_year_id": "fy-2024",
                "year_name": "FY 2024",
                "as_of_date": "2024-12-31",
                "accounts": [
                    {"account_name": "Main bank", "account_type": "bank", "debit": "900.00", "credit": "0"},
                    {"account_name": "Card", "account_type": "other", "debit": "0", "credit": "100.00"}
                ],
                "total_debit": "900.00",
                "total_credit": "100.00",
                "is_balanced": false
            }),
        );
        let client = signed_in(backend).await;

        let Report::TrialBalance(tb) = load_report(&client, ReportKind::TrialBalance, "fy-2024")
            .await
            .unwrap()
        else {
            panic!("wrong report kind");
        };
        assert!(!tb.is_balanced);
        assert_eq!(tb.accounts.len(), 2);
        assert_eq!(tb.accounts[1].credit, 100.0);
    }

    #[tokio::test]
    async fn test_unknown_year_surfaces_server_detail() {
        let backend = MockBackend::new();
        backend.fail_next("/reports/balance-sheet/missing", 404, "Financial year not found");
        let client = signed_in(backend).await;

        let err = load_report(&client, ReportKind::BalanceSheet, "missing").await.unwrap_err();
        assert_eq!(err.user_message("Failed to load report"), "Financial year not found");
    }
}
