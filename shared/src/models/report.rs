//! 财年报表 (`GET /reports/{kind}/{year_id}`)
//!
//! 报表全部由服务器按财年计算，客户端只负责展示。

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use crate::protocol::{ApiRequest, HttpMethod};
use crate::serde_helper;

/// 报表种类对应的路径段
pub trait Statement: DeserializeOwned {
    const SEGMENT: &'static str;
}

pub struct ReportRequest<S: Statement> {
    pub year_id: String,
    _marker: PhantomData<S>,
}

impl<S: Statement> ReportRequest<S> {
    pub fn new(year_id: impl Into<String>) -> Self {
        Self {
            year_id: year_id.into(),
            _marker: PhantomData,
        }
    }
}

impl<S: Statement> ApiRequest for ReportRequest<S> {
    type Response = S;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/reports/{}/{}", S::SEGMENT, self.year_id)
    }
}

// =========================================================
// 现金流量表
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowLine {
    pub category: String,
    #[serde(deserialize_with = "serde_helper::number")]
    pub amount: f64,
    pub percentage: f64,
}

/// 账户在某财年的期初、期末与收支
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountYearBalance {
    pub account_id: String,
    pub account_name: String,
    #[serde(deserialize_with = "serde_helper::number")]
    pub opening_balance: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub closing_balance: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_income: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_expense: f64,
    #[serde(default)]
    pub transaction_count: u32,
    #[serde(default)]
    pub is_final: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    pub year_name: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(deserialize_with = "serde_helper::number")]
    pub opening_cash_balance: f64,
    pub cash_inflows: Vec<CashFlowLine>,
    pub cash_outflows: Vec<CashFlowLine>,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_inflows: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_outflows: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub net_cash_flow: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub closing_cash_balance: f64,
    #[serde(default)]
    pub account_balances: Vec<AccountYearBalance>,
}

impl Statement for CashFlowStatement {
    const SEGMENT: &'static str = "cash-flow";
}

// =========================================================
// 试算平衡表
// =========================================================

/// 单式记账下正余额记借方，负余额记贷方
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceLine {
    pub account_name: String,
    pub account_type: String,
    #[serde(deserialize_with = "serde_helper::number")]
    pub debit: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub credit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub year_name: String,
    pub as_of_date: NaiveDate,
    pub accounts: Vec<TrialBalanceLine>,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_debit: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_credit: f64,
    pub is_balanced: bool,
}

impl Statement for TrialBalance {
    const SEGMENT: &'static str = "trial-balance";
}

// =========================================================
// 利润表
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatementLine {
    pub category_name: String,
    #[serde(deserialize_with = "serde_helper::number")]
    pub amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub year_name: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub income_items: Vec<IncomeStatementLine>,
    pub expense_items: Vec<IncomeStatementLine>,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_income: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_expense: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub net_profit_loss: f64,
    pub profit_margin_percentage: f64,
}

impl Statement for IncomeStatement {
    const SEGMENT: &'static str = "income-statement";
}

// =========================================================
// 资产负债表
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetLine {
    pub account_name: String,
    #[serde(deserialize_with = "serde_helper::number")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub year_name: String,
    pub as_of_date: NaiveDate,
    pub assets: Vec<BalanceSheetLine>,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_assets: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub retained_earnings: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub current_period_profit_loss: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_equity: f64,
}

impl Statement for BalanceSheet {
    const SEGMENT: &'static str = "balance-sheet";
}
