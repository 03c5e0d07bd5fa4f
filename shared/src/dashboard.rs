//! 仪表盘聚合
//!
//! 每次加载都从原始交易列表完整重算，不做任何缓存：
//! - 月度序列：从财年起始月开始的 12 个自然月，空月份补零
//! - 分类排行：按支出降序的前 6 个分类，支出为零的分类不计入
//! - 账户余额：按列表接口返回的顺序投影

use std::collections::HashMap;

use crate::client::ApiClient;
use crate::date::MonthKey;
use crate::error::ApiResult;
use crate::models::{
    Account, AccountType, Category, FiscalYear, FiscalYearDetail, FiscalYearSummary,
    Transaction, TransactionFilter, TransactionType,
};
use crate::protocol::NoFilter;
use crate::transport::Transport;
use crate::UNCATEGORIZED_LABEL;

pub const MONTHS_PER_YEAR: u32 = 12;
pub const TOP_CATEGORIES: usize = 6;
pub const RECENT_TRANSACTIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyPoint {
    pub month: MonthKey,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub color: Option<String>,
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountBalance {
    pub name: String,
    pub account_type: AccountType,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DashboardSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_balance: f64,
    pub total_balance: f64,
    pub active_accounts: u32,
    pub transaction_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub year: FiscalYearSummary,
    pub summary: DashboardSummary,
    pub monthly: Vec<MonthlyPoint>,
    pub categories: Vec<CategoryTotal>,
    pub accounts: Vec<AccountBalance>,
    pub recent: Vec<Transaction>,
}

fn split(tx: &Transaction) -> (f64, f64) {
    match tx.transaction_type {
        TransactionType::Income => (tx.amount, 0.0),
        TransactionType::Expense => (0.0, tx.amount),
    }
}

/// 月度收支序列，总是 12 项
pub fn monthly_series(start: MonthKey, transactions: &[Transaction]) -> Vec<MonthlyPoint> {
    let mut points: Vec<MonthlyPoint> = MonthKey::range(start, MONTHS_PER_YEAR)
        .map(|month| MonthlyPoint {
            month,
            income: 0.0,
            expense: 0.0,
            net: 0.0,
        })
        .collect();
    let index: HashMap<MonthKey, usize> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (p.month, i))
        .collect();

    for tx in transactions {
        // 财年之外的交易不计入
        let Some(&i) = index.get(&MonthKey::of(tx.transaction_date)) else {
            continue;
        };
        let (income, expense) = split(tx);
        points[i].income += income;
        points[i].expense += expense;
    }
    for p in &mut points {
        p.net = p.income - p.expense;
    }
    points
}

/// 分类支出排行
pub fn category_breakdown(transactions: &[Transaction], categories: &[Category]) -> Vec<CategoryTotal> {
    let by_id: HashMap<&str, &Category> = categories.iter().map(|c| (c.id.as_str(), c)).collect();

    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    for tx in transactions {
        let category = tx.category_id.as_deref().and_then(|id| by_id.get(id));
        let name = tx
            .category_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| category.map(|c| c.name.clone()))
            .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string());

        let slot = *slots.entry(name.clone()).or_insert_with(|| {
            totals.push(CategoryTotal {
                name,
                color: category.and_then(|c| c.color.clone()),
                income: 0.0,
                expense: 0.0,
            });
            totals.len() - 1
        });
        let (income, expense) = split(tx);
        totals[slot].income += income;
        totals[slot].expense += expense;
    }

    totals.retain(|t| t.expense > 0.0);
    // 稳定排序，支出相同时保持首次出现的顺序
    totals.sort_by(|a, b| b.expense.total_cmp(&a.expense));
    totals.truncate(TOP_CATEGORIES);
    totals
}

pub fn account_balances(accounts: &[Account]) -> Vec<AccountBalance> {
    accounts
        .iter()
        .map(|a| AccountBalance {
            name: a.name.clone(),
            account_type: a.account_type,
            balance: a.current_balance,
        })
        .collect()
}

pub fn summarize(year: &FiscalYearSummary, accounts: &[Account]) -> DashboardSummary {
    DashboardSummary {
        total_income: year.total_income,
        total_expense: year.total_expense,
        net_balance: year.net_balance,
        total_balance: accounts
            .iter()
            .filter(|a| a.is_active)
            .map(|a| a.current_balance)
            .sum(),
        active_accounts: year.active_accounts_count,
        transaction_count: year.total_transactions_count,
    }
}

/// 最近的几笔交易，按日期倒序
pub fn recent_transactions(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut recent = transactions.to_vec();
    recent.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
    recent.truncate(RECENT_TRANSACTIONS);
    recent
}

/// 并行拉取财年详情、账户、交易与分类，任一失败则整体失败
///
/// 账户、交易与分类都按 `page_size` 逐页读完，聚合总是基于完整列表。
pub async fn load_dashboard<T: Transport>(
    client: &ApiClient<T>,
    year: &FiscalYear,
    page_size: u32,
) -> ApiResult<DashboardData> {
    let detail = FiscalYearDetail {
        id: year.id.clone(),
    };
    let filter = TransactionFilter {
        start_date: Some(year.start_date),
        end_date: Some(year.end_date),
        ..TransactionFilter::default()
    };
    let (summary, accounts, transactions, categories) = futures::try_join!(
        client.send(&detail),
        client.list_all::<Account>(&NoFilter, page_size),
        client.list_all::<Transaction>(&filter, page_size),
        client.list_all::<Category>(&NoFilter, page_size),
    )?;
    log::debug!(
        "dashboard for {}: {} transactions, {} accounts",
        year.year_name,
        transactions.len(),
        accounts.len()
    );

    Ok(DashboardData {
        summary: summarize(&summary, &accounts),
        monthly: monthly_series(summary.year.start_month(), &transactions),
        categories: category_breakdown(&transactions, &categories),
        accounts: account_balances(&accounts),
        recent: recent_transactions(&transactions),
        year: summary,
    })
}

#[cfg(test)]
mod tests;
