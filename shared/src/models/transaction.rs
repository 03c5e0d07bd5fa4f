use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::protocol::{Editable, QueryParams, Resource};
use crate::serde_helper;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

/// 单式记账的一笔收支
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    #[serde(default)]
    pub category_id: Option<String>,
    /// 部分接口会直接带上分类名
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub partner_id: Option<String>,
    pub transaction_type: TransactionType,
    #[serde(deserialize_with = "serde_helper::number")]
    pub amount: f64,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reference_number: Option<String>,
}

/// 新建与修改共用的请求体；修改时服务器忽略 `transaction_type`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    pub account_id: String,
    pub category_id: Option<String>,
    pub partner_id: Option<String>,
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub transaction_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub reference_number: Option<String>,
}

impl TransactionDraft {
    pub fn new(transaction_type: TransactionType, transaction_date: Option<NaiveDate>) -> Self {
        Self {
            account_id: String::new(),
            category_id: None,
            partner_id: None,
            transaction_type,
            amount: 0.0,
            transaction_date,
            description: None,
            reference_number: None,
        }
    }
}

impl From<&Transaction> for TransactionDraft {
    fn from(t: &Transaction) -> Self {
        Self {
            account_id: t.account_id.clone(),
            category_id: t.category_id.clone(),
            partner_id: t.partner_id.clone(),
            transaction_type: t.transaction_type,
            amount: t.amount,
            transaction_date: Some(t.transaction_date),
            description: t.description.clone(),
            reference_number: t.reference_number.clone(),
        }
    }
}

/// 交易列表的服务端过滤条件
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl QueryParams for TransactionFilter {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(d) = self.start_date {
            pairs.push(("start_date", d.format("%Y-%m-%d").to_string()));
        }
        if let Some(d) = self.end_date {
            pairs.push(("end_date", d.format("%Y-%m-%d").to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

impl Resource for Transaction {
    type Filter = TransactionFilter;
    const COLLECTION: &'static str = "/transactions";
    const LABEL: &'static str = "transaction";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Editable for Transaction {
    type Draft = TransactionDraft;
}
