use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::MonthKey;
use crate::protocol::{ApiRequest, HttpMethod, NoFilter, Resource};
use crate::serde_helper;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiscalYearStatus {
    Open,
    Closed,
}

/// 财年
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalYear {
    pub id: String,
    pub year_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: FiscalYearStatus,
    pub is_current: bool,
}

impl FiscalYear {
    pub fn start_month(&self) -> MonthKey {
        MonthKey::of(self.start_date)
    }

    pub fn is_closed(&self) -> bool {
        self.status == FiscalYearStatus::Closed
    }
}

impl Resource for FiscalYear {
    type Filter = NoFilter;
    const COLLECTION: &'static str = "/fiscal-years";
    const LABEL: &'static str = "fiscal year";

    fn id(&self) -> &str {
        &self.id
    }
}

/// 带统计数据的财年详情 (`GET /fiscal-years/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalYearSummary {
    #[serde(flatten)]
    pub year: FiscalYear,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_income: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_expense: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub net_balance: f64,
    #[serde(default)]
    pub active_accounts_count: u32,
    #[serde(default)]
    pub total_transactions_count: u32,
}

/// 获取财年详情
#[derive(Debug, Clone)]
pub struct FiscalYearDetail {
    pub id: String,
}

impl ApiRequest for FiscalYearDetail {
    type Response = FiscalYearSummary;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}/{}", FiscalYear::COLLECTION, self.id)
    }
}
