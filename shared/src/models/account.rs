use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::protocol::{Editable, NoFilter, Resource};
use crate::serde_helper;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    #[default]
    Cash,
    Bank,
    MobileMoney,
    Other,
}

impl AccountType {
    pub const ALL: [AccountType; 4] = [
        AccountType::Cash,
        AccountType::Bank,
        AccountType::MobileMoney,
        AccountType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Cash => "cash",
            AccountType::Bank => "bank",
            AccountType::MobileMoney => "mobile_money",
            AccountType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Cash => "Cash",
            AccountType::Bank => "Bank",
            AccountType::MobileMoney => "Mobile Money",
            AccountType::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// 资金账户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub account_type: AccountType,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(deserialize_with = "serde_helper::number")]
    pub opening_balance: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub current_balance: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
    #[serde(default, deserialize_with = "serde_helper::optional_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

/// 创建/更新账户的请求体
///
/// 期初余额只在创建时生效，后端的更新接口会忽略它。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountDraft {
    pub name: String,
    pub account_type: AccountType,
    pub account_number: Option<String>,
    pub bank_name: Option<String>,
    pub opening_balance: f64,
    pub description: Option<String>,
    pub is_active: bool,
}

impl Default for AccountDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            account_type: AccountType::Cash,
            account_number: None,
            bank_name: None,
            opening_balance: 0.0,
            description: None,
            is_active: true,
        }
    }
}

impl From<&Account> for AccountDraft {
    fn from(a: &Account) -> Self {
        Self {
            name: a.name.clone(),
            account_type: a.account_type,
            account_number: a.account_number.clone(),
            bank_name: a.bank_name.clone(),
            opening_balance: a.opening_balance,
            description: a.description.clone(),
            is_active: a.is_active,
        }
    }
}

impl Resource for Account {
    type Filter = NoFilter;
    const COLLECTION: &'static str = "/accounts";
    const LABEL: &'static str = "account";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Editable for Account {
    type Draft = AccountDraft;
}
