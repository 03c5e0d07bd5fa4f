use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::protocol::{QueryParams, Resource};
use crate::serde_helper;

/// 生成 `as_str` / `label` / `parse` / `ALL` 的审计枚举
macro_rules! audit_enum {
    ($name:ident { $($variant:ident => $wire:literal, $label:literal;)+ }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.as_str() == s)
            }
        }
    };
}

audit_enum!(ActivityType {
    Login => "LOGIN", "Login";
    Logout => "LOGOUT", "Logout";
    Register => "REGISTER", "Register";
    Create => "CREATE", "Create";
    Update => "UPDATE", "Update";
    Delete => "DELETE", "Delete";
    View => "VIEW", "View";
    Export => "EXPORT", "Export";
    Import => "IMPORT", "Import";
    SettingsChange => "SETTINGS_CHANGE", "Settings Change";
});

audit_enum!(ActivityEntity {
    User => "USER", "User";
    Tenant => "TENANT", "Tenant";
    Account => "ACCOUNT", "Account";
    Category => "CATEGORY", "Category";
    Transaction => "TRANSACTION", "Transaction";
    Partner => "PARTNER", "Partner";
    FinancialYear => "FINANCIAL_YEAR", "Financial Year";
    Settings => "SETTINGS", "Settings";
    Invoice => "INVOICE", "Invoice";
    InvoicePayment => "INVOICE_PAYMENT", "Invoice Payment";
    RecurringInvoice => "RECURRING_INVOICE", "Recurring Invoice";
});

/// 审计日志（只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: String,
    pub activity_type: ActivityType,
    pub entity_type: ActivityEntity,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub entity_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(deserialize_with = "serde_helper::timestamp")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityFilter {
    pub activity_type: Option<ActivityType>,
    pub entity_type: Option<ActivityEntity>,
    pub limit: Option<u32>,
}

impl QueryParams for ActivityFilter {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(t) = self.activity_type {
            pairs.push(("activity_type", t.as_str().to_string()));
        }
        if let Some(e) = self.entity_type {
            pairs.push(("entity_type", e.as_str().to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

impl Resource for ActivityLog {
    type Filter = ActivityFilter;
    const COLLECTION: &'static str = "/activity-logs";
    const LABEL: &'static str = "activity log";

    fn id(&self) -> &str {
        &self.id
    }
}
