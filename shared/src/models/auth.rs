use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::protocol::{ApiRequest, HttpMethod};
use crate::serde_helper;

/// 当前登录用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// 租户（公司）与其偏好设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub company_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub fiscal_year_start: Option<NaiveDate>,
    #[serde(default)]
    pub date_format: Option<String>,
    #[serde(default, deserialize_with = "serde_helper::optional_number")]
    pub default_tax_rate: Option<f64>,
    #[serde(default)]
    pub tax_label: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "USD".to_string()
}

/// 登录凭据 (`POST /auth/login`)，同时用于锁屏后的密码复核
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

// 避免密码出现在日志里
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl ApiRequest for Credentials {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }

    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        serde_json::to_string(self).map(Some)
    }
}

/// 登录响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: User,
    pub tenant: Tenant,
}

/// 注销 (`POST /auth/logout`)，响应体不关心
#[derive(Debug, Clone, Copy, Default)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/logout".to_string()
    }
}

/// 租户设置更新 (`PUT /auth/tenant-settings`)，未填写的字段不会发送
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TenantSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_tax_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_label: Option<String>,
}

impl From<&Tenant> for TenantSettingsUpdate {
    fn from(t: &Tenant) -> Self {
        Self {
            company_name: Some(t.company_name.clone()),
            phone: t.phone.clone(),
            address: t.address.clone(),
            currency: Some(t.currency.clone()),
            date_format: t.date_format.clone(),
            default_tax_rate: t.default_tax_rate,
            tax_label: t.tax_label.clone(),
        }
    }
}

impl ApiRequest for TenantSettingsUpdate {
    type Response = Tenant;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        "/auth/tenant-settings".to_string()
    }

    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        serde_json::to_string(self).map(Some)
    }
}
