use serde::Deserialize;
use thiserror::Error;

// =========================================================
// API 错误
// =========================================================

/// API 调用错误
///
/// 每种错误最终都会在页面边界转换为用户可见的文本，不会继续向上传播。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 请求未能到达服务器（断网、CORS、DNS 等）
    #[error("network error: {0}")]
    Network(String),
    /// 已认证请求被拒绝 (401)，会话必须结束
    #[error("session expired: {detail}")]
    Unauthorized { detail: String },
    /// 服务器返回了非 2xx 状态
    #[error("request failed ({status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },
    /// 响应体无法解析
    #[error("unexpected response: {0}")]
    Decode(String),
    /// 请求体无法序列化
    #[error("invalid request: {0}")]
    Encode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 根据状态码和响应体构造错误，优先使用服务器提供的 `detail`
    pub fn from_status(status: u16, body: &str, authenticated: bool) -> Self {
        let detail = extract_detail(body);
        if status == 401 && authenticated {
            return ApiError::Unauthorized {
                detail: detail.unwrap_or_else(|| "Not authenticated".to_string()),
            };
        }
        ApiError::Rejected { status, detail }
    }

    /// 会话令牌已失效，调用方应登出
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// 服务器提供的错误说明
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail } => Some(detail),
            ApiError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// 用户可见的错误文本：有服务器说明就用它，否则用调用方给出的通用文本
    pub fn user_message(&self, fallback: &str) -> String {
        match self.detail() {
            Some(detail) if !detail.trim().is_empty() => detail.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// FastAPI 错误负载：`{"detail": "..."}` 或 `{"detail": [{"msg": "...", "loc": [...]}]}`
#[derive(Deserialize)]
struct ErrorPayload {
    detail: DetailPayload,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DetailPayload {
    Message(String),
    Items(Vec<DetailItem>),
}

#[derive(Deserialize)]
struct DetailItem {
    msg: String,
    #[serde(default)]
    loc: Vec<serde_json::Value>,
}

impl DetailItem {
    fn render(&self) -> String {
        // loc 的最后一段才是字段名，前面是 "body" 之类的位置
        match self.loc.last().and_then(|v| v.as_str()) {
            Some(field) => format!("{field}: {}", self.msg),
            None => self.msg.clone(),
        }
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let payload: ErrorPayload = serde_json::from_str(body).ok()?;
    match payload.detail {
        DetailPayload::Message(msg) => Some(msg),
        DetailPayload::Items(items) if !items.is_empty() => Some(
            items
                .iter()
                .map(DetailItem::render)
                .collect::<Vec<_>>()
                .join("; "),
        ),
        DetailPayload::Items(_) => None,
    }
}

// =========================================================
// 表单校验错误
// =========================================================

/// 客户端校验失败，在发出任何网络请求之前阻止提交
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// 出错的表单字段
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

// =========================================================
// 保存失败
// =========================================================

/// 表单保存失败：本地校验未通过，或服务器拒绝
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaveError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SaveError {
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            SaveError::Invalid(e) => e.message.clone(),
            SaveError::Api(e) => e.user_message(fallback),
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, SaveError::Api(e) if e.is_session_expired())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail() {
        let err = ApiError::from_status(400, r#"{"detail":"Category already exists"}"#, true);
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 400,
                detail: Some("Category already exists".to_string())
            }
        );
        assert_eq!(err.user_message("Failed to save"), "Category already exists");
    }

    #[test]
    fn test_validation_detail_list() {
        let body = r#"{"detail":[{"loc":["body","rate"],"msg":"ensure this value is less than or equal to 100","type":"x"}]}"#;
        let err = ApiError::from_status(422, body, true);
        assert_eq!(
            err.detail(),
            Some("rate: ensure this value is less than or equal to 100")
        );
    }

    #[test]
    fn test_fallback_when_body_is_not_json() {
        let err = ApiError::from_status(500, "Internal Server Error", true);
        assert_eq!(err.user_message("Failed to load partners"), "Failed to load partners");
        assert_eq!(
            ApiError::Network("offline".into()).user_message("Failed"),
            "Failed"
        );
    }

    #[test]
    fn test_unauthorized_only_for_authenticated_requests() {
        let body = r#"{"detail":"Incorrect email or password"}"#;
        assert!(ApiError::from_status(401, body, true).is_session_expired());
        let login = ApiError::from_status(401, body, false);
        assert!(!login.is_session_expired());
        assert_eq!(login.user_message("x"), "Incorrect email or password");
    }
}
