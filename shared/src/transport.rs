use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

use crate::error::{ApiError, ApiResult};
use crate::protocol::HttpMethod;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 一次待发送的 HTTP 请求
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

/// 已读取完整响应体的 HTTP 响应
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 解析 JSON 响应体；204 之类的空响应按 `null` 处理，使 `()` 能够解析
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let body = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// 传输层
///
/// 浏览器端由 `fetch` 实现；测试中由内存后端实现。
/// UI 是单线程协作调度的，所以不要求 `Send`。
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// 发送请求。只有请求没能到达服务器时才返回 `Err`，非 2xx 状态作为正常响应返回。
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}
