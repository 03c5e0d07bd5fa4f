//! API 客户端接入
//!
//! `ledger_shared::ApiClient` 负责协议，这里只提供基于 `fetch` 的传输层，
//! 并把客户端实例放进 Context。

use std::rc::Rc;

use ledger_shared::{ApiError, ApiResult, HttpRequest, HttpResponse, Transport};
use leptos::prelude::*;

use crate::web::HttpClient;

/// 浏览器 `fetch` 传输
#[derive(Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = HttpClient::request(&req.url, req.method);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

pub type Client = ledger_shared::ApiClient<FetchTransport>;

/// 全局唯一的 API 客户端
///
/// 客户端内部使用 `RefCell`，不满足 `Send`，所以存放在本地 arena 中。
#[derive(Clone, Copy)]
pub struct ApiContext {
    client: StoredValue<Rc<Client>, LocalStorage>,
}

impl ApiContext {
    pub fn new(base_url: &str) -> Self {
        let client = Client::new(FetchTransport, base_url);
        Self {
            client: StoredValue::new_local(Rc::new(client)),
        }
    }

    /// 取得客户端的共享引用，供异步任务持有
    pub fn client(&self) -> Rc<Client> {
        self.client.get_value()
    }
}

pub fn use_api() -> ApiContext {
    expect_context::<ApiContext>()
}
