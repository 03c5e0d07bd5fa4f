//! 强类型 API 客户端
//!
//! 所有请求都经由 [`ApiClient::send`]：拼接 URL、附加 Bearer 令牌、把非 2xx 状态映射为
//! [`ApiError`]。已认证请求收到 401 时会触发 `on_unauthorized` 回调，由会话层负责登出。

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{ApiError, ApiResult};
use crate::models::{AuthResponse, Credentials, LogoutRequest};
use crate::protocol::{
    Activatable, ActivateRequest, ApiRequest, CreateRequest, DeleteRequest, Editable,
    ListRequest, PageRequest, Resource, UpdateRequest,
};
use crate::transport::{HttpRequest, Transport};
use crate::{API_PREFIX, HEADER_AUTHORIZATION};

type UnauthorizedHook = Rc<dyn Fn()>;

pub struct ApiClient<T: Transport> {
    transport: T,
    base_url: String,
    token: RefCell<Option<String>>,
    on_unauthorized: RefCell<Option<UnauthorizedHook>>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RefCell::new(None),
            on_unauthorized: RefCell::new(None),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    /// 注册令牌被拒绝时的回调
    pub fn on_unauthorized(&self, hook: impl Fn() + 'static) {
        *self.on_unauthorized.borrow_mut() = Some(Rc::new(hook));
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// 发送一个类型化请求
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let path = req.path();
        let mut http = HttpRequest::new(self.url(&path), R::METHOD)
            .with_header("Accept", "application/json");

        if R::REQUIRES_AUTH {
            if let Some(token) = self.token() {
                http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {token}"));
            }
        }
        if let Some(body) = req.body().map_err(|e| ApiError::Encode(e.to_string()))? {
            http = http
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        log::debug!("{} {}", R::METHOD.as_str(), path);
        let response = self.transport.send(http).await.inspect_err(|e| {
            log::warn!("{} {} failed: {}", R::METHOD.as_str(), path, e);
        })?;

        if !response.ok() {
            let err = ApiError::from_status(response.status, &response.body, R::REQUIRES_AUTH);
            log::warn!("{} {} -> {}", R::METHOD.as_str(), path, err);
            if err.is_session_expired() {
                // 先取出回调再调用，回调里可能会重新注册
                let hook = self.on_unauthorized.borrow().clone();
                if let Some(hook) = hook {
                    hook();
                }
            }
            return Err(err);
        }
        response.json()
    }

    // =========================================================
    // 资源集合
    // =========================================================

    pub async fn list<R: Resource>(&self, filter: R::Filter) -> ApiResult<Vec<R>> {
        self.send(&ListRequest::<R>::new(filter)).await
    }

    /// 按 `skip`/`limit` 逐页读取整个集合，直到某一页不满 `page_size`
    pub async fn list_all<R: Resource>(&self, filter: &R::Filter, page_size: u32) -> ApiResult<Vec<R>> {
        let limit = page_size.max(1);
        let mut items: Vec<R> = Vec::new();
        loop {
            let skip = u32::try_from(items.len()).unwrap_or(u32::MAX);
            let page = self.send(&PageRequest::<R> { filter, skip, limit }).await?;
            let last = page.len() < limit as usize;
            items.extend(page);
            if last {
                return Ok(items);
            }
        }
    }

    pub async fn create<R: Editable>(&self, draft: &R::Draft) -> ApiResult<R> {
        self.send(&CreateRequest::<R> { draft }).await
    }

    pub async fn update<R: Editable>(&self, id: &str, draft: &R::Draft) -> ApiResult<R> {
        self.send(&UpdateRequest::<R> { id, draft }).await
    }

    pub async fn delete<R: Resource>(&self, id: &str) -> ApiResult<()> {
        self.send(&DeleteRequest::<R>::new(id)).await
    }

    pub async fn activate<R: Activatable>(&self, id: &str) -> ApiResult<R> {
        self.send(&ActivateRequest::<R>::new(id)).await
    }

    // =========================================================
    // 认证
    // =========================================================

    /// 登录并保存令牌
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        let auth = self.send(credentials).await?;
        self.set_token(Some(auth.access_token.clone()));
        Ok(auth)
    }

    /// 通知服务器注销并丢弃令牌；服务器端失败不影响本地登出
    pub async fn logout(&self) {
        if self.token().is_some() {
            if let Err(e) = self.send(&LogoutRequest).await {
                log::info!("logout request failed: {e}");
            }
        }
        self.set_token(None);
    }

    /// 导出文件的下载地址，令牌以查询参数传递
    pub fn export_url(&self, kind: ExportKind) -> Option<String> {
        let token = self.token()?;
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("token", &token)
            .finish();
        Some(format!("{}?{}", self.url(kind.path()), query))
    }
}

/// 可导出的数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    AccountsCsv,
    CategoriesCsv,
    TransactionsCsv,
    FullBackup,
}

impl ExportKind {
    pub const ALL: [ExportKind; 4] = [
        ExportKind::AccountsCsv,
        ExportKind::CategoriesCsv,
        ExportKind::TransactionsCsv,
        ExportKind::FullBackup,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            ExportKind::AccountsCsv => "/export/csv/accounts",
            ExportKind::CategoriesCsv => "/export/csv/categories",
            ExportKind::TransactionsCsv => "/export/csv/transactions",
            ExportKind::FullBackup => "/export/json/full-backup",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportKind::AccountsCsv => "Accounts (CSV)",
            ExportKind::CategoriesCsv => "Categories (CSV)",
            ExportKind::TransactionsCsv => "Transactions (CSV)",
            ExportKind::FullBackup => "Full backup (JSON)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryDraft, TransactionType};
    use crate::protocol::NoFilter;
    use crate::testing::{MockBackend, TEST_EMAIL, TEST_PASSWORD, test_client};
    use std::cell::Cell;

    fn credentials(password: &str) -> Credentials {
        Credentials {
            email: TEST_EMAIL.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_stores_token_and_attaches_bearer() {
        let client = test_client(MockBackend::new());
        let auth = client.login(&credentials(TEST_PASSWORD)).await.unwrap();
        assert_eq!(client.token(), Some(auth.access_token.clone()));

        client.list::<Category>(NoFilter).await.unwrap();
        let requests = client.transport().requests();
        let (url, method, headers, _) = requests.last().unwrap().clone();
        assert_eq!(url, "http://ledger.test/api/v1/categories/");
        assert_eq!(method, "GET");
        assert_eq!(
            headers.get(HEADER_AUTHORIZATION),
            Some(&format!("Bearer {}", auth.access_token))
        );
    }

    #[tokio::test]
    async fn test_wrong_password_does_not_trigger_logout_hook() {
        let client = test_client(MockBackend::new());
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        client.on_unauthorized(move || flag.set(true));

        let err = client.login(&credentials("nope")).await.unwrap_err();
        assert_eq!(err.detail(), Some("Incorrect email or password"));
        assert!(!fired.get());
        assert_eq!(client.token(), None);
    }

    #[tokio::test]
    async fn test_rejected_token_triggers_logout_hook() {
        let client = test_client(MockBackend::new());
        client.set_token(Some("stale".to_string()));
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        client.on_unauthorized(move || flag.set(true));

        let err = client.list::<Category>(NoFilter).await.unwrap_err();
        assert!(err.is_session_expired());
        assert!(fired.get());
    }

    #[tokio::test]
    async fn test_server_detail_is_surfaced() {
        let backend = MockBackend::new();
        backend.fail_next("/categories/", 400, "Category with this name already exists");
        let client = test_client(backend);
        client.login(&credentials(TEST_PASSWORD)).await.unwrap();

        let draft = CategoryDraft {
            name: "Rent".to_string(),
            transaction_type: TransactionType::Expense,
            ..CategoryDraft::default()
        };
        let err = client.create::<Category>(&draft).await.unwrap_err();
        assert_eq!(
            err.user_message("Failed to save category"),
            "Category with this name already exists"
        );
    }

    #[tokio::test]
    async fn test_logout_clears_token_even_if_server_fails() {
        let backend = MockBackend::new();
        backend.fail_next("/auth/logout", 500, "boom");
        let client = test_client(backend);
        client.login(&credentials(TEST_PASSWORD)).await.unwrap();
        client.logout().await;
        assert_eq!(client.token(), None);
        assert_eq!(client.export_url(ExportKind::FullBackup), None);
    }

    #[tokio::test]
    async fn test_list_all_walks_pages_until_short_page() {
        let backend = MockBackend::new();
        let categories: Vec<serde_json::Value> = (0..5)
            .map(|i| {
                serde_json::json!({
                    "id": format!("c-{i}"),
                    "name": format!("Category {i}"),
                    "transaction_type": "expense",
                    "is_active": true
                })
            })
            .collect();
        backend.seed("/categories", serde_json::Value::Array(categories));
        let client = test_client(backend);
        client.login(&credentials(TEST_PASSWORD)).await.unwrap();

        let all = client.list_all::<Category>(&NoFilter, 2).await.unwrap();
        assert_eq!(
            all.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            ["c-0", "c-1", "c-2", "c-3", "c-4"]
        );
        let pages: Vec<String> = client
            .transport()
            .requests()
            .into_iter()
            .map(|(url, ..)| url)
            .filter(|url| url.contains("/categories/"))
            .collect();
        assert_eq!(
            pages,
            [
                "http://ledger.test/api/v1/categories/?skip=0&limit=2",
                "http://ledger.test/api/v1/categories/?skip=2&limit=2",
                "http://ledger.test/api/v1/categories/?skip=4&limit=2",
            ]
        );
    }

    #[tokio::test]
    async fn test_list_all_stops_after_exact_multiple() {
        let backend = MockBackend::new();
        backend.seed(
            "/categories",
            serde_json::json!([
                {"id": "c-0", "name": "Rent", "transaction_type": "expense", "is_active": true},
                {"id": "c-1", "name": "Fuel", "transaction_type": "expense", "is_active": true}
            ]),
        );
        let client = test_client(backend);
        client.login(&credentials(TEST_PASSWORD)).await.unwrap();

        let all = client.list_all::<Category>(&NoFilter, 2).await.unwrap();
        assert_eq!(all.len(), 2);
        // 第二页为空即结束
        assert_eq!(client.transport().request_count(), 3);
    }

    #[tokio::test]
    async fn test_export_url_carries_token() {
        let client = test_client(MockBackend::new());
        client.set_token(Some("a b".to_string()));
        assert_eq!(
            client.export_url(ExportKind::AccountsCsv).as_deref(),
            Some("http://ledger.test/api/v1/export/csv/accounts?token=a+b")
        );
    }
}
