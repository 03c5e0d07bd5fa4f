//! 测试工具
//!
//! - [`MockBackend`]: 有状态的内存后端，按 REST 约定处理集合的增删改查
//! - [`ManualScheduler`]: 手动推进的假时钟

use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::idle::Scheduler;
use crate::models::Credentials;
use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::{API_PREFIX, HEADER_AUTHORIZATION};

pub const TEST_BASE_URL: &str = "http://ledger.test";
pub const TEST_EMAIL: &str = "owner@acme.test";
pub const TEST_PASSWORD: &str = "correct horse";

pub fn test_client(backend: MockBackend) -> ApiClient<MockBackend> {
    ApiClient::new(backend, TEST_BASE_URL)
}

pub fn user_json() -> Value {
    json!({
        "id": "u-1",
        "tenant_id": "t-1",
        "name": "Owner",
        "email": TEST_EMAIL,
        "role": "admin",
        "is_active": true
    })
}

pub fn tenant_json() -> Value {
    json!({
        "id": "t-1",
        "company_name": "Acme Trading",
        "email": "billing@acme.test",
        "currency": "USD",
        "fiscal_year_start": "2024-01-01",
        "default_tax_rate": "15.00",
        "tax_label": "VAT"
    })
}

// =========================================================
// MockBackend
// =========================================================

type RecordedRequest = (String, String, BTreeMap<String, String>, Option<String>);

pub struct MockBackend {
    collections: RefCell<BTreeMap<String, Vec<Value>>>,
    // path -> (status, body)，持续生效
    responses: RefCell<HashMap<String, (u16, String)>>,
    // path -> (status, detail)，只生效一次
    failures: RefCell<HashMap<String, (u16, String)>>,
    tokens: RefCell<HashSet<String>>,
    tenant: RefCell<Value>,
    next_id: Cell<u32>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            collections: RefCell::new(BTreeMap::new()),
            responses: RefCell::new(HashMap::new()),
            failures: RefCell::new(HashMap::new()),
            tokens: RefCell::new(HashSet::new()),
            tenant: RefCell::new(tenant_json()),
            next_id: Cell::new(1),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// 预置集合数据，`collection` 形如 `/categories`
    pub fn seed(&self, collection: &str, records: Value) {
        let records = match records {
            Value::Array(items) => items,
            other => vec![other],
        };
        self.collections
            .borrow_mut()
            .entry(collection.trim_matches('/').to_string())
            .or_default()
            .extend(records);
    }

    /// 固定某个路径的响应
    pub fn mock_response(&self, path: &str, status: u16, body: Value) {
        self.responses
            .borrow_mut()
            .insert(path.to_string(), (status, body.to_string()));
    }

    /// 下一次访问 `path` 时返回错误
    pub fn fail_next(&self, path: &str, status: u16, detail: &str) {
        self.failures
            .borrow_mut()
            .insert(path.to_string(), (status, detail.to_string()));
    }

    /// 使所有已签发的令牌失效
    pub fn revoke_tokens(&self) {
        self.tokens.borrow_mut().clear();
    }

    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.collections
            .borrow()
            .get(collection.trim_matches('/'))
            .cloned()
            .unwrap_or_default()
    }

    /// (URL, Method, Headers, Body)
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    fn issue_token(&self) -> String {
        let n = self.next_id.get();
        self.next_id.set(n + 1);
        let token = format!("token-{n}");
        self.tokens.borrow_mut().insert(token.clone());
        token
    }

    fn authorized(&self, headers: &BTreeMap<String, String>) -> bool {
        headers
            .get(HEADER_AUTHORIZATION)
            .and_then(|h| h.strip_prefix("Bearer "))
            .is_some_and(|t| self.tokens.borrow().contains(t))
    }

    fn login(&self, body: Option<&str>) -> HttpResponse {
        let creds: Option<Credentials> = body.and_then(|b| serde_json::from_str(b).ok());
        match creds {
            Some(c) if c.email == TEST_EMAIL && c.password == TEST_PASSWORD => respond(
                200,
                json!({
                    "access_token": self.issue_token(),
                    "refresh_token": "refresh",
                    "token_type": "bearer",
                    "user": user_json(),
                    "tenant": self.tenant.borrow().clone(),
                }),
            ),
            _ => detail(401, "Incorrect email or password"),
        }
    }

    fn route(&self, method: &str, path: &str, query: &[(String, String)], body: Option<&str>) -> HttpResponse {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let body: Value = body
            .and_then(|b| serde_json::from_str(b).ok())
            .unwrap_or(Value::Null);

        match (method, segments.as_slice()) {
            ("PUT", ["auth", "tenant-settings"]) => {
                let mut tenant = self.tenant.borrow_mut();
                merge(&mut tenant, &body);
                respond(200, tenant.clone())
            }
            ("GET", [collection]) => {
                let records = self.records(collection);
                respond(200, Value::Array(filter_records(records, query)))
            }
            ("POST", [collection]) => {
                let mut record = body;
                let n = self.next_id.get();
                self.next_id.set(n + 1);
                if let Value::Object(map) = &mut record {
                    map.insert("id".to_string(), json!(format!("{collection}-{n}")));
                }
                self.collections
                    .borrow_mut()
                    .entry(collection.to_string())
                    .or_default()
                    .push(record.clone());
                respond(201, record)
            }
            ("GET", [collection, id]) => match self.find(collection, id) {
                Some(record) => respond(200, record),
                None => not_found(),
            },
            ("PUT", [collection, id]) => self.modify(collection, id, |record| merge(record, &body)),
            ("POST", ["invoices", id, "send"]) => self.send_invoice(id),
            ("POST", ["invoices", id, "cancel"]) => self.cancel_invoice(id),
            ("GET", ["invoices", id, "payments"]) => match self.find("invoices", id) {
                Some(_) => {
                    let payments = self
                        .records("invoice-payments")
                        .into_iter()
                        .filter(|p| p["invoice_id"] == json!(id))
                        .collect();
                    respond(200, Value::Array(payments))
                }
                None => detail(404, "Invoice not found"),
            },
            ("POST", ["invoices", id, "payments"]) => self.record_payment(id, body),
            ("POST", [collection, id, "activate"]) => {
                self.modify(collection, id, |record| merge(record, &json!({"is_active": true})))
            }
            ("DELETE", [collection, id]) => {
                let mut collections = self.collections.borrow_mut();
                let records = collections.entry(collection.to_string()).or_default();
                let before = records.len();
                records.retain(|r| r["id"] != json!(id));
                if records.len() == before {
                    not_found()
                } else {
                    HttpResponse {
                        status: 204,
                        body: String::new(),
                    }
                }
            }
            _ => not_found(),
        }
    }

    fn invoice_status(&self, id: &str) -> Option<String> {
        self.find("invoices", id)
            .and_then(|i| i["status"].as_str().map(str::to_string))
    }

    fn send_invoice(&self, id: &str) -> HttpResponse {
        match self.invoice_status(id).as_deref() {
            None => detail(404, "Invoice not found"),
            Some("draft") => self.modify("invoices", id, |i| merge(i, &json!({"status": "sent"}))),
            Some(other) => detail(400, &format!("Cannot send invoice with status: {other}")),
        }
    }

    fn cancel_invoice(&self, id: &str) -> HttpResponse {
        if self.invoice_status(id).is_none() {
            return detail(404, "Invoice not found");
        }
        let paid = self
            .records("invoice-payments")
            .iter()
            .any(|p| p["invoice_id"] == json!(id));
        if paid {
            return detail(400, "Cannot cancel invoice with existing payments");
        }
        self.modify("invoices", id, |i| merge(i, &json!({"status": "cancelled"})))
    }

    /// 记录收款并更新发票余额与状态
    fn record_payment(&self, id: &str, body: Value) -> HttpResponse {
        let Some(invoice) = self.find("invoices", id) else {
            return detail(404, "Invoice not found");
        };
        if invoice["status"] == json!("cancelled") {
            return detail(400, "Cannot record payment on cancelled invoice");
        }
        let amount = body["amount"].as_f64().unwrap_or(0.0);
        let total = invoice["total_amount"].as_f64().unwrap_or(0.0);
        let paid = invoice["total_paid"].as_f64().unwrap_or(0.0) + amount;
        let balance = total - paid;
        if balance < 0.0 {
            return detail(400, "Payment amount cannot exceed balance due");
        }

        let n = self.next_id.get();
        self.next_id.set(n + 1);
        let mut payment = body;
        merge(&mut payment, &json!({"id": format!("pay-{n}"), "invoice_id": id}));
        self.collections
            .borrow_mut()
            .entry("invoice-payments".to_string())
            .or_default()
            .push(payment.clone());

        let status = if balance == 0.0 { "paid" } else { "partially_paid" };
        let count = invoice["payments_count"].as_u64().unwrap_or(0) + 1;
        self.modify("invoices", id, |i| {
            merge(
                i,
                &json!({"total_paid": paid, "balance_due": balance, "status": status, "payments_count": count}),
            )
        });
        respond(201, payment)
    }

    fn find(&self, collection: &str, id: &str) -> Option<Value> {
        self.records(collection)
            .into_iter()
            .find(|r| r["id"] == json!(id))
    }

    fn modify(&self, collection: &str, id: &str, f: impl FnOnce(&mut Value)) -> HttpResponse {
        let mut collections = self.collections.borrow_mut();
        let record = collections
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|r| r["id"] == json!(id)));
        match record {
            Some(record) => {
                f(record);
                respond(200, record.clone())
            }
            None => not_found(),
        }
    }
}

fn respond(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        body: body.to_string(),
    }
}

fn detail(status: u16, message: &str) -> HttpResponse {
    respond(status, json!({ "detail": message }))
}

fn not_found() -> HttpResponse {
    detail(404, "Not found")
}

fn merge(target: &mut Value, patch: &Value) {
    if let (Value::Object(target), Value::Object(patch)) = (target, patch) {
        for (k, v) in patch {
            target.insert(k.clone(), v.clone());
        }
    }
}

fn as_plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 按查询参数过滤：`skip`/`limit` 分页，日期区间比较 `transaction_date`，其余参数按字段相等匹配
fn filter_records(records: Vec<Value>, query: &[(String, String)]) -> Vec<Value> {
    let mut skip = 0;
    let mut limit = None;
    let kept: Vec<Value> = records
        .into_iter()
        .filter(|record| {
            query.iter().all(|(key, value)| match key.as_str() {
                "skip" | "limit" => true,
                "start_date" => record["transaction_date"]
                    .as_str()
                    .is_none_or(|d| d >= value.as_str()),
                "end_date" => record["transaction_date"]
                    .as_str()
                    .is_none_or(|d| d <= value.as_str()),
                field => record.get(field).is_none_or(|v| as_plain(v) == *value),
            })
        })
        .collect();
    for (key, value) in query {
        match key.as_str() {
            "skip" => skip = value.parse::<usize>().unwrap_or(0),
            "limit" => limit = value.parse::<usize>().ok(),
            _ => {}
        }
    }
    kept.into_iter()
        .skip(skip)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

#[async_trait::async_trait(?Send)]
impl Transport for MockBackend {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let method = req.method.as_str();
        self.requests.borrow_mut().push((
            req.url.clone(),
            method.to_string(),
            req.headers.clone(),
            req.body.clone(),
        ));

        let parsed = url::Url::parse(&req.url).map_err(|e| ApiError::Network(e.to_string()))?;
        let path = parsed
            .path()
            .strip_prefix(API_PREFIX)
            .unwrap_or(parsed.path())
            .to_string();
        let query: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();

        if let Some((status, message)) = self.failures.borrow_mut().remove(&path) {
            return Ok(detail(status, &message));
        }
        if let Some((status, body)) = self.responses.borrow().get(&path) {
            return Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            });
        }
        if path == "/auth/login" {
            return Ok(self.login(req.body.as_deref()));
        }
        if !self.authorized(&req.headers) {
            return Ok(detail(401, "Could not validate credentials"));
        }
        if path == "/auth/logout" {
            return Ok(respond(200, json!({ "message": "Logged out" })));
        }
        Ok(self.route(method, &path, &query, req.body.as_deref()))
    }
}

// =========================================================
// ManualScheduler
// =========================================================

type Callback = Box<dyn FnOnce()>;

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<u64, (Duration, Callback)>,
}

/// 手动推进的调度器，克隆共享同一个时钟
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().timers.len()
    }

    /// 推进时钟，按截止时间顺序执行到期的回调
    pub fn advance(&self, by: Duration) {
        let target = self.clock.borrow().now + by;
        loop {
            let due = {
                let mut clock = self.clock.borrow_mut();
                let next = clock
                    .timers
                    .iter()
                    .filter(|(_, (deadline, _))| *deadline <= target)
                    .min_by_key(|(id, (deadline, _))| (*deadline, **id))
                    .map(|(id, _)| *id);
                next.and_then(|id| clock.timers.remove(&id)).map(|(deadline, cb)| {
                    clock.now = deadline;
                    cb
                })
            };
            // 回调可能重新调度，必须先释放借用
            match due {
                Some(cb) => cb(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u64;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> u64 {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let deadline = clock.now + delay;
        clock.timers.insert(id, (deadline, callback));
        id
    }

    fn cancel(&self, handle: u64) {
        self.clock.borrow_mut().timers.remove(&handle);
    }
}
