//! Ledger 客户端核心
//!
//! 与目标平台无关的部分都放在这里，前端 (wasm32) 与本地测试共用：
//! - `models`: 后端 REST 接口的数据模型
//! - `protocol`: 请求与响应的绑定关系
//! - `transport` / `client`: 传输抽象与强类型 API 客户端
//! - `session` / `idle`: 会话与空闲锁定状态机
//! - `dashboard`: 仪表盘聚合计算
//! - `reports`: 财年报表
//! - `crud`: 列表页通用状态（加载、确认删除、编辑弹窗）

pub mod client;
pub mod config;
pub mod crud;
pub mod dashboard;
pub mod date;
pub mod error;
pub mod fiscal;
pub mod idle;
pub mod models;
pub mod protocol;
pub mod reports;
pub mod serde_helper;
pub mod session;
pub mod transport;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ApiClient;
pub use config::AppConfig;
pub use error::{ApiError, ApiResult, SaveError, ValidationError};
pub use idle::{ActivityEvent, IdleMonitor, Scheduler};
pub use protocol::{ApiRequest, HttpMethod, Resource};
pub use session::{Session, SessionPhase};
pub use transport::{HttpRequest, HttpResponse, Transport};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 后端 API 版本前缀
pub const API_PREFIX: &str = "/api/v1";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 未分类交易在聚合中的标签
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

// 浏览器本地存储键
pub const STORAGE_TOKEN_KEY: &str = "ledger_token";
pub const STORAGE_SESSION_KEY: &str = "ledger_session";
pub const STORAGE_FISCAL_YEAR_KEY: &str = "ledger_fiscal_year";
