//! 列表页通用状态
//!
//! 每个资源页面都是同一个模式：拉取列表 → 表格 → 弹窗编辑 → 确认删除 → 提示。
//! 这里只放与渲染无关的状态，异步调用由页面发起：
//!
//! ```text
//! let ticket = list.begin();
//! let result = client.list::<R>(filter).await;
//! list.complete(ticket, result, "Failed to load ...");   // 过期的响应会被丢弃
//! ```
//!
//! 任何修改成功后都整体重新拉取列表，不做本地合并。

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult, SaveError};
use crate::protocol::{ApiRequest, Editable, Resource};
use crate::transport::Transport;
use crate::validation::Validate;

// =========================================================
// 列表
// =========================================================

/// 一次列表请求的凭证；只有最新一次请求的结果会被接受
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    items: Vec<T>,
    loaded: bool,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 只在首次成功加载之前显示加载动画
    pub fn show_spinner(&self) -> bool {
        self.loading && !self.loaded
    }

    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket(self.generation)
    }

    /// 写入结果；凭证已过期时什么都不做并返回 `false`
    pub fn complete(&mut self, ticket: FetchTicket, result: ApiResult<Vec<T>>, fallback: &str) -> bool {
        if ticket.0 != self.generation {
            log::debug!("dropping stale list response #{}", ticket.0);
            return false;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.loaded = true;
                self.error = None;
            }
            Err(e) => self.error = Some(e.user_message(fallback)),
        }
        true
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// 客户端标签页过滤，`tab` 为 `None` 表示全部
pub fn filter_tab<T: Clone, K: PartialEq>(items: &[T], tab: Option<&K>, key: impl Fn(&T) -> K) -> Vec<T> {
    match tab {
        None => items.to_vec(),
        Some(tab) => items.iter().filter(|item| key(item) == *tab).cloned().collect(),
    }
}

pub fn count_where<T>(items: &[T], pred: impl Fn(&T) -> bool) -> usize {
    items.iter().filter(|item| pred(item)).count()
}

// =========================================================
// 确认对话框
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation<A> {
    pub message: String,
    pub action: A,
}

/// 待确认的延迟操作
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmState<A> {
    pending: Option<Confirmation<A>>,
}

impl<A> Default for ConfirmState<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A> ConfirmState<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 打开对话框；已有待确认操作时会被替换
    pub fn request(&mut self, message: impl Into<String>, action: A) {
        self.pending = Some(Confirmation {
            message: message.into(),
            action,
        });
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.pending.as_ref().map(|c| c.message.as_str())
    }

    /// 确认，取出待执行的操作
    pub fn confirm(&mut self) -> Option<A> {
        self.pending.take().map(|c| c.action)
    }

    /// 取消，丢弃待执行的操作
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

// =========================================================
// 编辑弹窗
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(String),
}

/// 打开中的编辑弹窗；错误留在弹窗内，保存成功前不会关闭
#[derive(Debug, Clone, PartialEq)]
pub struct Editor<D> {
    pub mode: EditorMode,
    pub draft: D,
    pub error: Option<String>,
    pub saving: bool,
}

impl<D> Editor<D> {
    pub fn create(draft: D) -> Self {
        Self {
            mode: EditorMode::Create,
            draft,
            error: None,
            saving: false,
        }
    }

    pub fn edit(id: impl Into<String>, draft: D) -> Self {
        Self {
            mode: EditorMode::Edit(id.into()),
            draft,
            error: None,
            saving: false,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, EditorMode::Edit(_))
    }

    /// 弹窗标题，如 `New tax rate` / `Edit tax rate`
    pub fn title(&self, label: &str) -> String {
        match self.mode {
            EditorMode::Create => format!("New {label}"),
            EditorMode::Edit(_) => format!("Edit {label}"),
        }
    }

    pub fn begin_save(&mut self) {
        self.saving = true;
        self.error = None;
    }

    pub fn fail(&mut self, err: &SaveError, fallback: &str) {
        self.saving = false;
        self.error = Some(err.user_message(fallback));
    }
}

/// 校验后创建或更新；校验失败时不会发出请求
pub async fn save<T: Transport, R: Editable>(
    client: &ApiClient<T>,
    mode: &EditorMode,
    draft: &R::Draft,
) -> Result<R, SaveError> {
    draft.validate()?;
    let saved = match mode {
        EditorMode::Create => client.create::<R>(draft).await?,
        EditorMode::Edit(id) => client.update::<R>(id, draft).await?,
    };
    log::info!("saved {} {}", R::LABEL, saved.id());
    Ok(saved)
}

pub async fn remove<T: Transport, R: Resource>(client: &ApiClient<T>, id: &str) -> Result<(), ApiError> {
    client.delete::<R>(id).await?;
    log::info!("deleted {} {}", R::LABEL, id);
    Ok(())
}

/// 校验后发送一次性的表单请求，如库存调整与调拨
pub async fn submit<T: Transport, R: ApiRequest + Validate>(
    client: &ApiClient<T>,
    request: &R,
) -> Result<R::Response, SaveError> {
    request.validate()?;
    let response = client.send(request).await?;
    log::info!("submitted {}", request.path());
    Ok(response)
}

/// 成功提示文本
pub fn saved_message(label: &str, mode: &EditorMode) -> String {
    let verb = match mode {
        EditorMode::Create => "created",
        EditorMode::Edit(_) => "updated",
    };
    format!("{} {verb} successfully", capitalize(label))
}

pub fn deleted_message(label: &str) -> String {
    format!("{} deleted successfully", capitalize(label))
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests;
