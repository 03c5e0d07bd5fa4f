//! 资源页面的公共部分
//!
//! [`ResourcePage`] 把 `ledger_shared::crud` 中与渲染无关的状态接到 signal 上：
//! 过滤条件变化即重新拉取，保存/删除/启用成功后提示并整体重新拉取。

use ledger_shared::crud::{
    self, ConfirmState, Editor, ListState, deleted_message, saved_message,
};
use ledger_shared::protocol::{Activatable, Editable, Resource};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::icons::{CircleAlert, Plus, RefreshCw};
use super::toast::{ToastContext, use_toast};
use crate::api::{ApiContext, use_api};

/// 可以放进 signal 的资源类型
pub trait PageResource: Resource<Filter: Send + Sync> + Send + Sync {}

impl<R> PageResource for R where R: Resource<Filter: Send + Sync> + Send + Sync {}

pub struct ResourcePage<R: PageResource> {
    pub list: RwSignal<ListState<R>>,
    pub filter: RwSignal<R::Filter>,
    /// 待确认删除的记录 id
    pub confirm: RwSignal<ConfirmState<String>>,
    api: ApiContext,
    toast: ToastContext,
}

impl<R: PageResource> Clone for ResourcePage<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: PageResource> Copy for ResourcePage<R> {}

impl<R: PageResource> ResourcePage<R> {
    /// 创建并立即拉取；之后每次过滤条件变化都重新拉取
    pub fn new(filter: R::Filter) -> Self {
        let page = Self {
            list: RwSignal::new(ListState::new()),
            filter: RwSignal::new(filter),
            confirm: RwSignal::new(ConfirmState::new()),
            api: use_api(),
            toast: use_toast(),
        };
        Effect::new(move |_| {
            page.filter.track();
            page.reload();
        });
        page
    }

    fn load_error() -> String {
        format!("Failed to load {} records", R::LABEL)
    }

    pub fn reload(&self) {
        let Some(ticket) = self.list.try_update(ListState::begin) else {
            return;
        };
        let filter = self.filter.get_untracked();
        let client = self.api.client();
        let list = self.list;
        spawn_local(async move {
            let result = client.list::<R>(filter).await;
            list.update(|l| {
                l.complete(ticket, result, &Self::load_error());
            });
        });
    }

    pub fn items(&self) -> Signal<Vec<R>> {
        let list = self.list;
        Signal::derive(move || list.with(|l| l.items().to_vec()))
    }

    pub fn error(&self) -> Signal<Option<String>> {
        let list = self.list;
        Signal::derive(move || list.with(|l| l.error().map(str::to_string)))
    }

    pub fn show_spinner(&self) -> Signal<bool> {
        let list = self.list;
        Signal::derive(move || list.with(ListState::show_spinner))
    }

    pub fn is_loading(&self) -> Signal<bool> {
        let list = self.list;
        Signal::derive(move || list.with(ListState::is_loading))
    }

    /// 按客户端标签页划分的可见列表，以及每个标签页的计数
    pub fn tabbed<K>(
        &self,
        active: RwSignal<Option<K>>,
        key: fn(&R) -> K,
    ) -> (Signal<Vec<R>>, Callback<Option<K>, usize>)
    where
        K: PartialEq + Send + Sync + 'static,
    {
        let list = self.list;
        let visible = Signal::derive(move || {
            active.with(|tab| list.with(|l| crud::filter_tab(l.items(), tab.as_ref(), key)))
        });
        let count = Callback::new(move |tab: Option<K>| {
            list.with(|l| match &tab {
                None => l.items().len(),
                Some(tab) => crud::count_where(l.items(), |item| key(item) == *tab),
            })
        });
        (visible, count)
    }

    /// 打开删除确认
    pub fn ask_delete(&self, id: String, name: &str) {
        self.confirm.update(|c| {
            c.request(
                format!("Are you sure you want to delete \"{name}\"? This cannot be undone."),
                id,
            )
        });
    }

    /// 确认后的删除
    pub fn delete(&self, id: String) {
        let client = self.api.client();
        let page = *self;
        spawn_local(async move {
            match crud::remove::<_, R>(&*client, &id).await {
                Ok(()) => {
                    page.toast.success(deleted_message(R::LABEL));
                    page.reload();
                }
                Err(e) => page
                    .toast
                    .error(e.user_message(&format!("Failed to delete {}", R::LABEL))),
            }
        });
    }
}

impl<R> ResourcePage<R>
where
    R: PageResource + Editable<Draft: Send + Sync>,
{
    /// 校验并保存编辑弹窗中的草稿；失败时错误留在弹窗内
    pub fn save(&self, editor: RwSignal<Option<Editor<R::Draft>>>) {
        let pending = editor
            .try_update(|e| {
                e.as_mut().filter(|e| !e.saving).map(|e| {
                    e.begin_save();
                    (e.mode.clone(), e.draft.clone())
                })
            })
            .flatten();
        let Some((mode, draft)) = pending else {
            return;
        };

        let client = self.api.client();
        let page = *self;
        spawn_local(async move {
            match crud::save::<_, R>(&*client, &mode, &draft).await {
                Ok(_) => {
                    editor.set(None);
                    page.toast.success(saved_message(R::LABEL, &mode));
                    page.reload();
                }
                Err(err) => editor.update(|e| {
                    if let Some(e) = e {
                        e.fail(&err, &format!("Failed to save {}", R::LABEL));
                    }
                }),
            }
        });
    }
}

impl<R> ResourcePage<R>
where
    R: PageResource + Activatable,
{
    pub fn activate(&self, id: String) {
        let client = self.api.client();
        let page = *self;
        spawn_local(async move {
            match client.activate::<R>(&id).await {
                Ok(_) => {
                    page.toast
                        .success(format!("{} activated", crud::capitalize(R::LABEL)));
                    page.reload();
                }
                Err(e) => page
                    .toast
                    .error(e.user_message(&format!("Failed to activate {}", R::LABEL))),
            }
        });
    }
}

/// 弹窗标题
pub fn editor_title<D: Send + Sync + 'static>(
    editor: RwSignal<Option<Editor<D>>>,
    label: &'static str,
) -> Signal<String> {
    Signal::derive(move || {
        editor.with(|e| e.as_ref().map(|e| e.title(label)).unwrap_or_default())
    })
}

pub fn editor_error<D: Send + Sync + 'static>(
    editor: RwSignal<Option<Editor<D>>>,
) -> Signal<Option<String>> {
    Signal::derive(move || editor.with(|e| e.as_ref().and_then(|e| e.error.clone())))
}

pub fn editor_saving<D: Send + Sync + 'static>(editor: RwSignal<Option<Editor<D>>>) -> Signal<bool> {
    Signal::derive(move || editor.with(|e| e.as_ref().is_some_and(|e| e.saving)))
}

// ============================================================================
// UI 组件
// ============================================================================

/// 页面标题栏：标题、说明、刷新与新建按钮
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(into)] subtitle: String,
    #[prop(into, default = Signal::stored(false))] loading: Signal<bool>,
    #[prop(into, optional)] on_refresh: Option<Callback<()>>,
    #[prop(into, optional)] on_create: Option<Callback<()>>,
    #[prop(into, optional)] create_label: String,
) -> impl IntoView {
    view! {
        <div class="flex flex-wrap items-center justify-between gap-4 mb-6">
            <div>
                <h1 class="text-2xl font-bold">{title}</h1>
                <p class="text-base-content/70 text-sm">{subtitle}</p>
            </div>
            <div class="flex gap-2">
                {on_refresh.map(|cb| view! {
                    <button class="btn btn-ghost btn-circle" disabled=move || loading.get() on:click=move |_| cb.run(())>
                        <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                    </button>
                })}
                {on_create.map(|cb| view! {
                    <button class="btn btn-primary gap-2" on:click=move |_| cb.run(())>
                        <Plus attr:class="h-4 w-4" /> {create_label.clone()}
                    </button>
                })}
            </div>
        </div>
    }
}

/// 页面级错误横幅
#[component]
pub fn ErrorBanner(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <div role="alert" class="alert alert-error mb-4">
                <CircleAlert attr:class="h-5 w-5" />
                <span>{move || error.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

/// 表格占位行：首次加载的转圈，或者空列表提示
#[component]
pub fn TableStatus(
    colspan: u32,
    #[prop(into)] spinner: Signal<bool>,
    #[prop(into)] empty: Signal<bool>,
    #[prop(into)] empty_text: String,
) -> impl IntoView {
    view! {
        <Show when=move || spinner.get()>
            <tr>
                <td colspan=colspan class="text-center py-8 text-base-content/50">
                    <span class="loading loading-spinner loading-md"></span>
                    " Loading..."
                </td>
            </tr>
        </Show>
        <Show when=move || !spinner.get() && empty.get()>
            <tr>
                <td colspan=colspan class="text-center py-8 text-base-content/50">
                    {empty_text.clone()}
                </td>
            </tr>
        </Show>
    }
}

/// 客户端标签页，`None` 表示全部
#[component]
pub fn Tabs<K>(
    tabs: Vec<(Option<K>, &'static str)>,
    active: RwSignal<Option<K>>,
    #[prop(into)] count: Callback<Option<K>, usize>,
) -> impl IntoView
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    view! {
        <div role="tablist" class="tabs tabs-boxed mb-4 w-fit">
            {tabs
                .into_iter()
                .map(|(key, label)| {
                    let for_class = key.clone();
                    let for_click = key.clone();
                    let for_count = key.clone();
                    view! {
                        <a
                            role="tab"
                            class="tab gap-2"
                            class:tab-active=move || active.with(|a| *a == for_class)
                            on:click=move |_| active.set(for_click.clone())
                        >
                            {label}
                            <span class="badge badge-sm">{move || count.run(for_count.clone())}</span>
                        </a>
                    }
                })
                .collect_view()}
        </div>
    }
}
