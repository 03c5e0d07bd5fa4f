//! 模态框与确认对话框

use ledger_shared::crud::ConfirmState;
use leptos::prelude::*;

/// 基于原生 `<dialog>` 的模态框
///
/// 内容只在打开时渲染，每次打开都是新的表单。按 Esc 或点击遮罩会触发 `on_close`。
#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: Signal<String>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(optional)] wide: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let box_class = if wide {
        "modal-box w-11/12 max-w-4xl"
    } else {
        "modal-box"
    };

    view! {
        <dialog
            class="modal"
            node_ref=dialog_ref
            on:close=move |_| {
                if open.get_untracked() {
                    on_close.run(());
                }
            }
        >
            <div class=box_class>
                <h3 class="font-bold text-lg mb-4">{move || title.get()}</h3>
                <Show when=move || open.get()>{children()}</Show>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}

/// 删除确认
///
/// 确认时取出挂起的动作交给 `on_confirm`，取消时丢弃。
#[component]
pub fn ConfirmDialog<A>(
    state: RwSignal<ConfirmState<A>>,
    #[prop(into)] on_confirm: Callback<A>,
    #[prop(into, optional)] confirm_label: Option<String>,
) -> impl IntoView
where
    A: Send + Sync + 'static,
{
    let open = Signal::derive(move || state.with(ConfirmState::is_open));
    let confirm_label = confirm_label.unwrap_or_else(|| "Delete".to_string());

    let on_yes = move |_| {
        if let Some(action) = state.try_update(ConfirmState::confirm).flatten() {
            on_confirm.run(action);
        }
    };
    let on_cancel = move || state.update(ConfirmState::cancel);

    view! {
        <Modal open=open title="Please confirm".to_string() on_close=move |_| on_cancel()>
            <p class="py-2">{move || state.with(|s| s.message().unwrap_or_default().to_string())}</p>
            <div class="modal-action">
                <button class="btn" on:click=move |_| on_cancel()>"Cancel"</button>
                <button class="btn btn-error" on:click=on_yes>{confirm_label.clone()}</button>
            </div>
        </Modal>
    }
}
