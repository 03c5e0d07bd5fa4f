//! 提示消息
//!
//! 成功或失败的短暂提示，固定时长后自动消失，也可以点击关闭。

use std::time::Duration;

use leptos::prelude::*;

use super::icons::{CircleAlert, CircleCheck};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
struct Toast {
    id: u64,
    kind: ToastKind,
    message: String,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
    duration: Duration,
}

impl ToastContext {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
            duration,
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|t| t.push(Toast { id, kind, message }));

        let ctx = *self;
        set_timeout(move || ctx.dismiss(id), self.duration);
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|t| t.retain(|toast| toast.id != id));
    }
}

pub fn use_toast() -> ToastContext {
    expect_context::<ToastContext>()
}

/// 提示消息容器，放在 App 根部
#[component]
pub fn Toaster() -> impl IntoView {
    let ctx = use_toast();

    view! {
        <div class="toast toast-top toast-end z-[100]">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let (class, icon) = match toast.kind {
                        ToastKind::Success => ("alert alert-success shadow-lg", view! { <CircleCheck attr:class="h-5 w-5" /> }.into_any()),
                        ToastKind::Error => ("alert alert-error shadow-lg", view! { <CircleAlert attr:class="h-5 w-5" /> }.into_any()),
                    };
                    view! {
                        <div role="alert" class=class on:click=move |_| ctx.dismiss(id)>
                            {icon}
                            <span>{toast.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
