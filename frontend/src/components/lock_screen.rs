//! 锁屏
//!
//! 会话锁定时覆盖整个视口，下层内容同时被设为 `inert`。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_session;
use crate::components::icons::{CircleAlert, Lock, LogOut};

#[component]
pub fn LockScreen() -> impl IntoView {
    let session = use_session();
    let name = session.user_name();
    let email = session.user_email();

    let password = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);
    let checking = RwSignal::new(false);
    let input_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if checking.get_untracked() {
            return;
        }
        checking.set(true);
        error.set(None);
        let attempt = password.get_untracked();
        spawn_local(async move {
            match session.unlock(&attempt).await {
                Ok(()) => password.set(String::new()),
                Err(message) => {
                    error.set(Some(message));
                    password.set(String::new());
                }
            }
            checking.set(false);
        });
    };

    view! {
        <div class="fixed inset-0 z-[90] flex items-center justify-center bg-base-300/95 backdrop-blur-sm">
            <div class="card w-full max-w-sm bg-base-100 shadow-2xl">
                <form class="card-body items-center text-center" on:submit=on_submit>
                    <div class="p-3 bg-warning/10 rounded-full text-warning">
                        <Lock attr:class="h-8 w-8" />
                    </div>
                    <h2 class="card-title">"Session locked"</h2>
                    <p class="text-sm text-base-content/70">
                        "Locked after inactivity. Enter the password for "
                        <span class="font-semibold">{move || name.get()}</span>
                        " (" {move || email.get()} ")."
                    </p>

                    <Show when=move || error.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2 w-full">
                            <CircleAlert attr:class="h-5 w-5" />
                            <span>{move || error.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <input
                        node_ref=input_ref
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        class="input input-bordered w-full"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="btn btn-primary w-full" disabled=move || checking.get()>
                        <Show when=move || checking.get()>
                            <span class="loading loading-spinner loading-sm"></span>
                        </Show>
                        "Unlock"
                    </button>
                    <button
                        type="button"
                        class="btn btn-ghost btn-sm gap-2"
                        on:click=move |_| session.logout()
                    >
                        <LogOut attr:class="h-4 w-4" />
                        "Sign out instead"
                    </button>
                </form>
            </div>
        </div>
    }
}
