//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::events::EventListener;
use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn write_history(path: &str, push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = if push {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    };
    if result.is_err() {
        log::warn!("[Router] failed to update history for {path}");
    }
}

/// 守卫：返回实际应进入的路由
fn guard(target: AppRoute, is_auth: bool) -> AppRoute {
    if target.requires_auth() && !is_auth {
        log::info!("[Router] Access denied to {target}. Redirecting to login.");
        AppRoute::auth_failure_redirect()
    } else if target.should_redirect_when_authenticated() && is_auth {
        AppRoute::auth_success_redirect()
    } else {
        target
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证检查信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let initial = AppRoute::from_path(&current_path());
        let initial = guard(initial, is_authenticated.get_untracked());
        write_history(initial.to_path(), false);
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, route: AppRoute) {
        let target = guard(route, self.is_authenticated.get_untracked());
        if target == self.current_route.get_untracked() {
            return;
        }
        write_history(target.to_path(), true);
        self.set_route.set(target);
    }

    /// 浏览器后退/前进按钮，同样经过守卫
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let Some(window) = web_sys::window() else {
            return;
        };
        let listener = EventListener::new(&window, "popstate", move || {
            let requested = AppRoute::from_path(&current_path());
            let target = guard(requested, is_authenticated.get_untracked());
            if target != requested {
                write_history(target.to_path(), false);
            }
            set_route.set(target);
        });
        // 随 owner 一起释放监听器
        StoredValue::new_local(listener);
    }

    /// 认证状态变化时自动重定向
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();
            let target = guard(route, is_auth);
            if target != route {
                log::info!("[Router] Auth state changed, redirecting to {target}.");
                write_history(target.to_path(), true);
                set_route.set(target);
            }
        });
    }
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    expect_context::<RouterService>()
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    let router = RouterService::new(is_authenticated);
    router.init_popstate_listener();
    router.setup_auth_redirect();
    provide_context(router);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}

/// 站内链接；当前路由高亮
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(to);
    };

    view! {
        <a
            href=to.to_path()
            class=class
            class:menu-active=move || router.current_route().get() == to
            on:click=on_click
        >
            {children()}
        </a>
    }
}
