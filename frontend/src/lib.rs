//! Ledger 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `fiscal`: 当前财年
//! - `components`: UI 组件层
//!
//! 协议、校验与状态机都在 `ledger_shared` 中，这里只负责接到 signal 与 DOM 上。

mod api;
mod auth;
mod config;
mod fiscal;
mod idle;
mod components {
    pub mod accounts;
    pub mod activity_logs;
    pub mod categories;
    mod crud;
    pub mod dashboard;
    mod form;
    mod format;
    mod icons;
    pub mod invoices;
    pub mod layout;
    mod lock_screen;
    pub mod login;
    mod modal;
    pub mod partners;
    pub mod products;
    pub mod reports;
    pub mod settings;
    pub mod stock_movements;
    pub mod tax_rates;
    pub mod toast;
    pub mod transactions;
    pub mod warehouses;
}

use crate::api::ApiContext;
use crate::auth::SessionContext;
use crate::components::accounts::AccountsPage;
use crate::components::activity_logs::ActivityLogsPage;
use crate::components::categories::CategoriesPage;
use crate::components::dashboard::DashboardPage;
use crate::components::invoices::InvoicesPage;
use crate::components::layout::AppShell;
use crate::components::login::LoginPage;
use crate::components::partners::PartnersPage;
use crate::components::products::ProductsPage;
use crate::components::reports::ReportsPage;
use crate::components::settings::SettingsPage;
use crate::components::stock_movements::StockMovementsPage;
use crate::components::tax_rates::TaxRatesPage;
use crate::components::toast::{ToastContext, Toaster};
use crate::components::transactions::TransactionsPage;
use crate::components::warehouses::WarehousesPage;
use crate::fiscal::FiscalContext;

use leptos::prelude::*;

pub use crate::config::load_config;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod events;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use events::EventListener;
    pub use http::HttpClient;
    pub use storage::LocalStorage;
    pub use timer::BrowserScheduler;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。登录页与 404 之外的页面都包在外壳里。
fn route_matcher(route: AppRoute) -> AnyView {
    let page = match route {
        AppRoute::Login => return view! { <LoginPage /> }.into_any(),
        AppRoute::NotFound => {
            return view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <div class="text-center">
                        <h1 class="text-6xl font-bold text-error">"404"</h1>
                        <p class="text-xl mt-4">"Page not found"</p>
                    </div>
                </div>
            }
            .into_any();
        }
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Transactions => view! { <TransactionsPage /> }.into_any(),
        AppRoute::Accounts => view! { <AccountsPage /> }.into_any(),
        AppRoute::Categories => view! { <CategoriesPage /> }.into_any(),
        AppRoute::Partners => view! { <PartnersPage /> }.into_any(),
        AppRoute::Products => view! { <ProductsPage /> }.into_any(),
        AppRoute::Warehouses => view! { <WarehousesPage /> }.into_any(),
        AppRoute::StockMovements => view! { <StockMovementsPage /> }.into_any(),
        AppRoute::TaxRates => view! { <TaxRatesPage /> }.into_any(),
        AppRoute::Invoices => view! { <InvoicesPage /> }.into_any(),
        AppRoute::Reports => view! { <ReportsPage /> }.into_any(),
        AppRoute::ActivityLogs => view! { <ActivityLogsPage /> }.into_any(),
        AppRoute::Settings => view! { <SettingsPage /> }.into_any(),
    };
    view! { <AppShell>{page}</AppShell> }.into_any()
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 配置
    let config = load_config();
    provide_context(config.clone());

    // 2. API 客户端与会话（从 LocalStorage 恢复）
    let api = ApiContext::new(&config.api_base_url);
    provide_context(api);
    let session = SessionContext::new(api);
    provide_context(session);

    // 3. 提示、财年与空闲锁屏
    provide_context(ToastContext::new(config.toast_duration));
    provide_context(FiscalContext::new(api, session));
    idle::provide_idle_lock(session, config.idle_timeout);

    // 4. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = session.is_authenticated_signal();

    view! {
        // 5. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <Toaster />
    }
}
