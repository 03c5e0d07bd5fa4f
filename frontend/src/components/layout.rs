//! 应用外壳：侧边导航、顶栏（财年选择、用户、登出）与锁屏
//!
//! 锁定时整个外壳被设为 `inert`，键盘与指针都无法触达下层内容。

use leptos::prelude::*;

use super::icons::{
    ArrowLeftRight, ChartColumn, FileText, History, LayoutDashboard, Lock, LogOut, Menu, Package,
    Percent, Receipt, Settings, Tags, Users, Wallet, Warehouse,
};
use super::lock_screen::LockScreen;
use crate::auth::use_session;
use crate::fiscal::use_fiscal;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

fn nav_icon(route: AppRoute) -> AnyView {
    let class = "h-5 w-5";
    match route {
        AppRoute::Dashboard => view! { <LayoutDashboard attr:class=class /> }.into_any(),
        AppRoute::Transactions => view! { <Receipt attr:class=class /> }.into_any(),
        AppRoute::Accounts => view! { <Wallet attr:class=class /> }.into_any(),
        AppRoute::Categories => view! { <Tags attr:class=class /> }.into_any(),
        AppRoute::Partners => view! { <Users attr:class=class /> }.into_any(),
        AppRoute::Products => view! { <Package attr:class=class /> }.into_any(),
        AppRoute::Warehouses => view! { <Warehouse attr:class=class /> }.into_any(),
        AppRoute::StockMovements => view! { <ArrowLeftRight attr:class=class /> }.into_any(),
        AppRoute::TaxRates => view! { <Percent attr:class=class /> }.into_any(),
        AppRoute::Invoices => view! { <FileText attr:class=class /> }.into_any(),
        AppRoute::Reports => view! { <ChartColumn attr:class=class /> }.into_any(),
        AppRoute::ActivityLogs => view! { <History attr:class=class /> }.into_any(),
        AppRoute::Settings => view! { <Settings attr:class=class /> }.into_any(),
        AppRoute::Login | AppRoute::NotFound => ().into_any(),
    }
}

#[component]
fn FiscalYearSelect() -> impl IntoView {
    let fiscal = use_fiscal();
    let years = fiscal.years();
    let selected = fiscal.selected();

    view! {
        <Show
            when=move || !years.with(Vec::is_empty)
            fallback=move || view! {
                <span class="text-sm text-error">{move || fiscal.error().get()}</span>
            }
        >
            <select
                class="select select-bordered select-sm"
                prop:value=move || selected.with(|s| s.as_ref().map(|y| y.id.clone()).unwrap_or_default())
                on:change=move |ev| fiscal.select(&event_target_value(&ev))
            >
                <For
                    each=move || years.get()
                    key=|y| y.id.clone()
                    children=move |year| {
                        let id = year.id.clone();
                        let label = if year.is_closed() {
                            format!("{} (closed)", year.year_name)
                        } else {
                            year.year_name.clone()
                        };
                        view! {
                            <option
                                value=year.id.clone()
                                selected=move || selected.with(|s| s.as_ref().is_some_and(|y| y.id == id))
                            >
                                {label}
                            </option>
                        }
                    }
                />
            </select>
        </Show>
    }
}

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let locked = session.is_locked_signal();
    let user_name = session.user_name();
    let company = Signal::derive(move || {
        session
            .tenant()
            .get()
            .map(|t| t.company_name)
            .unwrap_or_default()
    });
    let title = move || router.current_route().get().title();

    view! {
        <div prop:inert=move || locked.get() aria-hidden=move || locked.get().to_string()>
            <div class="drawer lg:drawer-open">
                <input id="nav-drawer" type="checkbox" class="drawer-toggle" />
                <div class="drawer-content flex flex-col min-h-screen bg-base-200">
                    <div class="navbar bg-base-100 shadow-sm sticky top-0 z-30 gap-2">
                        <div class="flex-none lg:hidden">
                            <label for="nav-drawer" class="btn btn-square btn-ghost">
                                <Menu attr:class="h-5 w-5" />
                            </label>
                        </div>
                        <div class="flex-1 text-lg font-semibold">{title}</div>
                        <div class="flex-none flex items-center gap-3">
                            <FiscalYearSelect />
                            <span class="hidden md:inline text-sm text-base-content/70">{move || user_name.get()}</span>
                            <button class="btn btn-ghost btn-sm gap-2" on:click=move |_| session.lock()>
                                <Lock attr:class="h-4 w-4" />
                                <span class="hidden md:inline">"Lock"</span>
                            </button>
                            <button class="btn btn-outline btn-error btn-sm gap-2" on:click=move |_| session.logout()>
                                <LogOut attr:class="h-4 w-4" />
                                <span class="hidden md:inline">"Sign out"</span>
                            </button>
                        </div>
                    </div>
                    <main class="p-4 md:p-8 max-w-7xl w-full mx-auto">{children()}</main>
                </div>
                <div class="drawer-side z-40">
                    <label for="nav-drawer" aria-label="close sidebar" class="drawer-overlay"></label>
                    <aside class="bg-base-100 min-h-full w-64">
                        <div class="p-4 border-b border-base-200">
                            <div class="text-xl font-bold text-primary">"Ledger"</div>
                            <div class="text-xs text-base-content/60 truncate">{move || company.get()}</div>
                        </div>
                        <ul class="menu p-2 gap-1">
                            {AppRoute::NAV
                                .into_iter()
                                .map(|route| view! {
                                    <li>
                                        <Link to=route>{nav_icon(route)} {route.title()}</Link>
                                    </li>
                                })
                                .collect_view()}
                        </ul>
                    </aside>
                </div>
            </div>
        </div>
        <Show when=move || locked.get()>
            <LockScreen />
        </Show>
    }
}
