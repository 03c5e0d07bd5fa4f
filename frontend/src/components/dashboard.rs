//! 仪表盘
//!
//! 跟随顶栏的财年选择重新加载。快速切换财年时只有最后一次请求的结果会被采用。

mod chart;

use ledger_shared::dashboard::{DashboardData, MonthlyPoint, load_dashboard};
use ledger_shared::models::TransactionType;
use leptos::prelude::*;
use leptos::task::spawn_local;

use self::chart::{Frame, expense_shares, monthly_bars, monthly_max, ticks};
use super::crud::ErrorBanner;
use super::format;
use super::icons::{TrendingDown, TrendingUp, Wallet};
use crate::api::use_api;
use crate::auth::use_session;
use crate::config::use_config;
use crate::fiscal::use_fiscal;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let fiscal = use_fiscal();
    let limit = use_config().list_limit;
    let currency = use_session().currency();

    let data = RwSignal::new(Option::<DashboardData>::None);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);
    let generation = StoredValue::new(0u64);

    Effect::new(move |_| {
        let Some(year) = fiscal.selected().get() else {
            data.set(None);
            return;
        };
        generation.update_value(|g| *g += 1);
        let current = generation.get_value();
        loading.set(true);
        error.set(None);

        let client = api.client();
        spawn_local(async move {
            let result = load_dashboard(&*client, &year, limit).await;
            if generation.try_get_value() != Some(current) {
                log::debug!("discarding stale dashboard for {}", year.year_name);
                return;
            }
            match result {
                Ok(loaded) => data.set(Some(loaded)),
                Err(e) => {
                    log::warn!("dashboard load failed: {e}");
                    error.set(Some(e.user_message("Failed to load dashboard data")));
                }
            }
            loading.set(false);
        });
    });

    let money = move |amount: f64| currency.with(|c| format::money(amount, c));

    view! {
        <div class="flex flex-wrap items-center justify-between gap-4 mb-6">
            <div>
                <h1 class="text-2xl font-bold">"Dashboard"</h1>
                <p class="text-base-content/70 text-sm">
                    {move || fiscal
                        .selected()
                        .get()
                        .map(|y| format!("{}: {} to {}", y.year_name, format::date(y.start_date), format::date(y.end_date)))
                        .unwrap_or_else(|| "No fiscal year selected".to_string())}
                </p>
            </div>
            <Show when=move || loading.get()>
                <span class="loading loading-spinner loading-md text-primary"></span>
            </Show>
        </div>

        <ErrorBanner error=error />

        <Show
            when=move || data.with(Option::is_some)
            fallback=move || view! {
                <Show when=move || !loading.get() && error.with(Option::is_none)>
                    <div class="card bg-base-100 shadow">
                        <div class="card-body items-center text-base-content/60">
                            "Select a fiscal year to see its figures."
                        </div>
                    </div>
                </Show>
            }
        >
            <div class="space-y-6">
                <SummaryCards data=data money=money />
                <div class="grid gap-6 lg:grid-cols-3">
                    <div class="card bg-base-100 shadow lg:col-span-2">
                        <div class="card-body">
                            <h2 class="card-title text-base">"Monthly income and expense"</h2>
                            <MonthlyChart points=Signal::derive(move || data.with(|d| d.as_ref().map(|d| d.monthly.clone()).unwrap_or_default())) />
                        </div>
                    </div>
                    <CategoryBreakdown data=data money=money />
                </div>
                <div class="grid gap-6 lg:grid-cols-3">
                    <AccountList data=data money=money />
                    <RecentTransactions data=data money=money />
                </div>
            </div>
        </Show>
    }
}

#[component]
fn SummaryCards(
    data: RwSignal<Option<DashboardData>>,
    money: impl Fn(f64) -> String + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let summary = move || data.with(|d| d.as_ref().map(|d| d.summary).unwrap_or_default());

    view! {
        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <div class="stat">
                <div class="stat-figure text-success"><TrendingUp attr:class="h-8 w-8" /></div>
                <div class="stat-title">"Income"</div>
                <div class="stat-value text-success text-2xl">{move || money(summary().total_income)}</div>
            </div>
            <div class="stat">
                <div class="stat-figure text-error"><TrendingDown attr:class="h-8 w-8" /></div>
                <div class="stat-title">"Expense"</div>
                <div class="stat-value text-error text-2xl">{move || money(summary().total_expense)}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Net"</div>
                <div
                    class="stat-value text-2xl"
                    class:text-error=move || summary().net_balance < 0.0
                >
                    {move || money(summary().net_balance)}
                </div>
                <div class="stat-desc">{move || format!("{} transactions", summary().transaction_count)}</div>
            </div>
            <div class="stat">
                <div class="stat-figure text-primary"><Wallet attr:class="h-8 w-8" /></div>
                <div class="stat-title">"Total balance"</div>
                <div class="stat-value text-primary text-2xl">{move || money(summary().total_balance)}</div>
                <div class="stat-desc">{move || format!("{} active accounts", summary().active_accounts)}</div>
            </div>
        </div>
    }
}

fn coord(value: f64) -> String {
    format!("{value:.1}")
}

#[component]
fn MonthlyChart(#[prop(into)] points: Signal<Vec<MonthlyPoint>>) -> impl IntoView {
    let frame = Frame::MONTHLY;
    let view_box = format!("0 0 {} {}", frame.width, frame.height);

    let grid = move || {
        let max = points.with(|p| monthly_max(p));
        ticks(max, 4)
            .into_iter()
            .map(|value| {
                let y = coord(frame.y_of(value, max));
                view! {
                    <line x1=coord(frame.left) x2=coord(frame.width) y1=y.clone() y2=y.clone() class="stroke-base-300" stroke-width="1" />
                    <text x=coord(frame.left - 6.0) y=y text-anchor="end" dominant-baseline="middle" class="fill-base-content/60 text-[10px]">
                        {format::compact(value)}
                    </text>
                }
            })
            .collect_view()
    };

    let bars = move || {
        points.with(|p| monthly_bars(p, &frame))
            .into_iter()
            .map(|m| view! {
                <rect x=coord(m.income.x) y=coord(m.income.y) width=coord(m.income.width) height=coord(m.income.height) rx="2" class="fill-success" />
                <rect x=coord(m.expense.x) y=coord(m.expense.y) width=coord(m.expense.width) height=coord(m.expense.height) rx="2" class="fill-error" />
                <text x=coord(m.label_x) y=coord(frame.height - 8.0) text-anchor="middle" class="fill-base-content/60 text-[10px]">
                    {m.label}
                </text>
            })
            .collect_view()
    };

    view! {
        <svg viewBox=view_box class="w-full h-auto" role="img" aria-label="Monthly income and expense">
            {grid}
            {bars}
        </svg>
        <div class="flex gap-4 text-xs text-base-content/70">
            <span class="flex items-center gap-1"><span class="inline-block w-3 h-3 rounded-sm bg-success"></span>"Income"</span>
            <span class="flex items-center gap-1"><span class="inline-block w-3 h-3 rounded-sm bg-error"></span>"Expense"</span>
        </div>
    }
}

#[component]
fn CategoryBreakdown(
    data: RwSignal<Option<DashboardData>>,
    money: impl Fn(f64) -> String + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let rows = move || {
        data.with(|d| {
            let categories = d.as_ref().map(|d| d.categories.as_slice()).unwrap_or_default();
            categories
                .iter()
                .zip(expense_shares(categories))
                .map(|(c, share)| (c.clone(), share))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title text-base">"Top expense categories"</h2>
                <Show
                    when=move || data.with(|d| d.as_ref().is_some_and(|d| !d.categories.is_empty()))
                    fallback=|| view! { <p class="text-sm text-base-content/60">"No expenses in this fiscal year."</p> }
                >
                    <ul class="space-y-3">
                        {move || rows()
                            .into_iter()
                            .map(|(category, share)| {
                                let style = format!(
                                    "width: {:.1}%; background-color: {}",
                                    share * 100.0,
                                    category.color.as_deref().unwrap_or("oklch(var(--p))"),
                                );
                                view! {
                                    <li>
                                        <div class="flex justify-between text-sm">
                                            <span>{category.name}</span>
                                            <span class="font-mono">{money(category.expense)}</span>
                                        </div>
                                        <div class="w-full h-2 rounded bg-base-200">
                                            <div class="h-2 rounded" style=style></div>
                                        </div>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn AccountList(
    data: RwSignal<Option<DashboardData>>,
    money: impl Fn(f64) -> String + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let accounts = move || data.with(|d| d.as_ref().map(|d| d.accounts.clone()).unwrap_or_default());

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title text-base">"Account balances"</h2>
                <ul class="divide-y divide-base-200">
                    {move || accounts()
                        .into_iter()
                        .map(|a| view! {
                            <li class="flex justify-between py-2 text-sm">
                                <div>
                                    <div class="font-medium">{a.name}</div>
                                    <div class="text-xs text-base-content/60">{a.account_type.label()}</div>
                                </div>
                                <span class="font-mono" class:text-error={a.balance < 0.0}>{money(a.balance)}</span>
                            </li>
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}

#[component]
fn RecentTransactions(
    data: RwSignal<Option<DashboardData>>,
    money: impl Fn(f64) -> String + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let recent = move || data.with(|d| d.as_ref().map(|d| d.recent.clone()).unwrap_or_default());

    view! {
        <div class="card bg-base-100 shadow lg:col-span-2">
            <div class="card-body p-0">
                <h2 class="card-title text-base p-6 pb-2">"Recent transactions"</h2>
                <div class="overflow-x-auto">
                    <table class="table table-sm">
                        <thead>
                            <tr>
                                <th>"Date"</th>
                                <th>"Description"</th>
                                <th>"Category"</th>
                                <th class="text-right">"Amount"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || recent().is_empty()>
                                <tr>
                                    <td colspan="4" class="text-center py-6 text-base-content/50">"No transactions yet."</td>
                                </tr>
                            </Show>
                            {move || recent()
                                .into_iter()
                                .map(|tx| {
                                    let income = tx.transaction_type == TransactionType::Income;
                                    let amount = if income { tx.amount } else { -tx.amount };
                                    view! {
                                        <tr>
                                            <td class="whitespace-nowrap">{format::date(tx.transaction_date)}</td>
                                            <td>{tx.description.unwrap_or_default()}</td>
                                            <td>
                                                {tx.category_name.unwrap_or_else(|| ledger_shared::UNCATEGORIZED_LABEL.to_string())}
                                            </td>
                                            <td
                                                class="text-right font-mono"
                                                class:text-success=income
                                                class:text-error={!income}
                                            >
                                                {money(amount)}
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
