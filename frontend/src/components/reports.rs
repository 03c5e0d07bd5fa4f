//! 财年报表
//!
//! 报表种类和顶栏财年任一变化都重新请求，只采用最后一次请求的结果。

use ledger_shared::models::{
    BalanceSheet, CashFlowLine, CashFlowStatement, IncomeStatement, IncomeStatementLine,
    TrialBalance,
};
use ledger_shared::reports::{Report, ReportKind, load_report};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::crud::{ErrorBanner, PageHeader};
use super::format;
use crate::api::use_api;
use crate::auth::use_session;
use crate::fiscal::use_fiscal;

#[component]
pub fn ReportsPage() -> impl IntoView {
    let api = use_api();
    let fiscal = use_fiscal();

    let kind = RwSignal::new(ReportKind::default());
    let report = RwSignal::new(Option::<Report>::None);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);
    let generation = StoredValue::new(0u64);
    let refresh = RwSignal::new(());

    Effect::new(move |_| {
        refresh.track();
        let kind = kind.get();
        let Some(year) = fiscal.selected().get() else {
            report.set(None);
            return;
        };
        generation.update_value(|g| *g += 1);
        let current = generation.get_value();
        loading.set(true);
        error.set(None);

        let client = api.client();
        spawn_local(async move {
            let result = load_report(&*client, kind, &year.id).await;
            if generation.try_get_value() != Some(current) {
                log::debug!("discarding stale {} for {}", kind.label(), year.year_name);
                return;
            }
            match result {
                Ok(loaded) => report.set(Some(loaded)),
                Err(e) => {
                    log::warn!("{} failed: {e}", kind.label());
                    report.set(None);
                    error.set(Some(e.user_message("Failed to load report")));
                }
            }
            loading.set(false);
        });
    });

    view! {
        <PageHeader
            title="Reports"
            subtitle="Financial statements for the selected fiscal year"
            loading=loading
            on_refresh=Callback::new(move |_: ()| refresh.set(()))
        />
        <ErrorBanner error=error />

        <div role="tablist" class="tabs tabs-boxed mb-4 w-fit">
            {ReportKind::ALL
                .into_iter()
                .map(|k| view! {
                    <a
                        role="tab"
                        class="tab"
                        class:tab-active=move || kind.get() == k
                        on:click=move |_| kind.set(k)
                    >
                        {k.label()}
                    </a>
                })
                .collect_view()}
        </div>

        <Show
            when=move || fiscal.selected().with(Option::is_some)
            fallback=|| view! { <p class="text-base-content/60">"Select a fiscal year to see its reports."</p> }
        >
            <Show when=move || loading.get() && report.with(Option::is_none)>
                <div class="flex justify-center py-12">
                    <span class="loading loading-spinner loading-lg"></span>
                </div>
            </Show>
            {move || report.get().map(|r| match r {
                Report::IncomeStatement(r) => view! { <IncomeStatementView report=r /> }.into_any(),
                Report::BalanceSheet(r) => view! { <BalanceSheetView report=r /> }.into_any(),
                Report::CashFlow(r) => view! { <CashFlowView report=r /> }.into_any(),
                Report::TrialBalance(r) => view! { <TrialBalanceView report=r /> }.into_any(),
            })}
        </Show>
    }
}

fn period(start: chrono::NaiveDate, end: chrono::NaiveDate) -> String {
    format!("{} to {}", format::date(start), format::date(end))
}

/// 报表卡片外框
#[component]
fn ReportCard(#[prop(into)] title: String, #[prop(into)] caption: String, children: Children) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{title}</h2>
                <p class="text-sm text-base-content/60 mb-2">{caption}</p>
                {children()}
            </div>
        </div>
    }
}

/// 金额行，`strong` 用于合计
#[component]
fn AmountRow(
    #[prop(into)] label: String,
    amount: f64,
    #[prop(optional)] strong: bool,
    #[prop(into, optional)] note: String,
) -> impl IntoView {
    let currency = use_session().currency();
    view! {
        <tr class:font-semibold=strong class:border-t-2=strong>
            <td>{label}</td>
            <td class="text-right text-base-content/60 text-sm">{note}</td>
            <td class="text-right font-mono" class:text-error=amount < 0.0>
                {move || currency.with(|c| format::money(amount, c))}
            </td>
        </tr>
    }
}

fn share_rows(lines: Vec<(String, f64, f64)>) -> impl IntoView {
    lines
        .into_iter()
        .map(|(label, amount, share)| view! { <AmountRow label=label amount=amount note=format!("{share:.1}%") /> })
        .collect_view()
}

fn income_lines(lines: &[IncomeStatementLine]) -> Vec<(String, f64, f64)> {
    lines.iter().map(|l| (l.category_name.clone(), l.amount, l.percentage)).collect()
}

fn cash_lines(lines: &[CashFlowLine]) -> Vec<(String, f64, f64)> {
    lines.iter().map(|l| (l.category.clone(), l.amount, l.percentage)).collect()
}

#[component]
fn IncomeStatementView(report: IncomeStatement) -> impl IntoView {
    let profit_label = if report.net_profit_loss < 0.0 { "Net loss" } else { "Net profit" };
    view! {
        <ReportCard title="Income Statement" caption=period(report.period_start, report.period_end)>
            <table class="table">
                <tbody>
                    <tr><th colspan="3">"Income"</th></tr>
                    {share_rows(income_lines(&report.income_items))}
                    <AmountRow label="Total income" amount=report.total_income strong=true />
                    <tr><th colspan="3">"Expenses"</th></tr>
                    {share_rows(income_lines(&report.expense_items))}
                    <AmountRow label="Total expenses" amount=report.total_expense strong=true />
                    <AmountRow
                        label=profit_label
                        amount=report.net_profit_loss
                        strong=true
                        note=format!("{:.1}% margin", report.profit_margin_percentage)
                    />
                </tbody>
            </table>
        </ReportCard>
    }
}

#[component]
fn BalanceSheetView(report: BalanceSheet) -> impl IntoView {
    let caption = format!("As of {}", format::date(report.as_of_date));
    view! {
        <ReportCard title="Balance Sheet" caption=caption>
            <table class="table">
                <tbody>
                    <tr><th colspan="3">"Assets"</th></tr>
                    {report
                        .assets
                        .into_iter()
                        .map(|a| view! { <AmountRow label=a.account_name amount=a.amount /> })
                        .collect_view()}
                    <AmountRow label="Total assets" amount=report.total_assets strong=true />
                    <tr><th colspan="3">"Equity"</th></tr>
                    <AmountRow label="Retained earnings" amount=report.retained_earnings />
                    <AmountRow label="Current period profit / loss" amount=report.current_period_profit_loss />
                    <AmountRow label="Total equity" amount=report.total_equity strong=true />
                </tbody>
            </table>
        </ReportCard>
    }
}

#[component]
fn CashFlowView(report: CashFlowStatement) -> impl IntoView {
    let currency = use_session().currency();
    let accounts = report.account_balances;
    view! {
        <div class="space-y-6">
            <ReportCard title="Cash Flow" caption=period(report.period_start, report.period_end)>
                <table class="table">
                    <tbody>
                        <AmountRow label="Opening cash balance" amount=report.opening_cash_balance strong=true />
                        <tr><th colspan="3">"Inflows"</th></tr>
                        {share_rows(cash_lines(&report.cash_inflows))}
                        <AmountRow label="Total inflows" amount=report.total_inflows strong=true />
                        <tr><th colspan="3">"Outflows"</th></tr>
                        {share_rows(cash_lines(&report.cash_outflows))}
                        <AmountRow label="Total outflows" amount=report.total_outflows strong=true />
                        <AmountRow label="Net cash flow" amount=report.net_cash_flow strong=true />
                        <AmountRow label="Closing cash balance" amount=report.closing_cash_balance strong=true />
                    </tbody>
                </table>
            </ReportCard>
            {(!accounts.is_empty()).then(|| view! {
                <ReportCard title="Accounts" caption="Opening and closing balance per account">
                    <div class="overflow-x-auto">
                        <table class="table table-sm">
                            <thead>
                                <tr>
                                    <th>"Account"</th>
                                    <th class="text-right">"Opening"</th>
                                    <th class="text-right">"Income"</th>
                                    <th class="text-right">"Expense"</th>
                                    <th class="text-right">"Closing"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {accounts
                                    .into_iter()
                                    .map(|a| {
                                        let money = move |amount: f64| currency.with(|c| format::money(amount, c));
                                        view! {
                                            <tr>
                                                <td>
                                                    {a.account_name}
                                                    {(!a.is_final).then(|| view! {
                                                        <span class="badge badge-ghost badge-sm ml-2">"provisional"</span>
                                                    })}
                                                </td>
                                                <td class="text-right font-mono">{money(a.opening_balance)}</td>
                                                <td class="text-right font-mono text-success">{money(a.total_income)}</td>
                                                <td class="text-right font-mono text-error">{money(a.total_expense)}</td>
                                                <td class="text-right font-mono font-semibold">{money(a.closing_balance)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    </div>
                </ReportCard>
            })}
        </div>
    }
}

#[component]
fn TrialBalanceView(report: TrialBalance) -> impl IntoView {
    let currency = use_session().currency();
    let money = move |amount: f64| currency.with(|c| format::money(amount, c));
    let caption = format!("As of {}", format::date(report.as_of_date));
    let (badge, verdict) = if report.is_balanced {
        ("badge badge-success", "Balanced")
    } else {
        ("badge badge-error", "Out of balance")
    };
    view! {
        <ReportCard title="Trial Balance" caption=caption>
            <div class="mb-2"><span class=badge>{verdict}</span></div>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Account"</th>
                        <th>"Type"</th>
                        <th class="text-right">"Debit"</th>
                        <th class="text-right">"Credit"</th>
                    </tr>
                </thead>
                <tbody>
                    {report
                        .accounts
                        .into_iter()
                        .map(|line| view! {
                            <tr>
                                <td>{line.account_name}</td>
                                <td class="capitalize">{line.account_type.replace('_', " ")}</td>
                                <td class="text-right font-mono">{money(line.debit)}</td>
                                <td class="text-right font-mono">{money(line.credit)}</td>
                            </tr>
                        })
                        .collect_view()}
                    <tr class="font-semibold border-t-2">
                        <td colspan="2">"Total"</td>
                        <td class="text-right font-mono">{money(report.total_debit)}</td>
                        <td class="text-right font-mono">{money(report.total_credit)}</td>
                    </tr>
                </tbody>
            </table>
        </ReportCard>
    }
}
