//! 发票：统计卡片、按状态分页的列表，以及发送、作废与收款
//!
//! 发票本身的创建与编辑不在这里做，列表上只提供状态流转。

use ledger_shared::crud::{self, ConfirmState, Editor};
use ledger_shared::date::parse_date;
use ledger_shared::models::{
    Account, CancelInvoice, Invoice, InvoicePayment, InvoicePayments, InvoiceStats,
    InvoiceStatsRequest, InvoiceStatus, PaymentMethod, RecordPayment, SendInvoice,
};
use ledger_shared::protocol::NoFilter;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::crud::{ErrorBanner, PageHeader, ResourcePage, TableStatus, Tabs, editor_error, editor_saving};
use super::format;
use super::form::{
    FormFooter, NumberField, SelectField, TextAreaField, TextField, draft_field, optional_text,
    text_of,
};
use super::icons::{Ban, Banknote, SendHorizontal};
use super::modal::{ConfirmDialog, Modal};
use super::toast::use_toast;
use crate::api::use_api;
use crate::auth::use_session;

type PaymentEditor = RwSignal<Option<Editor<RecordPayment>>>;

#[component]
pub fn InvoicesPage() -> impl IntoView {
    let page = ResourcePage::<Invoice>::new(NoFilter);
    let tab = RwSignal::new(Option::<InvoiceStatus>::None);
    let (visible, count) = page.tabbed(tab, |i| i.status);
    let currency = use_session().currency();
    let stats = RwSignal::new(Option::<InvoiceStats>::None);
    let accounts = ResourcePage::<Account>::new(NoFilter).items();

    let api = use_api();
    let toast = use_toast();

    // 统计失败不影响列表，只记日志
    let load_stats = move || {
        let client = api.client();
        spawn_local(async move {
            match client.send(&InvoiceStatsRequest).await {
                Ok(s) => stats.set(Some(s)),
                Err(e) => log::warn!("invoice stats unavailable: {e}"),
            }
        });
    };
    load_stats();

    let refresh = move || {
        page.reload();
        load_stats();
    };

    let send = move |id: String| {
        let client = api.client();
        spawn_local(async move {
            match client.send(&SendInvoice { id }).await {
                Ok(invoice) => {
                    toast.success(format!("Invoice {} sent", invoice.invoice_number));
                    refresh();
                }
                Err(e) => toast.error(e.user_message("Failed to send invoice")),
            }
        });
    };

    let cancel_confirm = RwSignal::new(ConfirmState::<String>::new());
    let cancel = move |id: String| {
        let client = api.client();
        spawn_local(async move {
            match client.send(&CancelInvoice { id }).await {
                Ok(invoice) => {
                    toast.success(format!("Invoice {} cancelled", invoice.invoice_number));
                    refresh();
                }
                Err(e) => toast.error(e.user_message("Failed to cancel invoice")),
            }
        });
    };

    // 收款弹窗：当前发票、已有收款（None 表示加载中）与新收款表单
    let payments_for = RwSignal::new(Option::<Invoice>::None);
    let payments = RwSignal::new(Option::<Vec<InvoicePayment>>::None);
    let payment_editor: PaymentEditor = RwSignal::new(None);

    let open_payments = move |invoice: Invoice| {
        let request = InvoicePayments {
            invoice_id: invoice.id.clone(),
        };
        payment_editor.set(
            invoice
                .can_record_payment()
                .then(|| Editor::create(RecordPayment::for_invoice(&invoice, format::today()))),
        );
        payments.set(None);
        payments_for.set(Some(invoice));

        let client = api.client();
        spawn_local(async move {
            match client.send(&request).await {
                Ok(list) => payments.set(Some(list)),
                Err(e) => {
                    toast.error(e.user_message("Failed to load payments"));
                    payments.set(Some(Vec::new()));
                }
            }
        });
    };
    let close_payments = move || {
        payments_for.set(None);
        payment_editor.set(None);
    };

    let record_payment = move || {
        let pending = payment_editor
            .try_update(|e| {
                e.as_mut().filter(|e| !e.saving).map(|e| {
                    e.begin_save();
                    e.draft.clone()
                })
            })
            .flatten();
        let Some(request) = pending else {
            return;
        };
        let client = api.client();
        spawn_local(async move {
            match crud::submit(&*client, &request).await {
                Ok(payment) => {
                    toast.success(format!("Payment of {} recorded", currency.with_untracked(|c| format::money(payment.amount, c))));
                    close_payments();
                    refresh();
                }
                Err(err) => payment_editor.update(|e| {
                    if let Some(e) = e {
                        e.fail(&err, "Failed to record payment");
                    }
                }),
            }
        });
    };

    let money = move |amount: f64| currency.with(|c| format::money(amount, c));

    let row = move |invoice: Invoice| {
        let overdue = invoice.status == InvoiceStatus::Overdue;
        let send_id = invoice.can_send().then(|| invoice.id.clone());
        let cancel_target = invoice
            .can_cancel()
            .then(|| (invoice.id.clone(), invoice.invoice_number.clone()));
        let for_payments = invoice.clone();
        view! {
            <tr>
                <td class="font-mono">{invoice.invoice_number}</td>
                <td>{invoice.customer_name.unwrap_or_else(|| "-".to_string())}</td>
                <td class="whitespace-nowrap">{format::date(invoice.invoice_date)}</td>
                <td class="whitespace-nowrap" class:text-error=overdue>{format::date(invoice.due_date)}</td>
                <td><span class=format!("{} badge-sm", invoice.status.badge_class())>{invoice.status.label()}</span></td>
                <td class="text-right font-mono">{money(invoice.total_amount)}</td>
                <td class="text-right font-mono">{money(invoice.total_paid)}</td>
                <td class="text-right font-mono font-semibold">{money(invoice.balance_due)}</td>
                <td class="text-right whitespace-nowrap">
                    {send_id.map(|id| view! {
                        <button
                            class="btn btn-ghost btn-sm btn-square"
                            title="Send"
                            on:click=move |_| send(id.clone())
                        >
                            <SendHorizontal attr:class="h-4 w-4" />
                        </button>
                    })}
                    <button
                        class="btn btn-ghost btn-sm btn-square"
                        title="Payments"
                        on:click=move |_| open_payments(for_payments.clone())
                    >
                        <Banknote attr:class="h-4 w-4" />
                    </button>
                    {cancel_target.map(|(id, number)| view! {
                        <button
                            class="btn btn-ghost btn-sm btn-square text-error"
                            title="Cancel"
                            on:click=move |_| {
                                cancel_confirm.update(|c| {
                                    c.request(
                                        format!("Cancel invoice {number}? It can no longer be sent or paid."),
                                        id.clone(),
                                    )
                                })
                            }
                        >
                            <Ban attr:class="h-4 w-4" />
                        </button>
                    })}
                </td>
            </tr>
        }
    };

    let mut tabs = vec![(None, "All")];
    tabs.extend(InvoiceStatus::ALL.into_iter().map(|s| (Some(s), s.label())));

    view! {
        <PageHeader
            title="Invoices"
            subtitle="Billing status across customers"
            loading=page.is_loading()
            on_refresh=Callback::new(move |_: ()| refresh())
        />
        <ErrorBanner error=page.error() />

        {move || stats.get().map(|s| view! {
            <div class="stats stats-vertical md:stats-horizontal shadow w-full mb-6">
                <div class="stat">
                    <div class="stat-title">"Invoices"</div>
                    <div class="stat-value text-2xl">{s.total_invoices}</div>
                    <div class="stat-desc">{format!("{} draft, {} sent", s.draft_count, s.sent_count)}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Paid"</div>
                    <div class="stat-value text-2xl text-success">{s.paid_count}</div>
                    <div class="stat-desc">{format!("{} this month", money(s.total_paid_this_month))}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Overdue"</div>
                    <div class="stat-value text-2xl text-error">{s.overdue_count}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Outstanding"</div>
                    <div class="stat-value text-2xl">{money(s.total_outstanding)}</div>
                </div>
            </div>
        })}

        <Tabs tabs=tabs active=tab count=count />

        <div class="card bg-base-100 shadow">
            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Number"</th>
                            <th>"Customer"</th>
                            <th>"Date"</th>
                            <th>"Due"</th>
                            <th>"Status"</th>
                            <th class="text-right">"Total"</th>
                            <th class="text-right">"Paid"</th>
                            <th class="text-right">"Balance"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <TableStatus
                            colspan=9
                            spinner=page.show_spinner()
                            empty=Signal::derive(move || visible.with(Vec::is_empty))
                            empty_text="No invoices in this view."
                        />
                        {move || visible.get().into_iter().map(row).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>

        <Modal
            open=Signal::derive(move || payments_for.with(Option::is_some))
            title=Signal::derive(move || {
                payments_for.with(|i| {
                    i.as_ref().map(|i| format!("Payments for {}", i.invoice_number)).unwrap_or_default()
                })
            })
            on_close=move |_| close_payments()
            wide=true
        >
            <PaymentHistory payments=payments />
            <Show
                when=move || payment_editor.with(Option::is_some)
                fallback=move || view! {
                    <div class="flex justify-end pt-4">
                        <button type="button" class="btn" on:click=move |_| close_payments()>"Close"</button>
                    </div>
                }
            >
                <PaymentForm editor=payment_editor accounts=accounts on_submit=move |_| record_payment() />
            </Show>
        </Modal>
        <ConfirmDialog
            state=cancel_confirm
            on_confirm=move |id: String| cancel(id)
            confirm_label="Cancel invoice"
        />
    }
}

#[component]
fn PaymentHistory(payments: RwSignal<Option<Vec<InvoicePayment>>>) -> impl IntoView {
    let currency = use_session().currency();
    let row = move |p: InvoicePayment| {
        view! {
            <tr>
                <td class="whitespace-nowrap">{format::date(p.payment_date)}</td>
                <td>{p.payment_method.label()}</td>
                <td>{p.account_name.unwrap_or_default()}</td>
                <td class="font-mono text-xs">{p.reference_number.unwrap_or_default()}</td>
                <td class="text-right font-mono">{currency.with(|c| format::money(p.amount, c))}</td>
            </tr>
        }
    };

    view! {
        <div class="overflow-x-auto mb-4">
            <table class="table table-sm">
                <thead>
                    <tr>
                        <th>"Date"</th>
                        <th>"Method"</th>
                        <th>"Account"</th>
                        <th>"Reference"</th>
                        <th class="text-right">"Amount"</th>
                    </tr>
                </thead>
                <tbody>
                    <TableStatus
                        colspan=5
                        spinner=Signal::derive(move || payments.with(Option::is_none))
                        empty=Signal::derive(move || payments.with(|p| p.as_ref().is_some_and(Vec::is_empty)))
                        empty_text="No payments recorded yet."
                    />
                    {move || payments.get().unwrap_or_default().into_iter().map(row).collect_view()}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn PaymentForm(
    editor: PaymentEditor,
    accounts: Signal<Vec<Account>>,
    #[prop(into)] on_submit: Callback<()>,
) -> impl IntoView {
    let currency = use_session().currency();
    let amount = draft_field(
        editor,
        |d| Some(d.payment.amount).filter(|a| *a != 0.0),
        |d: &mut RecordPayment, v: Option<f64>| d.payment.amount = v.unwrap_or(0.0),
    );
    let date = draft_field(
        editor,
        |d| d.payment.payment_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        |d: &mut RecordPayment, v: String| d.payment.payment_date = parse_date(&v),
    );
    let method = draft_field(
        editor,
        |d| d.payment.payment_method.as_str().to_string(),
        |d: &mut RecordPayment, v: String| {
            if let Some(m) = PaymentMethod::parse(&v) {
                d.payment.payment_method = m;
            }
        },
    );
    let account = draft_field(
        editor,
        |d| d.payment.account_id.clone(),
        |d: &mut RecordPayment, v| d.payment.account_id = v,
    );
    let reference = draft_field(
        editor,
        |d| text_of(&d.payment.reference_number),
        |d: &mut RecordPayment, v| d.payment.reference_number = optional_text(v),
    );
    let notes = draft_field(
        editor,
        |d| text_of(&d.payment.notes),
        |d: &mut RecordPayment, v| d.payment.notes = optional_text(v),
    );

    let balance = Signal::derive(move || {
        let due = editor.with(|e| e.as_ref().map(|e| e.draft.balance_due).unwrap_or_default());
        currency.with(|c| format!("Balance due: {}", format::money(due, c)))
    });
    let method_options = Signal::stored(
        PaymentMethod::ALL
            .iter()
            .map(|m| (m.as_str().to_string(), m.label().to_string()))
            .collect::<Vec<_>>(),
    );
    let account_options = Signal::derive(move || {
        accounts.with(|items| {
            items
                .iter()
                .filter(|a| a.is_active)
                .map(|a| (a.id.clone(), a.name.clone()))
                .collect::<Vec<_>>()
        })
    });

    view! {
        <form
            class="space-y-2 border-t border-base-300 pt-4"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <div class="flex items-center justify-between">
                <h4 class="font-semibold">"Record payment"</h4>
                <span class="text-sm text-base-content/60">{move || balance.get()}</span>
            </div>
            <div class="grid md:grid-cols-3 gap-3">
                <NumberField label="Amount" field=amount required=true />
                <TextField label="Date" field=date input_type="date" required=true />
                <SelectField label="Method" field=method options=method_options />
            </div>
            <div class="grid md:grid-cols-2 gap-3">
                <SelectField label="Deposit to" field=account options=account_options empty_label="Select an account" />
                <TextField label="Reference" field=reference max_len=100 />
            </div>
            <TextAreaField label="Notes" field=notes />
            <FormFooter
                error=editor_error(editor)
                saving=editor_saving(editor)
                on_cancel=move |_| editor.set(None)
                submit_label="Record payment"
            />
        </form>
    }
}
