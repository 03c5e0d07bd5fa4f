//! 收支交易
//!
//! 列表跟随顶栏的财年：切换财年即按新的日期区间重新拉取。

use ledger_shared::crud::Editor;
use ledger_shared::date::parse_date;
use ledger_shared::models::{
    Account, Category, FiscalYear, Partner, Transaction, TransactionDraft, TransactionFilter,
    TransactionType,
};
use ledger_shared::protocol::{NoFilter, Resource};
use ledger_shared::UNCATEGORIZED_LABEL;
use leptos::prelude::*;

use super::crud::{
    ErrorBanner, PageHeader, ResourcePage, TableStatus, Tabs, editor_error, editor_saving,
    editor_title,
};
use super::format;
use super::form::{
    FormFooter, NumberField, SelectField, TextAreaField, TextField, draft_field, optional_text,
    text_of,
};
use super::icons::{Pencil, Trash2};
use super::modal::{ConfirmDialog, Modal};
use crate::auth::use_session;
use crate::config::use_config;
use crate::fiscal::use_fiscal;

type TransactionEditor = RwSignal<Option<Editor<TransactionDraft>>>;

fn year_filter(year: Option<&FiscalYear>, limit: u32) -> TransactionFilter {
    TransactionFilter {
        start_date: year.map(|y| y.start_date),
        end_date: year.map(|y| y.end_date),
        limit: Some(limit),
        ..TransactionFilter::default()
    }
}

/// 新交易的默认日期：今天落在财年内就用今天，否则用财年最后一天
fn default_date(year: Option<&FiscalYear>) -> Option<chrono::NaiveDate> {
    let today = format::today();
    match (year, today) {
        (Some(y), Some(t)) if t < y.start_date || t > y.end_date => Some(y.end_date),
        _ => today,
    }
}

fn name_of<T>(items: &[T], id: &str, key: fn(&T) -> (&str, &str)) -> Option<String> {
    items
        .iter()
        .map(key)
        .find(|(item_id, _)| *item_id == id)
        .map(|(_, name)| name.to_string())
}

#[component]
pub fn TransactionsPage() -> impl IntoView {
    let fiscal = use_fiscal();
    let limit = use_config().list_limit;
    let currency = use_session().currency();

    let page = ResourcePage::<Transaction>::new(year_filter(
        fiscal.selected().get_untracked().as_ref(),
        limit,
    ));
    Effect::new(move |_| {
        let next = fiscal.selected().with(|y| year_filter(y.as_ref(), limit));
        if page.filter.with_untracked(|f| *f != next) {
            page.filter.set(next);
        }
    });

    let editor: TransactionEditor = RwSignal::new(None);
    let tab = RwSignal::new(Option::<TransactionType>::None);
    let (visible, count) = page.tabbed(tab, |t| t.transaction_type);

    let accounts = ResourcePage::<Account>::new(NoFilter).items();
    let categories = ResourcePage::<Category>::new(NoFilter).items();
    let partners = ResourcePage::<Partner>::new(NoFilter).items();

    let open_create = move |_: ()| {
        let kind = tab.get_untracked().unwrap_or(TransactionType::Expense);
        let date = fiscal.selected().with_untracked(|y| default_date(y.as_ref()));
        editor.set(Some(Editor::create(TransactionDraft::new(kind, date))));
    };

    let row = move |tx: Transaction| {
        let for_edit = tx.clone();
        let id = tx.id.clone();
        let label = tx
            .description
            .clone()
            .unwrap_or_else(|| format!("{} on {}", tx.transaction_type.label(), format::date(tx.transaction_date)));
        let category = tx
            .category_name
            .clone()
            .or_else(|| {
                let id = tx.category_id.as_deref()?;
                categories.with(|items| name_of(items, id, |c: &Category| (c.id.as_str(), c.name.as_str())))
            })
            .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string());
        let account = accounts
            .with(|items| name_of(items, &tx.account_id, |a: &Account| (a.id.as_str(), a.name.as_str())))
            .unwrap_or_default();
        let (badge, sign, amount_class) = match tx.transaction_type {
            TransactionType::Income => ("badge badge-success badge-sm", "+", "text-success"),
            TransactionType::Expense => ("badge badge-error badge-sm", "-", "text-error"),
        };
        view! {
            <tr>
                <td class="whitespace-nowrap">{format::date(tx.transaction_date)}</td>
                <td>
                    <div class="font-medium">{tx.description.unwrap_or_default()}</div>
                    <div class="text-xs font-mono text-base-content/60">{tx.reference_number.unwrap_or_default()}</div>
                </td>
                <td><span class=badge>{tx.transaction_type.label()}</span></td>
                <td>{category}</td>
                <td>{account}</td>
                <td class=format!("text-right font-mono {amount_class}")>
                    {currency.with(|c| format!("{sign}{}", format::money(tx.amount, c)))}
                </td>
                <td class="text-right whitespace-nowrap">
                    <button
                        class="btn btn-ghost btn-sm btn-square"
                        title="Edit"
                        on:click=move |_| {
                            editor.set(Some(Editor::edit(for_edit.id.clone(), TransactionDraft::from(&for_edit))))
                        }
                    >
                        <Pencil attr:class="h-4 w-4" />
                    </button>
                    <button
                        class="btn btn-ghost btn-sm btn-square text-error"
                        title="Delete"
                        on:click=move |_| page.ask_delete(id.clone(), &label)
                    >
                        <Trash2 attr:class="h-4 w-4" />
                    </button>
                </td>
            </tr>
        }
    };

    let tabs = vec![
        (None, "All"),
        (Some(TransactionType::Income), "Income"),
        (Some(TransactionType::Expense), "Expense"),
    ];

    view! {
        <PageHeader
            title="Transactions"
            subtitle="Income and expenses in the selected fiscal year"
            loading=page.is_loading()
            on_refresh=Callback::new(move |_: ()| page.reload())
            on_create=Callback::new(open_create)
            create_label="New transaction"
        />
        <ErrorBanner error=page.error() />
        <Tabs tabs=tabs active=tab count=count />

        <div class="card bg-base-100 shadow">
            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Date"</th>
                            <th>"Description"</th>
                            <th>"Type"</th>
                            <th>"Category"</th>
                            <th>"Account"</th>
                            <th class="text-right">"Amount"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <TableStatus
                            colspan=7
                            spinner=page.show_spinner()
                            empty=Signal::derive(move || visible.with(Vec::is_empty))
                            empty_text="No transactions in this fiscal year."
                        />
                        {move || visible.get().into_iter().map(row).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>

        <Modal
            open=Signal::derive(move || editor.with(Option::is_some))
            title=editor_title(editor, Transaction::LABEL)
            on_close=move |_| editor.set(None)
        >
            <TransactionForm
                editor=editor
                accounts=accounts
                categories=categories
                partners=partners
                on_submit=move |_| page.save(editor)
            />
        </Modal>
        <ConfirmDialog state=page.confirm on_confirm=move |id: String| page.delete(id) />
    }
}

#[component]
fn TransactionForm(
    editor: TransactionEditor,
    accounts: Signal<Vec<Account>>,
    categories: Signal<Vec<Category>>,
    partners: Signal<Vec<Partner>>,
    #[prop(into)] on_submit: Callback<()>,
) -> impl IntoView {
    let kind = draft_field(
        editor,
        |d| d.transaction_type.as_str().to_string(),
        |d: &mut TransactionDraft, v: String| {
            if let Some(t) = TransactionType::parse(&v) {
                if t != d.transaction_type {
                    // 分类只能与交易同类型
                    d.category_id = None;
                }
                d.transaction_type = t;
            }
        },
    );
    let account = draft_field(editor, |d| d.account_id.clone(), |d: &mut TransactionDraft, v| d.account_id = v);
    let category = draft_field(
        editor,
        |d| text_of(&d.category_id),
        |d: &mut TransactionDraft, v| d.category_id = optional_text(v),
    );
    let partner = draft_field(
        editor,
        |d| text_of(&d.partner_id),
        |d: &mut TransactionDraft, v| d.partner_id = optional_text(v),
    );
    let amount = draft_field(
        editor,
        |d| Some(d.amount).filter(|a| *a != 0.0),
        |d: &mut TransactionDraft, v: Option<f64>| d.amount = v.unwrap_or(0.0),
    );
    let date = draft_field(
        editor,
        |d| d.transaction_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        |d: &mut TransactionDraft, v: String| d.transaction_date = parse_date(&v),
    );
    let description = draft_field(
        editor,
        |d| text_of(&d.description),
        |d: &mut TransactionDraft, v| d.description = optional_text(v),
    );
    let reference = draft_field(
        editor,
        |d| text_of(&d.reference_number),
        |d: &mut TransactionDraft, v| d.reference_number = optional_text(v),
    );

    let creating = Signal::derive(move || editor.with(|e| e.as_ref().is_some_and(|e| !e.is_edit())));
    let type_options = Signal::stored(
        [TransactionType::Income, TransactionType::Expense]
            .iter()
            .map(|t| (t.as_str().to_string(), t.label().to_string()))
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
    let category_options = Signal::derive(move || {
        let wanted = TransactionType::parse(&kind.value.get());
        categories.with(|items| {
            items
                .iter()
                .filter(|c| c.is_active && Some(c.transaction_type) == wanted)
                .map(|c| (c.id.clone(), c.name.clone()))
                .collect::<Vec<_>>()
        })
    });
    let partner_options = Signal::derive(move || {
        partners.with(|items| {
            items
                .iter()
                .map(|p| (p.id.clone(), p.name().to_string()))
                .collect::<Vec<_>>()
        })
    });

    view! {
        <form
            class="space-y-2"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <Show when=move || creating.get()>
                <SelectField label="Type" field=kind options=type_options />
            </Show>
            <div class="grid grid-cols-2 gap-3">
                <NumberField label="Amount" field=amount required=true />
                <TextField label="Date" field=date input_type="date" required=true />
            </div>
            <SelectField label="Account" field=account options=account_options empty_label="Select an account" />
            <div class="grid grid-cols-2 gap-3">
                <SelectField label="Category" field=category options=category_options empty_label=UNCATEGORIZED_LABEL />
                <SelectField label="Partner" field=partner options=partner_options empty_label="None" />
            </div>
            <TextAreaField label="Description" field=description />
            <TextField label="Reference" field=reference max_len=100 />
            <FormFooter
                error=editor_error(editor)
                saving=editor_saving(editor)
                on_cancel=move |_| editor.set(None)
            />
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year() -> FiscalYear {
        serde_json_wasm::from_str(
            r#"{"id":"fy","year_name":"FY","start_date":"2024-07-01","end_date":"2025-06-30","status":"open","is_current":true}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_year_filter_bounds_the_list() {
        let filter = year_filter(Some(&year()), 500);
        assert_eq!(filter.start_date, parse_date("2024-07-01"));
        assert_eq!(filter.end_date, parse_date("2025-06-30"));
        assert_eq!(filter.limit, Some(500));
        assert_eq!(year_filter(None, 500).start_date, None);
    }

    #[test]
    fn test_name_lookup() {
        let pairs = vec![("a".to_string(), "Till".to_string())];
        let key: fn(&(String, String)) -> (&str, &str) = |(id, name)| (id.as_str(), name.as_str());
        assert_eq!(name_of(&pairs, "a", key).as_deref(), Some("Till"));
        assert_eq!(name_of(&pairs, "b", key), None);
    }
}
