use ledger_shared::crud::Editor;
use ledger_shared::models::{TaxRate, TaxRateDraft};
use ledger_shared::protocol::{NoFilter, Resource};
use leptos::prelude::*;

use super::crud::{
    ErrorBanner, PageHeader, ResourcePage, TableStatus, Tabs, editor_error, editor_saving,
    editor_title,
};
use super::format;
use super::form::{
    CheckboxField, FormFooter, NumberField, TextAreaField, TextField, draft_field, optional_text,
    text_of,
};
use super::icons::{Pencil, Trash2};
use super::modal::{ConfirmDialog, Modal};

type TaxRateEditor = RwSignal<Option<Editor<TaxRateDraft>>>;

#[component]
pub fn TaxRatesPage() -> impl IntoView {
    let page = ResourcePage::<TaxRate>::new(NoFilter);
    let editor: TaxRateEditor = RwSignal::new(None);
    let tab = RwSignal::new(Option::<bool>::None);
    let (visible, count) = page.tabbed(tab, |t| t.is_active);

    let open_create = move |_: ()| editor.set(Some(Editor::create(TaxRateDraft::default())));

    let row = move |rate: TaxRate| {
        let for_edit = rate.clone();
        let id = rate.id.clone();
        let name = rate.name.clone();
        let applies = match (rate.applies_to_income, rate.applies_to_expense) {
            (true, true) => "Income and expense",
            (true, false) => "Income",
            (false, true) => "Expense",
            (false, false) => "None",
        };
        view! {
            <tr>
                <td>
                    <div class="font-medium">{rate.name}</div>
                    <div class="text-xs text-base-content/60">{rate.description.unwrap_or_default()}</div>
                </td>
                <td class="font-mono">{format::percent(rate.rate)}</td>
                <td>{applies}</td>
                <td>
                    {if rate.is_active {
                        view! { <span class="badge badge-success badge-sm">"Active"</span> }.into_any()
                    } else {
                        view! { <span class="badge badge-ghost badge-sm">"Inactive"</span> }.into_any()
                    }}
                </td>
                <td class="text-right whitespace-nowrap">
                    <button
                        class="btn btn-ghost btn-sm btn-square"
                        title="Edit"
                        on:click=move |_| {
                            editor.set(Some(Editor::edit(for_edit.id.clone(), TaxRateDraft::from(&for_edit))))
                        }
                    >
                        <Pencil attr:class="h-4 w-4" />
                    </button>
                    <button
                        class="btn btn-ghost btn-sm btn-square text-error"
                        title="Delete"
                        on:click=move |_| page.ask_delete(id.clone(), &name)
                    >
                        <Trash2 attr:class="h-4 w-4" />
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <PageHeader
            title="Tax Rates"
            subtitle="VAT and sales tax rates applied to products and invoices"
            loading=page.is_loading()
            on_refresh=Callback::new(move |_: ()| page.reload())
            on_create=Callback::new(open_create)
            create_label="New tax rate"
        />
        <ErrorBanner error=page.error() />
        <Tabs
            tabs=vec![(None, "All"), (Some(true), "Active"), (Some(false), "Inactive")]
            active=tab
            count=count
        />

        <div class="card bg-base-100 shadow">
            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Rate"</th>
                            <th>"Applies to"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <TableStatus
                            colspan=5
                            spinner=page.show_spinner()
                            empty=Signal::derive(move || visible.with(Vec::is_empty))
                            empty_text="No tax rates in this view."
                        />
                        {move || visible.get().into_iter().map(row).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>

        <Modal
            open=Signal::derive(move || editor.with(Option::is_some))
            title=editor_title(editor, TaxRate::LABEL)
            on_close=move |_| editor.set(None)
        >
            <TaxRateForm editor=editor on_submit=move |_| page.save(editor) />
        </Modal>
        <ConfirmDialog state=page.confirm on_confirm=move |id: String| page.delete(id) />
    }
}

#[component]
fn TaxRateForm(editor: TaxRateEditor, #[prop(into)] on_submit: Callback<()>) -> impl IntoView {
    let name = draft_field(editor, |d| d.name.clone(), |d: &mut TaxRateDraft, v| d.name = v);
    // 0 表示尚未填写，输入框显示为空
    let rate = draft_field(
        editor,
        |d| Some(d.rate).filter(|r| *r != 0.0),
        |d: &mut TaxRateDraft, v: Option<f64>| d.rate = v.unwrap_or(0.0),
    );
    let description = draft_field(
        editor,
        |d| text_of(&d.description),
        |d: &mut TaxRateDraft, v| d.description = optional_text(v),
    );
    let applies_to_income = draft_field(
        editor,
        |d| d.applies_to_income,
        |d: &mut TaxRateDraft, v| d.applies_to_income = v,
    );
    let applies_to_expense = draft_field(
        editor,
        |d| d.applies_to_expense,
        |d: &mut TaxRateDraft, v| d.applies_to_expense = v,
    );
    let is_active = draft_field(editor, |d| d.is_active, |d: &mut TaxRateDraft, v| d.is_active = v);

    view! {
        <form
            class="space-y-2"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <div class="grid grid-cols-2 gap-3">
                <TextField label="Name" field=name required=true placeholder="VAT" />
                <NumberField label="Rate (%)" field=rate required=true step="0.01" />
            </div>
            <TextAreaField label="Description" field=description />
            <CheckboxField label="Applies to income" field=applies_to_income />
            <CheckboxField label="Applies to expense" field=applies_to_expense />
            <CheckboxField label="Active" field=is_active />
            <FormFooter
                error=editor_error(editor)
                saving=editor_saving(editor)
                on_cancel=move |_| editor.set(None)
            />
        </form>
    }
}
