use ledger_shared::crud::Editor;
use ledger_shared::models::{Account, AccountDraft, AccountType};
use ledger_shared::protocol::{NoFilter, Resource};
use leptos::prelude::*;

use super::crud::{
    ErrorBanner, PageHeader, ResourcePage, TableStatus, editor_error, editor_saving, editor_title,
};
use super::format;
use super::form::{
    CheckboxField, FormFooter, NumberField, SelectField, TextAreaField, TextField, draft_field,
    optional_text, text_of,
};
use super::icons::{Pencil, Trash2};
use super::modal::{ConfirmDialog, Modal};
use crate::auth::use_session;

type AccountEditor = RwSignal<Option<Editor<AccountDraft>>>;

#[component]
pub fn AccountsPage() -> impl IntoView {
    let page = ResourcePage::<Account>::new(NoFilter);
    let editor: AccountEditor = RwSignal::new(None);
    let currency = use_session().currency();
    let items = page.items();

    let open_create = move |_: ()| editor.set(Some(Editor::create(AccountDraft::default())));

    let row = move |account: Account| {
        let for_edit = account.clone();
        let id = account.id.clone();
        let name = account.name.clone();
        view! {
            <tr>
                <td>
                    <div class="font-medium">{account.name}</div>
                    <div class="text-xs text-base-content/60">
                        {account.bank_name.unwrap_or_default()} " " {account.account_number.unwrap_or_default()}
                    </div>
                </td>
                <td><span class="badge badge-ghost">{account.account_type.label()}</span></td>
                <td class="text-right font-mono">
                    {currency.with(|c| format::money(account.current_balance, c))}
                </td>
                <td>
                    {if account.is_active {
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
                            editor.set(Some(Editor::edit(for_edit.id.clone(), AccountDraft::from(&for_edit))))
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
            title="Accounts"
            subtitle="Cash, bank and mobile money accounts"
            loading=page.is_loading()
            on_refresh=Callback::new(move |_: ()| page.reload())
            on_create=Callback::new(open_create)
            create_label="New account"
        />
        <ErrorBanner error=page.error() />

        <div class="card bg-base-100 shadow">
            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Type"</th>
                            <th class="text-right">"Balance"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <TableStatus
                            colspan=5
                            spinner=page.show_spinner()
                            empty=Signal::derive(move || items.with(Vec::is_empty))
                            empty_text="No accounts yet. Create one to start recording transactions."
                        />
                        {move || items.get().into_iter().map(row).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>

        <Modal
            open=Signal::derive(move || editor.with(Option::is_some))
            title=editor_title(editor, Account::LABEL)
            on_close=move |_| editor.set(None)
        >
            <AccountForm editor=editor on_submit=move |_| page.save(editor) />
        </Modal>
        <ConfirmDialog state=page.confirm on_confirm=move |id: String| page.delete(id) />
    }
}

#[component]
fn AccountForm(editor: AccountEditor, #[prop(into)] on_submit: Callback<()>) -> impl IntoView {
    let name = draft_field(editor, |d| d.name.clone(), |d: &mut AccountDraft, v| d.name = v);
    let account_type = draft_field(
        editor,
        |d| d.account_type.as_str().to_string(),
        |d: &mut AccountDraft, v: String| {
            if let Some(t) = AccountType::parse(&v) {
                d.account_type = t;
            }
        },
    );
    let account_number = draft_field(
        editor,
        |d| text_of(&d.account_number),
        |d: &mut AccountDraft, v| d.account_number = optional_text(v),
    );
    let bank_name = draft_field(
        editor,
        |d| text_of(&d.bank_name),
        |d: &mut AccountDraft, v| d.bank_name = optional_text(v),
    );
    let opening_balance = draft_field(
        editor,
        |d| Some(d.opening_balance),
        |d: &mut AccountDraft, v: Option<f64>| d.opening_balance = v.unwrap_or(0.0),
    );
    let description = draft_field(
        editor,
        |d| text_of(&d.description),
        |d: &mut AccountDraft, v| d.description = optional_text(v),
    );
    let is_active = draft_field(editor, |d| d.is_active, |d: &mut AccountDraft, v| d.is_active = v);

    let type_options = Signal::stored(
        AccountType::ALL
            .iter()
            .map(|t| (t.as_str().to_string(), t.label().to_string()))
            .collect::<Vec<_>>(),
    );
    let has_provider = Signal::derive(move || account_type.value.get() != AccountType::Cash.as_str());

    view! {
        <form
            class="space-y-2"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <TextField label="Name" field=name required=true max_len=255 />
            <SelectField label="Type" field=account_type options=type_options />
            <Show when=move || has_provider.get()>
                <div class="grid grid-cols-2 gap-3">
                    <TextField label="Bank or provider" field=bank_name />
                    <TextField label="Account number" field=account_number max_len=100 />
                </div>
            </Show>
            <NumberField label="Opening balance" field=opening_balance />
            <TextAreaField label="Description" field=description />
            <CheckboxField label="Active" field=is_active />
            <FormFooter
                error=editor_error(editor)
                saving=editor_saving(editor)
                on_cancel=move |_| editor.set(None)
            />
        </form>
    }
}
