use ledger_shared::crud::Editor;
use ledger_shared::models::{Category, CategoryDraft, TransactionType};
use ledger_shared::protocol::{NoFilter, Resource};
use leptos::prelude::*;

use super::crud::{
    ErrorBanner, PageHeader, ResourcePage, TableStatus, Tabs, editor_error, editor_saving,
    editor_title,
};
use super::form::{
    CheckboxField, FormFooter, SelectField, TextAreaField, TextField, draft_field, optional_text,
    text_of,
};
use super::icons::{Pencil, Trash2};
use super::modal::{ConfirmDialog, Modal};

type CategoryEditor = RwSignal<Option<Editor<CategoryDraft>>>;

const DEFAULT_COLOR: &str = "#3b82f6";

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let page = ResourcePage::<Category>::new(NoFilter);
    let editor: CategoryEditor = RwSignal::new(None);
    let tab = RwSignal::new(Option::<TransactionType>::None);
    let (visible, count) = page.tabbed(tab, |c| c.transaction_type);

    // 新建时沿用当前标签页的收支类型
    let open_create = move |_: ()| {
        let mut draft = CategoryDraft::default();
        if let Some(kind) = tab.get_untracked() {
            draft.transaction_type = kind;
        }
        editor.set(Some(Editor::create(draft)));
    };

    let row = move |category: Category| {
        let for_edit = category.clone();
        let id = category.id.clone();
        let name = category.name.clone();
        let swatch = format!(
            "background-color: {}",
            category.color.as_deref().unwrap_or(DEFAULT_COLOR)
        );
        let badge = match category.transaction_type {
            TransactionType::Income => "badge badge-success badge-outline",
            TransactionType::Expense => "badge badge-error badge-outline",
        };
        view! {
            <tr class:opacity-50={!category.is_active}>
                <td>
                    <div class="flex items-center gap-3">
                        <span class="inline-block w-4 h-4 rounded-full" style=swatch></span>
                        <div>
                            <div class="font-medium">{category.name}</div>
                            <div class="text-xs text-base-content/60">{category.description.unwrap_or_default()}</div>
                        </div>
                    </div>
                </td>
                <td><span class=badge>{category.transaction_type.label()}</span></td>
                <td>{category.icon.unwrap_or_default()}</td>
                <td class="text-right whitespace-nowrap">
                    <button
                        class="btn btn-ghost btn-sm btn-square"
                        title="Edit"
                        on:click=move |_| {
                            editor.set(Some(Editor::edit(for_edit.id.clone(), CategoryDraft::from(&for_edit))))
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
            title="Categories"
            subtitle="Group income and expense transactions"
            loading=page.is_loading()
            on_refresh=Callback::new(move |_: ()| page.reload())
            on_create=Callback::new(open_create)
            create_label="New category"
        />
        <ErrorBanner error=page.error() />
        <Tabs
            tabs=vec![
                (None, "All"),
                (Some(TransactionType::Income), "Income"),
                (Some(TransactionType::Expense), "Expense"),
            ]
            active=tab
            count=count
        />

        <div class="card bg-base-100 shadow">
            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Type"</th>
                            <th>"Icon"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <TableStatus
                            colspan=4
                            spinner=page.show_spinner()
                            empty=Signal::derive(move || visible.with(Vec::is_empty))
                            empty_text="No categories in this view."
                        />
                        {move || visible.get().into_iter().map(row).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>

        <Modal
            open=Signal::derive(move || editor.with(Option::is_some))
            title=editor_title(editor, Category::LABEL)
            on_close=move |_| editor.set(None)
        >
            <CategoryForm editor=editor on_submit=move |_| page.save(editor) />
        </Modal>
        <ConfirmDialog state=page.confirm on_confirm=move |id: String| page.delete(id) />
    }
}

#[component]
fn CategoryForm(editor: CategoryEditor, #[prop(into)] on_submit: Callback<()>) -> impl IntoView {
    let name = draft_field(editor, |d| d.name.clone(), |d: &mut CategoryDraft, v| d.name = v);
    let transaction_type = draft_field(
        editor,
        |d| d.transaction_type.as_str().to_string(),
        |d: &mut CategoryDraft, v: String| {
            if let Some(t) = TransactionType::parse(&v) {
                d.transaction_type = t;
            }
        },
    );
    let color = draft_field(
        editor,
        |d| d.color.clone().unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        |d: &mut CategoryDraft, v: String| d.color = Some(v),
    );
    let icon = draft_field(
        editor,
        |d| text_of(&d.icon),
        |d: &mut CategoryDraft, v| d.icon = optional_text(v),
    );
    let description = draft_field(
        editor,
        |d| text_of(&d.description),
        |d: &mut CategoryDraft, v| d.description = optional_text(v),
    );
    let is_active = draft_field(editor, |d| d.is_active, |d: &mut CategoryDraft, v| d.is_active = v);

    let type_options = Signal::stored(
        [TransactionType::Income, TransactionType::Expense]
            .iter()
            .map(|t| (t.as_str().to_string(), t.label().to_string()))
            .collect::<Vec<_>>(),
    );

    view! {
        <form
            class="space-y-2"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <TextField label="Name" field=name required=true max_len=255 />
            <SelectField label="Type" field=transaction_type options=type_options />
            <div class="grid grid-cols-[auto_1fr] gap-3 items-end">
                <label class="form-control">
                    <div class="label"><span class="label-text">"Color"</span></div>
                    <input
                        type="color"
                        class="w-14 h-12 rounded cursor-pointer bg-transparent"
                        prop:value=move || color.value.get()
                        on:input=move |ev| color.set.run(event_target_value(&ev))
                    />
                </label>
                <TextField label="Icon" field=icon placeholder="e.g. shopping-cart" max_len=50 />
            </div>
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
