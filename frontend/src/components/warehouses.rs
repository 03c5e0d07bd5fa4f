use ledger_shared::crud::Editor;
use ledger_shared::models::{Warehouse, WarehouseDraft};
use ledger_shared::protocol::{NoFilter, Resource};
use leptos::prelude::*;

use super::crud::{
    ErrorBanner, PageHeader, ResourcePage, TableStatus, editor_error, editor_saving, editor_title,
};
use super::form::{
    CheckboxField, FormFooter, TextAreaField, TextField, draft_field, optional_text, text_of,
};
use super::icons::{Pencil, Power, Trash2};
use super::modal::{ConfirmDialog, Modal};

type WarehouseEditor = RwSignal<Option<Editor<WarehouseDraft>>>;

#[component]
pub fn WarehousesPage() -> impl IntoView {
    let page = ResourcePage::<Warehouse>::new(NoFilter);
    let editor: WarehouseEditor = RwSignal::new(None);
    let items = page.items();

    let open_create = move |_: ()| editor.set(Some(Editor::create(WarehouseDraft::default())));

    let row = move |warehouse: Warehouse| {
        let location = warehouse.location();
        let for_edit = warehouse.clone();
        let id = warehouse.id.clone();
        let activate_id = warehouse.id.clone();
        let name = warehouse.name.clone();
        view! {
            <tr class:opacity-60={!warehouse.is_active}>
                <td>
                    <div class="flex items-center gap-2 font-medium">
                        {warehouse.name}
                        {warehouse.is_default.then(|| view! { <span class="badge badge-primary badge-sm">"Default"</span> })}
                    </div>
                    <div class="text-xs text-base-content/60">{warehouse.description.unwrap_or_default()}</div>
                </td>
                <td class="font-mono text-sm">{warehouse.code.unwrap_or_default()}</td>
                <td>{location}</td>
                <td>
                    {if warehouse.is_active {
                        view! { <span class="badge badge-success badge-sm">"Active"</span> }.into_any()
                    } else {
                        view! { <span class="badge badge-ghost badge-sm">"Inactive"</span> }.into_any()
                    }}
                </td>
                <td class="text-right whitespace-nowrap">
                    {(!warehouse.is_active).then(|| view! {
                        <button
                            class="btn btn-ghost btn-sm btn-square text-success"
                            title="Activate"
                            on:click=move |_| page.activate(activate_id.clone())
                        >
                            <Power attr:class="h-4 w-4" />
                        </button>
                    })}
                    <button
                        class="btn btn-ghost btn-sm btn-square"
                        title="Edit"
                        on:click=move |_| {
                            editor.set(Some(Editor::edit(for_edit.id.clone(), WarehouseDraft::from(&for_edit))))
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
            title="Warehouses"
            subtitle="Stock locations for tracked products"
            loading=page.is_loading()
            on_refresh=Callback::new(move |_: ()| page.reload())
            on_create=Callback::new(open_create)
            create_label="New warehouse"
        />
        <ErrorBanner error=page.error() />

        <div class="card bg-base-100 shadow">
            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Code"</th>
                            <th>"Location"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <TableStatus
                            colspan=5
                            spinner=page.show_spinner()
                            empty=Signal::derive(move || items.with(Vec::is_empty))
                            empty_text="No warehouses yet."
                        />
                        {move || items.get().into_iter().map(row).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>

        <Modal
            open=Signal::derive(move || editor.with(Option::is_some))
            title=editor_title(editor, Warehouse::LABEL)
            on_close=move |_| editor.set(None)
        >
            <WarehouseForm editor=editor on_submit=move |_| page.save(editor) />
        </Modal>
        <ConfirmDialog state=page.confirm on_confirm=move |id: String| page.delete(id) />
    }
}

/// 可选文本字段的绑定
macro_rules! optional_field {
    ($editor:expr, $field:ident) => {
        draft_field(
            $editor,
            |d| text_of(&d.$field),
            |d: &mut WarehouseDraft, v| d.$field = optional_text(v),
        )
    };
}

#[component]
fn WarehouseForm(editor: WarehouseEditor, #[prop(into)] on_submit: Callback<()>) -> impl IntoView {
    let name = draft_field(editor, |d| d.name.clone(), |d: &mut WarehouseDraft, v| d.name = v);
    let code = optional_field!(editor, code);
    let description = optional_field!(editor, description);
    let address = optional_field!(editor, address);
    let city = optional_field!(editor, city);
    let state = optional_field!(editor, state);
    let postal_code = optional_field!(editor, postal_code);
    let country = optional_field!(editor, country);
    let is_default = draft_field(editor, |d| d.is_default, |d: &mut WarehouseDraft, v| d.is_default = v);
    let is_active = draft_field(editor, |d| d.is_active, |d: &mut WarehouseDraft, v| d.is_active = v);

    view! {
        <form
            class="space-y-2"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <div class="grid grid-cols-3 gap-3">
                <div class="col-span-2">
                    <TextField label="Name" field=name required=true max_len=100 />
                </div>
                <TextField label="Code" field=code max_len=20 />
            </div>
            <TextAreaField label="Description" field=description />
            <TextField label="Address" field=address />
            <div class="grid grid-cols-2 gap-3">
                <TextField label="City" field=city />
                <TextField label="State / Province" field=state />
                <TextField label="Postal code" field=postal_code max_len=20 />
                <TextField label="Country" field=country />
            </div>
            <CheckboxField label="Default warehouse" field=is_default />
            <CheckboxField label="Active" field=is_active />
            <FormFooter
                error=editor_error(editor)
                saving=editor_saving(editor)
                on_cancel=move |_| editor.set(None)
            />
        </form>
    }
}
