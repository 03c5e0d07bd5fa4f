use ledger_shared::crud::Editor;
use ledger_shared::models::{Category, Product, ProductDraft, ProductType, TaxRate};
use ledger_shared::protocol::{NoFilter, Resource};
use leptos::prelude::*;

use super::crud::{
    ErrorBanner, PageHeader, ResourcePage, TableStatus, Tabs, editor_error, editor_saving,
    editor_title,
};
use super::format;
use super::form::{
    CheckboxField, FormFooter, NumberField, SelectField, TextAreaField, TextField, draft_field,
    optional_text, text_of,
};
use super::icons::{Pencil, Power, Trash2};
use super::modal::{ConfirmDialog, Modal};
use crate::auth::use_session;

type ProductEditor = RwSignal<Option<Editor<ProductDraft>>>;

#[component]
pub fn ProductsPage() -> impl IntoView {
    let page = ResourcePage::<Product>::new(NoFilter);
    let editor: ProductEditor = RwSignal::new(None);
    let tab = RwSignal::new(Option::<ProductType>::None);
    let (visible, count) = page.tabbed(tab, |p| p.product_type);
    let currency = use_session().currency();

    // 表单下拉框的选项
    let tax_rates = ResourcePage::<TaxRate>::new(NoFilter).items();
    let categories = ResourcePage::<Category>::new(NoFilter).items();

    let open_create = move |_: ()| {
        let mut draft = ProductDraft::default();
        if let Some(kind) = tab.get_untracked() {
            draft.product_type = kind;
        }
        editor.set(Some(Editor::create(draft)));
    };

    let row = move |product: Product| {
        let low_stock = product.is_low_stock();
        let for_edit = product.clone();
        let id = product.id.clone();
        let activate_id = product.id.clone();
        let name = product.name.clone();
        let stock = if product.track_inventory {
            product
                .stock_quantity
                .map(|q| q.to_string())
                .unwrap_or_else(|| "0".to_string())
        } else {
            "-".to_string()
        };
        view! {
            <tr class:opacity-60={!product.is_active}>
                <td>
                    <div class="font-medium">{product.name}</div>
                    <div class="text-xs text-base-content/60 font-mono">{product.sku.unwrap_or_default()}</div>
                </td>
                <td><span class="badge badge-ghost">{product.product_type.label()}</span></td>
                <td>{product.category_name.unwrap_or_default()}</td>
                <td class="text-right font-mono">
                    {currency.with(|c| format::money(product.unit_price, c))}
                </td>
                <td>{product.tax_rate_name.unwrap_or_default()}</td>
                <td class="text-right">
                    <span class="font-mono">{stock}</span>
                    {low_stock.then(|| view! { <span class="badge badge-warning badge-sm ml-2">"Low"</span> })}
                </td>
                <td class="text-right whitespace-nowrap">
                    {(!product.is_active).then(|| view! {
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
                            editor.set(Some(Editor::edit(for_edit.id.clone(), ProductDraft::from(&for_edit))))
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
            title="Products & Services"
            subtitle="Items you sell or buy, with pricing and stock levels"
            loading=page.is_loading()
            on_refresh=Callback::new(move |_: ()| page.reload())
            on_create=Callback::new(open_create)
            create_label="New product"
        />
        <ErrorBanner error=page.error() />
        <Tabs
            tabs=vec![
                (None, "All"),
                (Some(ProductType::Product), "Products"),
                (Some(ProductType::Service), "Services"),
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
                            <th>"Category"</th>
                            <th class="text-right">"Unit price"</th>
                            <th>"Tax"</th>
                            <th class="text-right">"Stock"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <TableStatus
                            colspan=7
                            spinner=page.show_spinner()
                            empty=Signal::derive(move || visible.with(Vec::is_empty))
                            empty_text="No products in this view."
                        />
                        {move || visible.get().into_iter().map(row).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>

        <Modal
            open=Signal::derive(move || editor.with(Option::is_some))
            title=editor_title(editor, Product::LABEL)
            on_close=move |_| editor.set(None)
            wide=true
        >
            <ProductForm
                editor=editor
                tax_rates=tax_rates
                categories=categories
                on_submit=move |_| page.save(editor)
            />
        </Modal>
        <ConfirmDialog state=page.confirm on_confirm=move |id: String| page.delete(id) />
    }
}

#[component]
fn ProductForm(
    editor: ProductEditor,
    tax_rates: Signal<Vec<TaxRate>>,
    categories: Signal<Vec<Category>>,
    #[prop(into)] on_submit: Callback<()>,
) -> impl IntoView {
    let name = draft_field(editor, |d| d.name.clone(), |d: &mut ProductDraft, v| d.name = v);
    let product_type = draft_field(
        editor,
        |d| d.product_type.as_str().to_string(),
        |d: &mut ProductDraft, v: String| {
            if let Some(t) = ProductType::parse(&v) {
                d.product_type = t;
                // 服务没有库存
                if t == ProductType::Service {
                    d.track_inventory = false;
                }
            }
        },
    );
    let sku = draft_field(editor, |d| text_of(&d.sku), |d: &mut ProductDraft, v| d.sku = optional_text(v));
    let description = draft_field(
        editor,
        |d| text_of(&d.description),
        |d: &mut ProductDraft, v| d.description = optional_text(v),
    );
    let unit_price = draft_field(
        editor,
        |d| Some(d.unit_price),
        |d: &mut ProductDraft, v: Option<f64>| d.unit_price = v.unwrap_or(0.0),
    );
    let cost_price = draft_field(editor, |d| d.cost_price, |d: &mut ProductDraft, v| d.cost_price = v);
    let tax_rate_id = draft_field(
        editor,
        |d| text_of(&d.tax_rate_id),
        |d: &mut ProductDraft, v| d.tax_rate_id = optional_text(v),
    );
    let category_id = draft_field(
        editor,
        |d| text_of(&d.category_id),
        |d: &mut ProductDraft, v| d.category_id = optional_text(v),
    );
    let track_inventory = draft_field(
        editor,
        |d| d.track_inventory,
        |d: &mut ProductDraft, v| d.track_inventory = v,
    );
    let stock_quantity = draft_field(
        editor,
        |d| d.stock_quantity,
        |d: &mut ProductDraft, v| d.stock_quantity = v,
    );
    let low_stock_threshold = draft_field(
        editor,
        |d| d.low_stock_threshold,
        |d: &mut ProductDraft, v| d.low_stock_threshold = v,
    );
    let is_active = draft_field(editor, |d| d.is_active, |d: &mut ProductDraft, v| d.is_active = v);

    let type_options = Signal::stored(
        [ProductType::Product, ProductType::Service]
            .iter()
            .map(|t| (t.as_str().to_string(), t.label().to_string()))
            .collect::<Vec<_>>(),
    );
    let tax_options = Signal::derive(move || {
        tax_rates.with(|rates| {
            rates
                .iter()
                .filter(|r| r.is_active)
                .map(|r| (r.id.clone(), format!("{} ({})", r.name, format::percent(r.rate))))
                .collect::<Vec<_>>()
        })
    });
    let category_options = Signal::derive(move || {
        categories.with(|cats| {
            cats.iter()
                .filter(|c| c.is_active)
                .map(|c| (c.id.clone(), format!("{} ({})", c.name, c.transaction_type.label())))
                .collect::<Vec<_>>()
        })
    });
    let is_product = Signal::derive(move || product_type.value.get() == ProductType::Product.as_str());

    view! {
        <form
            class="space-y-2"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <div class="grid md:grid-cols-2 gap-3">
                <TextField label="Name" field=name required=true max_len=255 />
                <SelectField label="Type" field=product_type options=type_options />
                <TextField label="SKU" field=sku max_len=100 />
                <SelectField label="Category" field=category_id options=category_options empty_label="No category" />
                <NumberField label="Unit price" field=unit_price required=true />
                <NumberField label="Cost price" field=cost_price />
                <SelectField label="Tax rate" field=tax_rate_id options=tax_options empty_label="No tax" />
            </div>
            <TextAreaField label="Description" field=description />
            <Show when=move || is_product.get()>
                <CheckboxField label="Track inventory" field=track_inventory />
                <Show when=move || track_inventory.value.get()>
                    <div class="grid grid-cols-2 gap-3">
                        <NumberField label="Stock quantity" field=stock_quantity />
                        <NumberField label="Low stock threshold" field=low_stock_threshold />
                    </div>
                </Show>
            </Show>
            <CheckboxField label="Active" field=is_active />
            <FormFooter
                error=editor_error(editor)
                saving=editor_saving(editor)
                on_cancel=move |_| editor.set(None)
            />
        </form>
    }
}
