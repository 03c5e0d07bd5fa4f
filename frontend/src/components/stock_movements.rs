//! 库存变动
//!
//! 记录只读，按商品、仓库与类型在服务端过滤。新的变动通过库存调整或仓库调拨产生。

use ledger_shared::crud::{self, Editor};
use ledger_shared::date::parse_date;
use ledger_shared::models::{
    MovementType, Product, StockAdjustment, StockFilter, StockMovement, StockTransfer, Warehouse,
};
use ledger_shared::protocol::{ApiRequest, NoFilter};
use ledger_shared::validation::Validate;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::crud::{ErrorBanner, PageHeader, ResourcePage, TableStatus, editor_error, editor_saving};
use super::format;
use super::form::{
    Field, FormFooter, NumberField, SelectField, TextAreaField, TextField, draft_field, optional_text,
    text_of,
};
use super::icons::ArrowLeftRight;
use super::modal::Modal;
use super::toast::use_toast;
use crate::api::use_api;

type FormEditor<D> = RwSignal<Option<Editor<D>>>;

fn date_text(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// 提交调整或调拨；成功后关闭弹窗并刷新列表，失败时错误留在弹窗内
fn submit<D>(
    editor: FormEditor<D>,
    page: ResourcePage<StockMovement>,
    success: &'static str,
    fallback: &'static str,
) where
    D: ApiRequest + Validate + Clone + Send + Sync + 'static,
{
    let pending = editor
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

    let client = use_api().client();
    let toast = use_toast();
    spawn_local(async move {
        match crud::submit(&*client, &request).await {
            Ok(_) => {
                editor.set(None);
                toast.success(success);
                page.reload();
            }
            Err(err) => editor.update(|e| {
                if let Some(e) = e {
                    e.fail(&err, fallback);
                }
            }),
        }
    });
}

fn options<T>(items: Signal<Vec<T>>, entry: fn(&T) -> (String, String)) -> Signal<Vec<(String, String)>>
where
    T: Send + Sync + 'static,
{
    Signal::derive(move || items.with(|items| items.iter().map(entry).collect()))
}

#[component]
pub fn StockMovementsPage() -> impl IntoView {
    let page = ResourcePage::<StockMovement>::new(StockFilter::default());
    let items = page.items();
    let products = ResourcePage::<Product>::new(NoFilter).items();
    let warehouses = ResourcePage::<Warehouse>::new(NoFilter).items();

    let product_options = options(products, |p: &Product| (p.id.clone(), p.name.clone()));
    let warehouse_options = options(warehouses, |w: &Warehouse| (w.id.clone(), w.name.clone()));
    let type_options = Signal::stored(
        MovementType::ALL
            .iter()
            .map(|t| (t.as_str().to_string(), t.label().to_string()))
            .collect::<Vec<_>>(),
    );

    // 过滤条件直接绑定到 page.filter，变化即重新请求
    let filter_product = Field {
        value: Signal::derive(move || page.filter.with(|f| text_of(&f.product_id))),
        set: Callback::new(move |v: String| page.filter.update(|f| f.product_id = optional_text(v))),
    };
    let filter_warehouse = Field {
        value: Signal::derive(move || page.filter.with(|f| text_of(&f.warehouse_id))),
        set: Callback::new(move |v: String| page.filter.update(|f| f.warehouse_id = optional_text(v))),
    };
    let filter_type = Field {
        value: Signal::derive(move || {
            page.filter
                .with(|f| f.movement_type.map(|t| t.as_str().to_string()).unwrap_or_default())
        }),
        set: Callback::new(move |v: String| page.filter.update(|f| f.movement_type = MovementType::parse(&v))),
    };

    let adjustment: FormEditor<StockAdjustment> = RwSignal::new(None);
    let transfer: FormEditor<StockTransfer> = RwSignal::new(None);

    let open_adjustment = move |_| {
        let filter = page.filter.get_untracked();
        adjustment.set(Some(Editor::create(StockAdjustment {
            product_id: filter.product_id.unwrap_or_default(),
            warehouse_id: filter.warehouse_id.unwrap_or_default(),
            quantity: 0.0,
            reason: String::new(),
            notes: None,
            movement_date: format::today(),
        })));
    };
    let open_transfer = move |_| {
        let filter = page.filter.get_untracked();
        transfer.set(Some(Editor::create(StockTransfer {
            product_id: filter.product_id.unwrap_or_default(),
            from_warehouse_id: filter.warehouse_id.unwrap_or_default(),
            to_warehouse_id: String::new(),
            quantity: 0.0,
            notes: None,
            movement_date: format::today(),
        })));
    };

    let row = |m: StockMovement| {
        let warehouse = match (&m.warehouse_name, &m.to_warehouse_name) {
            (Some(from), Some(to)) => format!("{from} → {to}"),
            (Some(from), None) => from.clone(),
            _ => m.warehouse_id.clone(),
        };
        let badge = match m.movement_type {
            MovementType::StockIn => "badge badge-success badge-sm",
            MovementType::StockOut => "badge badge-error badge-sm",
            MovementType::Adjustment => "badge badge-warning badge-sm",
            MovementType::Transfer => "badge badge-info badge-sm",
        };
        view! {
            <tr>
                <td class="whitespace-nowrap">{format::date(m.movement_date)}</td>
                <td><span class=badge>{m.movement_type.label()}</span></td>
                <td>
                    <div class="font-medium">{m.product_name.unwrap_or(m.product_id)}</div>
                    <div class="text-xs font-mono text-base-content/60">{m.product_sku.unwrap_or_default()}</div>
                </td>
                <td>{warehouse}</td>
                <td class="text-right font-mono" class:text-error={m.quantity < 0.0}>{m.quantity.to_string()}</td>
                <td class="text-sm">{m.reason.or(m.notes).unwrap_or_default()}</td>
                <td class="font-mono text-xs">{m.reference_number.unwrap_or_default()}</td>
            </tr>
        }
    };

    view! {
        <div class="flex flex-wrap items-start justify-between gap-4">
            <PageHeader
                title="Stock Movements"
                subtitle="Inventory history across warehouses"
                loading=page.is_loading()
                on_refresh=Callback::new(move |_: ()| page.reload())
            />
            <div class="flex gap-2">
                <button class="btn btn-outline btn-sm" on:click=open_adjustment>"Adjust stock"</button>
                <button class="btn btn-primary btn-sm gap-2" on:click=open_transfer>
                    <ArrowLeftRight attr:class="h-4 w-4" /> "Transfer"
                </button>
            </div>
        </div>
        <ErrorBanner error=page.error() />

        <div class="grid md:grid-cols-3 gap-3 mb-4">
            <SelectField label="Product" field=filter_product options=product_options empty_label="All products" />
            <SelectField label="Warehouse" field=filter_warehouse options=warehouse_options empty_label="All warehouses" />
            <SelectField label="Type" field=filter_type options=type_options empty_label="All types" />
        </div>

        <div class="card bg-base-100 shadow">
            <div class="overflow-x-auto">
                <table class="table table-sm">
                    <thead>
                        <tr>
                            <th>"Date"</th>
                            <th>"Type"</th>
                            <th>"Product"</th>
                            <th>"Warehouse"</th>
                            <th class="text-right">"Quantity"</th>
                            <th>"Reason / notes"</th>
                            <th>"Reference"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <TableStatus
                            colspan=7
                            spinner=page.show_spinner()
                            empty=Signal::derive(move || items.with(Vec::is_empty))
                            empty_text="No stock movements match these filters."
                        />
                        {move || items.get().into_iter().map(row).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>

        <Modal
            open=Signal::derive(move || adjustment.with(Option::is_some))
            title="Adjust stock".to_string()
            on_close=move |_| adjustment.set(None)
        >
            <AdjustmentForm
                editor=adjustment
                products=product_options
                warehouses=warehouse_options
                on_submit=move |_| submit(adjustment, page, "Stock adjusted successfully", "Failed to adjust stock")
            />
        </Modal>
        <Modal
            open=Signal::derive(move || transfer.with(Option::is_some))
            title="Transfer stock".to_string()
            on_close=move |_| transfer.set(None)
        >
            <TransferForm
                editor=transfer
                products=product_options
                warehouses=warehouse_options
                on_submit=move |_| submit(transfer, page, "Stock transferred successfully", "Failed to transfer stock")
            />
        </Modal>
    }
}

#[component]
fn AdjustmentForm(
    editor: FormEditor<StockAdjustment>,
    products: Signal<Vec<(String, String)>>,
    warehouses: Signal<Vec<(String, String)>>,
    #[prop(into)] on_submit: Callback<()>,
) -> impl IntoView {
    let product = draft_field(editor, |d| d.product_id.clone(), |d: &mut StockAdjustment, v| d.product_id = v);
    let warehouse = draft_field(editor, |d| d.warehouse_id.clone(), |d: &mut StockAdjustment, v| d.warehouse_id = v);
    // 0 表示未填写
    let quantity = draft_field(
        editor,
        |d| Some(d.quantity).filter(|q| *q != 0.0),
        |d: &mut StockAdjustment, v: Option<f64>| d.quantity = v.unwrap_or(0.0),
    );
    let reason = draft_field(editor, |d| d.reason.clone(), |d: &mut StockAdjustment, v| d.reason = v);
    let notes = draft_field(editor, |d| text_of(&d.notes), |d: &mut StockAdjustment, v| d.notes = optional_text(v));
    let date = draft_field(
        editor,
        |d| date_text(d.movement_date),
        |d: &mut StockAdjustment, v: String| d.movement_date = parse_date(&v),
    );

    view! {
        <form
            class="space-y-2"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <SelectField label="Product" field=product options=products empty_label="Select a product" />
            <SelectField label="Warehouse" field=warehouse options=warehouses empty_label="Select a warehouse" />
            <div class="grid grid-cols-2 gap-3">
                <NumberField label="Quantity (+/-)" field=quantity required=true step="any" />
                <TextField label="Date" field=date input_type="date" />
            </div>
            <TextField label="Reason" field=reason required=true placeholder="Damaged, counted, returned..." />
            <TextAreaField label="Notes" field=notes />
            <FormFooter
                error=editor_error(editor)
                saving=editor_saving(editor)
                on_cancel=move |_| editor.set(None)
                submit_label="Adjust"
            />
        </form>
    }
}

#[component]
fn TransferForm(
    editor: FormEditor<StockTransfer>,
    products: Signal<Vec<(String, String)>>,
    warehouses: Signal<Vec<(String, String)>>,
    #[prop(into)] on_submit: Callback<()>,
) -> impl IntoView {
    let product = draft_field(editor, |d| d.product_id.clone(), |d: &mut StockTransfer, v| d.product_id = v);
    let from = draft_field(
        editor,
        |d| d.from_warehouse_id.clone(),
        |d: &mut StockTransfer, v| d.from_warehouse_id = v,
    );
    let to = draft_field(
        editor,
        |d| d.to_warehouse_id.clone(),
        |d: &mut StockTransfer, v| d.to_warehouse_id = v,
    );
    let quantity = draft_field(
        editor,
        |d| Some(d.quantity).filter(|q| *q != 0.0),
        |d: &mut StockTransfer, v: Option<f64>| d.quantity = v.unwrap_or(0.0),
    );
    let notes = draft_field(editor, |d| text_of(&d.notes), |d: &mut StockTransfer, v| d.notes = optional_text(v));
    let date = draft_field(
        editor,
        |d| date_text(d.movement_date),
        |d: &mut StockTransfer, v: String| d.movement_date = parse_date(&v),
    );

    view! {
        <form
            class="space-y-2"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <SelectField label="Product" field=product options=products empty_label="Select a product" />
            <div class="grid grid-cols-2 gap-3">
                <SelectField label="From" field=from options=warehouses empty_label="Source" />
                <SelectField label="To" field=to options=warehouses empty_label="Destination" />
                <NumberField label="Quantity" field=quantity required=true step="any" />
                <TextField label="Date" field=date input_type="date" />
            </div>
            <TextAreaField label="Notes" field=notes />
            <FormFooter
                error=editor_error(editor)
                saving=editor_saving(editor)
                on_cancel=move |_| editor.set(None)
                submit_label="Transfer"
            />
        </form>
    }
}
