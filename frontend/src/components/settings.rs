//! 组织设置与数据导出

use ledger_shared::client::ExportKind;
use ledger_shared::crud::{self, Editor};
use ledger_shared::models::TenantSettingsUpdate;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::crud::{PageHeader, editor_error, editor_saving};
use super::form::{NumberField, SelectField, TextField, draft_field, optional_text, text_of};
use super::icons::Download;
use super::toast::use_toast;
use crate::api::use_api;
use crate::auth::use_session;

type SettingsEditor = RwSignal<Option<Editor<TenantSettingsUpdate>>>;

const CURRENCIES: [&str; 8] = ["USD", "EUR", "GBP", "BDT", "INR", "JPY", "CNY", "AUD"];
const DATE_FORMATS: [&str; 3] = ["YYYY-MM-DD", "DD/MM/YYYY", "MM/DD/YYYY"];
const TAX_LABELS: [&str; 3] = ["Tax", "VAT", "GST"];

fn stored_options(values: &[&str]) -> Signal<Vec<(String, String)>> {
    Signal::stored(values.iter().map(|v| (v.to_string(), v.to_string())).collect())
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let toast = use_toast();

    let editor: SettingsEditor = RwSignal::new(
        session
            .tenant()
            .get_untracked()
            .map(|t| Editor::edit(t.id.clone(), TenantSettingsUpdate::from(&t))),
    );

    let submit = move || {
        let pending = editor
            .try_update(|e| {
                e.as_mut().filter(|e| !e.saving).map(|e| {
                    e.begin_save();
                    e.draft.clone()
                })
            })
            .flatten();
        let Some(update) = pending else {
            return;
        };
        let client = api.client();
        spawn_local(async move {
            match crud::submit(&*client, &update).await {
                Ok(tenant) => {
                    editor.set(Some(Editor::edit(tenant.id.clone(), TenantSettingsUpdate::from(&tenant))));
                    session.update_tenant(tenant);
                    toast.success("Settings saved");
                }
                Err(err) => editor.update(|e| {
                    if let Some(e) = e {
                        e.fail(&err, "Failed to save settings");
                    }
                }),
            }
        });
    };

    let email = Signal::derive(move || session.tenant().with(|t| t.as_ref().map(|t| t.email.clone()).unwrap_or_default()));
    let fiscal_year_start = Signal::derive(move || {
        session.tenant().with(|t| {
            t.as_ref()
                .and_then(|t| t.fiscal_year_start)
                .map(|d| d.format("%B %-d").to_string())
                .unwrap_or_else(|| "January 1".to_string())
        })
    });

    view! {
        <PageHeader title="Settings" subtitle="Organization profile, defaults and data export" />

        <div class="grid lg:grid-cols-3 gap-6">
            <div class="card bg-base-100 shadow lg:col-span-2">
                <div class="card-body">
                    <h2 class="card-title">"Organization"</h2>
                    <p class="text-sm text-base-content/60">
                        {move || format!("Signed up as {}. Fiscal year starts {}.", email.get(), fiscal_year_start.get())}
                    </p>
                    <Show
                        when=move || editor.with(Option::is_some)
                        fallback=|| view! { <span class="loading loading-spinner"></span> }
                    >
                        <SettingsForm editor=editor on_submit=move |_| submit() />
                    </Show>
                </div>
            </div>
            <ExportCard />
        </div>
    }
}

#[component]
fn SettingsForm(editor: SettingsEditor, #[prop(into)] on_submit: Callback<()>) -> impl IntoView {
    let company_name = draft_field(
        editor,
        |d| text_of(&d.company_name),
        |d: &mut TenantSettingsUpdate, v| d.company_name = Some(v),
    );
    let phone = draft_field(editor, |d| text_of(&d.phone), |d: &mut TenantSettingsUpdate, v| d.phone = optional_text(v));
    let address = draft_field(
        editor,
        |d| text_of(&d.address),
        |d: &mut TenantSettingsUpdate, v| d.address = optional_text(v),
    );
    let currency = draft_field(
        editor,
        |d| text_of(&d.currency),
        |d: &mut TenantSettingsUpdate, v| d.currency = optional_text(v),
    );
    let date_format = draft_field(
        editor,
        |d| text_of(&d.date_format),
        |d: &mut TenantSettingsUpdate, v| d.date_format = optional_text(v),
    );
    let default_tax_rate = draft_field(
        editor,
        |d| d.default_tax_rate,
        |d: &mut TenantSettingsUpdate, v| d.default_tax_rate = v,
    );
    let tax_label = draft_field(
        editor,
        |d| text_of(&d.tax_label),
        |d: &mut TenantSettingsUpdate, v| d.tax_label = optional_text(v),
    );
    let error = editor_error(editor);
    let saving = editor_saving(editor);

    view! {
        <form
            class="space-y-2"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <TextField label="Company name" field=company_name required=true max_len=255 />
            <div class="grid md:grid-cols-2 gap-3">
                <TextField label="Phone" field=phone input_type="tel" />
                <SelectField label="Currency" field=currency options=stored_options(&CURRENCIES) />
            </div>
            <TextField label="Address" field=address />
            <div class="grid md:grid-cols-3 gap-3">
                <SelectField label="Date format" field=date_format options=stored_options(&DATE_FORMATS) />
                <NumberField label="Default tax rate (%)" field=default_tax_rate />
                <SelectField label="Tax label" field=tax_label options=stored_options(&TAX_LABELS) />
            </div>
            <Show when=move || error.get().is_some()>
                <div role="alert" class="alert alert-error text-sm py-2">
                    <span>{move || error.get().unwrap_or_default()}</span>
                </div>
            </Show>
            <div class="flex justify-end pt-2">
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                    <Show when=move || saving.get()>
                        <span class="loading loading-spinner loading-sm"></span>
                    </Show>
                    "Save settings"
                </button>
            </div>
        </form>
    }
}

/// 导出链接直接带令牌下载，不经过 API 客户端
#[component]
fn ExportCard() -> impl IntoView {
    let client = use_api().client();
    let links = ExportKind::ALL
        .into_iter()
        .map(|kind| (kind.label(), client.export_url(kind)))
        .collect::<Vec<_>>();

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">"Export data"</h2>
                <p class="text-sm text-base-content/60">"Download your records for backup or analysis."</p>
                <ul class="menu p-0">
                    {links
                        .into_iter()
                        .map(|(label, href)| view! {
                            <li>
                                <a href=href download="" target="_blank" rel="noopener">
                                    <Download attr:class="h-4 w-4" />
                                    {label}
                                </a>
                            </li>
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}
