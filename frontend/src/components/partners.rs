//! 合作方：客户、供应商、员工与其他往来对象
//!
//! 表单字段随类别变化。客户与供应商再分公司/个人，公司多出登记号与联系人。

mod form_state;

use ledger_shared::crud::Editor;
use ledger_shared::models::{Partner, PartnerCategory, PartnerDraft};
use ledger_shared::protocol::{NoFilter, Resource};
use leptos::prelude::*;

use self::form_state as fs;
use super::crud::{
    ErrorBanner, PageHeader, ResourcePage, TableStatus, Tabs, editor_error, editor_saving,
    editor_title,
};
use super::form::{
    CheckboxField, Field, FormFooter, SelectField, TextAreaField, TextField, draft_field,
    optional_text, text_of,
};
use super::icons::{Pencil, Trash2};
use super::modal::{ConfirmDialog, Modal};

type PartnerEditor = RwSignal<Option<Editor<PartnerDraft>>>;

#[component]
pub fn PartnersPage() -> impl IntoView {
    let page = ResourcePage::<Partner>::new(NoFilter);
    let editor: PartnerEditor = RwSignal::new(None);
    let tab = RwSignal::new(Option::<PartnerCategory>::None);
    let (visible, count) = page.tabbed(tab, Partner::category);

    let open_create = move |_: ()| {
        let category = tab.get_untracked().unwrap_or_default();
        editor.set(Some(Editor::create(fs::new_draft(category))));
    };

    let row = move |partner: Partner| {
        let draft = partner.draft();
        let id = partner.id.clone();
        let edit_id = partner.id.clone();
        let name = partner.name().to_string();
        let email = fs::email(&draft);
        let phone = fs::phone(&draft);
        let kind = match draft.profile.counterparty() {
            Some(c) if c.is_company() => "Company",
            Some(_) => "Individual",
            None => "",
        };
        view! {
            <tr class:opacity-60={!partner.is_active()}>
                <td>
                    <div class="font-medium">{partner.name().to_string()}</div>
                    <div class="text-xs text-base-content/60">{kind}</div>
                </td>
                <td><span class="badge badge-ghost">{partner.category().label()}</span></td>
                <td>{email}</td>
                <td>{phone}</td>
                <td>
                    {if partner.is_active() {
                        view! { <span class="badge badge-success badge-sm">"Active"</span> }.into_any()
                    } else {
                        view! { <span class="badge badge-ghost badge-sm">"Inactive"</span> }.into_any()
                    }}
                </td>
                <td class="text-right whitespace-nowrap">
                    <button
                        class="btn btn-ghost btn-sm btn-square"
                        title="Edit"
                        on:click=move |_| editor.set(Some(Editor::edit(edit_id.clone(), draft.clone())))
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

    let mut tabs = vec![(None, "All")];
    tabs.extend(PartnerCategory::ALL.into_iter().map(|c| (Some(c), c.label())));

    view! {
        <PageHeader
            title="Partners"
            subtitle="Customers, vendors, employees and other contacts"
            loading=page.is_loading()
            on_refresh=Callback::new(move |_: ()| page.reload())
            on_create=Callback::new(open_create)
            create_label="New partner"
        />
        <ErrorBanner error=page.error() />
        <Tabs tabs=tabs active=tab count=count />

        <div class="card bg-base-100 shadow">
            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Category"</th>
                            <th>"Email"</th>
                            <th>"Phone"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <TableStatus
                            colspan=6
                            spinner=page.show_spinner()
                            empty=Signal::derive(move || visible.with(Vec::is_empty))
                            empty_text="No partners in this view."
                        />
                        {move || visible.get().into_iter().map(row).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>

        <Modal
            open=Signal::derive(move || editor.with(Option::is_some))
            title=editor_title(editor, Partner::LABEL)
            on_close=move |_| editor.set(None)
            wide=true
        >
            <PartnerForm editor=editor on_submit=move |_| page.save(editor) />
        </Modal>
        <ConfirmDialog state=page.confirm on_confirm=move |id: String| page.delete(id) />
    }
}

/// 公司/个人切换
#[component]
fn CounterpartyKind(field: Field<bool>) -> impl IntoView {
    view! {
        <div class="join">
            <button
                type="button"
                class="btn btn-sm join-item"
                class:btn-active=move || field.value.get()
                on:click=move |_| field.set.run(true)
            >
                "Company"
            </button>
            <button
                type="button"
                class="btn btn-sm join-item"
                class:btn-active=move || !field.value.get()
                on:click=move |_| field.set.run(false)
            >
                "Individual"
            </button>
        </div>
    }
}

#[component]
fn PartnerForm(editor: PartnerEditor, #[prop(into)] on_submit: Callback<()>) -> impl IntoView {
    let name = draft_field(editor, |d| d.name.clone(), |d: &mut PartnerDraft, v| d.name = v);
    let category = draft_field(
        editor,
        |d| d.profile.category().as_str().to_string(),
        |d: &mut PartnerDraft, v: String| {
            if let Some(c) = PartnerCategory::parse(&v) {
                fs::switch_category(d, c);
            }
        },
    );
    let company = draft_field(editor, fs::is_company, fs::set_company);
    let email = draft_field(editor, fs::email, fs::set_email);
    let phone = draft_field(editor, fs::phone, fs::set_phone);
    let address = draft_field(editor, fs::address, fs::set_address);
    let tax_id = draft_field(editor, fs::tax_id, fs::set_tax_id);
    let registration_number = draft_field(editor, fs::registration_number, fs::set_registration_number);
    let contact_person_name = draft_field(editor, fs::contact_person_name, fs::set_contact_person_name);
    let contact_person_email = draft_field(editor, fs::contact_person_email, fs::set_contact_person_email);
    let contact_person_mobile = draft_field(editor, fs::contact_person_mobile, fs::set_contact_person_mobile);
    let description = draft_field(
        editor,
        |d| text_of(&d.description),
        |d: &mut PartnerDraft, v| d.description = optional_text(v),
    );
    let is_active = draft_field(editor, |d| d.is_active, |d: &mut PartnerDraft, v| d.is_active = v);

    let current = Memo::new(move |_| {
        editor.with(|e| e.as_ref().map(|e| e.draft.profile.category()).unwrap_or_default())
    });
    let is_counterparty = move || current.get().has_counterparty_kind();
    let is_employee = move || current.get() == PartnerCategory::Employee;
    let address_label = Signal::derive(move || {
        if is_employee() { "Present address" } else { "Address" }.to_string()
    });

    let category_options = Signal::stored(
        PartnerCategory::ALL
            .iter()
            .map(|c| (c.as_str().to_string(), c.label().to_string()))
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
            <div class="grid md:grid-cols-2 gap-3">
                <TextField label="Name" field=name required=true max_len=255 />
                <SelectField label="Category" field=category options=category_options />
            </div>

            <Show when=is_counterparty>
                <div class="flex items-center gap-3 pt-2">
                    <span class="label-text">"Type"</span>
                    <CounterpartyKind field=company />
                </div>
            </Show>

            <div class="grid md:grid-cols-2 gap-3">
                <TextField label="Email" field=email input_type="email" />
                <TextField label="Phone" field=phone input_type="tel" />
            </div>
            {move || view! { <TextField label=address_label.get() field=address /> }}

            <Show when=is_counterparty>
                <TextField label="Tax ID" field=tax_id />
                <Show when=move || company.value.get()>
                    <TextField label="Registration number" field=registration_number />
                    <div class="divider text-xs">"Contact person"</div>
                    <div class="grid md:grid-cols-3 gap-3">
                        <TextField label="Name" field=contact_person_name />
                        <TextField label="Email" field=contact_person_email input_type="email" />
                        <TextField label="Mobile" field=contact_person_mobile input_type="tel" />
                    </div>
                </Show>
            </Show>

            <Show when=is_employee>
                <EmployeeSection editor=editor />
            </Show>

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

#[component]
fn EmployeeSection(editor: PartnerEditor) -> impl IntoView {
    let employee_id = draft_field(editor, fs::employee_id, fs::set_employee_id);
    let designation = draft_field(editor, fs::designation, fs::set_designation);
    let department = draft_field(editor, fs::department, fs::set_department);
    let employment_type = draft_field(editor, fs::employment_type, fs::set_employment_type);
    let joining_date = draft_field(editor, fs::joining_date, fs::set_joining_date);
    let end_date = draft_field(editor, fs::end_date, fs::set_end_date);
    let date_of_birth = draft_field(editor, fs::date_of_birth, fs::set_date_of_birth);
    let nationality = draft_field(editor, fs::nationality, fs::set_nationality);
    let nid_passport_no = draft_field(editor, fs::nid_passport_no, fs::set_nid_passport_no);
    let blood_group = draft_field(editor, fs::blood_group, fs::set_blood_group);
    let permanent_address = draft_field(editor, fs::permanent_address, fs::set_permanent_address);
    let emergency_name = draft_field(editor, fs::emergency_contact_name, fs::set_emergency_contact_name);
    let emergency_phone = draft_field(editor, fs::emergency_contact_phone, fs::set_emergency_contact_phone);
    let emergency_relationship = draft_field(
        editor,
        fs::emergency_contact_relationship,
        fs::set_emergency_contact_relationship,
    );

    view! {
        <div class="divider text-xs">"Employment"</div>
        <div class="grid md:grid-cols-3 gap-3">
            <TextField label="Employee ID" field=employee_id />
            <TextField label="Designation" field=designation />
            <TextField label="Department" field=department />
            <TextField label="Employment type" field=employment_type placeholder="Full-time" />
            <TextField label="Joining date" field=joining_date input_type="date" />
            <TextField label="End date" field=end_date input_type="date" />
        </div>
        <div class="divider text-xs">"Personal"</div>
        <div class="grid md:grid-cols-3 gap-3">
            <TextField label="Date of birth" field=date_of_birth input_type="date" />
            <TextField label="Nationality" field=nationality />
            <TextField label="NID / Passport" field=nid_passport_no />
            <TextField label="Blood group" field=blood_group />
        </div>
        <TextField label="Permanent address" field=permanent_address />
        <div class="divider text-xs">"Emergency contact"</div>
        <div class="grid md:grid-cols-3 gap-3">
            <TextField label="Name" field=emergency_name />
            <TextField label="Phone" field=emergency_phone input_type="tel" />
            <TextField label="Relationship" field=emergency_relationship />
        </div>
    }
}
