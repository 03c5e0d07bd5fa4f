//! 合作方表单状态
//!
//! 表单直接编辑 `PartnerDraft`。切换类别或公司/个人时，尽量保留已经填写的联系方式，
//! 其余字段随新的变体重置。这里的函数都是纯函数，字段绑定以函数指针的形式交给
//! `draft_field`。

use chrono::NaiveDate;
use ledger_shared::date::parse_date;
use ledger_shared::models::{
    ContactDetails, ContactPerson, Counterparty, EmployeeDetails, PartnerCategory, PartnerDraft,
    PartnerProfile,
};

use crate::components::form::{optional_text, text_of};

/// 新建时客户与供应商默认为公司
pub fn new_draft(category: PartnerCategory) -> PartnerDraft {
    PartnerDraft {
        name: String::new(),
        profile: profile_with(category, ContactDetails::default()),
        description: None,
        is_active: true,
    }
}

fn company(contact: ContactDetails, tax_id: Option<String>) -> Counterparty {
    Counterparty::Company {
        contact,
        tax_id,
        registration_number: None,
        contact_person: ContactPerson::default(),
    }
}

fn profile_with(category: PartnerCategory, contact: ContactDetails) -> PartnerProfile {
    match category {
        PartnerCategory::Customer => PartnerProfile::Customer(company(contact, None)),
        PartnerCategory::Vendor => PartnerProfile::Vendor(company(contact, None)),
        PartnerCategory::Employee => PartnerProfile::Employee(Box::new(EmployeeDetails {
            email: contact.email,
            phone: contact.phone,
            present_address: contact.address,
            ..EmployeeDetails::default()
        })),
        PartnerCategory::Other => PartnerProfile::Other(contact),
    }
}

/// 任一变体上的邮箱、电话与地址
pub fn contact_of(profile: &PartnerProfile) -> ContactDetails {
    match profile {
        PartnerProfile::Customer(c) | PartnerProfile::Vendor(c) => c.contact().clone(),
        PartnerProfile::Employee(e) => ContactDetails {
            email: e.email.clone(),
            phone: e.phone.clone(),
            address: e.present_address.clone(),
        },
        PartnerProfile::Other(contact) => contact.clone(),
    }
}

/// 切换类别；客户与供应商之间保留全部往来方信息
pub fn switch_category(draft: &mut PartnerDraft, to: PartnerCategory) {
    if draft.profile.category() == to {
        return;
    }
    let current = std::mem::replace(&mut draft.profile, PartnerProfile::Other(ContactDetails::default()));
    draft.profile = match (current, to) {
        (PartnerProfile::Customer(c) | PartnerProfile::Vendor(c), PartnerCategory::Customer) => {
            PartnerProfile::Customer(c)
        }
        (PartnerProfile::Customer(c) | PartnerProfile::Vendor(c), PartnerCategory::Vendor) => {
            PartnerProfile::Vendor(c)
        }
        (other, to) => profile_with(to, contact_of(&other)),
    };
}

pub fn is_company(draft: &PartnerDraft) -> bool {
    draft.profile.counterparty().is_some_and(Counterparty::is_company)
}

/// 在公司与个人之间切换，保留联系方式与税号
pub fn set_company(draft: &mut PartnerDraft, want_company: bool) {
    let Some(counterparty) = counterparty_mut(&mut draft.profile) else {
        return;
    };
    if counterparty.is_company() == want_company {
        return;
    }
    let contact = counterparty.contact().clone();
    let tax_id = match counterparty {
        Counterparty::Company { tax_id, .. } | Counterparty::Individual { tax_id, .. } => {
            tax_id.take()
        }
    };
    *counterparty = if want_company {
        company(contact, tax_id)
    } else {
        Counterparty::Individual { contact, tax_id }
    };
}

fn counterparty_mut(profile: &mut PartnerProfile) -> Option<&mut Counterparty> {
    match profile {
        PartnerProfile::Customer(c) | PartnerProfile::Vendor(c) => Some(c),
        _ => None,
    }
}

fn contact_mut(profile: &mut PartnerProfile) -> Option<&mut ContactDetails> {
    match profile {
        PartnerProfile::Customer(c) | PartnerProfile::Vendor(c) => match c {
            Counterparty::Company { contact, .. } | Counterparty::Individual { contact, .. } => {
                Some(contact)
            }
        },
        PartnerProfile::Other(contact) => Some(contact),
        PartnerProfile::Employee(_) => None,
    }
}

fn employee(draft: &PartnerDraft) -> Option<&EmployeeDetails> {
    match &draft.profile {
        PartnerProfile::Employee(e) => Some(e),
        _ => None,
    }
}

fn employee_mut(draft: &mut PartnerDraft) -> Option<&mut EmployeeDetails> {
    match &mut draft.profile {
        PartnerProfile::Employee(e) => Some(e),
        _ => None,
    }
}

fn date_text(value: Option<NaiveDate>) -> String {
    value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

// =========================================================
// 字段绑定
// =========================================================

pub fn email(draft: &PartnerDraft) -> String {
    text_of(&contact_of(&draft.profile).email)
}

pub fn set_email(draft: &mut PartnerDraft, value: String) {
    if let Some(e) = employee_mut(draft) {
        e.email = optional_text(value);
    } else if let Some(contact) = contact_mut(&mut draft.profile) {
        contact.email = optional_text(value);
    }
}

pub fn phone(draft: &PartnerDraft) -> String {
    text_of(&contact_of(&draft.profile).phone)
}

pub fn set_phone(draft: &mut PartnerDraft, value: String) {
    if let Some(e) = employee_mut(draft) {
        e.phone = optional_text(value);
    } else if let Some(contact) = contact_mut(&mut draft.profile) {
        contact.phone = optional_text(value);
    }
}

/// 员工没有通用地址，对应的是现住址
pub fn address(draft: &PartnerDraft) -> String {
    text_of(&contact_of(&draft.profile).address)
}

pub fn set_address(draft: &mut PartnerDraft, value: String) {
    if let Some(e) = employee_mut(draft) {
        e.present_address = optional_text(value);
    } else if let Some(contact) = contact_mut(&mut draft.profile) {
        contact.address = optional_text(value);
    }
}

pub fn tax_id(draft: &PartnerDraft) -> String {
    match draft.profile.counterparty() {
        Some(Counterparty::Company { tax_id, .. } | Counterparty::Individual { tax_id, .. }) => {
            text_of(tax_id)
        }
        None => String::new(),
    }
}

pub fn set_tax_id(draft: &mut PartnerDraft, value: String) {
    if let Some(Counterparty::Company { tax_id, .. } | Counterparty::Individual { tax_id, .. }) =
        counterparty_mut(&mut draft.profile)
    {
        *tax_id = optional_text(value);
    }
}

fn company_parts(draft: &PartnerDraft) -> Option<(&Option<String>, &ContactPerson)> {
    match draft.profile.counterparty() {
        Some(Counterparty::Company {
            registration_number,
            contact_person,
            ..
        }) => Some((registration_number, contact_person)),
        _ => None,
    }
}

fn company_parts_mut(draft: &mut PartnerDraft) -> Option<(&mut Option<String>, &mut ContactPerson)> {
    match counterparty_mut(&mut draft.profile) {
        Some(Counterparty::Company {
            registration_number,
            contact_person,
            ..
        }) => Some((registration_number, contact_person)),
        _ => None,
    }
}

pub fn registration_number(draft: &PartnerDraft) -> String {
    company_parts(draft).map(|(reg, _)| text_of(reg)).unwrap_or_default()
}

pub fn set_registration_number(draft: &mut PartnerDraft, value: String) {
    if let Some((reg, _)) = company_parts_mut(draft) {
        *reg = optional_text(value);
    }
}

pub fn contact_person_name(draft: &PartnerDraft) -> String {
    company_parts(draft).map(|(_, p)| text_of(&p.name)).unwrap_or_default()
}

pub fn set_contact_person_name(draft: &mut PartnerDraft, value: String) {
    if let Some((_, p)) = company_parts_mut(draft) {
        p.name = optional_text(value);
    }
}

pub fn contact_person_email(draft: &PartnerDraft) -> String {
    company_parts(draft).map(|(_, p)| text_of(&p.email)).unwrap_or_default()
}

pub fn set_contact_person_email(draft: &mut PartnerDraft, value: String) {
    if let Some((_, p)) = company_parts_mut(draft) {
        p.email = optional_text(value);
    }
}

pub fn contact_person_mobile(draft: &PartnerDraft) -> String {
    company_parts(draft).map(|(_, p)| text_of(&p.mobile)).unwrap_or_default()
}

pub fn set_contact_person_mobile(draft: &mut PartnerDraft, value: String) {
    if let Some((_, p)) = company_parts_mut(draft) {
        p.mobile = optional_text(value);
    }
}

/// 员工的文本字段
macro_rules! employee_text {
    ($($get:ident, $set:ident;)+) => {
        $(
            pub fn $get(draft: &PartnerDraft) -> String {
                employee(draft).map(|e| text_of(&e.$get)).unwrap_or_default()
            }

            pub fn $set(draft: &mut PartnerDraft, value: String) {
                if let Some(e) = employee_mut(draft) {
                    e.$get = optional_text(value);
                }
            }
        )+
    };
}

employee_text! {
    employee_id, set_employee_id;
    designation, set_designation;
    department, set_department;
    nationality, set_nationality;
    nid_passport_no, set_nid_passport_no;
    blood_group, set_blood_group;
    permanent_address, set_permanent_address;
    emergency_contact_name, set_emergency_contact_name;
    emergency_contact_phone, set_emergency_contact_phone;
    emergency_contact_relationship, set_emergency_contact_relationship;
    employment_type, set_employment_type;
}

/// 员工的日期字段，输入框使用 `YYYY-MM-DD`
macro_rules! employee_date {
    ($($get:ident, $set:ident;)+) => {
        $(
            pub fn $get(draft: &PartnerDraft) -> String {
                date_text(employee(draft).and_then(|e| e.$get))
            }

            pub fn $set(draft: &mut PartnerDraft, value: String) {
                if let Some(e) = employee_mut(draft) {
                    e.$get = parse_date(value.trim());
                }
            }
        )+
    };
}

employee_date! {
    date_of_birth, set_date_of_birth;
    joining_date, set_joining_date;
    end_date, set_end_date;
}

#[cfg(test)]
mod tests;
