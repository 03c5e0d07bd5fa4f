use super::*;

fn filled_customer() -> PartnerDraft {
    let mut draft = new_draft(PartnerCategory::Customer);
    draft.name = "Acme Ltd".to_string();
    set_email(&mut draft, "billing@acme.test".to_string());
    set_phone(&mut draft, "+880 1700".to_string());
    set_address(&mut draft, "12 Market Road".to_string());
    set_tax_id(&mut draft, "TIN-42".to_string());
    set_registration_number(&mut draft, "REG-7".to_string());
    set_contact_person_name(&mut draft, "Rahim".to_string());
    draft
}

#[test]
fn test_new_counterparties_start_as_company() {
    let draft = new_draft(PartnerCategory::Vendor);
    assert_eq!(draft.profile.category(), PartnerCategory::Vendor);
    assert!(is_company(&draft));
    assert!(draft.is_active);

    let other = new_draft(PartnerCategory::Other);
    assert!(!is_company(&other));
}

#[test]
fn test_customer_to_vendor_keeps_everything() {
    let mut draft = filled_customer();
    switch_category(&mut draft, PartnerCategory::Vendor);

    assert_eq!(draft.profile.category(), PartnerCategory::Vendor);
    assert_eq!(tax_id(&draft), "TIN-42");
    assert_eq!(registration_number(&draft), "REG-7");
    assert_eq!(contact_person_name(&draft), "Rahim");
}

#[test]
fn test_switch_to_employee_keeps_contact_only() {
    let mut draft = filled_customer();
    switch_category(&mut draft, PartnerCategory::Employee);

    assert_eq!(draft.profile.category(), PartnerCategory::Employee);
    assert_eq!(email(&draft), "billing@acme.test");
    assert_eq!(phone(&draft), "+880 1700");
    // 员工的地址落在现住址上
    assert_eq!(address(&draft), "12 Market Road");
    assert_eq!(tax_id(&draft), "");
    assert_eq!(registration_number(&draft), "");
    assert!(!is_company(&draft));

    switch_category(&mut draft, PartnerCategory::Other);
    assert_eq!(draft.profile, PartnerProfile::Other(ContactDetails {
        email: Some("billing@acme.test".to_string()),
        phone: Some("+880 1700".to_string()),
        address: Some("12 Market Road".to_string()),
    }));
}

#[test]
fn test_company_individual_toggle() {
    let mut draft = filled_customer();
    set_company(&mut draft, false);

    assert!(!is_company(&draft));
    assert_eq!(tax_id(&draft), "TIN-42");
    assert_eq!(email(&draft), "billing@acme.test");
    assert_eq!(registration_number(&draft), "");

    // 个人没有公司字段，写入被忽略
    set_contact_person_name(&mut draft, "Ignored".to_string());
    set_company(&mut draft, true);
    assert!(is_company(&draft));
    assert_eq!(contact_person_name(&draft), "");
    assert_eq!(tax_id(&draft), "TIN-42");
}

#[test]
fn test_set_company_ignored_for_employee() {
    let mut draft = new_draft(PartnerCategory::Employee);
    set_company(&mut draft, true);
    assert_eq!(draft.profile.category(), PartnerCategory::Employee);
}

#[test]
fn test_employee_fields() {
    let mut draft = new_draft(PartnerCategory::Employee);
    set_designation(&mut draft, "Accountant".to_string());
    set_joining_date(&mut draft, "2024-03-01".to_string());
    set_end_date(&mut draft, "not a date".to_string());

    assert_eq!(designation(&draft), "Accountant");
    assert_eq!(joining_date(&draft), "2024-03-01");
    assert_eq!(end_date(&draft), "");

    set_designation(&mut draft, "  ".to_string());
    assert_eq!(designation(&draft), "");

    // 非员工上读写员工字段没有效果
    let mut vendor = new_draft(PartnerCategory::Vendor);
    set_designation(&mut vendor, "Manager".to_string());
    assert_eq!(designation(&vendor), "");
}
