//! 合作方（客户、供应商、员工、其他）
//!
//! 后端使用一张宽表，所有字段都是可选的；客户端用 `PartnerProfile` 这个带标签的枚举
//! 表达每种类别真正拥有的字段，只在序列化边界上转换为扁平的 `PartnerPayload`。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use super::non_blank;
use crate::protocol::{Editable, NoFilter, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PartnerCategory {
    #[default]
    Customer,
    Vendor,
    Employee,
    Other,
}

impl PartnerCategory {
    pub const ALL: [PartnerCategory; 4] = [
        PartnerCategory::Customer,
        PartnerCategory::Vendor,
        PartnerCategory::Employee,
        PartnerCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerCategory::Customer => "customer",
            PartnerCategory::Vendor => "vendor",
            PartnerCategory::Employee => "employee",
            PartnerCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PartnerCategory::Customer => "Customer",
            PartnerCategory::Vendor => "Vendor",
            PartnerCategory::Employee => "Employee",
            PartnerCategory::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// 客户与供应商区分公司/个人
    pub fn has_counterparty_kind(&self) -> bool {
        matches!(self, PartnerCategory::Customer | PartnerCategory::Vendor)
    }
}

// =========================================================
// 带标签的表单模型
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactPerson {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
}

/// 客户或供应商
#[derive(Debug, Clone, PartialEq)]
pub enum Counterparty {
    Company {
        contact: ContactDetails,
        tax_id: Option<String>,
        registration_number: Option<String>,
        contact_person: ContactPerson,
    },
    Individual {
        contact: ContactDetails,
        tax_id: Option<String>,
    },
}

impl Counterparty {
    pub fn is_company(&self) -> bool {
        matches!(self, Counterparty::Company { .. })
    }

    pub fn contact(&self) -> &ContactDetails {
        match self {
            Counterparty::Company { contact, .. } | Counterparty::Individual { contact, .. } => {
                contact
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmployeeDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub employee_id: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub nid_passport_no: Option<String>,
    pub blood_group: Option<String>,
    pub present_address: Option<String>,
    pub permanent_address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub emergency_contact_relationship: Option<String>,
    pub employment_type: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartnerProfile {
    Customer(Counterparty),
    Vendor(Counterparty),
    Employee(Box<EmployeeDetails>),
    Other(ContactDetails),
}

impl PartnerProfile {
    pub fn category(&self) -> PartnerCategory {
        match self {
            PartnerProfile::Customer(_) => PartnerCategory::Customer,
            PartnerProfile::Vendor(_) => PartnerCategory::Vendor,
            PartnerProfile::Employee(_) => PartnerCategory::Employee,
            PartnerProfile::Other(_) => PartnerCategory::Other,
        }
    }

    pub fn counterparty(&self) -> Option<&Counterparty> {
        match self {
            PartnerProfile::Customer(c) | PartnerProfile::Vendor(c) => Some(c),
            _ => None,
        }
    }
}

/// 合作方表单提交内容
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerDraft {
    pub name: String,
    pub profile: PartnerProfile,
    pub description: Option<String>,
    pub is_active: bool,
}

impl Default for PartnerDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            profile: PartnerProfile::Customer(Counterparty::Individual {
                contact: ContactDetails::default(),
                tax_id: None,
            }),
            description: None,
            is_active: true,
        }
    }
}

impl PartnerDraft {
    /// 展开为后端的扁平结构，非本类别的字段全部为 `None`
    pub fn to_payload(&self) -> PartnerPayload {
        let mut p = PartnerPayload {
            name: self.name.trim().to_string(),
            category: self.profile.category(),
            description: self.description.as_deref().and_then(non_blank),
            is_active: self.is_active,
            ..PartnerPayload::default()
        };

        match &self.profile {
            PartnerProfile::Customer(cp) | PartnerProfile::Vendor(cp) => {
                p.set_contact(cp.contact());
                match cp {
                    Counterparty::Company {
                        tax_id,
                        registration_number,
                        contact_person,
                        ..
                    } => {
                        p.tax_id = tax_id.clone();
                        p.registration_number = registration_number.clone();
                        p.contact_person_name = contact_person.name.clone();
                        p.contact_person_email = contact_person.email.clone();
                        p.contact_person_mobile = contact_person.mobile.clone();
                    }
                    Counterparty::Individual { tax_id, .. } => {
                        p.tax_id = tax_id.clone();
                    }
                }
            }
            PartnerProfile::Employee(e) => {
                p.email = e.email.clone();
                p.phone = e.phone.clone();
                p.employee_id = e.employee_id.clone();
                p.designation = e.designation.clone();
                p.department = e.department.clone();
                p.nationality = e.nationality.clone();
                p.date_of_birth = e.date_of_birth;
                p.nid_passport_no = e.nid_passport_no.clone();
                p.blood_group = e.blood_group.clone();
                p.present_address = e.present_address.clone();
                p.permanent_address = e.permanent_address.clone();
                p.emergency_contact_name = e.emergency_contact_name.clone();
                p.emergency_contact_phone = e.emergency_contact_phone.clone();
                p.emergency_contact_relationship = e.emergency_contact_relationship.clone();
                p.employment_type = e.employment_type.clone();
                p.joining_date = e.joining_date;
                p.end_date = e.end_date;
            }
            PartnerProfile::Other(contact) => p.set_contact(contact),
        }
        p
    }
}

impl Serialize for PartnerDraft {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

// =========================================================
// 线上格式
// =========================================================

/// 后端的扁平合作方结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PartnerPayload {
    pub name: String,
    pub category: PartnerCategory,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub contact_person_name: Option<String>,
    #[serde(default)]
    pub contact_person_email: Option<String>,
    #[serde(default)]
    pub contact_person_mobile: Option<String>,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub nid_passport_no: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub present_address: Option<String>,
    #[serde(default)]
    pub permanent_address: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
    #[serde(default)]
    pub emergency_contact_relationship: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub joining_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl PartnerPayload {
    fn set_contact(&mut self, contact: &ContactDetails) {
        self.email = contact.email.clone();
        self.phone = contact.phone.clone();
        self.address = contact.address.clone();
    }

    fn contact(&self) -> ContactDetails {
        ContactDetails {
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }

    fn counterparty(&self) -> Counterparty {
        // 后端没有保存公司/个人标志，有公司专属字段的记录视为公司
        if self.registration_number.is_some() || self.contact_person_name.is_some() {
            Counterparty::Company {
                contact: self.contact(),
                tax_id: self.tax_id.clone(),
                registration_number: self.registration_number.clone(),
                contact_person: ContactPerson {
                    name: self.contact_person_name.clone(),
                    email: self.contact_person_email.clone(),
                    mobile: self.contact_person_mobile.clone(),
                },
            }
        } else {
            Counterparty::Individual {
                contact: self.contact(),
                tax_id: self.tax_id.clone(),
            }
        }
    }

    /// 还原为带标签的结构
    pub fn profile(&self) -> PartnerProfile {
        match self.category {
            PartnerCategory::Customer => PartnerProfile::Customer(self.counterparty()),
            PartnerCategory::Vendor => PartnerProfile::Vendor(self.counterparty()),
            PartnerCategory::Employee => PartnerProfile::Employee(Box::new(EmployeeDetails {
                email: self.email.clone(),
                phone: self.phone.clone(),
                employee_id: self.employee_id.clone(),
                designation: self.designation.clone(),
                department: self.department.clone(),
                nationality: self.nationality.clone(),
                date_of_birth: self.date_of_birth,
                nid_passport_no: self.nid_passport_no.clone(),
                blood_group: self.blood_group.clone(),
                present_address: self.present_address.clone(),
                permanent_address: self.permanent_address.clone(),
                emergency_contact_name: self.emergency_contact_name.clone(),
                emergency_contact_phone: self.emergency_contact_phone.clone(),
                emergency_contact_relationship: self.emergency_contact_relationship.clone(),
                employment_type: self.employment_type.clone(),
                joining_date: self.joining_date,
                end_date: self.end_date,
            })),
            PartnerCategory::Other => PartnerProfile::Other(self.contact()),
        }
    }
}

/// 合作方记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    #[serde(flatten)]
    pub details: PartnerPayload,
}

impl Partner {
    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn category(&self) -> PartnerCategory {
        self.details.category
    }

    pub fn is_active(&self) -> bool {
        self.details.is_active
    }

    pub fn draft(&self) -> PartnerDraft {
        PartnerDraft {
            name: self.details.name.clone(),
            profile: self.details.profile(),
            description: self.details.description.clone(),
            is_active: self.details.is_active,
        }
    }
}

impl Resource for Partner {
    type Filter = NoFilter;
    const COLLECTION: &'static str = "/partners";
    const LABEL: &'static str = "partner";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Editable for Partner {
    type Draft = PartnerDraft;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company_vendor() -> PartnerDraft {
        PartnerDraft {
            name: "  Acme Supplies ".to_string(),
            profile: PartnerProfile::Vendor(Counterparty::Company {
                contact: ContactDetails {
                    email: Some("sales@acme.test".to_string()),
                    phone: None,
                    address: Some("1 Main St".to_string()),
                },
                tax_id: Some("TIN-1".to_string()),
                registration_number: Some("REG-9".to_string()),
                contact_person: ContactPerson {
                    name: Some("Jo".to_string()),
                    email: None,
                    mobile: Some("555".to_string()),
                },
            }),
            description: Some("   ".to_string()),
            is_active: true,
        }
    }

    #[test]
    fn test_company_payload_is_flat() {
        let json = serde_json::to_value(company_vendor()).unwrap();
        assert_eq!(json["name"], "Acme Supplies");
        assert_eq!(json["category"], "vendor");
        assert_eq!(json["registration_number"], "REG-9");
        assert_eq!(json["contact_person_mobile"], "555");
        assert!(json["employee_id"].is_null());
        assert!(json["description"].is_null());
    }

    #[test]
    fn test_profile_restored_from_record() {
        let record = Partner {
            id: "p1".to_string(),
            details: company_vendor().to_payload(),
        };
        let draft = record.draft();
        assert_eq!(draft.profile, company_vendor().profile);
        assert!(draft.profile.counterparty().unwrap().is_company());
    }

    #[test]
    fn test_individual_customer_without_company_fields() {
        let record: Partner = serde_json::from_str(
            r#"{"id":"p2","name":"Sam","category":"customer","tax_id":"X","is_active":true}"#,
        )
        .unwrap();
        match record.details.profile() {
            PartnerProfile::Customer(Counterparty::Individual { tax_id, .. }) => {
                assert_eq!(tax_id.as_deref(), Some("X"))
            }
            other => panic!("unexpected profile: {other:?}"),
        }
    }

    #[test]
    fn test_employee_drops_counterparty_fields() {
        let draft = PartnerDraft {
            name: "Ana".to_string(),
            profile: PartnerProfile::Employee(Box::new(EmployeeDetails {
                designation: Some("Clerk".to_string()),
                joining_date: NaiveDate::from_ymd_opt(2023, 5, 1),
                ..EmployeeDetails::default()
            })),
            description: None,
            is_active: true,
        };
        let payload = draft.to_payload();
        assert_eq!(payload.category, PartnerCategory::Employee);
        assert_eq!(payload.designation.as_deref(), Some("Clerk"));
        assert_eq!(payload.registration_number, None);
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["joining_date"], "2023-05-01");
    }
}
