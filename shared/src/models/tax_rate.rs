use serde::{Deserialize, Serialize};

use crate::protocol::{Editable, NoFilter, Resource};
use crate::serde_helper;

/// 税率，`rate` 为百分比
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRate {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "serde_helper::number")]
    pub rate: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub applies_to_income: bool,
    pub applies_to_expense: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxRateDraft {
    pub name: String,
    pub rate: f64,
    pub description: Option<String>,
    pub applies_to_income: bool,
    pub applies_to_expense: bool,
    pub is_active: bool,
}

impl Default for TaxRateDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            rate: 0.0,
            description: None,
            applies_to_income: false,
            applies_to_expense: false,
            is_active: true,
        }
    }
}

impl From<&TaxRate> for TaxRateDraft {
    fn from(t: &TaxRate) -> Self {
        Self {
            name: t.name.clone(),
            rate: t.rate,
            description: t.description.clone(),
            applies_to_income: t.applies_to_income,
            applies_to_expense: t.applies_to_expense,
            is_active: t.is_active,
        }
    }
}

impl Resource for TaxRate {
    type Filter = NoFilter;
    const COLLECTION: &'static str = "/tax-rates";
    const LABEL: &'static str = "tax rate";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Editable for TaxRate {
    type Draft = TaxRateDraft;
}
