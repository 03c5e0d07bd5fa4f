use serde::{Deserialize, Serialize};

use crate::protocol::{Activatable, Editable, NoFilter, Resource};

/// 仓库
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub is_default: bool,
    pub is_active: bool,
}

impl Warehouse {
    /// 城市、省份、国家拼成一行，用于表格显示
    pub fn location(&self) -> String {
        [&self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseDraft {
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub is_default: bool,
    pub is_active: bool,
}

impl Default for WarehouseDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: None,
            description: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
            is_default: false,
            is_active: true,
        }
    }
}

impl From<&Warehouse> for WarehouseDraft {
    fn from(w: &Warehouse) -> Self {
        Self {
            name: w.name.clone(),
            code: w.code.clone(),
            description: w.description.clone(),
            address: w.address.clone(),
            city: w.city.clone(),
            state: w.state.clone(),
            postal_code: w.postal_code.clone(),
            country: w.country.clone(),
            is_default: w.is_default,
            is_active: w.is_active,
        }
    }
}

impl Resource for Warehouse {
    type Filter = NoFilter;
    const COLLECTION: &'static str = "/warehouses";
    const LABEL: &'static str = "warehouse";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Editable for Warehouse {
    type Draft = WarehouseDraft;
}

impl Activatable for Warehouse {}
