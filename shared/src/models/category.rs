use serde::{Deserialize, Serialize};

use super::TransactionType;
use crate::protocol::{Editable, NoFilter, Resource};

/// 收支分类
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub description: Option<String>,
    /// `#RRGGBB`
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDraft {
    pub name: String,
    pub transaction_type: TransactionType,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_active: bool,
}

impl Default for CategoryDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            transaction_type: TransactionType::Expense,
            description: None,
            color: Some("#3b82f6".to_string()),
            icon: None,
            is_active: true,
        }
    }
}

impl From<&Category> for CategoryDraft {
    fn from(c: &Category) -> Self {
        Self {
            name: c.name.clone(),
            transaction_type: c.transaction_type,
            description: c.description.clone(),
            color: c.color.clone(),
            icon: c.icon.clone(),
            is_active: c.is_active,
        }
    }
}

impl Resource for Category {
    type Filter = NoFilter;
    const COLLECTION: &'static str = "/categories";
    const LABEL: &'static str = "category";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Editable for Category {
    type Draft = CategoryDraft;
}
