use serde::{Deserialize, Serialize};

use crate::protocol::{Activatable, Editable, NoFilter, Resource};
use crate::serde_helper;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[default]
    Product,
    Service,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Product => "product",
            ProductType::Service => "service",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductType::Product => "Product",
            ProductType::Service => "Service",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "product" => Some(ProductType::Product),
            "service" => Some(ProductType::Service),
            _ => None,
        }
    }
}

/// 商品或服务，列表接口会附带税率与分类名称
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub product_type: ProductType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(deserialize_with = "serde_helper::number")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "serde_helper::optional_number")]
    pub cost_price: Option<f64>,
    #[serde(default)]
    pub tax_rate_id: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub track_inventory: bool,
    #[serde(default, deserialize_with = "serde_helper::optional_number")]
    pub stock_quantity: Option<f64>,
    #[serde(default, deserialize_with = "serde_helper::optional_number")]
    pub low_stock_threshold: Option<f64>,
    pub is_active: bool,
    #[serde(default)]
    pub tax_rate_name: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
}

impl Product {
    /// 启用了库存跟踪且库存不高于预警线
    pub fn is_low_stock(&self) -> bool {
        match (self.track_inventory, self.stock_quantity, self.low_stock_threshold) {
            (true, Some(qty), Some(threshold)) => qty <= threshold,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDraft {
    pub name: String,
    pub product_type: ProductType,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub unit_price: f64,
    pub cost_price: Option<f64>,
    pub tax_rate_id: Option<String>,
    pub category_id: Option<String>,
    pub track_inventory: bool,
    pub stock_quantity: Option<f64>,
    pub low_stock_threshold: Option<f64>,
    pub is_active: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            product_type: ProductType::Product,
            description: None,
            sku: None,
            unit_price: 0.0,
            cost_price: None,
            tax_rate_id: None,
            category_id: None,
            track_inventory: false,
            stock_quantity: None,
            low_stock_threshold: None,
            is_active: true,
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            product_type: p.product_type,
            description: p.description.clone(),
            sku: p.sku.clone(),
            unit_price: p.unit_price,
            cost_price: p.cost_price,
            tax_rate_id: p.tax_rate_id.clone(),
            category_id: p.category_id.clone(),
            track_inventory: p.track_inventory,
            stock_quantity: p.stock_quantity,
            low_stock_threshold: p.low_stock_threshold,
            is_active: p.is_active,
        }
    }
}

impl Resource for Product {
    type Filter = NoFilter;
    const COLLECTION: &'static str = "/products";
    const LABEL: &'static str = "product";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Editable for Product {
    type Draft = ProductDraft;
}

impl Activatable for Product {}
