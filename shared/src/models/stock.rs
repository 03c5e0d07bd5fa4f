use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::protocol::{ApiRequest, HttpMethod, QueryParams, Resource};
use crate::serde_helper;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    StockIn,
    StockOut,
    Adjustment,
    Transfer,
}

impl MovementType {
    pub const ALL: [MovementType; 4] = [
        MovementType::StockIn,
        MovementType::StockOut,
        MovementType::Adjustment,
        MovementType::Transfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::StockIn => "stock_in",
            MovementType::StockOut => "stock_out",
            MovementType::Adjustment => "adjustment",
            MovementType::Transfer => "transfer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MovementType::StockIn => "Stock In",
            MovementType::StockOut => "Stock Out",
            MovementType::Adjustment => "Adjustment",
            MovementType::Transfer => "Transfer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// 库存变动记录（只读，由调整与调拨接口产生）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: String,
    pub movement_type: MovementType,
    pub movement_date: NaiveDate,
    pub product_id: String,
    pub warehouse_id: String,
    #[serde(default)]
    pub to_warehouse_id: Option<String>,
    #[serde(deserialize_with = "serde_helper::number")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "serde_helper::optional_number")]
    pub unit_cost: Option<f64>,
    #[serde(default, deserialize_with = "serde_helper::optional_number")]
    pub total_cost: Option<f64>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_sku: Option<String>,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    #[serde(default)]
    pub to_warehouse_name: Option<String>,
    #[serde(default, deserialize_with = "serde_helper::optional_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

/// 库存变动的服务端过滤条件，任何一项变化都会触发重新请求
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StockFilter {
    pub product_id: Option<String>,
    pub warehouse_id: Option<String>,
    pub movement_type: Option<MovementType>,
}

impl QueryParams for StockFilter {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = &self.product_id {
            pairs.push(("product_id", id.clone()));
        }
        if let Some(id) = &self.warehouse_id {
            pairs.push(("warehouse_id", id.clone()));
        }
        if let Some(t) = self.movement_type {
            pairs.push(("movement_type", t.as_str().to_string()));
        }
        pairs
    }
}

impl Resource for StockMovement {
    type Filter = StockFilter;
    const COLLECTION: &'static str = "/stock-movements";
    const LABEL: &'static str = "stock movement";

    fn id(&self) -> &str {
        &self.id
    }
}

/// 库存调整：数量可正可负，必须填写原因
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockAdjustment {
    pub product_id: String,
    pub warehouse_id: String,
    pub quantity: f64,
    pub reason: String,
    pub notes: Option<String>,
    pub movement_date: Option<NaiveDate>,
}

impl ApiRequest for StockAdjustment {
    type Response = StockMovement;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{}/adjustment", StockMovement::COLLECTION)
    }

    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        serde_json::to_string(self).map(Some)
    }
}

/// 仓库间调拨
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockTransfer {
    pub product_id: String,
    pub from_warehouse_id: String,
    pub to_warehouse_id: String,
    pub quantity: f64,
    pub notes: Option<String>,
    pub movement_date: Option<NaiveDate>,
}

impl ApiRequest for StockTransfer {
    type Response = StockMovement;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{}/transfer", StockMovement::COLLECTION)
    }

    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        serde_json::to_string(self).map(Some)
    }
}
