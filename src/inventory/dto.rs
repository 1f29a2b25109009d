use serde::{Deserialize, Serialize};

use crate::inventory::repo::InventoryItem;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryListResponse {
    pub success: bool,
    pub blood_inventory: Vec<InventoryItem>,
}

#[derive(Debug, Serialize)]
pub struct InventoryActionResponse {
    pub success: bool,
    pub message: String,
    pub inventory: InventoryItem,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockResponse {
    pub success: bool,
    pub low_stock_items: Vec<InventoryItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryRequest {
    pub blood_type: Option<String>,
    pub units_available: Option<i32>,
    pub expiry_date: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryRequest {
    pub blood_type: Option<String>,
    pub units_available: Option<i32>,
    pub expiry_date: Option<String>,
    pub location: Option<String>,
}
