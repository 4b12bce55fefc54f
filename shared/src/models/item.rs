//! Item Model

use serde::{Deserialize, Serialize};

/// Catalog item belonging to exactly one campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Item {
    pub id: i64,
    pub campaign_id: i64,
    pub name: String,
    pub price: f64,
}

/// Create item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreate {
    pub name: String,
    pub price: f64,
}
