//! Customer Order Models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One customer's submission against a campaign.
///
/// `customer_name` is a free-text lookup key with no uniqueness
/// constraint: the same name used for separate submissions produces
/// independent orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CustomerOrder {
    pub id: i64,
    pub campaign_id: i64,
    pub customer_name: String,
    pub note: Option<String>,
    pub is_paid: bool,
    pub created_at: i64,
}

/// One (order, item, quantity) association; stored quantity is always >= 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LineItem {
    pub id: i64,
    pub order_id: i64,
    pub item_id: i64,
    pub quantity: i64,
}

/// Order row joined with its current total (sum of quantity * price over
/// its line items; 0 for an order with no line items).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderWithTotal {
    pub id: i64,
    pub campaign_id: i64,
    pub customer_name: String,
    pub note: Option<String>,
    pub is_paid: bool,
    pub created_at: i64,
    pub total_amount: f64,
}

/// Submit payload: the complete desired quantity map, keyed by item id.
///
/// Zero-quantity entries are skipped, never stored. On revision the same
/// shape is resubmitted in full; omitting an item is equivalent to
/// setting it to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmit {
    pub customer_name: String,
    #[serde(default)]
    pub note: Option<String>,
    pub quantities: HashMap<i64, i64>,
}
