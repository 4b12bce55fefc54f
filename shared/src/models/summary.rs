//! Derived aggregation rows — computed on demand, never stored

use serde::{Deserialize, Serialize};

/// Per-item totals across all line items of a campaign.
///
/// Items nobody ordered still appear, with zero totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ItemSummary {
    pub item_id: i64,
    pub name: String,
    pub price: f64,
    pub total_quantity: i64,
    pub total_amount: f64,
}

/// One buyer of an item: who, how many, and the line subtotal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BuyerEntry {
    pub customer_name: String,
    pub quantity: i64,
    pub subtotal: f64,
}

/// Expanded line of one order: item name, quantity, unit price, subtotal.
/// The building block for both display and export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderDetailRow {
    pub item_id: i64,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    pub subtotal: f64,
}
