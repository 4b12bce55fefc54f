//! Read-side aggregation queries
//!
//! Everything here is derived fresh from current line-item state on every
//! call; nothing is materialized, so there is no cache to invalidate and
//! repeated calls with no intervening writes return identical results.

use shared::models::{BuyerEntry, ItemSummary, OrderDetailRow, OrderWithTotal};
use sqlx::SqlitePool;
use std::collections::HashMap;

/// Per-item totals for a campaign. Every catalog item appears; items
/// nobody ordered yield quantity 0 and amount 0.
pub async fn item_summaries(pool: &SqlitePool, campaign_id: i64) -> sqlx::Result<Vec<ItemSummary>> {
    sqlx::query_as::<_, ItemSummary>(
        r#"
        SELECT i.id AS item_id, i.name, i.price,
               COALESCE(SUM(li.quantity), 0) AS total_quantity,
               COALESCE(SUM(li.quantity * i.price), 0.0) AS total_amount
        FROM items i
        LEFT JOIN line_items li ON i.id = li.item_id
        WHERE i.campaign_id = ?
        GROUP BY i.id, i.name, i.price
        ORDER BY i.id
        "#,
    )
    .bind(campaign_id)
    .fetch_all(pool)
    .await
}

/// Everyone who ordered an item, sorted by customer name for stable
/// display regardless of submission order.
pub async fn buyers(pool: &SqlitePool, item_id: i64) -> sqlx::Result<Vec<BuyerEntry>> {
    sqlx::query_as::<_, BuyerEntry>(
        r#"
        SELECT co.customer_name, li.quantity, (li.quantity * i.price) AS subtotal
        FROM line_items li
        JOIN customer_orders co ON li.order_id = co.id
        JOIN items i ON li.item_id = i.id
        WHERE li.item_id = ? AND li.quantity > 0
        ORDER BY co.customer_name
        "#,
    )
    .bind(item_id)
    .fetch_all(pool)
    .await
}

/// All orders of a campaign with their current totals, newest first.
/// An order whose line items were all removed totals 0.
pub async fn orders_with_totals(
    pool: &SqlitePool,
    campaign_id: i64,
) -> sqlx::Result<Vec<OrderWithTotal>> {
    sqlx::query_as::<_, OrderWithTotal>(
        r#"
        SELECT co.id, co.campaign_id, co.customer_name, co.note, co.is_paid, co.created_at,
               COALESCE(SUM(li.quantity * i.price), 0.0) AS total_amount
        FROM customer_orders co
        LEFT JOIN line_items li ON co.id = li.order_id
        LEFT JOIN items i ON li.item_id = i.id
        WHERE co.campaign_id = ?
        GROUP BY co.id, co.campaign_id, co.customer_name, co.note, co.is_paid, co.created_at
        ORDER BY co.created_at DESC
        "#,
    )
    .bind(campaign_id)
    .fetch_all(pool)
    .await
}

/// "Find my orders": all orders under a campaign submitted with this
/// name, with totals, newest first. Names are not unique, so several
/// independent orders can come back.
pub async fn find_orders_with_totals_by_name(
    pool: &SqlitePool,
    campaign_id: i64,
    customer_name: &str,
) -> sqlx::Result<Vec<OrderWithTotal>> {
    sqlx::query_as::<_, OrderWithTotal>(
        r#"
        SELECT co.id, co.campaign_id, co.customer_name, co.note, co.is_paid, co.created_at,
               COALESCE(SUM(li.quantity * i.price), 0.0) AS total_amount
        FROM customer_orders co
        LEFT JOIN line_items li ON co.id = li.order_id
        LEFT JOIN items i ON li.item_id = i.id
        WHERE co.campaign_id = ? AND co.customer_name = ?
        GROUP BY co.id, co.campaign_id, co.customer_name, co.note, co.is_paid, co.created_at
        ORDER BY co.created_at DESC
        "#,
    )
    .bind(campaign_id)
    .bind(customer_name)
    .fetch_all(pool)
    .await
}

/// Expanded rows of one order: the building block both display and the
/// CSV export use.
pub async fn order_detail(pool: &SqlitePool, order_id: i64) -> sqlx::Result<Vec<OrderDetailRow>> {
    sqlx::query_as::<_, OrderDetailRow>(
        r#"
        SELECT li.item_id, i.name, li.quantity, i.price, (li.quantity * i.price) AS subtotal
        FROM line_items li
        JOIN items i ON li.item_id = i.id
        WHERE li.order_id = ?
        ORDER BY i.name
        "#,
    )
    .bind(order_id)
    .fetch_all(pool)
    .await
}

/// The order's quantities as an item_id → quantity map, used to pre-fill
/// the edit form.
pub async fn order_quantities(
    pool: &SqlitePool,
    order_id: i64,
) -> sqlx::Result<HashMap<i64, i64>> {
    let rows: Vec<(i64, i64)> =
        sqlx::query_as("SELECT item_id, quantity FROM line_items WHERE order_id = ?")
            .bind(order_id)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().collect())
}
