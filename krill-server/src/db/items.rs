//! Item storage
//!
//! Items can only be added to an existing campaign. Deleting an item also
//! removes every line item referencing it; affected order totals simply
//! shrink on the next aggregation.

use shared::models::{Item, ItemCreate};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

/// Add an item to a campaign. Returns the new item id.
pub async fn add(pool: &SqlitePool, campaign_id: i64, data: &ItemCreate) -> sqlx::Result<i64> {
    let id = snowflake_id();
    sqlx::query("INSERT INTO items (id, campaign_id, name, price) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(campaign_id)
        .bind(&data.name)
        .bind(data.price)
        .execute(pool)
        .await?;
    Ok(id)
}

pub async fn list_by_campaign(pool: &SqlitePool, campaign_id: i64) -> sqlx::Result<Vec<Item>> {
    sqlx::query_as::<_, Item>(
        "SELECT id, campaign_id, name, price FROM items WHERE campaign_id = ? ORDER BY id",
    )
    .bind(campaign_id)
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Item>> {
    sqlx::query_as::<_, Item>("SELECT id, campaign_id, name, price FROM items WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Delete an item and every line item referencing it, in one transaction.
/// Returns rows affected for the item itself.
pub async fn delete(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM line_items WHERE item_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM items WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected())
}
