//! Campaign storage — CRUD plus the two campaign listings
//!
//! `list_all` is the management view (status only); `list_accepting`
//! additionally applies the start/end window, mirroring
//! `lifecycle::is_accepting_orders` in SQL.

use chrono::NaiveDate;
use shared::models::{Campaign, CampaignCreate, CampaignStatus, CampaignUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

/// Create a campaign together with its initial item set. Returns the
/// new campaign id.
pub async fn create(pool: &SqlitePool, data: &CampaignCreate) -> sqlx::Result<i64> {
    let campaign_id = snowflake_id();
    let now = now_millis();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO campaigns (id, title, description, status, start_date, end_date, created_at)
        VALUES (?, ?, ?, 'open', ?, ?, ?)
        "#,
    )
    .bind(campaign_id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.start_date)
    .bind(&data.end_date)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for item in &data.items {
        sqlx::query("INSERT INTO items (id, campaign_id, name, price) VALUES (?, ?, ?, ?)")
            .bind(snowflake_id())
            .bind(campaign_id)
            .bind(&item.name)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(campaign_id)
}

/// All campaigns, newest first (management view, ignores the window).
pub async fn list_all(pool: &SqlitePool) -> sqlx::Result<Vec<Campaign>> {
    sqlx::query_as::<_, Campaign>(
        "SELECT id, title, description, status, start_date, end_date, created_at
         FROM campaigns ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

/// Campaigns currently accepting orders: open by status AND inside the
/// window as of `as_of`. Unset bounds are unbounded. Lexical comparison
/// of `YYYY-MM-DD` strings matches chronological order.
pub async fn list_accepting(pool: &SqlitePool, as_of: NaiveDate) -> sqlx::Result<Vec<Campaign>> {
    let as_of = as_of.format("%Y-%m-%d").to_string();
    sqlx::query_as::<_, Campaign>(
        r#"
        SELECT id, title, description, status, start_date, end_date, created_at
        FROM campaigns
        WHERE status = 'open'
          AND (start_date IS NULL OR start_date <= ?)
          AND (end_date IS NULL OR end_date >= ?)
        ORDER BY created_at DESC
        "#,
    )
    .bind(&as_of)
    .bind(&as_of)
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Campaign>> {
    sqlx::query_as::<_, Campaign>(
        "SELECT id, title, description, status, start_date, end_date, created_at
         FROM campaigns WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Full update of the editable fields. Returns rows affected (0 when the
/// campaign no longer exists).
pub async fn update(pool: &SqlitePool, id: i64, data: &CampaignUpdate) -> sqlx::Result<u64> {
    let result = sqlx::query(
        "UPDATE campaigns SET title = ?, description = ?, start_date = ?, end_date = ? WHERE id = ?",
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.start_date)
    .bind(&data.end_date)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Explicit status toggle (open ⇄ closed); the only way status changes.
pub async fn set_status(pool: &SqlitePool, id: i64, status: CampaignStatus) -> sqlx::Result<u64> {
    let result = sqlx::query("UPDATE campaigns SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Delete a campaign and everything beneath it: line items of its orders,
/// then its orders, then its items, then the campaign row, in dependency
/// order inside one transaction.
pub async fn delete(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "DELETE FROM line_items WHERE order_id IN
         (SELECT id FROM customer_orders WHERE campaign_id = ?)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM customer_orders WHERE campaign_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM items WHERE campaign_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM campaigns WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected())
}
