//! Customer order storage and the order upsert engine
//!
//! `submit` and `revise` take the customer's complete quantity map.
//! Entries with quantity 0 (or negative) are skipped, never stored, so a
//! revision that omits an item removes its line item entirely: revisions
//! are full replacements, not deltas. Neither function gates on campaign
//! lifecycle or validates names/totals; callers do that first.

use shared::models::CustomerOrder;
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;
use std::collections::HashMap;

/// Create a new order with one line item per positive-quantity entry.
/// Returns the new order id.
pub async fn submit(
    pool: &SqlitePool,
    campaign_id: i64,
    customer_name: &str,
    note: Option<&str>,
    quantities: &HashMap<i64, i64>,
) -> sqlx::Result<i64> {
    let order_id = snowflake_id();
    let now = now_millis();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO customer_orders (id, campaign_id, customer_name, note, is_paid, created_at)
        VALUES (?, ?, ?, ?, 0, ?)
        "#,
    )
    .bind(order_id)
    .bind(campaign_id)
    .bind(customer_name)
    .bind(note)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for (&item_id, &qty) in quantities {
        if qty > 0 {
            sqlx::query(
                "INSERT INTO line_items (id, order_id, item_id, quantity) VALUES (?, ?, ?, ?)",
            )
            .bind(snowflake_id())
            .bind(order_id)
            .bind(item_id)
            .bind(qty)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    Ok(order_id)
}

/// Replace the order's entire line-item set with the given map: delete
/// every existing line item, then insert fresh rows for positive
/// quantities, in one transaction.
pub async fn revise(
    pool: &SqlitePool,
    order_id: i64,
    quantities: &HashMap<i64, i64>,
) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM line_items WHERE order_id = ?")
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

    for (&item_id, &qty) in quantities {
        if qty > 0 {
            sqlx::query(
                "INSERT INTO line_items (id, order_id, item_id, quantity) VALUES (?, ?, ?, ?)",
            )
            .bind(snowflake_id())
            .bind(order_id)
            .bind(item_id)
            .bind(qty)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    Ok(())
}

pub async fn get(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<CustomerOrder>> {
    sqlx::query_as::<_, CustomerOrder>(
        "SELECT id, campaign_id, customer_name, note, is_paid, created_at
         FROM customer_orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Organizer-maintained settlement flag. Returns rows affected.
pub async fn set_paid(pool: &SqlitePool, id: i64, is_paid: bool) -> sqlx::Result<u64> {
    let result = sqlx::query("UPDATE customer_orders SET is_paid = ? WHERE id = ?")
        .bind(is_paid)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Delete an order and its line items, in one transaction. Returns rows
/// affected for the order itself.
pub async fn delete(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM line_items WHERE order_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM customer_orders WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_util::test_pool;
    use crate::db::{aggregates, campaigns, items};
    use shared::models::{CampaignCreate, ItemCreate};

    /// Campaign with two items; returns (campaign_id, item_a, item_b).
    async fn seed(pool: &SqlitePool) -> (i64, i64, i64) {
        let campaign_id = campaigns::create(
            pool,
            &CampaignCreate {
                title: "Drinks".to_string(),
                description: None,
                start_date: None,
                end_date: None,
                items: vec![],
            },
        )
        .await
        .unwrap();
        let a = items::add(
            pool,
            campaign_id,
            &ItemCreate {
                name: "Black tea".to_string(),
                price: 30.0,
            },
        )
        .await
        .unwrap();
        let b = items::add(
            pool,
            campaign_id,
            &ItemCreate {
                name: "Green tea".to_string(),
                price: 25.0,
            },
        )
        .await
        .unwrap();
        (campaign_id, a, b)
    }

    #[tokio::test]
    async fn submit_skips_zero_quantities() {
        let pool = test_pool().await;
        let (campaign_id, a, b) = seed(&pool).await;

        let mut quantities = HashMap::new();
        quantities.insert(a, 0i64);
        quantities.insert(b, 2i64);
        let order_id = submit(&pool, campaign_id, "Alice", None, &quantities)
            .await
            .unwrap();

        let detail = aggregates::order_detail(&pool, order_id).await.unwrap();
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0].item_id, b);
        assert_eq!(detail[0].quantity, 2);
    }

    #[tokio::test]
    async fn submit_stores_note_and_defaults_unpaid() {
        let pool = test_pool().await;
        let (campaign_id, a, _) = seed(&pool).await;

        let mut quantities = HashMap::new();
        quantities.insert(a, 1i64);
        let order_id = submit(&pool, campaign_id, "Bob", Some("no ice"), &quantities)
            .await
            .unwrap();

        let order = get(&pool, order_id).await.unwrap().unwrap();
        assert_eq!(order.customer_name, "Bob");
        assert_eq!(order.note.as_deref(), Some("no ice"));
        assert!(!order.is_paid);
    }

    #[tokio::test]
    async fn revise_is_total_replacement() {
        let pool = test_pool().await;
        let (campaign_id, a, b) = seed(&pool).await;

        let mut quantities = HashMap::new();
        quantities.insert(a, 2i64);
        quantities.insert(b, 1i64);
        let order_id = submit(&pool, campaign_id, "Alice", None, &quantities)
            .await
            .unwrap();

        // Revision omits item b entirely: it must vanish, not linger.
        let mut revised = HashMap::new();
        revised.insert(a, 3i64);
        revise(&pool, order_id, &revised).await.unwrap();

        let detail = aggregates::order_detail(&pool, order_id).await.unwrap();
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0].item_id, a);
        assert_eq!(detail[0].quantity, 3);
    }

    #[tokio::test]
    async fn revise_to_all_zero_leaves_empty_order() {
        let pool = test_pool().await;
        let (campaign_id, a, _) = seed(&pool).await;

        let mut quantities = HashMap::new();
        quantities.insert(a, 2i64);
        let order_id = submit(&pool, campaign_id, "Alice", None, &quantities)
            .await
            .unwrap();

        let mut revised = HashMap::new();
        revised.insert(a, 0i64);
        revise(&pool, order_id, &revised).await.unwrap();

        // The order row survives with zero line items and total 0.
        assert!(get(&pool, order_id).await.unwrap().is_some());
        assert!(aggregates::order_detail(&pool, order_id).await.unwrap().is_empty());
        let totals = aggregates::orders_with_totals(&pool, campaign_id)
            .await
            .unwrap();
        assert_eq!(totals[0].total_amount, 0.0);
    }

    #[tokio::test]
    async fn failed_revise_rolls_back_the_replacement() {
        let pool = test_pool().await;
        let (campaign_id, a, _) = seed(&pool).await;

        let mut quantities = HashMap::new();
        quantities.insert(a, 2i64);
        let order_id = submit(&pool, campaign_id, "Alice", None, &quantities)
            .await
            .unwrap();

        // A map referencing a nonexistent item violates the foreign key
        // mid-replacement; the delete-then-insert must not stick.
        let mut bad = HashMap::new();
        bad.insert(a, 5i64);
        bad.insert(999_999i64, 1i64);
        assert!(revise(&pool, order_id, &bad).await.is_err());

        let detail = aggregates::order_detail(&pool, order_id).await.unwrap();
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0].item_id, a);
        assert_eq!(detail[0].quantity, 2);
    }

    #[tokio::test]
    async fn same_name_submissions_stay_distinct() {
        let pool = test_pool().await;
        let (campaign_id, a, _) = seed(&pool).await;

        let mut quantities = HashMap::new();
        quantities.insert(a, 1i64);
        let first = submit(&pool, campaign_id, "Alice", None, &quantities)
            .await
            .unwrap();
        let second = submit(&pool, campaign_id, "Alice", None, &quantities)
            .await
            .unwrap();
        assert_ne!(first, second);

        let found = aggregates::find_orders_with_totals_by_name(&pool, campaign_id, "Alice")
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn set_paid_round_trips() {
        let pool = test_pool().await;
        let (campaign_id, a, _) = seed(&pool).await;

        let mut quantities = HashMap::new();
        quantities.insert(a, 1i64);
        let order_id = submit(&pool, campaign_id, "Alice", None, &quantities)
            .await
            .unwrap();

        assert_eq!(set_paid(&pool, order_id, true).await.unwrap(), 1);
        assert!(get(&pool, order_id).await.unwrap().unwrap().is_paid);

        assert_eq!(set_paid(&pool, order_id, false).await.unwrap(), 1);
        assert!(!get(&pool, order_id).await.unwrap().unwrap().is_paid);

        assert_eq!(set_paid(&pool, 404, true).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_removes_order_and_line_items() {
        let pool = test_pool().await;
        let (campaign_id, a, b) = seed(&pool).await;

        let mut quantities = HashMap::new();
        quantities.insert(a, 1i64);
        quantities.insert(b, 2i64);
        let order_id = submit(&pool, campaign_id, "Alice", None, &quantities)
            .await
            .unwrap();

        assert_eq!(delete(&pool, order_id).await.unwrap(), 1);
        assert!(get(&pool, order_id).await.unwrap().is_none());

        let leftover: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM line_items WHERE order_id = ?")
            .bind(order_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(leftover, 0);
    }
}
