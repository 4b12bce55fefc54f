//! Organizer statistics and export endpoints
//!
//! All payloads are derived on demand through the aggregation queries;
//! the CSV export is a pure function of the item summaries and rosters.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use http::header;
use serde::Serialize;
use shared::error::AppError;
use shared::models::{BuyerEntry, ItemSummary, OrderWithTotal};

use super::ApiResult;
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

/// Item summaries plus the campaign grand total.
#[derive(Debug, Serialize)]
pub struct CampaignSummary {
    pub campaign_id: i64,
    pub items: Vec<ItemSummary>,
    pub grand_total: f64,
}

/// GET /api/admin/campaigns/{id}/summary
pub async fn campaign_summary(
    State(state): State<AppState>,
    Path(campaign_id): Path<i64>,
) -> ApiResult<CampaignSummary> {
    db::campaigns::get(&state.pool, campaign_id)
        .await?
        .ok_or_else(|| AppError::not_found("Campaign"))?;

    let items = db::aggregates::item_summaries(&state.pool, campaign_id).await?;
    let grand_total = items.iter().map(|s| s.total_amount).sum();
    Ok(Json(CampaignSummary {
        campaign_id,
        items,
        grand_total,
    }))
}

/// GET /api/admin/items/{id}/buyers
pub async fn item_buyers(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> ApiResult<Vec<BuyerEntry>> {
    db::items::get(&state.pool, item_id)
        .await?
        .ok_or_else(|| AppError::not_found("Item"))?;
    Ok(Json(db::aggregates::buyers(&state.pool, item_id).await?))
}

/// GET /api/admin/campaigns/{id}/orders
pub async fn campaign_orders(
    State(state): State<AppState>,
    Path(campaign_id): Path<i64>,
) -> ApiResult<Vec<OrderWithTotal>> {
    db::campaigns::get(&state.pool, campaign_id)
        .await?
        .ok_or_else(|| AppError::not_found("Campaign"))?;
    Ok(Json(
        db::aggregates::orders_with_totals(&state.pool, campaign_id).await?,
    ))
}

/// GET /api/admin/campaigns/{id}/export — CSV download of the full
/// (item, buyer) detail
pub async fn export_csv(
    State(state): State<AppState>,
    Path(campaign_id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    db::campaigns::get(&state.pool, campaign_id)
        .await?
        .ok_or_else(|| AppError::not_found("Campaign"))?;

    let summaries = db::aggregates::item_summaries(&state.pool, campaign_id).await?;
    let mut sections = Vec::with_capacity(summaries.len());
    for summary in summaries {
        let roster = db::aggregates::buyers(&state.pool, summary.item_id).await?;
        sections.push((summary, roster));
    }

    let csv = detail_csv(&sections);
    let disposition = format!("attachment; filename=\"campaign-{campaign_id}-orders.csv\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

/// Quote a CSV field when it contains a delimiter, quote or newline.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

/// One row per (item, buyer); items nobody ordered still show up with an
/// empty customer and zero quantity/subtotal. Prefixed with a UTF-8 BOM
/// so spreadsheet software detects the encoding.
fn detail_csv(sections: &[(ItemSummary, Vec<BuyerEntry>)]) -> String {
    let mut out = String::from("\u{feff}");
    out.push_str("item,unit_price,customer,quantity,subtotal\n");
    for (summary, roster) in sections {
        if roster.is_empty() {
            out.push_str(&format!("{},{},,0,0\n", csv_field(&summary.name), summary.price));
        } else {
            for buyer in roster {
                out.push_str(&format!(
                    "{},{},{},{},{}\n",
                    csv_field(&summary.name),
                    summary.price,
                    csv_field(&buyer.customer_name),
                    buyer.quantity,
                    buyer.subtotal
                ));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, price: f64) -> ItemSummary {
        ItemSummary {
            item_id: 1,
            name: name.to_string(),
            price,
            total_quantity: 0,
            total_amount: 0.0,
        }
    }

    #[test]
    fn csv_starts_with_bom_and_header() {
        let csv = detail_csv(&[]);
        assert!(csv.starts_with('\u{feff}'));
        assert!(csv.contains("item,unit_price,customer,quantity,subtotal\n"));
    }

    #[test]
    fn csv_emits_one_row_per_buyer() {
        let sections = vec![(
            summary("Kelp", 30.0),
            vec![
                BuyerEntry {
                    customer_name: "Alice".to_string(),
                    quantity: 2,
                    subtotal: 60.0,
                },
                BuyerEntry {
                    customer_name: "Bob".to_string(),
                    quantity: 1,
                    subtotal: 30.0,
                },
            ],
        )];
        let csv = detail_csv(&sections);
        assert!(csv.contains("Kelp,30,Alice,2,60\n"));
        assert!(csv.contains("Kelp,30,Bob,1,30\n"));
    }

    #[test]
    fn csv_keeps_unordered_items_as_zero_rows() {
        let sections = vec![(summary("Lonely", 12.5), vec![])];
        let csv = detail_csv(&sections);
        assert!(csv.contains("Lonely,12.5,,0,0\n"));
    }

    #[test]
    fn csv_quotes_fields_with_delimiters() {
        let sections = vec![(
            summary("Tea, iced", 10.0),
            vec![BuyerEntry {
                customer_name: "O\"Brien".to_string(),
                quantity: 1,
                subtotal: 10.0,
            }],
        )];
        let csv = detail_csv(&sections);
        assert!(csv.contains("\"Tea, iced\",10,\"O\"\"Brien\",1,10\n"));
    }
}
