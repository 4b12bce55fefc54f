//! Customer order endpoints
//!
//! The handlers are the "caller" the order engine trusts: they check the
//! campaign lifecycle and reject empty names, unknown items and zero-total
//! maps before anything is written. The db layer itself does no gating.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Campaign, CustomerOrder, OrderSubmit, OrderWithTotal};
use std::collections::HashMap;

use super::ApiResult;
use crate::db;
use crate::error::ServiceError;
use crate::lifecycle;
use crate::state::AppState;

/// Check the quantity map against the campaign's catalog and return the
/// submission total. Quantities for unknown items are rejected; entries
/// with quantity <= 0 contribute nothing (they are skipped on write).
async fn validate_quantities(
    state: &AppState,
    campaign_id: i64,
    quantities: &HashMap<i64, i64>,
) -> Result<f64, ServiceError> {
    let catalog = db::items::list_by_campaign(&state.pool, campaign_id).await?;
    let prices: HashMap<i64, f64> = catalog.into_iter().map(|i| (i.id, i.price)).collect();

    let mut total = 0.0;
    for (&item_id, &qty) in quantities {
        if qty <= 0 {
            continue;
        }
        let Some(price) = prices.get(&item_id) else {
            return Err(AppError::validation(format!(
                "item {item_id} does not belong to this campaign"
            ))
            .into());
        };
        total += qty as f64 * price;
    }
    Ok(total)
}

async fn accepting_campaign(
    state: &AppState,
    campaign_id: i64,
) -> Result<Campaign, ServiceError> {
    let campaign = db::campaigns::get(&state.pool, campaign_id)
        .await?
        .ok_or_else(|| AppError::not_found("Campaign"))?;
    if !lifecycle::is_accepting_orders(&campaign, lifecycle::today()) {
        return Err(AppError::new(ErrorCode::CampaignNotAccepting).into());
    }
    Ok(campaign)
}

/// POST /api/campaigns/{id}/orders
pub async fn submit(
    State(state): State<AppState>,
    Path(campaign_id): Path<i64>,
    Json(data): Json<OrderSubmit>,
) -> ApiResult<CustomerOrder> {
    let name = data.customer_name.trim();
    if name.is_empty() {
        return Err(AppError::validation("customer name is required").into());
    }

    accepting_campaign(&state, campaign_id).await?;

    let total = validate_quantities(&state, campaign_id, &data.quantities).await?;
    if total <= 0.0 {
        return Err(AppError::new(ErrorCode::OrderEmpty).into());
    }

    let order_id = db::orders::submit(
        &state.pool,
        campaign_id,
        name,
        data.note.as_deref(),
        &data.quantities,
    )
    .await?;

    let order = db::orders::get(&state.pool, order_id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::OrderNotFound, "Order vanished"))?;
    Ok(Json(order))
}

#[derive(Deserialize)]
pub struct OrderRevise {
    pub quantities: HashMap<i64, i64>,
}

/// PUT /api/orders/{id} — full replacement of the quantity map; omitting
/// an item removes it
pub async fn revise(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Json(data): Json<OrderRevise>,
) -> ApiResult<ApiResponse<()>> {
    let order = db::orders::get(&state.pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    accepting_campaign(&state, order.campaign_id).await?;

    let total = validate_quantities(&state, order.campaign_id, &data.quantities).await?;
    if total <= 0.0 {
        return Err(AppError::new(ErrorCode::OrderEmpty).into());
    }

    db::orders::revise(&state.pool, order_id, &data.quantities).await?;
    Ok(Json(ApiResponse::ok()))
}

#[derive(Deserialize)]
pub struct FindQuery {
    pub name: String,
}

/// GET /api/campaigns/{id}/orders/find?name= — several independent orders
/// can come back for one name
pub async fn find_by_name(
    State(state): State<AppState>,
    Path(campaign_id): Path<i64>,
    Query(query): Query<FindQuery>,
) -> ApiResult<Vec<OrderWithTotal>> {
    let name = query.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name query parameter is required").into());
    }
    db::campaigns::get(&state.pool, campaign_id)
        .await?
        .ok_or_else(|| AppError::not_found("Campaign"))?;

    let orders =
        db::aggregates::find_orders_with_totals_by_name(&state.pool, campaign_id, name).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<CustomerOrder> {
    let order = db::orders::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    Ok(Json(order))
}

/// GET /api/orders/{id}/detail
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<shared::models::OrderDetailRow>> {
    db::orders::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    Ok(Json(db::aggregates::order_detail(&state.pool, id).await?))
}

/// GET /api/orders/{id}/quantities — pre-fill for the edit form
pub async fn quantities(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<HashMap<i64, i64>> {
    db::orders::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    Ok(Json(db::aggregates::order_quantities(&state.pool, id).await?))
}

#[derive(Deserialize)]
pub struct PaidUpdate {
    pub is_paid: bool,
}

/// PUT /api/admin/orders/{id}/paid
pub async fn set_paid(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<PaidUpdate>,
) -> ApiResult<ApiResponse<()>> {
    let affected = db::orders::set_paid(&state.pool, id, data.is_paid).await?;
    if affected == 0 {
        return Err(AppError::new(ErrorCode::OrderNotFound).into());
    }
    Ok(Json(ApiResponse::ok()))
}

/// DELETE /api/admin/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    let affected = db::orders::delete(&state.pool, id).await?;
    if affected == 0 {
        return Err(AppError::new(ErrorCode::OrderNotFound).into());
    }
    Ok(Json(ApiResponse::ok()))
}
