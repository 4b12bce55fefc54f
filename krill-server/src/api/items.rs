//! Item endpoints

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{ApiResponse, AppError};
use shared::models::{Item, ItemCreate};

use super::ApiResult;
use crate::db;
use crate::state::AppState;

/// GET /api/campaigns/{id}/items
pub async fn list_for_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<i64>,
) -> ApiResult<Vec<Item>> {
    db::campaigns::get(&state.pool, campaign_id)
        .await?
        .ok_or_else(|| AppError::not_found("Campaign"))?;
    Ok(Json(db::items::list_by_campaign(&state.pool, campaign_id).await?))
}

/// POST /api/admin/campaigns/{id}/items
pub async fn add(
    State(state): State<AppState>,
    Path(campaign_id): Path<i64>,
    Json(data): Json<ItemCreate>,
) -> ApiResult<Item> {
    db::campaigns::get(&state.pool, campaign_id)
        .await?
        .ok_or_else(|| AppError::not_found("Campaign"))?;
    super::campaigns::validate_items(std::slice::from_ref(&data))?;

    let id = db::items::add(&state.pool, campaign_id, &data).await?;
    let item = db::items::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Item"))?;
    Ok(Json(item))
}

/// DELETE /api/admin/items/{id} — also removes its line items; affected
/// order totals shrink on the next aggregation
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    let affected = db::items::delete(&state.pool, id).await?;
    if affected == 0 {
        return Err(AppError::not_found("Item").into());
    }
    Ok(Json(ApiResponse::ok()))
}
