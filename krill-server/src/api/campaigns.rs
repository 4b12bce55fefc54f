//! Campaign endpoints
//!
//! Field validation (required title, well-formed dates, end not before
//! start, positive item prices) lives here, not in the db layer.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::error::{ApiResponse, AppError};
use shared::models::{Campaign, CampaignCreate, CampaignStatus, CampaignUpdate, ItemCreate};

use super::ApiResult;
use crate::db;
use crate::lifecycle;
use crate::state::AppState;

/// Reject malformed dates and inverted windows before they reach storage.
fn validate_window(start: Option<&str>, end: Option<&str>) -> Result<(), AppError> {
    let parse = |label: &str, raw: &str| {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            AppError::validation(format!("{label} must be a YYYY-MM-DD date"))
                .with_detail("field", label.to_string())
        })
    };
    let start = start.map(|raw| parse("start_date", raw)).transpose()?;
    let end = end.map(|raw| parse("end_date", raw)).transpose()?;
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        return Err(AppError::validation("end_date must not be before start_date"));
    }
    Ok(())
}

pub(super) fn validate_items(items: &[ItemCreate]) -> Result<(), AppError> {
    for item in items {
        if item.name.trim().is_empty() {
            return Err(AppError::validation("item name is required"));
        }
        if !item.price.is_finite() || item.price <= 0.0 {
            return Err(AppError::validation(format!(
                "item price must be positive, got {}",
                item.price
            )));
        }
    }
    Ok(())
}

/// POST /api/admin/campaigns
pub async fn create(
    State(state): State<AppState>,
    Json(data): Json<CampaignCreate>,
) -> ApiResult<Campaign> {
    if data.title.trim().is_empty() {
        return Err(AppError::validation("campaign title is required").into());
    }
    validate_window(data.start_date.as_deref(), data.end_date.as_deref())?;
    if data.items.is_empty() {
        return Err(AppError::validation("at least one item is required").into());
    }
    validate_items(&data.items)?;

    let id = db::campaigns::create(&state.pool, &data).await?;
    let campaign = db::campaigns::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Campaign"))?;
    Ok(Json(campaign))
}

/// GET /api/admin/campaigns — management list, status only, newest first
pub async fn list_all(State(state): State<AppState>) -> ApiResult<Vec<Campaign>> {
    Ok(Json(db::campaigns::list_all(&state.pool).await?))
}

/// GET /api/campaigns/accepting — open by status AND inside the window
pub async fn list_accepting(State(state): State<AppState>) -> ApiResult<Vec<Campaign>> {
    let campaigns = db::campaigns::list_accepting(&state.pool, lifecycle::today()).await?;
    Ok(Json(campaigns))
}

/// GET /api/campaigns/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Campaign> {
    let campaign = db::campaigns::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Campaign"))?;
    Ok(Json(campaign))
}

/// PUT /api/admin/campaigns/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<CampaignUpdate>,
) -> ApiResult<ApiResponse<()>> {
    if data.title.trim().is_empty() {
        return Err(AppError::validation("campaign title is required").into());
    }
    validate_window(data.start_date.as_deref(), data.end_date.as_deref())?;

    let affected = db::campaigns::update(&state.pool, id, &data).await?;
    if affected == 0 {
        return Err(AppError::not_found("Campaign").into());
    }
    Ok(Json(ApiResponse::ok()))
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    pub status: CampaignStatus,
}

/// PUT /api/admin/campaigns/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<StatusUpdate>,
) -> ApiResult<ApiResponse<()>> {
    let affected = db::campaigns::set_status(&state.pool, id, data.status).await?;
    if affected == 0 {
        return Err(AppError::not_found("Campaign").into());
    }
    Ok(Json(ApiResponse::ok()))
}

/// DELETE /api/admin/campaigns/{id} — cascades to items, orders and
/// line items
pub async fn delete_campaign(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    let affected = db::campaigns::delete(&state.pool, id).await?;
    if affected == 0 {
        return Err(AppError::not_found("Campaign").into());
    }
    Ok(Json(ApiResponse::ok()))
}
