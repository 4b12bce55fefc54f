//! API routes
//!
//! Two surfaces share one router: the public customer surface (browse
//! accepting campaigns, submit/revise/find orders) and the organizer
//! surface under `/api/admin`, gated by the shared-secret middleware.

pub mod auth;
pub mod campaigns;
pub mod health;
pub mod items;
pub mod orders;
pub mod reports;

use axum::routing::{delete, get, post, put};
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::error::ServiceError;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, ServiceError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Customer surface (no auth; customers are identified by name only)
    let public = Router::new()
        .route("/api/campaigns/accepting", get(campaigns::list_accepting))
        .route("/api/campaigns/{id}", get(campaigns::get_by_id))
        .route("/api/campaigns/{id}/items", get(items::list_for_campaign))
        .route("/api/campaigns/{id}/orders", post(orders::submit))
        .route("/api/campaigns/{id}/orders/find", get(orders::find_by_name))
        .route(
            "/api/orders/{id}",
            get(orders::get_by_id).put(orders::revise),
        )
        .route("/api/orders/{id}/detail", get(orders::detail))
        .route("/api/orders/{id}/quantities", get(orders::quantities));

    // Organizer surface (shared-secret gated)
    let admin = Router::new()
        .route(
            "/api/admin/campaigns",
            post(campaigns::create).get(campaigns::list_all),
        )
        .route(
            "/api/admin/campaigns/{id}",
            put(campaigns::update).delete(campaigns::delete_campaign),
        )
        .route("/api/admin/campaigns/{id}/status", put(campaigns::set_status))
        .route("/api/admin/campaigns/{id}/items", post(items::add))
        .route("/api/admin/items/{id}", delete(items::delete_item))
        .route(
            "/api/admin/campaigns/{id}/summary",
            get(reports::campaign_summary),
        )
        .route("/api/admin/items/{id}/buyers", get(reports::item_buyers))
        .route(
            "/api/admin/campaigns/{id}/orders",
            get(reports::campaign_orders),
        )
        .route("/api/admin/orders/{id}/paid", put(orders::set_paid))
        .route("/api/admin/orders/{id}", delete(orders::delete_order))
        .route(
            "/api/admin/campaigns/{id}/export",
            get(reports::export_csv),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::admin_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
