//! Shared-secret authentication for the organizer API
//!
//! A single bearer token (`ADMIN_TOKEN`) gates every `/api/admin` route.
//! There are no accounts or sessions; whoever holds the secret is the
//! organizer.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::{AppError, ErrorCode};

use crate::state::AppState;

/// Constant-time token comparison.
fn token_matches(presented: &str, expected: &str) -> bool {
    let a = presented.as_bytes();
    let b = expected.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Middleware that checks the Authorization bearer token against the
/// configured admin secret.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::with_message(ErrorCode::NotAuthenticated, "Invalid Authorization format")
            .into_response()
    })?;

    if !token_matches(token, &state.admin_token) {
        tracing::debug!("Admin token mismatch");
        return Err(AppError::new(ErrorCode::InvalidCredentials).into_response());
    }

    Ok(next.run(request).await)
}
