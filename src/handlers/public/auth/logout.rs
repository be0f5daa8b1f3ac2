// handlers/public/auth/logout.rs - POST /auth/logout handler

use axum::{
    extract::State,
    response::{AppendHeaders, IntoResponse},
};
use serde_json::json;

use crate::api::cookies;
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::state::AppState;

/// POST /auth/logout - Expire the refresh cookie. Sessions are stateless,
/// so an access token already handed out stays valid until it expires.
pub async fn logout_post(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let cleared = cookies::clear_refresh_cookie(&state.config.security.cookie)?;

    Ok((
        AppendHeaders([cleared]),
        ApiResponse::success(json!({ "data": "logged out" })),
    ))
}
