// handlers/public/auth/login.rs - POST /auth/login handler

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use serde_json::json;

use crate::api::cookies;
use crate::database::models::LoginUser;
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::state::AppState;

/// POST /auth/login - Authenticate and receive a fresh token pair
///
/// Output (200): `data.data` holds the access token. Sets the `token`
/// cookie (access token) and the HttpOnly `refreshToken` cookie.
///
/// Unknown user and wrong password both answer 400 with the same
/// "Username or password are incorrect" message.
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginUser>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let tokens = state.users.login(input).await?;

    let cookie_config = &state.config.security.cookie;
    let access = cookies::access_cookie(cookie_config, &tokens.access_token)?;
    let refresh = cookies::refresh_cookie(cookie_config, &tokens.refresh_token)?;

    Ok((
        AppendHeaders([access, refresh]),
        ApiResponse::success(json!({ "data": tokens.access_token })),
    ))
}
