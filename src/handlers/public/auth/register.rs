// handlers/public/auth/register.rs - POST /auth/register handler

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use serde_json::json;

use crate::api::cookies;
use crate::database::models::RegisterUser;
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::state::AppState;

/// POST /auth/register - Create an account and sign it in
///
/// Input:
/// ```json
/// { "username": "a", "password": "123456", "email": "a@x.com" }
/// ```
///
/// Output (201):
/// ```json
/// { "status": 201, "message": "Created", "data": { "jwt": "<access token>", "data": "<user id>" } }
/// ```
///
/// The refresh token is only delivered as the `refreshToken` cookie.
/// A taken username or email answers 400 with "Username already exists." or
/// "Email already exists.".
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<RegisterUser>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let registration = state.users.register(input).await?;

    let refresh = cookies::refresh_cookie(&state.config.security.cookie, &registration.tokens.refresh_token)?;

    Ok((
        AppendHeaders([refresh]),
        ApiResponse::created(json!({
            "jwt": registration.tokens.access_token,
            "data": registration.user_id.to_hex(),
        })),
    ))
}
