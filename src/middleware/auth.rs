use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::TokenError;
use crate::error::ApiError;
use crate::state::AppState;

/// Custom header that must accompany the bearer token.
pub const COOKIE_MARKER_HEADER: &str = "Cookies";

/// Authenticated user context extracted from the access token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
}

/// JWT authentication middleware that validates tokens and extracts user context
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers)?;

    let claims = state.credentials.verify_access_token(&token).map_err(|e| {
        tracing::warn!(path = %request.uri().path(), "Rejected access token: {}", e);
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(AuthUser { id: claims.subject });

    Ok(next.run(request).await)
}

/// Both the Authorization header and the cookie marker must be present and
/// non-empty before the token is looked at.
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, ApiError> {
    let authorization = header_str(headers, "authorization");
    let marker = header_str(headers, COOKIE_MARKER_HEADER);

    let (Some(auth_str), Some(_)) = (authorization, marker) else {
        return Err(ApiError::unauthorized("Unauthorized"));
    };

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        Some(_) => Err(TokenError::Invalid("Empty JWT token".to_string()).into()),
        None => Err(TokenError::Invalid("Authorization header must use Bearer token format".to_string()).into()),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
}
