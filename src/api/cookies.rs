use axum::http::{header, HeaderName, HeaderValue};

use crate::config::CookieConfig;
use crate::error::ApiError;

pub const ACCESS_COOKIE: &str = "token";
pub const REFRESH_COOKIE: &str = "refreshToken";

/// `Set-Cookie` header for the access token. Readable by scripts.
pub fn access_cookie(config: &CookieConfig, token: &str) -> Result<(HeaderName, HeaderValue), ApiError> {
    set_cookie(config, ACCESS_COOKIE, token, config.access_max_age_secs, false)
}

/// `Set-Cookie` header for the refresh token. HttpOnly.
pub fn refresh_cookie(config: &CookieConfig, token: &str) -> Result<(HeaderName, HeaderValue), ApiError> {
    set_cookie(config, REFRESH_COOKIE, token, config.refresh_max_age_secs, true)
}

pub fn clear_refresh_cookie(config: &CookieConfig) -> Result<(HeaderName, HeaderValue), ApiError> {
    set_cookie(config, REFRESH_COOKIE, "", 0, true)
}

fn set_cookie(
    config: &CookieConfig,
    name: &str,
    value: &str,
    max_age: i64,
    http_only: bool,
) -> Result<(HeaderName, HeaderValue), ApiError> {
    let cookie = format_cookie(config, name, value, max_age, http_only);
    let header_value = HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::internal(format!("Failed to create cookie: {}", e)))?;
    Ok((header::SET_COOKIE, header_value))
}

fn format_cookie(config: &CookieConfig, name: &str, value: &str, max_age: i64, http_only: bool) -> String {
    let mut cookie = format!("{}={}; Path=/; Max-Age={}", name, value, max_age);
    if let Some(domain) = config.domain.as_deref().filter(|d| !d.is_empty()) {
        cookie.push_str(&format!("; Domain={}", domain));
    }
    if http_only {
        cookie.push_str("; HttpOnly");
    }
    if config.secure {
        cookie.push_str("; Secure");
    }
    if !config.same_site.is_empty() {
        cookie.push_str(&format!("; SameSite={}", config.same_site));
    }
    cookie
}
