// HTTP API Error Types
use axum::{extract::rejection::{JsonRejection, QueryRejection}, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::HashMap;
use validator::ValidationErrors;

use crate::auth::{CredentialError, TokenError};
use crate::database::DatabaseError;
use crate::filter::FilterError;
use crate::services::ServiceError;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// HTTP API error rendered into the `{status, message, data}` envelope
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError { field_errors: HashMap<String, String> },
    InvalidJson(String),
    Conflict(String),
    Auth(String),
    Token(TokenError),

    // 401 Unauthorized
    Unauthorized(String),

    // 500 Internal Server Error. A missing document is reported here too.
    NotFound(String),
    Persistence(String),
    Configuration(String),
    Internal(String),
}

/// Full error body including the internal detail. Attached to error responses
/// so `expose_error_details` can swap it in.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub Value);

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError { .. } => 400,
            ApiError::InvalidJson(_) => 400,
            ApiError::Conflict(_) => 400,
            ApiError::Auth(_) => 400,
            ApiError::Token(e) => e.status_code(),
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 500,
            ApiError::Persistence(_) => 500,
            ApiError::Configuration(_) => 500,
            ApiError::Internal(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> String {
        match self {
            ApiError::ValidationError { .. } => "Validation Error".to_string(),
            ApiError::InvalidJson(_) => "No content-type/json provided.".to_string(),
            ApiError::Conflict(msg) => msg.clone(),
            ApiError::Auth(msg) => msg.clone(),
            ApiError::Token(e) => e.to_string(),
            ApiError::Unauthorized(msg) => msg.clone(),
            ApiError::NotFound(_)
            | ApiError::Persistence(_)
            | ApiError::Configuration(_)
            | ApiError::Internal(_) => INTERNAL_MESSAGE.to_string(),
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Auth(_) => "AUTH_ERROR",
            ApiError::Token(_) => "INVALID_TOKEN",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Persistence(_) => "PERSISTENCE_ERROR",
            ApiError::Configuration(_) => "CONFIGURATION_ERROR",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Raw error text of a server-side failure. Never sent unless error
    /// details are exposed.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::NotFound(d)
            | ApiError::Persistence(d)
            | ApiError::Configuration(d)
            | ApiError::Internal(d) => Some(d),
            _ => None,
        }
    }

    /// Convert to the response envelope, without internal detail
    pub fn to_json(&self) -> Value {
        let data = match self {
            ApiError::ValidationError { field_errors } => json!({
                "code": self.error_code(),
                "error": field_errors,
            }),
            ApiError::InvalidJson(reason) => json!({
                "code": self.error_code(),
                "error": reason,
            }),
            _ => json!({ "code": self.error_code() }),
        };

        json!({
            "status": self.status_code(),
            "message": self.message(),
            "data": data,
        })
    }

    /// Envelope with the internal detail under `data.error`
    pub fn to_json_with_detail(&self) -> Value {
        let mut body = self.to_json();
        if let Some(detail) = self.detail() {
            body["data"]["error"] = Value::String(detail.to_string());
        }
        body
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation_error(field_errors: HashMap<String, String>) -> Self {
        ApiError::ValidationError { field_errors }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

fn flatten_validation(errors: &ValidationErrors) -> HashMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

// Convert other error types to ApiError
impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => ApiError::validation_error(flatten_validation(&errors)),
            ServiceError::Conflict(msg) => ApiError::Conflict(msg),
            ServiceError::InvalidCredentials => ApiError::Auth(ServiceError::InvalidCredentials.to_string()),
            ServiceError::NotFound(msg) => ApiError::NotFound(msg),
            ServiceError::Database(e) => e.into(),
            ServiceError::Credentials(e) => e.into(),
            ServiceError::Task(msg) => {
                tracing::error!("Background task failed: {}", msg);
                ApiError::Internal(msg)
            }
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::ConfigMissing(_) | DatabaseError::InvalidDatabaseName(_) => {
                tracing::error!("Database configuration error: {}", err);
                ApiError::Configuration(err.to_string())
            }
            DatabaseError::Duplicate(field) => ApiError::Conflict(format!("Duplicate {field}")),
            DatabaseError::Timeout(_) | DatabaseError::Mongo(_) => {
                tracing::error!("Database error: {}", err);
                ApiError::Persistence(err.to_string())
            }
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        tracing::error!("Credential error: {}", err);
        match err {
            CredentialError::MissingSecret | CredentialError::Signing(_) => ApiError::Configuration(err.to_string()),
            CredentialError::Hashing(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::Token(err)
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        let mut field_errors = HashMap::new();
        field_errors.insert(err.parameter().to_string(), err.to_string());
        ApiError::validation_error(field_errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_json(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        let mut field_errors = HashMap::new();
        field_errors.insert("query".to_string(), rejection.body_text());
        ApiError::validation_error(field_errors)
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{}: {}", self.message(), detail),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self.to_json())).into_response();
        if self.detail().is_some() {
            response
                .extensions_mut()
                .insert(ErrorDetail(self.to_json_with_detail()));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_a_server_error() {
        let err = ApiError::from(ServiceError::NotFound("Product 'x' not found".to_string()));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "Internal server error");

        let body = err.to_json();
        assert_eq!(body["status"], 500);
        assert!(body["data"].get("error").is_none());

        let exposed = err.to_json_with_detail();
        assert_eq!(exposed["data"]["error"], "Product 'x' not found");
    }

    #[test]
    fn client_errors_keep_their_messages() {
        let err = ApiError::from(ServiceError::Conflict("Username already exists.".to_string()));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_json()["message"], "Username already exists.");

        let err = ApiError::from(ServiceError::InvalidCredentials);
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Username or password are incorrect");

        let err = ApiError::from(TokenError::Expired);
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Token has expired.");
    }

    #[test]
    fn filter_errors_name_the_parameter() {
        let err = ApiError::from(FilterError::InvalidPrice("cheap".to_string()));
        let body = err.to_json();
        assert_eq!(body["status"], 400);
        assert_eq!(body["message"], "Validation Error");
        assert_eq!(body["data"]["error"]["price"], "Invalid price: cheap");
    }

    #[test]
    fn timeouts_are_persistence_errors() {
        let err = ApiError::from(DatabaseError::Timeout(std::time::Duration::from_secs(5)));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "PERSISTENCE_ERROR");
    }
}
