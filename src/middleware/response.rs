use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::{ApiError, ErrorDetail};

/// Wrapper for API responses that adds the `{status, message, data}` envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: StatusCode,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK
    pub fn success(data: T) -> Self {
        Self::with_status(data, StatusCode::OK)
    }

    /// Response with a custom status code; the message is its reason phrase
    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self {
            data,
            status_code,
            message: status_code.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    /// 201 Created
    pub fn created(data: T) -> Self {
        Self::with_status(data, StatusCode::CREATED)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return ApiError::internal(format!("Failed to serialize response data: {e}")).into_response();
            }
        };

        let envelope = json!({
            "status": self.status_code.as_u16(),
            "message": self.message,
            "data": data_value,
        });

        (self.status_code, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// Replace error bodies with their detailed form (raw error under
/// `data.error`). Status and headers set by outer layers are kept.
/// Only layered when `api.expose_error_details` is on.
pub async fn expose_error_details(response: Response) -> Response {
    let Some(ErrorDetail(body)) = response.extensions().get::<ErrorDetail>().cloned() else {
        return response;
    };

    let (parts, _) = response.into_parts();
    Response::from_parts(parts, Json(body).into_response().into_body())
}
