// handlers/public/product/show.rs - GET /getProduct/:key handler

use axum::extract::{Path, State};
use serde_json::{json, Value};

use crate::api::format::product_to_api_value;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /getProduct/:key - Fetch one product by id, or by name when the key
/// is not an id of a stored product. A miss answers 500.
pub async fn show_get(State(state): State<AppState>, Path(key): Path<String>) -> ApiResult<Value> {
    let product = state.products.get(&key).await?;
    Ok(ApiResponse::success(json!({ "data": [product_to_api_value(&product)] })))
}
