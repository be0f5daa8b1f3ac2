// handlers/public/product/create.rs - POST /createProduct handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

use crate::api::format::product_to_api_value;
use crate::database::models::CreateProduct;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /createProduct - Validate and store a new product
///
/// Output (201):
/// ```json
/// { "status": 201, "message": "Created", "data": { "id": "<hex>", "data": [ { "_id": "<hex>", "name": "..." } ] } }
/// ```
pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<CreateProduct>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(input) = payload?;
    let product = state.products.create(input).await?;

    Ok(ApiResponse::created(json!({
        "id": product.id.to_hex(),
        "data": [product_to_api_value(&product)],
    })))
}
