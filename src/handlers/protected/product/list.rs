// handlers/protected/product/list.rs - GET /getProducts handler

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension,
};
use serde_json::{json, Value};

use crate::api::format::products_to_api_values;
use crate::filter::{ProductFilter, ProductQuery};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /getProducts - List products, optionally filtered
///
/// Query parameters: `category`, `price`, `sizes` (comma separated), and
/// with `price` only, `type=gte|lte` and `ord=asc|desc`. Without any of
/// `category`, `price` or `sizes` every product is returned in storage order.
pub async fn list_get(
    State(state): State<AppState>,
    user: Option<Extension<AuthUser>>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> ApiResult<Value> {
    let Query(query) = query?;
    let filter = ProductFilter::from_query(&query)?;
    let products = state.products.list(filter).await?;

    tracing::debug!(
        user_id = user.as_ref().map(|Extension(u)| u.id.as_str()),
        count = products.len(),
        "Listed products"
    );

    Ok(ApiResponse::success(json!({ "data": products_to_api_values(&products) })))
}
