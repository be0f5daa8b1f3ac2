use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::{expose_error_details, jwt_auth_middleware, ApiResponse};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        .merge(product_public_routes())
        // Protected
        .merge(product_protected_routes(&state));

    if state.config.api.expose_error_details {
        router = router.layer(middleware::map_response(expose_error_details));
    }

    // Global middleware
    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.security.cors_origins)),
        )
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/auth/register", post(auth::register_post))
        .route("/auth/login", post(auth::login_post))
        .route("/auth/logout", post(auth::logout_post))
}

fn product_public_routes() -> Router<AppState> {
    use public::product;

    Router::new()
        .route("/createProduct", post(product::create_post))
        .route("/getProduct/:key", get(product::show_get))
}

fn product_protected_routes(state: &AppState) -> Router<AppState> {
    use protected::product;

    let routes = Router::new().route("/getProducts", get(product::list_get));

    if state.config.api.require_auth_for_listing {
        routes.route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware))
    } else {
        routes
    }
}

/// Explicit origins allow credentials (cookies); an empty list or `*` falls
/// back to a permissive layer without them.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("cookies"),
        ])
}

async fn root(State(state): State<AppState>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "environment": format!("{:?}", state.config.environment).to_lowercase(),
        "endpoints": {
            "products": "POST /createProduct, GET /getProduct/:key (public)",
            "listing": "GET /getProducts?category&price&sizes&ord&type",
            "auth": "POST /auth/register, /auth/login, /auth/logout (public)",
            "health": "GET /health",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();
    let backend = state.database.backend_name();
    let timeout = state.config.database.operation_timeout();

    let result = match tokio::time::timeout(timeout, state.database.health_check()).await {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(_) => Err(format!("health check timed out after {:?}", timeout)),
    };

    match result {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": { "backend": backend, "status": "ok" },
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            let mut data = json!({
                "status": "degraded",
                "timestamp": now,
                "database": { "backend": backend, "status": "unavailable" },
            });
            if state.config.api.expose_error_details {
                data["database"]["error"] = Value::String(e);
            }
            ApiResponse::with_status(data, StatusCode::SERVICE_UNAVAILABLE)
                .into_response()
        }
    }
}
