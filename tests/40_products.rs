mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{product, TestServer};

#[tokio::test]
async fn create_then_fetch_by_id_and_name() -> Result<()> {
    let server = TestServer::spawn().await?;

    let created = server.create_product(product("Runner", "shoes", 120.0, &[40, 41])).await?;
    assert_eq!(created["status"], 201);
    let id = created["data"]["id"].as_str().expect("id").to_string();
    let stored = created["data"]["data"][0].clone();
    assert_eq!(stored["_id"], id.as_str());
    assert_eq!(stored["name"], "Runner");

    let by_id: Value = server
        .client
        .get(server.url(&format!("/getProduct/{}", id)))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(by_id["status"], 200);
    assert_eq!(by_id["data"]["data"][0], stored);

    let by_name: Value = server
        .client
        .get(server.url("/getProduct/Runner"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(by_name["data"]["data"][0], stored);

    Ok(())
}

#[tokio::test]
async fn missing_product_is_a_server_error() -> Result<()> {
    let server = TestServer::spawn().await?;

    let resp = server.client.get(server.url("/getProduct/nothing-here")).send().await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await?;
    assert_eq!(body["message"], "Internal server error");
    // Development profile exposes the underlying error
    assert!(body["data"]["error"].as_str().unwrap_or_default().contains("nothing-here"));

    Ok(())
}

#[tokio::test]
async fn error_details_hidden_when_disabled() -> Result<()> {
    let mut config = catalog_api::config::AppConfig::in_memory();
    config.api.expose_error_details = false;
    let server = TestServer::spawn_with(config).await?;

    let resp = server.client.get(server.url("/getProduct/nothing-here")).send().await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await?;
    assert!(body["data"].get("error").is_none(), "detail leaked: {}", body);

    Ok(())
}

#[tokio::test]
async fn invalid_product_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;

    let resp = server
        .client
        .post(server.url("/createProduct"))
        .json(&json!({ "name": "NoPrice", "description": "d", "quantity": 1 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["message"], "Validation Error");
    assert!(body["data"]["error"]["price"].is_string());

    let resp = server
        .client
        .post(server.url("/createProduct"))
        .json(&product("Negative", "shoes", -5.0, &[]))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn detailed_errors_keep_cors_headers() -> Result<()> {
    let server = TestServer::spawn().await?;
    let origin = "http://localhost:3000";

    let resp = server
        .client
        .get(server.url("/getProduct/nothing-here"))
        .header("Origin", origin)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(origin)
    );
    let body: Value = resp.json().await?;
    assert!(body["data"]["error"].is_string());

    Ok(())
}
