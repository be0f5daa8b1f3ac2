mod common;

use anyhow::Result;
use chrono::Duration;
use reqwest::StatusCode;
use serde_json::Value;

use catalog_api::auth::{jwt, Claims};
use catalog_api::config::AppConfig;

use common::TestServer;

#[tokio::test]
async fn listing_requires_both_auth_headers() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.access_token("lister").await?;

    let bare = server.client.get(server.url("/getProducts")).send().await?;
    assert_eq!(bare.status(), StatusCode::UNAUTHORIZED);
    let body: Value = bare.json().await?;
    assert_eq!(body["status"], 401);
    assert_eq!(body["message"], "Unauthorized");

    let no_marker = server
        .client
        .get(server.url("/getProducts"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(no_marker.status(), StatusCode::UNAUTHORIZED);

    let ok = server.get_authed("/getProducts", &token).await?;
    assert_eq!(ok.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn refresh_token_cannot_list() -> Result<()> {
    let server = TestServer::spawn().await?;
    let resp = server.register("lister", "123456", "lister@x.com").await?;
    let refresh = common::set_cookies(&resp)
        .into_iter()
        .find_map(|c| {
            c.strip_prefix("refreshToken=")
                .and_then(|rest| rest.split(';').next())
                .map(str::to_string)
        })
        .expect("refresh cookie");

    let resp = server.get_authed("/getProducts", &refresh).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["message"], "Refresh tokens cannot be used to access resources.");

    Ok(())
}

#[tokio::test]
async fn garbage_token_is_a_client_error() -> Result<()> {
    let server = TestServer::spawn().await?;

    let resp = server.get_authed("/getProducts", "not.a.jwt").await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["status"], 400);

    Ok(())
}

#[tokio::test]
async fn listing_can_be_opened_up() -> Result<()> {
    let mut config = catalog_api::config::AppConfig::in_memory();
    config.api.require_auth_for_listing = false;
    let server = TestServer::spawn_with(config).await?;

    let resp = server.client.get(server.url("/getProducts")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn expired_access_token_is_reported() -> Result<()> {
    let config = AppConfig::in_memory();
    let secret = config.security.jwt_secret.clone();
    let server = TestServer::spawn_with(config).await?;

    let claims = Claims::new(
        Some("64b7f0c2a1b2c3d4e5f60718".to_string()),
        jwt::ACCESS_ISSUER,
        Duration::seconds(-10),
    );
    let expired = jwt::sign(&claims, &secret)?;

    let resp = server.get_authed("/getProducts", &expired).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "Token has expired.");

    Ok(())
}
