#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{header, Response, StatusCode};
use serde_json::{json, Value};

use catalog_api::app::app;
use catalog_api::config::AppConfig;
use catalog_api::database::DatabaseManager;
use catalog_api::state::AppState;

/// Router served in-process on a free port, backed by a fresh in-memory database.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(AppConfig::in_memory()).await
    }

    pub async fn spawn_with(config: AppConfig) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        let state = AppState::new(config, DatabaseManager::in_memory());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let server = Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, username: &str, password: &str, email: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/auth/register"))
            .json(&json!({ "username": username, "password": password, "email": email }))
            .send()
            .await?)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    /// Register a fresh user and return its access token.
    pub async fn access_token(&self, username: &str) -> Result<String> {
        let resp = self
            .register(username, "123456", &format!("{}@example.com", username))
            .await?;
        anyhow::ensure!(resp.status() == StatusCode::CREATED, "register failed: {}", resp.status());
        let body: Value = resp.json().await?;
        body["data"]["jwt"]
            .as_str()
            .map(str::to_string)
            .context("register response has no jwt")
    }

    pub async fn create_product(&self, product: Value) -> Result<Value> {
        let resp = self
            .client
            .post(self.url("/createProduct"))
            .json(&product)
            .send()
            .await?;
        anyhow::ensure!(resp.status() == StatusCode::CREATED, "create failed: {}", resp.status());
        Ok(resp.json().await?)
    }

    /// GET with the bearer token and the cookie marker header the listing route requires.
    pub async fn get_authed(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .header("Cookies", "present")
            .send()
            .await?)
    }
}

pub fn set_cookies(resp: &Response) -> Vec<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub fn product(name: &str, category: &str, price: f64, sizes: &[i32]) -> Value {
    json!({
        "name": name,
        "description": format!("{} description", name),
        "price": price,
        "quantity": 10,
        "category": category,
        "sizes": sizes,
    })
}
