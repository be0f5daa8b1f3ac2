use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::{DatabaseBackend, DatabaseConfig};
use crate::database::memory::{InMemoryProductRepository, InMemoryUserRepository};
use crate::database::mongo::{MongoProductRepository, MongoUserRepository};
use crate::database::repository::{ProductRepository, UserRepository};

/// Errors from DatabaseManager and the repositories it hands out
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database name: {0}")]
    InvalidDatabaseName(String),

    #[error("Duplicate {0}")]
    Duplicate(String),

    #[error("Database operation timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

enum Backend {
    Mongo(Client),
    Memory,
}

/// Owns the database client and the repositories built on top of it.
/// Constructed once in `main` and shared through `AppState`.
pub struct DatabaseManager {
    backend: Backend,
    products: Arc<dyn ProductRepository>,
    users: Arc<dyn UserRepository>,
}

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        match config.backend {
            DatabaseBackend::Mongodb => Self::connect_mongo(config).await,
            DatabaseBackend::Memory => {
                info!("Using in-memory database backend");
                Ok(Self::in_memory())
            }
        }
    }

    /// Fresh, empty in-memory backend.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory,
            products: Arc::new(InMemoryProductRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
        }
    }

    async fn connect_mongo(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.uri.trim().is_empty() {
            return Err(DatabaseError::ConfigMissing("MONGODB_URI"));
        }
        for name in [
            &config.products_database,
            &config.products_collection,
            &config.users_database,
            &config.users_collection,
        ] {
            if !Self::is_valid_name(name) {
                return Err(DatabaseError::InvalidDatabaseName(name.clone()));
            }
        }

        let connect_timeout = Duration::from_secs(config.connect_timeout_secs);
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(connect_timeout);
        options.server_selection_timeout = Some(connect_timeout);

        let client = Client::with_options(options)?;
        client.database("admin").run_command(doc! { "ping": 1 }).await?;
        info!(uri = %Self::redacted_uri(&config.uri), "Connected to MongoDB");

        let products = MongoProductRepository::new(
            &client.database(&config.products_database),
            &config.products_collection,
        );
        let users = MongoUserRepository::new(
            &client.database(&config.users_database),
            &config.users_collection,
        );
        if config.create_indexes {
            users.init_indexes().await?;
        }

        Ok(Self {
            backend: Backend::Mongo(client),
            products: Arc::new(products),
            users: Arc::new(users),
        })
    }

    pub fn products(&self) -> Arc<dyn ProductRepository> {
        self.products.clone()
    }

    pub fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Mongo(_) => "mongodb",
            Backend::Memory => "memory",
        }
    }

    /// Pings the server; the in-memory backend is always healthy
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        if let Backend::Mongo(ref client) = self.backend {
            client.database("admin").run_command(doc! { "ping": 1 }).await?;
        }
        Ok(())
    }

    /// Close the client (e.g., on shutdown)
    pub async fn close(&self) {
        if let Backend::Mongo(ref client) = self.backend {
            client.clone().shutdown().await;
            info!("Closed MongoDB client");
        }
    }

    /// Connection string with the password masked, for logging.
    pub fn redacted_uri(uri: &str) -> String {
        if let Ok(mut url) = url::Url::parse(uri) {
            if url.password().is_some() && url.set_password(Some("****")).is_ok() {
                return url.into();
            }
            if url.host_str().is_some() {
                return url.into();
            }
        }

        // Multi-host seed lists are not valid URLs; mask the whole userinfo.
        match (uri.find("://"), uri.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                format!("{}****{}", &uri[..scheme_end + 3], &uri[at..])
            }
            _ => uri.to_string(),
        }
    }

    /// Database and collection names are restricted to `[A-Za-z0-9_-]`, 1-64 chars.
    fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && name.len() <= 64
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}
