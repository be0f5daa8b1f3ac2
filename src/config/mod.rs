use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_filter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Mongodb,
    Memory,
}

impl std::str::FromStr for DatabaseBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(DatabaseBackend::Mongodb),
            "memory" | "in-memory" => Ok(DatabaseBackend::Memory),
            other => Err(format!("unknown database backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub uri: String,
    pub products_database: String,
    pub products_collection: String,
    pub users_database: String,
    pub users_collection: String,
    pub operation_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub create_indexes: bool,
}

impl DatabaseConfig {
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Include raw error text in response bodies. Leaks internals; off in production.
    pub expose_error_details: bool,
    pub require_auth_for_listing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
    pub cors_origins: Vec<String>,
    pub cookie: CookieConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieConfig {
    pub domain: Option<String>,
    pub secure: bool,
    pub same_site: String,
    pub access_max_age_secs: i64,
    pub refresh_max_age_secs: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    pub fn is_development(&self) -> bool {
        matches!(self.environment, Environment::Development)
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Some(v) = env::var("CATALOG_API_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("LOG_FILTER") {
            self.server.log_filter = v;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_BACKEND") {
            match v.parse() {
                Ok(backend) => self.database.backend = backend,
                Err(e) => eprintln!("ignoring DATABASE_BACKEND: {}", e),
            }
        }
        if let Ok(v) = env::var("MONGODB_URI") {
            self.database.uri = v;
        }
        if let Ok(v) = env::var("MONGODB_PRODUCTS_DATABASE") {
            self.database.products_database = v;
        }
        if let Ok(v) = env::var("MONGODB_PRODUCTS_COLLECTION") {
            self.database.products_collection = v;
        }
        if let Ok(v) = env::var("MONGODB_USERS_DATABASE") {
            self.database.users_database = v;
        }
        if let Ok(v) = env::var("MONGODB_USERS_COLLECTION") {
            self.database.users_collection = v;
        }
        if let Ok(v) = env::var("DATABASE_OPERATION_TIMEOUT_SECS") {
            self.database.operation_timeout_secs = v.parse().unwrap_or(self.database.operation_timeout_secs);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs = v.parse().unwrap_or(self.database.connect_timeout_secs);
        }
        if let Ok(v) = env::var("DATABASE_CREATE_INDEXES") {
            self.database.create_indexes = v.parse().unwrap_or(self.database.create_indexes);
        }

        // API overrides
        if let Ok(v) = env::var("API_EXPOSE_ERROR_DETAILS") {
            self.api.expose_error_details = v.parse().unwrap_or(self.api.expose_error_details);
        }
        if let Ok(v) = env::var("API_REQUIRE_AUTH_FOR_LISTING") {
            self.api.require_auth_for_listing = v.parse().unwrap_or(self.api.require_auth_for_listing);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(v) = env::var("COOKIE_DOMAIN") {
            self.security.cookie.domain = if v.trim().is_empty() { None } else { Some(v) };
        }
        if let Ok(v) = env::var("COOKIE_SECURE") {
            self.security.cookie.secure = v.parse().unwrap_or(self.security.cookie.secure);
        }
        if let Ok(v) = env::var("COOKIE_SAME_SITE") {
            self.security.cookie.same_site = v;
        }

        self
    }

    fn base_database() -> DatabaseConfig {
        DatabaseConfig {
            backend: DatabaseBackend::Mongodb,
            uri: "mongodb://localhost:27017".to_string(),
            products_database: "product".to_string(),
            products_collection: "productData".to_string(),
            users_database: "user".to_string(),
            users_collection: "users".to_string(),
            operation_timeout_secs: 10,
            connect_timeout_secs: 10,
            create_indexes: true,
        }
    }

    fn base_security(jwt_secret: &str, origins: Vec<String>, cookie: CookieConfig) -> SecurityConfig {
        SecurityConfig {
            jwt_secret: jwt_secret.to_string(),
            access_token_ttl_secs: 60 * 60,
            refresh_token_ttl_secs: 60 * 60 * 24 * 7,
            cors_origins: origins,
            cookie,
        }
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                log_filter: "catalog_api=debug,tower_http=debug,info".to_string(),
            },
            database: Self::base_database(),
            api: ApiConfig {
                expose_error_details: true,
                require_auth_for_listing: true,
            },
            security: Self::base_security(
                "development-secret",
                vec!["http://localhost:3000".to_string()],
                CookieConfig {
                    domain: Some("localhost".to_string()),
                    secure: false,
                    same_site: "Lax".to_string(),
                    access_max_age_secs: 60 * 60 * 24,
                    refresh_max_age_secs: 60 * 60 * 24 * 7,
                },
            ),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                log_filter: "catalog_api=debug,info".to_string(),
            },
            database: Self::base_database(),
            api: ApiConfig {
                expose_error_details: true,
                require_auth_for_listing: true,
            },
            // No default secret outside development: issuing tokens fails until JWT_SECRET is set.
            security: Self::base_security(
                "",
                vec![],
                CookieConfig {
                    domain: None,
                    secure: true,
                    same_site: "None".to_string(),
                    access_max_age_secs: 60 * 60 * 24,
                    refresh_max_age_secs: 60 * 60 * 24 * 7,
                },
            ),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                log_filter: "info".to_string(),
            },
            database: DatabaseConfig {
                operation_timeout_secs: 5,
                ..Self::base_database()
            },
            api: ApiConfig {
                expose_error_details: false,
                require_auth_for_listing: true,
            },
            security: Self::base_security(
                "",
                vec![],
                CookieConfig {
                    domain: None,
                    secure: true,
                    same_site: "None".to_string(),
                    access_max_age_secs: 60 * 60 * 24,
                    refresh_max_age_secs: 60 * 60 * 24 * 7,
                },
            ),
        }
    }

    /// Development profile with the in-memory backend, untouched by the process environment.
    pub fn in_memory() -> Self {
        let mut config = Self::development();
        config.database.backend = DatabaseBackend::Memory;
        config
    }
}
