use std::sync::Arc;

use crate::auth::Credentials;
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::services::{ProductService, UserService};

/// Shared request state. Cloned per request; everything inside is `Arc`'d.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub database: Arc<DatabaseManager>,
    pub credentials: Arc<Credentials>,
    pub products: ProductService,
    pub users: UserService,
}

impl AppState {
    pub fn new(config: AppConfig, database: DatabaseManager) -> Self {
        let timeout = config.database.operation_timeout();
        let credentials = Arc::new(Credentials::from_config(&config.security));
        let products = ProductService::new(database.products(), timeout);
        let users = UserService::new(database.users(), credentials.clone(), timeout);

        Self {
            config: Arc::new(config),
            database: Arc::new(database),
            credentials,
            products,
            users,
        }
    }
}
