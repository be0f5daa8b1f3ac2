use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Product, User};
use crate::database::repository::{ProductRepository, UserRepository};
use crate::filter::ProductFilter;

/// Products kept in insertion order, standing in for natural collection order.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), DatabaseError> {
        self.products.write().await.push(product.clone());
        Ok(())
    }

    async fn find(&self, filter: Option<&ProductFilter>) -> Result<Vec<Product>, DatabaseError> {
        let products = self.products.read().await;
        Ok(match filter {
            Some(filter) => filter.apply(products.iter().cloned()),
            None => products.clone(),
        })
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Product>, DatabaseError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, DatabaseError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.name == name).cloned())
    }
}

/// Enforces the same username/email uniqueness as the MongoDB indexes.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn count_by_username(&self, username: &str) -> Result<u64, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.username == username).count() as u64)
    }

    async fn count_by_email(&self, email: &str) -> Result<u64, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.email == email).count() as u64)
    }

    async fn insert(&self, user: &User) -> Result<(), DatabaseError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(DatabaseError::Duplicate("username".to_string()));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::Duplicate("email".to_string()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}
