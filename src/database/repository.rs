use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::database::manager::DatabaseError;
use crate::database::models::{Product, User};
use crate::filter::ProductFilter;

/// Storage seam for the product collection.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: &Product) -> Result<(), DatabaseError>;

    /// All products matching `filter` (natural order when it carries no sort),
    /// or every product when `filter` is `None`.
    async fn find(&self, filter: Option<&ProductFilter>) -> Result<Vec<Product>, DatabaseError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Product>, DatabaseError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, DatabaseError>;
}

/// Storage seam for the user collection.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn count_by_username(&self, username: &str) -> Result<u64, DatabaseError>;

    async fn count_by_email(&self, email: &str) -> Result<u64, DatabaseError>;

    /// Fails with `DatabaseError::Duplicate` when the backend enforces
    /// uniqueness and the username or email is already taken.
    async fn insert(&self, user: &User) -> Result<(), DatabaseError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;
}
