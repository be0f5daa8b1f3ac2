use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use tracing::{info, instrument};

use crate::database::manager::DatabaseError;
use crate::database::models::{Product, User};
use crate::database::repository::{ProductRepository, UserRepository};
use crate::filter::ProductFilter;

const DUPLICATE_KEY: i32 = 11000;

pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database, collection: &str) -> Self {
        Self {
            collection: db.collection(collection),
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn insert(&self, product: &Product) -> Result<(), DatabaseError> {
        self.collection.insert_one(product).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find(&self, filter: Option<&ProductFilter>) -> Result<Vec<Product>, DatabaseError> {
        let cursor = match filter {
            Some(filter) => {
                let mut find = self.collection.find(filter.to_document());
                if let Some(sort) = filter.sort_document() {
                    find = find.sort(sort);
                }
                find.await?
            }
            None => self.collection.find(doc! {}).await?,
        };

        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Product>, DatabaseError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, DatabaseError> {
        Ok(self.collection.find_one(doc! { "name": name }).await?)
    }
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database, collection: &str) -> Self {
        Self {
            collection: db.collection(collection),
        }
    }

    /// Unique indexes on username and email. A registration that loses the
    /// count-then-insert race is then rejected by the server.
    pub async fn init_indexes(&self) -> Result<(), DatabaseError> {
        let unique = || IndexOptions::builder().unique(true).build();
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(unique())
                .build(),
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        info!(collection = %self.collection.name(), "Ensured unique user indexes");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn count_by_username(&self, username: &str) -> Result<u64, DatabaseError> {
        Ok(self
            .collection
            .count_documents(doc! { "username": username })
            .await?)
    }

    async fn count_by_email(&self, email: &str) -> Result<u64, DatabaseError> {
        Ok(self.collection.count_documents(doc! { "email": email }).await?)
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn insert(&self, user: &User) -> Result<(), DatabaseError> {
        match self.collection.insert_one(user).await {
            Ok(_) => Ok(()),
            Err(err) => match duplicate_field(&err) {
                Some(field) => Err(DatabaseError::Duplicate(field)),
                None => Err(err.into()),
            },
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self
            .collection
            .find_one(doc! { "username": username })
            .await?)
    }
}

/// Name of the field a duplicate-key write error was raised for.
fn duplicate_field(err: &mongodb::error::Error) -> Option<String> {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY => {
            let field = if write.message.contains("email") {
                "email"
            } else {
                "username"
            };
            Some(field.to_string())
        }
        _ => None,
    }
}
