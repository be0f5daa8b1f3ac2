use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use validator::{Validate, ValidationErrors};

use super::{timed, ServiceError};
use crate::database::models::{CreateProduct, Product};
use crate::database::ProductRepository;
use crate::filter::ProductFilter;

#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
    timeout: Duration,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>, timeout: Duration) -> Self {
        Self { repo, timeout }
    }

    pub async fn create(&self, input: CreateProduct) -> Result<Product, ServiceError> {
        input.validate()?;
        let product = input
            .into_product(ObjectId::new())
            .ok_or_else(|| ServiceError::Validation(ValidationErrors::new()))?;

        timed(self.timeout, self.repo.insert(&product)).await?;

        info!(product_id = %product.id, name = %product.name, "Created product");
        Ok(product)
    }

    pub async fn list(&self, filter: Option<ProductFilter>) -> Result<Vec<Product>, ServiceError> {
        Ok(timed(self.timeout, self.repo.find(filter.as_ref())).await?)
    }

    pub async fn get_by_id(&self, id: ObjectId) -> Result<Product, ServiceError> {
        timed(self.timeout, self.repo.find_by_id(id))
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {id} not found")))
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Product, ServiceError> {
        timed(self.timeout, self.repo.find_by_name(name))
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product '{name}' not found")))
    }

    /// Resolve a path key: ObjectId lookup first when the key parses as one,
    /// falling back to a lookup by name.
    pub async fn get(&self, key: &str) -> Result<Product, ServiceError> {
        if let Ok(id) = ObjectId::parse_str(key) {
            if let Some(product) = timed(self.timeout, self.repo.find_by_id(id)).await? {
                return Ok(product);
            }
        }
        self.get_by_name(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::InMemoryProductRepository;
    use crate::filter::ProductQuery;

    fn service() -> ProductService {
        ProductService::new(Arc::new(InMemoryProductRepository::new()), Duration::from_secs(1))
    }

    fn input(name: &str, category: &str, price: f64) -> CreateProduct {
        CreateProduct {
            name: Some(name.to_string()),
            description: Some(format!("{name} description")),
            price: Some(price),
            quantity: Some(5),
            category: Some(category.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_then_get_by_id_is_equal() {
        let svc = service();
        let created = svc.create(input("Runner", "shoes", 120.0)).await.unwrap();

        assert_eq!(svc.get_by_id(created.id).await.unwrap(), created);
        assert_eq!(svc.get(&created.id.to_hex()).await.unwrap(), created);
        assert_eq!(svc.get("Runner").await.unwrap(), created);
    }

    #[tokio::test]
    async fn invalid_input_is_not_stored() {
        let svc = service();
        let mut bad = input("Runner", "shoes", 120.0);
        bad.price = Some(-1.0);

        assert!(matches!(svc.create(bad).await, Err(ServiceError::Validation(_))));
        assert!(svc.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let svc = service();
        assert!(matches!(svc.get("nothing").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(
            svc.get(&ObjectId::new().to_hex()).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_applies_filter() {
        let svc = service();
        svc.create(input("a", "shoes", 50.0)).await.unwrap();
        svc.create(input("b", "shoes", 150.0)).await.unwrap();
        svc.create(input("c", "hats", 200.0)).await.unwrap();

        assert_eq!(svc.list(None).await.unwrap().len(), 3);

        let query = ProductQuery {
            category: Some("shoes".to_string()),
            ..Default::default()
        };
        let filter = ProductFilter::from_query(&query).unwrap();
        let names: Vec<String> = svc.list(filter).await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
