use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored product document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(rename = "tabType", default, skip_serializing_if = "Option::is_none")]
    pub tab_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<i32>>,
}

/// Request body for `POST /createProduct`.
///
/// Required fields are `Option` so that a missing field is reported as a
/// validation error rather than a JSON rejection.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(required(message = "name is required"), length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description must not be empty")
    )]
    pub description: Option<String>,
    #[validate(required(message = "price is required"), range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    #[validate(required(message = "quantity is required"), range(min = 0, message = "quantity must not be negative"))]
    pub quantity: Option<i64>,
    #[serde(rename = "tabType", default)]
    pub tab_type: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sizes: Option<Vec<i32>>,
}

impl CreateProduct {
    /// Build the document to insert. Returns `None` if a required field is
    /// absent, which `validate()` already rules out.
    pub fn into_product(self, id: ObjectId) -> Option<Product> {
        Some(Product {
            id,
            name: self.name?,
            description: self.description?,
            price: self.price?,
            quantity: self.quantity?,
            tab_type: self.tab_type,
            image: self.image,
            category: self.category,
            sizes: self.sizes,
        })
    }
}
