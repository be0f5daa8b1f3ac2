use serde_json::{json, Map, Value};

use crate::database::models::Product;

/// Convert a stored product into the public wire format. The ObjectId is
/// rendered as a plain hex string under `_id`; absent optional fields are
/// omitted.
pub fn product_to_api_value(product: &Product) -> Value {
    let mut obj = Map::new();
    obj.insert("_id".into(), Value::String(product.id.to_hex()));
    obj.insert("name".into(), Value::String(product.name.clone()));
    obj.insert("description".into(), Value::String(product.description.clone()));
    obj.insert("price".into(), json!(product.price));
    obj.insert("quantity".into(), json!(product.quantity));
    if let Some(tab_type) = &product.tab_type { obj.insert("tabType".into(), Value::String(tab_type.clone())); }
    if let Some(image) = &product.image { obj.insert("image".into(), Value::String(image.clone())); }
    if let Some(category) = &product.category { obj.insert("category".into(), Value::String(category.clone())); }
    if let Some(sizes) = &product.sizes { obj.insert("sizes".into(), json!(sizes)); }

    Value::Object(obj)
}

pub fn products_to_api_values(products: &[Product]) -> Vec<Value> {
    products.iter().map(product_to_api_value).collect()
}
