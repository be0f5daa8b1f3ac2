use mongodb::bson::{doc, Document};

use super::filter::ProductFilter;
use crate::database::models::Product;

pub struct FilterWhere;

impl FilterWhere {
    /// MongoDB query document for the filter.
    pub fn generate(filter: &ProductFilter) -> Document {
        let mut where_doc = Document::new();

        if let Some(ref category) = filter.category {
            where_doc.insert("category", category.as_str());
        }

        if let Some(price) = filter.price {
            match price.comparison.operator() {
                Some(op) => {
                    let mut range = Document::new();
                    range.insert(op, price.value);
                    where_doc.insert("price", range);
                }
                None => {
                    where_doc.insert("price", price.value);
                }
            }
        }

        if let Some(ref sizes) = filter.sizes {
            where_doc.insert("sizes", doc! { "$in": sizes.clone() });
        }

        where_doc
    }

    /// The predicate `generate` expresses, evaluated against a stored product.
    pub fn matches(filter: &ProductFilter, product: &Product) -> bool {
        if let Some(ref category) = filter.category {
            if product.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }

        if let Some(price) = filter.price {
            if !price.accepts(product.price) {
                return false;
            }
        }

        if let Some(ref sizes) = filter.sizes {
            let stocked = product.sizes.as_deref().unwrap_or_default();
            if !stocked.iter().any(|s| sizes.contains(s)) {
                return false;
            }
        }

        true
    }
}
