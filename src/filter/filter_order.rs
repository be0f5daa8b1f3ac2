use mongodb::bson::{doc, Document};
use std::cmp::Ordering;

use super::types::SortDirection;
use crate::database::models::Product;

pub struct FilterOrder;

impl FilterOrder {
    /// Sort document on price, or `None` to keep storage order.
    pub fn generate(sort: Option<SortDirection>) -> Option<Document> {
        sort.map(|direction| doc! { "price": direction.to_mongo() })
    }

    pub fn apply(products: &mut [Product], sort: Option<SortDirection>) {
        let Some(direction) = sort else { return };
        // Stable: equal prices keep insertion order.
        products.sort_by(|a, b| {
            let ord = a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }
}
