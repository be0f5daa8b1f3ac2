use mongodb::bson::Document;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{non_empty, PriceComparison, PriceCondition, ProductQuery, SortDirection};
use crate::database::models::Product;

/// Typed product search built from the `/getProducts` query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub price: Option<PriceCondition>,
    pub sizes: Option<Vec<i32>>,
    pub sort: Option<SortDirection>,
}

impl ProductFilter {
    /// Returns `Ok(None)` when none of `category`, `price` or `sizes` carries
    /// a value; listing is then unfiltered. `ord` and `type` only modify the
    /// price condition and are ignored without one.
    pub fn from_query(query: &ProductQuery) -> Result<Option<Self>, FilterError> {
        let category = non_empty(&query.category).map(str::to_string);
        let sizes = match non_empty(&query.sizes) {
            Some(raw) => Self::parse_sizes(raw)?,
            None => None,
        };

        let (price, sort) = match non_empty(&query.price) {
            Some(raw) => {
                let value = Self::parse_price(raw)?;
                let comparison = match non_empty(&query.price_type) {
                    Some(t) => t.parse::<PriceComparison>()?,
                    None => PriceComparison::Eq,
                };
                let sort = non_empty(&query.ord).map(str::parse::<SortDirection>).transpose()?;
                (Some(PriceCondition { comparison, value }), sort)
            }
            None => (None, None),
        };

        if category.is_none() && price.is_none() && sizes.is_none() {
            return Ok(None);
        }

        let filter = Self { category, price, sizes, sort };
        tracing::debug!(?filter, "built product filter");
        Ok(Some(filter))
    }

    pub fn to_document(&self) -> Document {
        FilterWhere::generate(self)
    }

    pub fn sort_document(&self) -> Option<Document> {
        FilterOrder::generate(self.sort)
    }

    pub fn matches(&self, product: &Product) -> bool {
        FilterWhere::matches(self, product)
    }

    /// Filter and order an in-memory product list the way the database would.
    pub fn apply(&self, products: impl IntoIterator<Item = Product>) -> Vec<Product> {
        let mut selected: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        FilterOrder::apply(&mut selected, self.sort);
        selected
    }

    fn parse_price(raw: &str) -> Result<f64, FilterError> {
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(FilterError::InvalidPrice(raw.to_string())),
        }
    }

    fn parse_sizes(raw: &str) -> Result<Option<Vec<i32>>, FilterError> {
        let mut sizes = Vec::new();
        for part in raw.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            let size = trimmed
                .parse::<i32>()
                .map_err(|_| FilterError::InvalidSize(trimmed.to_string()))?;
            sizes.push(size);
        }
        Ok(if sizes.is_empty() { None } else { Some(sizes) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};

    fn query(pairs: &[(&str, &str)]) -> ProductQuery {
        let mut q = ProductQuery::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "category" => q.category = v,
                "price" => q.price = v,
                "sizes" => q.sizes = v,
                "ord" => q.ord = v,
                "type" => q.price_type = v,
                other => panic!("unknown key {other}"),
            }
        }
        q
    }

    fn product(category: &str, price: f64, sizes: &[i32]) -> Product {
        Product {
            id: ObjectId::new(),
            name: format!("{category}-{price}"),
            description: "test".to_string(),
            price,
            quantity: 1,
            tab_type: None,
            image: None,
            category: Some(category.to_string()),
            sizes: Some(sizes.to_vec()),
        }
    }

    #[test]
    fn no_recognized_parameters_means_no_filter() {
        assert_eq!(ProductFilter::from_query(&query(&[])).unwrap(), None);
        assert_eq!(ProductFilter::from_query(&query(&[("category", "")])).unwrap(), None);
        // ord/type alone do not trigger filtering
        assert_eq!(ProductFilter::from_query(&query(&[("ord", "asc"), ("type", "gte")])).unwrap(), None);
    }

    #[test]
    fn category_is_equality() {
        let filter = ProductFilter::from_query(&query(&[("category", "shoes")])).unwrap().unwrap();
        assert_eq!(filter.to_document(), doc! { "category": "shoes" });
        assert_eq!(filter.sort_document(), None);
    }

    #[test]
    fn price_without_type_is_exact() {
        let filter = ProductFilter::from_query(&query(&[("price", "100")])).unwrap().unwrap();
        assert_eq!(filter.to_document(), doc! { "price": 100.0 });
    }

    #[test]
    fn price_range_with_sort() {
        let filter = ProductFilter::from_query(&query(&[
            ("category", "shoes"),
            ("price", "100"),
            ("type", "gte"),
            ("ord", "desc"),
        ]))
        .unwrap()
        .unwrap();

        assert_eq!(filter.to_document(), doc! { "category": "shoes", "price": { "$gte": 100.0 } });
        assert_eq!(filter.sort_document(), Some(doc! { "price": -1 }));
    }

    #[test]
    fn ord_is_ignored_without_price() {
        let filter = ProductFilter::from_query(&query(&[("category", "hats"), ("ord", "asc")]))
            .unwrap()
            .unwrap();
        assert_eq!(filter.sort, None);
    }

    #[test]
    fn sizes_become_membership() {
        let filter = ProductFilter::from_query(&query(&[("sizes", "40, 42,")])).unwrap().unwrap();
        assert_eq!(filter.to_document(), doc! { "sizes": { "$in": [40, 42] } });
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert_eq!(
            ProductFilter::from_query(&query(&[("price", "cheap")])),
            Err(FilterError::InvalidPrice("cheap".to_string()))
        );
        assert_eq!(
            ProductFilter::from_query(&query(&[("sizes", "40,xl")])),
            Err(FilterError::InvalidSize("xl".to_string()))
        );
        assert_eq!(
            ProductFilter::from_query(&query(&[("price", "10"), ("ord", "up")])),
            Err(FilterError::InvalidOrder("up".to_string()))
        );
        assert_eq!(
            ProductFilter::from_query(&query(&[("price", "10"), ("type", "gt")])),
            Err(FilterError::InvalidComparison("gt".to_string()))
        );
    }

    #[test]
    fn apply_never_returns_non_matching_products() {
        let stock = vec![
            product("shoes", 80.0, &[40]),
            product("shoes", 150.0, &[41, 42]),
            product("shoes", 100.0, &[43]),
            product("hats", 300.0, &[1]),
        ];

        let filter = ProductFilter::from_query(&query(&[
            ("category", "shoes"),
            ("price", "100"),
            ("type", "gte"),
            ("ord", "desc"),
        ]))
        .unwrap()
        .unwrap();

        let prices: Vec<f64> = filter.apply(stock.clone()).iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![150.0, 100.0]);

        let lte = ProductFilter::from_query(&query(&[("price", "100"), ("type", "lte"), ("ord", "asc")]))
            .unwrap()
            .unwrap();
        let prices: Vec<f64> = lte.apply(stock.clone()).iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![80.0, 100.0]);

        let sized = ProductFilter::from_query(&query(&[("sizes", "42,1")])).unwrap().unwrap();
        let names: Vec<String> = sized.apply(stock).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["shoes-150".to_string(), "hats-300".to_string()]);
    }
}
