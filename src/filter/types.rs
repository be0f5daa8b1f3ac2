use serde::Deserialize;
use std::str::FromStr;

use super::error::FilterError;

/// Raw query string of `GET /getProducts`. Every field is kept as text so
/// that an empty value can be told apart from a malformed one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub price: Option<String>,
    pub sizes: Option<String>,
    pub ord: Option<String>,
    #[serde(rename = "type")]
    pub price_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_mongo(self) -> i32 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }
}

impl FromStr for SortDirection {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(FilterError::InvalidOrder(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceComparison {
    Eq,
    Gte,
    Lte,
}

impl PriceComparison {
    pub fn operator(self) -> Option<&'static str> {
        match self {
            PriceComparison::Eq => None,
            PriceComparison::Gte => Some("$gte"),
            PriceComparison::Lte => Some("$lte"),
        }
    }
}

impl FromStr for PriceComparison {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gte" => Ok(PriceComparison::Gte),
            "lte" => Ok(PriceComparison::Lte),
            other => Err(FilterError::InvalidComparison(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceCondition {
    pub comparison: PriceComparison,
    pub value: f64,
}

impl PriceCondition {
    pub fn accepts(&self, price: f64) -> bool {
        match self.comparison {
            PriceComparison::Eq => price == self.value,
            PriceComparison::Gte => price >= self.value,
            PriceComparison::Lte => price <= self.value,
        }
    }
}

/// Treat `Some("")` (and whitespace) the same as an absent parameter.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
