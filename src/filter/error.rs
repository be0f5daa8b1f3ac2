use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid size: {0}")]
    InvalidSize(String),

    #[error("Invalid sort order '{0}', expected asc or desc")]
    InvalidOrder(String),

    #[error("Invalid price comparison '{0}', expected gte or lte")]
    InvalidComparison(String),
}

impl FilterError {
    /// Query parameter the error was raised for.
    pub fn parameter(&self) -> &'static str {
        match self {
            FilterError::InvalidPrice(_) => "price",
            FilterError::InvalidSize(_) => "sizes",
            FilterError::InvalidOrder(_) => "ord",
            FilterError::InvalidComparison(_) => "type",
        }
    }
}
