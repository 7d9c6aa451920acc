//! Product list filtering (search box + status chips).

use crate::product::Product;
use crate::status::{StockStatus, classify};

/// Search and status filter applied to a product collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    query: String,
    status: Option<StockStatus>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring matched against name, SKU and category.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into().to_lowercase();
        self
    }

    /// Restrict to one status; `None` keeps every status.
    pub fn with_status(mut self, status: Option<StockStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.matches_query(product) && self.matches_status(product)
    }

    /// Filtered view in input order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    fn matches_query(&self, product: &Product) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let hit = |field: Option<&str>| {
            field.is_some_and(|value| value.to_lowercase().contains(&self.query))
        };
        hit(Some(product.name())) || hit(product.sku()) || hit(product.category())
    }

    fn matches_status(&self, product: &Product) -> bool {
        self.status.is_none_or(|status| classify(product) == status)
    }
}
