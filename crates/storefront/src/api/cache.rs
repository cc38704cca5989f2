//! Cache types for store API responses.

use std::sync::Arc;

use bestie_core::{Product, ProductId};

/// Cache key for products and the catalog.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Catalog,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Catalog(Arc<Vec<Product>>),
}
