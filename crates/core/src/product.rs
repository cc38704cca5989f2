//! Catalog products.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, StockStatus};

/// A product as the storefront sees it.
///
/// Read-only on the client. Built from the remote record once its price
/// string has been parsed into a [`Price`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price.
    pub price: Price,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub rating: Option<f64>,
    /// Last-known stock count. Upper bound for cart quantities.
    pub in_stock: u32,
    pub description: Option<String>,
    /// Whether the seller has published the product.
    pub visible: bool,
}

impl Product {
    /// Stock band for display.
    #[must_use]
    pub const fn stock_status(&self) -> StockStatus {
        StockStatus::from_stock(self.in_stock)
    }

    /// Whether the product may appear in catalog listings.
    ///
    /// Listings need an image and a category in addition to the fields every
    /// product has, and the product must be published.
    #[must_use]
    pub fn is_listable(&self) -> bool {
        let present = |value: Option<&str>| value.is_some_and(|s| !s.trim().is_empty());
        self.visible
            && !self.name.trim().is_empty()
            && present(self.image_url.as_deref())
            && present(self.category.as_deref())
    }
}

/// Interpret the remote `visibility` flag.
///
/// Sellers toggle visibility from a checkbox, so both `"on"` and `"true"`
/// mean published.
#[must_use]
pub fn is_visible_flag(flag: Option<&str>) -> bool {
    matches!(flag.map(str::trim), Some("on" | "true"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use rust_decimal::Decimal;

    use super::*;

    pub(crate) fn product(id: &str, price: i64, stock: u32) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Gift {id}"),
            price: Price::new(Decimal::from(price)).unwrap(),
            image_url: Some(format!("https://img.example/{id}.jpg")),
            category: Some("Birthday Gifts".to_string()),
            rating: Some(4.5),
            in_stock: stock,
            description: None,
            visible: true,
        }
    }

    #[test]
    fn test_visibility_flag() {
        assert!(is_visible_flag(Some("on")));
        assert!(is_visible_flag(Some("true")));
        assert!(!is_visible_flag(Some("off")));
        assert!(!is_visible_flag(None));
    }

    #[test]
    fn test_listable_requires_image_and_category() {
        let mut p = product("a", 100, 5);
        assert!(p.is_listable());
        p.image_url = Some(String::new());
        assert!(!p.is_listable());

        let mut p = product("b", 100, 5);
        p.category = None;
        assert!(!p.is_listable());

        let mut p = product("c", 100, 5);
        p.visible = false;
        assert!(!p.is_listable());
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(product("a", 1, 0).stock_status(), StockStatus::OutOfStock);
        assert_eq!(product("a", 1, 60).stock_status(), StockStatus::InStock);
    }
}
