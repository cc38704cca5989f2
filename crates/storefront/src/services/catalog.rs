//! Catalog browsing: category filter, incremental paging, best sellers and
//! search, all over one fetch of `/get-product`.

use bestie_core::Product;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::api::StoreApiClient;
use crate::error::Result;

/// Gift categories offered by the store, in display order.
pub const CATEGORIES: [&str; 15] = [
    "Couple Gifts",
    "Birthday Gifts",
    "Anniversary Gifts",
    "Personalized Gifts",
    "Corporate Gifts",
    "Festive Gifts",
    "DIY Gifts",
    "Eco-friendly Gifts",
    "Luxury Gifts",
    "Handmade Gifts",
    "Gourmet Gifts",
    "Fashion Accessories",
    "Books",
    "Gift Boxes",
    "Stationery",
];

/// Selector meaning "no category filter".
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// URL-style slug for a category name: lower-case, spaces become `-`.
#[must_use]
pub fn slug(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}

/// Resolve a category name or slug to its canonical name.
fn resolve_category(selector: &str) -> Option<&'static str> {
    let wanted = slug(selector);
    CATEGORIES.iter().copied().find(|name| slug(name) == wanted)
}

/// Paging and highlight settings for a catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Products shown initially and added per `load_more`.
    pub page_size: usize,
    /// Number of products in the best-seller strip.
    pub best_seller_count: usize,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            page_size: 6,
            best_seller_count: 6,
        }
    }
}

/// A browsable catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    options: CatalogOptions,
    category: Option<&'static str>,
    shown: usize,
}

impl Catalog {
    /// Fetch the catalog, keeping only listable products.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog request fails.
    #[instrument(skip(client))]
    pub async fn load(client: &StoreApiClient, options: CatalogOptions) -> Result<Self> {
        let all = client.get_products().await?;
        let catalog = Self::from_products(&all, options);
        debug!(
            fetched = all.len(),
            listable = catalog.products.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Build a catalog from already-fetched products.
    #[must_use]
    pub fn from_products(products: &[Product], options: CatalogOptions) -> Self {
        Self {
            products: products
                .iter()
                .filter(|p| p.is_listable())
                .cloned()
                .collect(),
            options,
            category: None,
            shown: options.page_size,
        }
    }

    /// Filter by category. Accepts [`ALL`], a category name or its slug.
    /// Resets paging.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownCategory`] for anything else; the
    /// current selection is kept.
    pub fn select(&mut self, selector: &str) -> std::result::Result<(), CatalogError> {
        let category = if selector.trim().eq_ignore_ascii_case(ALL) {
            None
        } else {
            Some(
                resolve_category(selector)
                    .ok_or_else(|| CatalogError::UnknownCategory(selector.trim().to_string()))?,
            )
        };

        self.category = category;
        self.shown = self.options.page_size;
        Ok(())
    }

    /// Selected category, `None` for all.
    #[must_use]
    pub const fn category(&self) -> Option<&'static str> {
        self.category
    }

    /// Every product matching the current filter.
    pub fn filtered(&self) -> impl Iterator<Item = &Product> {
        let category = self.category;
        self.products.iter().filter(move |p| {
            category.is_none_or(|c| p.category.as_deref().is_some_and(|pc| pc.trim() == c))
        })
    }

    /// The products currently on screen.
    #[must_use]
    pub fn visible_page(&self) -> Vec<&Product> {
        self.filtered().take(self.shown).collect()
    }

    /// Whether `load_more` would reveal anything.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.filtered().count() > self.shown
    }

    /// Show one more page.
    pub fn load_more(&mut self) {
        self.shown = self.shown.saturating_add(self.options.page_size);
    }

    /// Leading products shown as best sellers, regardless of filter.
    #[must_use]
    pub fn best_sellers(&self) -> &[Product] {
        let n = self.options.best_seller_count.min(self.products.len());
        self.products.get(..n).unwrap_or_default()
    }

    /// Case-insensitive name search across the whole catalog.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Number of listable products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bestie_core::{Price, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: usize, category: &str) -> Product {
        Product {
            id: ProductId::from(format!("p{id}")),
            name: format!("Gift {id}"),
            price: Price::new(Decimal::from(100)).unwrap(),
            image_url: Some("https://img.example/x.jpg".to_string()),
            category: Some(category.to_string()),
            rating: None,
            in_stock: 20,
            description: None,
            visible: true,
        }
    }

    fn catalog(products: Vec<Product>) -> Catalog {
        Catalog::from_products(&products, CatalogOptions::default())
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Eco-friendly Gifts"), "eco-friendly-gifts");
        assert_eq!(slug("Gift Boxes"), "gift-boxes");
    }

    #[test]
    fn test_unlisted_products_are_dropped() {
        let mut hidden = product(1, "Books");
        hidden.visible = false;
        let mut no_image = product(2, "Books");
        no_image.image_url = None;
        let catalog = catalog(vec![hidden, no_image, product(3, "Books")]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_paging() {
        let mut catalog = catalog((0..14).map(|i| product(i, "Books")).collect());
        assert_eq!(catalog.visible_page().len(), 6);
        assert!(catalog.has_more());
        catalog.load_more();
        assert_eq!(catalog.visible_page().len(), 12);
        catalog.load_more();
        assert_eq!(catalog.visible_page().len(), 14);
        assert!(!catalog.has_more());
    }

    #[test]
    fn test_select_by_slug_resets_paging() {
        let mut products: Vec<Product> = (0..8).map(|i| product(i, "Birthday Gifts")).collect();
        products.push(product(100, "Books"));
        let mut catalog = catalog(products);

        catalog.load_more();
        catalog.select("birthday-gifts").unwrap();
        assert_eq!(catalog.category(), Some("Birthday Gifts"));
        assert_eq!(catalog.visible_page().len(), 6);
        assert_eq!(catalog.filtered().count(), 8);

        catalog.select("Books").unwrap();
        assert_eq!(catalog.filtered().count(), 1);

        catalog.select("ALL").unwrap();
        assert_eq!(catalog.filtered().count(), 9);
    }

    #[test]
    fn test_unknown_category() {
        let mut catalog = catalog(vec![product(1, "Books")]);
        catalog.select("Books").unwrap();
        assert_eq!(
            catalog.select("garden-tools"),
            Err(CatalogError::UnknownCategory("garden-tools".to_string()))
        );
        assert_eq!(catalog.category(), Some("Books"));
    }

    #[test]
    fn test_best_sellers_and_search() {
        let catalog = catalog((0..10).map(|i| product(i, "Books")).collect());
        assert_eq!(catalog.best_sellers().len(), 6);
        assert_eq!(catalog.search("GIFT 1").len(), 1);
        assert!(catalog.search("  ").is_empty());
    }
}
