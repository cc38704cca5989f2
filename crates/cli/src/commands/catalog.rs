//! Catalog browsing.

use std::io::Write;

use bestie_core::ProductId;
use bestie_storefront::AppState;
use bestie_storefront::services::catalog::{self, Catalog, CatalogOptions};
use bestie_storefront::services::{product, recent};

use crate::{CliError, render};

/// List products in a category, `pages` pages deep.
pub async fn list(
    state: &AppState,
    out: &mut impl Write,
    category: &str,
    pages: usize,
) -> Result<(), CliError> {
    let mut catalog = Catalog::load(state.client(), CatalogOptions::default()).await?;
    catalog.select(category).map_err(bestie_storefront::AppError::from)?;
    for _ in 1..pages {
        catalog.load_more();
    }

    let page = catalog.visible_page();
    if page.is_empty() {
        writeln!(out, "No products found")?;
        return Ok(());
    }

    writeln!(out, "{}", render::products(page))?;
    if catalog.has_more() {
        writeln!(out, "More available: use --pages {}", pages.saturating_add(1))?;
    }
    Ok(())
}

/// List the gift categories with their slugs.
pub fn categories(out: &mut impl Write) -> Result<(), CliError> {
    for name in catalog::CATEGORIES {
        writeln!(out, "{:<22} {}", name, catalog::slug(name))?;
    }
    Ok(())
}

/// Show the best-seller strip.
pub async fn best_sellers(state: &AppState, out: &mut impl Write) -> Result<(), CliError> {
    let catalog = Catalog::load(state.client(), CatalogOptions::default()).await?;
    writeln!(out, "{}", render::products(catalog.best_sellers()))?;
    Ok(())
}

/// Search products by name.
pub async fn search(state: &AppState, out: &mut impl Write, query: &str) -> Result<(), CliError> {
    let catalog = Catalog::load(state.client(), CatalogOptions::default()).await?;
    let results = catalog.search(query);
    if results.is_empty() {
        writeln!(out, "No products match \"{}\"", query.trim())?;
        return Ok(());
    }
    writeln!(out, "{}", render::products(results))?;
    Ok(())
}

/// Show one product and record the view.
pub async fn show(state: &AppState, out: &mut impl Write, product_id: &str) -> Result<(), CliError> {
    let product_id = ProductId::parse(product_id)?;
    let view = product::view(state, &product_id).await?;
    writeln!(out, "{}", render::product_detail(&view.product))?;
    Ok(())
}

/// Show recently viewed products, newest first.
pub async fn recent(state: &AppState, out: &mut impl Write) -> Result<(), CliError> {
    let list = recent::load(state.local_store())?;
    if list.is_empty() {
        writeln!(out, "Nothing viewed yet")?;
        return Ok(());
    }
    let products = recent::products(state.client(), &list).await;
    writeln!(out, "{}", render::products(&products))?;
    Ok(())
}
