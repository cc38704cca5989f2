//! Product detail page: viewing and adding to cart.

use bestie_core::{Product, ProductId, StockStatus};
use tracing::{info, instrument, warn};

use crate::error::{Result, add_breadcrumb};
use crate::services::cart::CartError;
use crate::services::recent;
use crate::state::AppState;

/// A product with its stock band.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub product: Product,
    pub status: StockStatus,
}

/// Show a product and record it as recently viewed.
///
/// Failing to record the view is logged and does not hide the product.
///
/// # Errors
///
/// Returns an error if the product cannot be fetched.
#[instrument(skip(state), fields(product_id = %product_id))]
pub async fn view(state: &AppState, product_id: &ProductId) -> Result<ProductView> {
    let product = state.client().get_product(product_id).await?;

    if let Err(e) = recent::record(state.local_store(), &product.id) {
        warn!(error = %e, "Failed to record recently viewed product");
    }

    Ok(ProductView {
        status: product.stock_status(),
        product,
    })
}

/// Add `quantity` units of a product to the logged-in user's cart.
///
/// # Errors
///
/// Returns [`crate::AppError::NotLoggedIn`] without a session, a
/// [`CartError`] if the product is out of stock or the quantity is outside
/// `1..=stock`, or an API error unless the service confirms the add.
#[instrument(skip(state, product), fields(product_id = %product.id))]
pub async fn add_to_cart(state: &AppState, product: &Product, quantity: u32) -> Result<()> {
    let user_id = state.session().require_user()?;

    if !product.stock_status().is_available() {
        return Err(CartError::OutOfStock(product.name.clone()).into());
    }
    bestie_core::cart::next_quantity(0, i64::from(quantity), product.in_stock)
        .map_err(CartError::from)?;

    state
        .client()
        .add_to_cart(&user_id, &product.id, quantity)
        .await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product.id.as_str())]),
    );
    info!(quantity, "Added to cart");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use bestie_core::{QuantityError, UserId};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::AppError;
    use crate::config::ApiConfig;
    use crate::storage::MemoryStore;

    fn state(server: &MockServer) -> AppState {
        AppState::with_stores(
            &ApiConfig::new(&server.uri()).unwrap(),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
        )
        .unwrap()
    }

    async fn mount_product(server: &MockServer, stock: u32) {
        Mock::given(method("GET"))
            .and(path("/product/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "product": {"productId": "p1", "name": "Candle", "price": "₹350", "inStockValue": stock}
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_view_records_recent() {
        let server = MockServer::start().await;
        mount_product(&server, 12).await;
        let state = state(&server);

        let view = view(&state, &ProductId::from("p1")).await.unwrap();
        assert_eq!(view.status, StockStatus::LowStock);

        let recent = recent::load(state.local_store()).unwrap();
        assert_eq!(recent.iter().next().map(ProductId::as_str), Some("p1"));
    }

    #[tokio::test]
    async fn test_add_to_cart_requires_exact_message() {
        let server = MockServer::start().await;
        mount_product(&server, 5).await;
        Mock::given(method("POST"))
            .and(path("/add-to-cart"))
            .and(body_json(json!({"userId": "u1", "productId": "p1", "quantity": 2})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Product added to cart successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let state = state(&server);
        state.session().login(&UserId::from("u1")).unwrap();
        let product = view(&state, &ProductId::from("p1")).await.unwrap().product;
        add_to_cart(&state, &product, 2).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_to_cart_refuses_locally() {
        let server = MockServer::start().await;
        mount_product(&server, 0).await;
        let state = state(&server);
        let product = view(&state, &ProductId::from("p1")).await.unwrap().product;

        let err = add_to_cart(&state, &product, 1).await.unwrap_err();
        assert!(matches!(err, AppError::NotLoggedIn));

        state.session().login(&UserId::from("u1")).unwrap();
        let err = add_to_cart(&state, &product, 1).await.unwrap_err();
        assert!(matches!(err, AppError::Cart(CartError::OutOfStock(_))));

        let mut stocked = product.clone();
        stocked.in_stock = 3;
        let err = add_to_cart(&state, &stocked, 4).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Cart(CartError::Quantity(QuantityError::AboveStock { .. }))
        ));
        let err = add_to_cart(&state, &stocked, 0).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Cart(CartError::Quantity(QuantityError::BelowMinimum { .. }))
        ));
    }
}
