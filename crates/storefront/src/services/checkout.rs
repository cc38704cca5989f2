//! Checkout: re-priced cart, shipping address and order placement.

use std::time::Duration;

use bestie_core::{AddressField, CartLine, CartTotals, Price, UserId, Voucher};
use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::api::{ORDER_PLACED_MESSAGE, OrderedProduct, PlaceOrderRequest};
use crate::error::{Result, add_breadcrumb};
use crate::services::address::AddressBook;
use crate::services::cart::fetch_lines;
use crate::state::AppState;

/// Pause before leaving the confirmation screen.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(5);

/// Order date format (`dd/mm/yyyy`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Order time format (`HH:MM:SS`).
pub const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Shipping address is incomplete (missing: {})", field_list(.0))]
    IncompleteAddress(Vec<AddressField>),

    #[error("Cart is empty")]
    EmptyCart,
}

fn field_list(fields: &[AddressField]) -> String {
    fields
        .iter()
        .map(AddressField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Confirmation of a placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPlaced {
    /// Message returned by the service.
    pub message: String,
    /// What the order was charged.
    pub total: Price,
    /// How long to show the confirmation.
    pub redirect_after: Duration,
}

/// A checkout in progress.
#[derive(Debug, Clone)]
pub struct Checkout {
    state: AppState,
    user_id: UserId,
    lines: Vec<CartLine>,
    voucher: Option<Voucher>,
    address: AddressBook,
}

impl Checkout {
    /// Start a checkout for the logged-in user.
    ///
    /// The cart is fetched again and priced with the voucher carried over
    /// from the cart view.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AppError::NotLoggedIn`] without a session, or an
    /// error if the cart or stored address cannot be read.
    #[instrument(skip(state, voucher))]
    pub async fn open(state: &AppState, voucher: Option<Voucher>) -> Result<Self> {
        let user_id = state.session().require_user()?;
        let lines = fetch_lines(state.client(), &user_id).await?;
        let address = AddressBook::open(state)?;

        Ok(Self {
            state: state.clone(),
            user_id,
            lines,
            voucher,
            address,
        })
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub const fn voucher(&self) -> Option<&Voucher> {
        self.voucher.as_ref()
    }

    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.lines, self.voucher.as_ref())
    }

    #[must_use]
    pub const fn address_book(&self) -> &AddressBook {
        &self.address
    }

    pub const fn address_book_mut(&mut self) -> &mut AddressBook {
        &mut self.address
    }

    /// Whether the place-order action is available.
    #[must_use]
    pub fn can_place_order(&self) -> bool {
        self.address.address().is_complete()
    }

    /// The request [`place_order`](Self::place_order) would send at `now`.
    #[must_use]
    pub fn order_request(&self, now: NaiveDateTime) -> PlaceOrderRequest {
        PlaceOrderRequest {
            user_id: self.user_id.clone(),
            date: now.format(DATE_FORMAT).to_string(),
            time: now.format(TIME_FORMAT).to_string(),
            address: self.address.address().flatten(),
            price: self.totals().total,
            products_ordered: self
                .lines
                .iter()
                .map(|line| OrderedProduct {
                    product_id: line.product.id.clone(),
                    product_qty: Some(line.quantity),
                })
                .collect(),
        }
    }

    /// Place the order.
    ///
    /// With saving on, the address is first stored on the account; that
    /// call may fail without blocking the order.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] without contacting the service if the
    /// address is incomplete or the cart is empty, or an API error unless
    /// the service confirms the order.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn place_order(&self, now: NaiveDateTime) -> Result<OrderPlaced> {
        let missing = self.address.address().missing_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::IncompleteAddress(missing).into());
        }
        if self.lines.is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }

        let request = self.order_request(now);
        let client = self.state.client();

        if self.address.save_enabled() {
            if let Err(e) = client.update_address(&self.user_id, &request.address).await {
                warn!(error = %e, "Failed to store address on account");
            }
        }

        client.place_order(&request).await?;

        let total = request.price.to_string();
        let lines = self.lines.len().to_string();
        add_breadcrumb(
            "checkout",
            "Placed order",
            Some(&[("total", total.as_str()), ("lines", lines.as_str())]),
        );
        info!(total = %request.price, lines = self.lines.len(), "Order placed");

        Ok(OrderPlaced {
            message: ORDER_PLACED_MESSAGE.to_string(),
            total: request.price,
            redirect_after: REDIRECT_DELAY,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use bestie_core::{ProductId, ShippingAddress, VoucherTable};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::AppError;
    use crate::config::ApiConfig;
    use crate::storage::MemoryStore;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn full_address() -> ShippingAddress {
        ShippingAddress {
            street: "12 MG Road".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            pincode: "411001".to_string(),
            phone: "9999999999".to_string(),
        }
    }

    async fn server(cart: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cart/u1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "cart": cart})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/product/a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "product": {"productId": "a", "name": "Mug", "price": "₹500", "inStockValue": 9}
            })))
            .mount(&server)
            .await;
        server
    }

    fn state(server: &MockServer) -> AppState {
        let state = AppState::with_stores(
            &ApiConfig::new(&server.uri()).unwrap(),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
        )
        .unwrap();
        state.session().login(&UserId::from("u1")).unwrap();
        state
    }

    #[tokio::test]
    async fn test_request_uses_discounted_total() {
        let server = server(json!([{"productId": "a", "productQty": 2}])).await;
        let voucher = VoucherTable::builtin().redeem("OFF10").voucher().cloned();
        let mut checkout = Checkout::open(&state(&server), voucher).await.unwrap();
        checkout.address_book_mut().set_address(full_address()).unwrap();

        let request = checkout.order_request(now());
        assert_eq!(request.date, "05/03/2025");
        assert_eq!(request.time, "14:30:00");
        assert_eq!(request.address, "12 MG Road, Pune, MH, 411001, 9999999999");
        assert_eq!(request.price.amount(), dec!(900));
        assert_eq!(
            request.products_ordered,
            vec![OrderedProduct {
                product_id: ProductId::from("a"),
                product_qty: Some(2)
            }]
        );
    }

    #[tokio::test]
    async fn test_incomplete_address_blocks_order() {
        let server = server(json!([{"productId": "a", "productQty": 1}])).await;
        Mock::given(method("POST"))
            .and(path("/cart/place-order"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut checkout = Checkout::open(&state(&server), None).await.unwrap();
        let mut address = full_address();
        address.city = "   ".to_string();
        checkout.address_book_mut().set_address(address).unwrap();

        assert!(!checkout.can_place_order());
        let err = checkout.place_order(now()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Checkout(CheckoutError::IncompleteAddress(ref f)) if f == &[AddressField::City]
        ));
    }

    #[tokio::test]
    async fn test_empty_cart_blocks_order() {
        let server = server(json!([])).await;
        let mut checkout = Checkout::open(&state(&server), None).await.unwrap();
        checkout.address_book_mut().set_address(full_address()).unwrap();

        assert!(checkout.can_place_order());
        let err = checkout.place_order(now()).await.unwrap_err();
        assert!(matches!(err, AppError::Checkout(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_place_order_saves_address_best_effort() {
        let server = server(json!([{"productId": "a", "productQty": 1}])).await;
        Mock::given(method("POST"))
            .and(path("/update-address"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/cart/place-order"))
            .and(body_partial_json(json!({"userId": "u1", "price": 500.0})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "Order placed successfully"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut checkout = Checkout::open(&state(&server), None).await.unwrap();
        checkout.address_book_mut().set_address(full_address()).unwrap();
        checkout.address_book_mut().set_save(true).unwrap();

        let placed = checkout.place_order(now()).await.unwrap();
        assert_eq!(placed.message, ORDER_PLACED_MESSAGE);
        assert_eq!(placed.redirect_after, Duration::from_secs(5));
        assert_eq!(placed.total.amount(), dec!(500));
    }

    #[tokio::test]
    async fn test_unexpected_message_is_failure() {
        let server = server(json!([{"productId": "a", "productQty": 1}])).await;
        Mock::given(method("POST"))
            .and(path("/cart/place-order"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "message": "Order queued"})),
            )
            .mount(&server)
            .await;

        let mut checkout = Checkout::open(&state(&server), None).await.unwrap();
        checkout.address_book_mut().set_address(full_address()).unwrap();
        let err = checkout.place_order(now()).await.unwrap_err();
        assert!(matches!(err, AppError::Api(_)));
    }
}
