//! Client for the store's REST API.
//!
//! # Architecture
//!
//! - Plain JSON over HTTPS via `reqwest`
//! - The remote service is the source of truth - no local sync, direct calls
//! - In-memory caching via `moka` for product lookups and the catalog
//!   (5 minute TTL by default); carts, orders and writes are never cached
//! - Every response goes through one [`Envelope`] that turns the service's
//!   ad hoc `success` / `message` / `loggedIn` fields into a `Result`
//!
//! # Endpoints
//!
//! | Method | Path | Client method |
//! |---|---|---|
//! | GET | `/cart/{userId}` | [`StoreApiClient::get_cart`] |
//! | GET | `/product/{productId}` | [`StoreApiClient::get_product`] |
//! | GET | `/get-product` | [`StoreApiClient::get_products`] |
//! | POST | `/add-to-cart` | [`StoreApiClient::add_to_cart`] |
//! | PUT | `/update-quantity` | [`StoreApiClient::update_quantity`] |
//! | DELETE | `/delete-items` | [`StoreApiClient::delete_item`] |
//! | POST | `/update-address` | [`StoreApiClient::update_address`] |
//! | POST | `/cart/place-order` | [`StoreApiClient::place_order`] |
//! | POST | `/find-my-order` | [`StoreApiClient::find_orders`] |
//! | GET | `/auth/user/{userId}` | [`StoreApiClient::get_user_name`] |
//! | POST | `/admin/verify-seller` | [`StoreApiClient::verify_seller`] |
//!
//! # Example
//!
//! ```rust,ignore
//! use bestie_storefront::api::StoreApiClient;
//!
//! let client = StoreApiClient::new(&config.api)?;
//! let rows = client.get_cart(&user_id).await?;
//! let product = client.get_product(&rows[0].product_id).await?;
//! ```

mod cache;
mod client;
mod conversions;
mod envelope;
pub mod types;

pub use client::{ADDED_TO_CART_MESSAGE, ORDER_PLACED_MESSAGE, StoreApiClient};
pub use conversions::RecordError;
pub use envelope::{Envelope, SuccessSignal};
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the store API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status code.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code.
        status: u16,
        /// First part of the response body.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The service processed the request but reported failure.
    #[error("Rejected: {0}")]
    Rejected(String),

    /// The response was accepted but a record in it was unusable.
    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] RecordError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("product p-1".to_string());
        assert_eq!(err.to_string(), "Not found: product p-1");

        let err = ApiError::Status {
            status: 502,
            body: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");

        let err = ApiError::Rejected("Cart not found".to_string());
        assert_eq!(err.to_string(), "Rejected: Cart not found");
    }
}
