//! Store API client implementation.
//!
//! Uses `reqwest` for HTTP and caches products and the catalog using `moka`.

use std::sync::Arc;

use bestie_core::{Order, Product, ProductId, SellerId, UserId};
use moka::future::Cache;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::ApiConfig;

use super::ApiError;
use super::cache::{CacheKey, CacheValue};
use super::conversions::{convert_order, convert_product, convert_products};
use super::envelope::{Ack, Envelope, SuccessSignal};
use super::types::{
    AddToCartRequest, CartBody, CartRow, CatalogBody, DeleteItemRequest, OrdersBody,
    PlaceOrderRequest, ProductBody, UpdateAddressRequest, UpdateQuantityRequest, UserBody,
    UserRequest, VerifySellerRequest,
};

/// Message the service returns when an item is added.
pub const ADDED_TO_CART_MESSAGE: &str = "Product added to cart successfully";

/// Message the service returns when an order is created.
pub const ORDER_PLACED_MESSAGE: &str = "Order placed successfully";

/// How much of an error body to keep in logs and errors.
const BODY_PREVIEW_CHARS: usize = 200;

// =============================================================================
// StoreApiClient
// =============================================================================

/// Client for the store's REST API.
///
/// Cheap to clone. Products and the catalog are cached for the configured
/// TTL; everything else goes to the network every time.
#[derive(Clone)]
pub struct StoreApiClient {
    inner: Arc<StoreApiClientInner>,
}

struct StoreApiClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for StoreApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl StoreApiClient {
    /// Create a new store API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(StoreApiClientInner {
                client: builder.build()?,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.inner
            .client
            .request(method, format!("{}{path}", self.inner.base_url))
    }

    fn request_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> RequestBuilder {
        self.request(method, path).json(body)
    }

    /// Send a request and unwrap the response envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        signal: SuccessSignal,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(preview(&response_text)));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %preview(&response_text),
                "Store API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: preview(&response_text),
            });
        }

        let envelope: Envelope<T> = match serde_json::from_str(&response_text) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %preview(&response_text),
                    "Failed to parse store API response"
                );
                return Err(ApiError::Parse(e));
            }
        };

        envelope.into_result(signal).inspect_err(|e| {
            debug!(error = %e, "Store API rejected request");
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found, the record is unusable,
    /// or the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: &ProductId) -> Result<Product, ApiError> {
        let cache_key = CacheKey::Product(product_id.clone());

        // Check cache
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let path = format!("/product/{}", urlencoding::encode(product_id.as_str()));
        let body: ProductBody = self
            .execute(self.request(Method::GET, &path), SuccessSignal::Flag)
            .await?;

        let record = body
            .product
            .ok_or_else(|| ApiError::NotFound(format!("Product not found: {product_id}")))?;
        let product = convert_product(record)?;

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get the full catalog.
    ///
    /// Records that cannot be converted (no id, unreadable price) are
    /// skipped. Listing rules such as visibility are left to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Arc<Vec<Product>>, ApiError> {
        if let Some(CacheValue::Catalog(products)) = self.inner.cache.get(&CacheKey::Catalog).await
        {
            debug!("Cache hit for catalog");
            return Ok(products);
        }

        let body: CatalogBody = self
            .execute(self.request(Method::GET, "/get-product"), SuccessSignal::Flag)
            .await?;

        let products = Arc::new(convert_products(body.products));

        self.inner
            .cache
            .insert(CacheKey::Catalog, CacheValue::Catalog(Arc::clone(&products)))
            .await;

        Ok(products)
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Get the raw cart rows for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the request or it fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_cart(&self, user_id: &UserId) -> Result<Vec<CartRow>, ApiError> {
        let path = format!("/cart/{}", urlencoding::encode(user_id.as_str()));
        let body: CartBody = self
            .execute(self.request(Method::GET, &path), SuccessSignal::Flag)
            .await?;
        Ok(body.cart)
    }

    /// Add a product to a user's cart.
    ///
    /// # Errors
    ///
    /// Returns an error unless the service confirms the add.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn add_to_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let body = AddToCartRequest {
            user_id,
            product_id,
            quantity,
        };
        let _: Ack = self
            .execute(
                self.request_json(Method::POST, "/add-to-cart", &body),
                SuccessSignal::FlagAndMessage(ADDED_TO_CART_MESSAGE),
            )
            .await?;
        Ok(())
    }

    /// Set the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error unless the service reports success.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn update_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let body = UpdateQuantityRequest {
            user_id,
            product_id,
            product_qty: quantity,
        };
        let _: Ack = self
            .execute(
                self.request_json(Method::PUT, "/update-quantity", &body),
                SuccessSignal::Flag,
            )
            .await?;
        Ok(())
    }

    /// Remove a product from a user's cart.
    ///
    /// # Errors
    ///
    /// Returns an error unless the service reports success.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn delete_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<(), ApiError> {
        let body = DeleteItemRequest {
            user_id,
            product_id,
        };
        let _: Ack = self
            .execute(
                self.request_json(Method::DELETE, "/delete-items", &body),
                SuccessSignal::Flag,
            )
            .await?;
        Ok(())
    }

    // =========================================================================
    // Checkout & Order Methods
    // =========================================================================

    /// Store a user's flattened address on their account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns a non-2xx status.
    #[instrument(skip(self, address), fields(user_id = %user_id))]
    pub async fn update_address(&self, user_id: &UserId, address: &str) -> Result<(), ApiError> {
        let body = UpdateAddressRequest { user_id, address };
        let _: Ack = self
            .execute(
                self.request_json(Method::POST, "/update-address", &body),
                SuccessSignal::Body,
            )
            .await?;
        Ok(())
    }

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns an error unless the service answers with the order-placed
    /// message.
    #[instrument(skip(self, order), fields(user_id = %order.user_id))]
    pub async fn place_order(&self, order: &PlaceOrderRequest) -> Result<(), ApiError> {
        let _: Ack = self
            .execute(
                self.request_json(Method::POST, "/cart/place-order", order),
                SuccessSignal::Message(ORDER_PLACED_MESSAGE),
            )
            .await?;
        Ok(())
    }

    /// List a user's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the request or it fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn find_orders(&self, user_id: &UserId) -> Result<Vec<Order>, ApiError> {
        let body: OrdersBody = self
            .execute(
                self.request_json(Method::POST, "/find-my-order", &UserRequest { user_id }),
                SuccessSignal::Flag,
            )
            .await?;
        Ok(body.orders.into_iter().map(convert_order).collect())
    }

    // =========================================================================
    // Identity Methods
    // =========================================================================

    /// Fetch a user's display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_user_name(&self, user_id: &UserId) -> Result<Option<String>, ApiError> {
        let path = format!("/auth/user/{}", urlencoding::encode(user_id.as_str()));
        let body: UserBody = self
            .execute(self.request(Method::GET, &path), SuccessSignal::Body)
            .await?;
        Ok(body.name.filter(|n| !n.trim().is_empty()))
    }

    /// Check that a seller id belongs to a logged-in seller.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] if the seller is not logged in, or
    /// another error if the request fails.
    #[instrument(skip(self), fields(seller_id = %seller_id))]
    pub async fn verify_seller(&self, seller_id: &SellerId) -> Result<(), ApiError> {
        let _: Ack = self
            .execute(
                self.request_json(
                    Method::POST,
                    "/admin/verify-seller",
                    &VerifySellerRequest { seller_id },
                ),
                SuccessSignal::LoggedIn,
            )
            .await?;
        Ok(())
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
