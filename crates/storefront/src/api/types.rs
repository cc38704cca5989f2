//! Wire types for the store API.
//!
//! Response records are deliberately loose (`Option` everywhere, prices as
//! raw JSON) because the service is untyped; [`super::conversions`] turns
//! them into domain types. Request bodies use the service's camelCase names.

use bestie_core::{Price, ProductId, SellerId, UserId};
use serde::{Deserialize, Serialize};

// =============================================================================
// Responses
// =============================================================================

/// One raw cart row. A product may appear in several rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRow {
    pub product_id: ProductId,
    #[serde(default)]
    pub product_qty: u32,
}

/// Body of `GET /cart/{userId}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartBody {
    #[serde(default)]
    pub cart: Vec<CartRow>,
}

/// A product as stored remotely.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default, rename = "_id")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Usually a display string such as `"₹499"`.
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<serde_json::Value>,
    #[serde(default)]
    pub in_stock_value: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
    /// `"on"` / `"true"` when published.
    #[serde(default)]
    pub visibility: Option<serde_json::Value>,
}

/// Body of `GET /product/{productId}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductBody {
    #[serde(default)]
    pub product: Option<ProductRecord>,
}

/// Body of `GET /get-product`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogBody {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

/// Body of `GET /auth/user/{userId}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserBody {
    #[serde(default)]
    pub name: Option<String>,
}

/// A product line inside an order record or request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedProduct {
    pub product_id: ProductId,
    #[serde(default)]
    pub product_qty: Option<u32>,
}

/// An order as stored remotely.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    #[serde(default)]
    pub products_ordered: Vec<OrderedProduct>,
    /// Older records only list ids.
    #[serde(default)]
    pub product_ids: Vec<ProductId>,
}

/// Body of `POST /find-my-order`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrdersBody {
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
}

// =============================================================================
// Requests
// =============================================================================

/// Body identifying a user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest<'a> {
    pub user_id: &'a UserId,
}

/// Body of `POST /add-to-cart`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest<'a> {
    pub user_id: &'a UserId,
    pub product_id: &'a ProductId,
    pub quantity: u32,
}

/// Body of `PUT /update-quantity`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityRequest<'a> {
    pub user_id: &'a UserId,
    pub product_id: &'a ProductId,
    pub product_qty: u32,
}

/// Body of `DELETE /delete-items`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteItemRequest<'a> {
    pub user_id: &'a UserId,
    pub product_id: &'a ProductId,
}

/// Body of `POST /update-address`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAddressRequest<'a> {
    pub user_id: &'a UserId,
    /// Flattened address line.
    pub address: &'a str,
}

/// Body of `POST /cart/place-order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub user_id: UserId,
    /// `dd/mm/yyyy`
    pub date: String,
    /// `HH:MM:SS`
    pub time: String,
    pub address: String,
    pub price: Price,
    pub products_ordered: Vec<OrderedProduct>,
}

/// Body of `POST /admin/verify-seller`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifySellerRequest<'a> {
    pub seller_id: &'a SellerId,
}
