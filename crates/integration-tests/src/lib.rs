//! Integration tests for the Mera Bestie storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bestie-integration-tests
//! ```
//!
//! Every test runs against a `wiremock` stand-in for the store API and keeps
//! its local and session stores in a temporary directory, so no network or
//! shared state is needed.
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart reconciliation, quantity limits, vouchers
//! - `checkout_flow` - Address persistence and order placement
//! - `catalog` - Catalog listing and recently viewed products
//! - `admin_gate` - Seller verification

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::PathBuf;
use std::sync::Arc;

use bestie_core::UserId;
use bestie_storefront::AppState;
use bestie_storefront::config::StorefrontConfig;
use bestie_storefront::storage::{FileStore, KeyValueStore};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// User id used by logged-in contexts.
pub const TEST_USER: &str = "user-1";

/// A mock store API plus storefront state rooted in a temp directory.
pub struct TestContext {
    pub server: MockServer,
    pub state: AppState,
    dir: TempDir,
}

impl TestContext {
    /// Start a mock server and build state with file stores.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let state = Self::build_state(&server, &dir);
        Self { server, state, dir }
    }

    /// Like [`TestContext::new`], with [`TEST_USER`] logged in.
    pub async fn logged_in() -> Self {
        let ctx = Self::new().await;
        ctx.state.session().login(&UserId::from(TEST_USER)).unwrap();
        ctx
    }

    fn build_state(server: &MockServer, dir: &TempDir) -> AppState {
        let state_dir = dir.path().display().to_string();
        let uri = server.uri();
        let config = StorefrontConfig::from_lookup(|key| match key {
            "BESTIE_API_BASE_URL" => Some(uri.clone()),
            "BESTIE_STATE_DIR" => Some(state_dir.clone()),
            _ => None,
        })
        .unwrap();
        AppState::new(&config).unwrap()
    }

    /// State sharing this context's state directory, as a second run of
    /// the CLI would see it.
    pub fn reopen(&self) -> AppState {
        Self::build_state(&self.server, &self.dir)
    }

    /// Path of the persistent local store file.
    pub fn local_store_path(&self) -> PathBuf {
        self.dir.path().join("local.json")
    }

    /// A fresh handle on the local store file.
    pub fn local_store(&self) -> Arc<dyn KeyValueStore> {
        Arc::new(FileStore::new(self.local_store_path()))
    }

    /// Serve `GET /cart/{TEST_USER}` with the given raw rows.
    pub async fn mount_cart(&self, rows: &[(&str, u32)]) {
        let cart: Vec<Value> = rows
            .iter()
            .map(|(id, qty)| json!({"productId": id, "productQty": qty}))
            .collect();
        Mock::given(method("GET"))
            .and(path(format!("/cart/{TEST_USER}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "cart": cart})),
            )
            .mount(&self.server)
            .await;
    }

    /// Serve `GET /product/{id}` with a listable product.
    pub async fn mount_product(&self, id: &str, price: &str, stock: u32) {
        Mock::given(method("GET"))
            .and(path(format!("/product/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "product": product_json(id, price, stock)
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve `GET /product/{id}` with a server error.
    pub async fn mount_broken_product(&self, id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/product/{id}")))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&self.server)
            .await;
    }
}

/// A complete product record as the store returns it.
pub fn product_json(id: &str, price: &str, stock: u32) -> Value {
    json!({
        "_id": format!("obj-{id}"),
        "productId": id,
        "name": format!("Gift {id}"),
        "price": price,
        "img": format!("https://img.example/{id}.jpg"),
        "category": "Birthday Gifts",
        "rating": 4.5,
        "inStockValue": stock,
        "description": "A lovely gift",
        "visibility": "on"
    })
}
