//! Mera Bestie storefront library.
//!
//! Typed client logic for the gifting store: catalog browsing, cart
//! reconciliation, vouchers, checkout with address persistence, order
//! history and the seller gate. All data lives behind the store's REST API;
//! this crate only keeps the client-side state (session id, saved address,
//! recently viewed products).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod session;
pub mod state;
pub mod storage;

pub use error::{AppError, Result};
pub use state::AppState;
