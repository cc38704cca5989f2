//! Mera Bestie Core - Shared domain library.
//!
//! This crate provides the domain types and rules used by every Mera Bestie
//! component:
//! - `storefront` - Remote API client and storefront services
//! - `cli` - Command-line storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage. Cart arithmetic lives here once and is shared by the
//! cart and checkout flows.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, addresses, stock status
//! - [`product`] - Catalog products
//! - [`cart`] - Row merging, quantity bounds, totals
//! - [`voucher`] - Voucher table and redemption
//! - [`recent`] - Recently viewed ring
//! - [`order`] - Placed orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod order;
pub mod product;
pub mod recent;
pub mod types;
pub mod voucher;

pub use cart::{CartLine, CartTotals, QuantityError};
pub use order::{Order, OrderItem};
pub use product::Product;
pub use recent::RecentlyViewed;
pub use types::*;
pub use voucher::{Voucher, VoucherOutcome, VoucherTable};
