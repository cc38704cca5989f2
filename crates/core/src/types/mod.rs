//! Core types for the Mera Bestie storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod id;
pub mod price;
pub mod status;

pub use address::{AddressField, ShippingAddress, UnknownAddressField};
pub use id::*;
pub use price::{Price, PriceError};
pub use status::StockStatus;
