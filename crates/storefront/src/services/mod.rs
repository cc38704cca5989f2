//! Storefront services.
//!
//! # Services
//!
//! - `catalog` - Category filter, paging, best sellers and search
//! - `product` - Product detail and add-to-cart
//! - `cart` - Cart reconciliation, quantity changes, vouchers
//! - `address` - Shipping address form with opt-in persistence
//! - `checkout` - Order placement
//! - `orders` - Order history
//! - `recent` - Recently viewed products
//! - `admin` - Seller verification gate

pub mod address;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod product;
pub mod recent;
