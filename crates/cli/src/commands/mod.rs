//! Subcommand implementations.
//!
//! Each command writes its output to the handle it is given so the binary
//! decides where text goes.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod session;
