//! Cart reconciliation and mutation.
//!
//! Raw rows from the service are merged per product, enriched with product
//! detail fetched concurrently, and priced with the shared totals routine.
//! Quantity changes and removals are confirmed round-trips: local lines only
//! change after the service reports success.

use bestie_core::cart::{item_count, merge_rows, next_quantity};
use bestie_core::{
    CartLine, CartTotals, ProductId, QuantityError, UserId, Voucher, VoucherOutcome, VoucherTable,
};
use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::api::StoreApiClient;
use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Cart changes refused before reaching the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("{0}")]
    Quantity(#[from] QuantityError),

    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    #[error("{0} is out of stock")]
    OutOfStock(String),
}

/// Fetch a user's cart as priced lines.
///
/// Lines whose product cannot be fetched are dropped with a warning; the
/// rest keep the order in which their product first appeared.
///
/// # Errors
///
/// Returns an error if the cart itself cannot be fetched.
#[instrument(skip(client), fields(user_id = %user_id))]
pub async fn fetch_lines(client: &StoreApiClient, user_id: &UserId) -> Result<Vec<CartLine>> {
    let rows = client.get_cart(user_id).await?;
    let merged = merge_rows(rows.into_iter().map(|row| (row.product_id, row.product_qty)));

    let products = join_all(merged.iter().map(|(id, _)| client.get_product(id))).await;

    let lines: Vec<CartLine> = merged
        .into_iter()
        .zip(products)
        .filter_map(|((product_id, quantity), product)| match product {
            Ok(product) => Some(CartLine { product, quantity }),
            Err(e) => {
                warn!(product_id = %product_id, error = %e, "Dropping cart line");
                None
            }
        })
        .collect();

    debug!(lines = lines.len(), "Cart loaded");
    Ok(lines)
}

/// A logged-in user's cart.
#[derive(Debug, Clone)]
pub struct Cart {
    state: AppState,
    user_id: UserId,
    lines: Vec<CartLine>,
    vouchers: VoucherTable,
    voucher: Option<Voucher>,
}

impl Cart {
    /// Load the logged-in user's cart.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AppError::NotLoggedIn`] without a session, or an
    /// error if the cart cannot be fetched.
    pub async fn load(state: &AppState) -> Result<Self> {
        let user_id = state.session().require_user()?;
        let lines = fetch_lines(state.client(), &user_id).await?;

        Ok(Self {
            state: state.clone(),
            user_id,
            lines,
            vouchers: VoucherTable::builtin(),
            voucher: None,
        })
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        item_count(self.lines.iter().map(|line| &line.quantity))
    }

    /// The active voucher, if one was redeemed.
    #[must_use]
    pub const fn voucher(&self) -> Option<&Voucher> {
        self.voucher.as_ref()
    }

    /// Current totals.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.lines, self.voucher.as_ref())
    }

    /// Try a voucher code. A valid code replaces the active voucher; an
    /// invalid one clears it.
    pub fn redeem_voucher(&mut self, code: &str) -> VoucherOutcome {
        let outcome = self.vouchers.redeem(code);
        self.voucher = outcome.voucher().cloned();
        debug!(applied = self.voucher.is_some(), "Voucher redeemed");
        outcome
    }

    /// Change a line's quantity by `delta`.
    ///
    /// The new quantity must stay within `1..=stock`; otherwise nothing is
    /// sent. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] for refused changes, or an API error if the
    /// service does not confirm the update.
    #[instrument(skip(self), fields(user_id = %self.user_id, product_id = %product_id))]
    pub async fn change_quantity(&mut self, product_id: &ProductId, delta: i64) -> Result<u32> {
        let line = self.line(product_id)?;
        let quantity = next_quantity(line.quantity, delta, line.product.in_stock)
            .map_err(CartError::from)?;

        self.state
            .client()
            .update_quantity(&self.user_id, product_id, quantity)
            .await?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == *product_id) {
            line.quantity = quantity;
        }
        add_breadcrumb(
            "cart",
            "Changed quantity",
            Some(&[("product_id", product_id.as_str())]),
        );
        info!(quantity, "Cart quantity updated");
        Ok(quantity)
    }

    /// Remove a product from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] for unknown products, or an API
    /// error if the service does not confirm the removal.
    #[instrument(skip(self), fields(user_id = %self.user_id, product_id = %product_id))]
    pub async fn remove(&mut self, product_id: &ProductId) -> Result<()> {
        self.line(product_id)?;

        self.state
            .client()
            .delete_item(&self.user_id, product_id)
            .await?;

        self.lines.retain(|line| line.product.id != *product_id);
        add_breadcrumb(
            "cart",
            "Removed item",
            Some(&[("product_id", product_id.as_str())]),
        );
        info!("Cart line removed");
        Ok(())
    }

    fn line(&self, product_id: &ProductId) -> std::result::Result<&CartLine, CartError> {
        self.lines
            .iter()
            .find(|line| line.product.id == *product_id)
            .ok_or_else(|| CartError::NotInCart(product_id.clone()))
    }
}
