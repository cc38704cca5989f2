//! Cart reconciliation rules.
//!
//! The remote cart is a list of raw `(product, quantity)` rows that may
//! repeat a product. Everything here is pure: merging rows, validating
//! quantity changes, and pricing lines. The storefront crate supplies the
//! network half (product lookups and writes).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::product::Product;
use crate::types::{Price, ProductId};
use crate::voucher::Voucher;

/// Smallest quantity a cart line may hold.
pub const MIN_QUANTITY: u32 = 1;

/// A cart quantity request that cannot be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuantityError {
    /// The new quantity would drop below one.
    #[error("quantity cannot go below {MIN_QUANTITY} (requested {requested})")]
    BelowMinimum {
        /// Quantity that was requested.
        requested: i64,
    },
    /// The new quantity exceeds the remaining stock.
    #[error("only {stock} in stock (requested {requested})")]
    AboveStock {
        /// Quantity that was requested.
        requested: i64,
        /// Last-known stock.
        stock: u32,
    },
}

/// Fold raw cart rows into one entry per product.
///
/// Quantities of repeated products are summed. Entries come back in the
/// order each product first appears.
#[must_use]
pub fn merge_rows<I>(rows: I) -> Vec<(ProductId, u32)>
where
    I: IntoIterator<Item = (ProductId, u32)>,
{
    let mut merged: Vec<(ProductId, u32)> = Vec::new();
    let mut positions: HashMap<ProductId, usize> = HashMap::new();

    for (product_id, quantity) in rows {
        if let Some(entry) = positions
            .get(&product_id)
            .and_then(|&index| merged.get_mut(index))
        {
            entry.1 = entry.1.saturating_add(quantity);
        } else {
            positions.insert(product_id.clone(), merged.len());
            merged.push((product_id, quantity));
        }
    }

    merged
}

/// Total number of units across raw rows (navigation badge count).
#[must_use]
pub fn item_count<'a, I>(quantities: I) -> u64
where
    I: IntoIterator<Item = &'a u32>,
{
    quantities.into_iter().map(|&q| u64::from(q)).sum()
}

/// Apply a signed delta to a quantity, bounded by `1..=stock`.
///
/// # Errors
///
/// Returns [`QuantityError`] when the result falls outside the bounds. No
/// remote write should be attempted in that case.
pub fn next_quantity(current: u32, delta: i64, stock: u32) -> Result<u32, QuantityError> {
    let requested = i64::from(current).saturating_add(delta);

    if requested < i64::from(MIN_QUANTITY) {
        return Err(QuantityError::BelowMinimum { requested });
    }
    if requested > i64::from(stock) {
        return Err(QuantityError::AboveStock { requested, stock });
    }

    u32::try_from(requested).map_err(|_| QuantityError::AboveStock { requested, stock })
}

/// A merged, priced cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// Subtotal, discount, and payable total for a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Price,
    pub discount: Price,
    /// Always zero; kept so receipts show the line explicitly.
    pub shipping: Price,
    pub total: Price,
}

impl CartTotals {
    /// Price a set of lines with an optional voucher.
    ///
    /// `total = subtotal × (1 − percentage)`.
    #[must_use]
    pub fn compute(lines: &[CartLine], voucher: Option<&Voucher>) -> Self {
        let subtotal: Price = lines.iter().map(CartLine::line_total).sum();
        let discount = voucher.map_or(Price::ZERO, |v| subtotal.portion(v.percentage));
        let shipping = Price::ZERO;

        Self {
            subtotal,
            discount,
            shipping,
            total: subtotal.saturating_sub(discount) + shipping,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::product::tests::product;
    use crate::voucher::VoucherTable;

    fn rows(items: &[(&str, u32)]) -> Vec<(ProductId, u32)> {
        items
            .iter()
            .map(|(id, qty)| (ProductId::from(*id), *qty))
            .collect()
    }

    #[test]
    fn test_merge_sums_duplicates() {
        let merged = merge_rows(rows(&[("a", 2), ("a", 3), ("b", 1)]));
        assert_eq!(merged, rows(&[("a", 5), ("b", 1)]));
    }

    #[test]
    fn test_merge_keeps_first_occurrence_order() {
        let merged = merge_rows(rows(&[("b", 1), ("a", 1), ("b", 4), ("c", 2), ("a", 1)]));
        assert_eq!(merged, rows(&[("b", 5), ("a", 2), ("c", 2)]));
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_rows(Vec::new()).is_empty());
    }

    #[test]
    fn test_item_count() {
        assert_eq!(item_count(&[2, 3, 1]), 6);
    }

    #[test]
    fn test_next_quantity_within_bounds() {
        assert_eq!(next_quantity(2, 1, 5), Ok(3));
        assert_eq!(next_quantity(2, -1, 5), Ok(1));
        assert_eq!(next_quantity(4, 1, 5), Ok(5));
    }

    #[test]
    fn test_next_quantity_below_minimum() {
        assert_eq!(
            next_quantity(1, -1, 5),
            Err(QuantityError::BelowMinimum { requested: 0 })
        );
    }

    #[test]
    fn test_next_quantity_above_stock() {
        assert_eq!(
            next_quantity(5, 1, 5),
            Err(QuantityError::AboveStock {
                requested: 6,
                stock: 5
            })
        );
    }

    #[test]
    fn test_totals_without_voucher() {
        let lines = vec![
            CartLine {
                product: product("a", 250, 10),
                quantity: 2,
            },
            CartLine {
                product: product("b", 500, 10),
                quantity: 1,
            },
        ];
        let totals = CartTotals::compute(&lines, None);
        assert_eq!(totals.subtotal.amount(), dec!(1000));
        assert_eq!(totals.discount, Price::ZERO);
        assert_eq!(totals.total.amount(), dec!(1000));
    }

    #[test]
    fn test_totals_with_voucher() {
        let lines = vec![CartLine {
            product: product("a", 1000, 10),
            quantity: 1,
        }];
        let outcome = VoucherTable::builtin().redeem("off10");
        let totals = CartTotals::compute(&lines, outcome.voucher());
        assert_eq!(totals.discount.amount(), dec!(100));
        assert_eq!(totals.total.amount(), dec!(900));
    }

    #[test]
    fn test_totals_empty_cart() {
        assert_eq!(CartTotals::compute(&[], None), CartTotals::default());
    }
}
