//! Voucher codes and their discounts.
//!
//! Vouchers are a fixed client-side table; nothing is validated remotely.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Message shown when a code is not in the table.
pub const INVALID_VOUCHER_MESSAGE: &str = "Invalid voucher code";

/// A redeemable discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    /// Normalized (upper-case) code.
    pub code: String,
    /// Fraction taken off the subtotal, e.g. `0.10` for 10%.
    pub percentage: Decimal,
    /// Confirmation shown when the code is applied.
    pub message: String,
}

impl Voucher {
    /// Percentage as a whole-number display value (`0.10` → `10`).
    #[must_use]
    pub fn percent_display(&self) -> Decimal {
        (self.percentage * Decimal::ONE_HUNDRED).normalize()
    }
}

/// Result of redeeming a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoucherOutcome {
    /// The code matched; its discount is now active.
    Applied(Voucher),
    /// The code did not match; no discount is active.
    Invalid {
        /// Inline error text.
        message: String,
    },
}

impl VoucherOutcome {
    /// The message to show next to the voucher input.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Applied(voucher) => &voucher.message,
            Self::Invalid { message } => message,
        }
    }

    /// The applied voucher, if any.
    #[must_use]
    pub const fn voucher(&self) -> Option<&Voucher> {
        match self {
            Self::Applied(voucher) => Some(voucher),
            Self::Invalid { .. } => None,
        }
    }
}

/// Upper-case and trim a code as typed by the customer.
#[must_use]
pub fn normalize_code(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Lookup table from normalized code to voucher.
#[derive(Debug, Clone, Default)]
pub struct VoucherTable {
    vouchers: HashMap<String, Voucher>,
}

impl VoucherTable {
    /// The storefront's built-in vouchers.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::default();
        table.insert("OFF10", Decimal::new(10, 2), "10% discount applied!");
        table
    }

    /// Add or replace a voucher. The code is normalized before storing and
    /// the percentage is clamped to `0..=1`.
    pub fn insert(&mut self, code: &str, percentage: Decimal, message: &str) {
        let code = normalize_code(code);
        let percentage = percentage.clamp(Decimal::ZERO, Decimal::ONE);
        self.vouchers.insert(
            code.clone(),
            Voucher {
                code,
                percentage,
                message: message.to_owned(),
            },
        );
    }

    /// Look up a code after normalizing it.
    #[must_use]
    pub fn redeem(&self, input: &str) -> VoucherOutcome {
        self.vouchers.get(&normalize_code(input)).map_or_else(
            || VoucherOutcome::Invalid {
                message: INVALID_VOUCHER_MESSAGE.to_owned(),
            },
            |voucher| VoucherOutcome::Applied(voucher.clone()),
        )
    }

    /// Number of known codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vouchers.len()
    }

    /// Whether the table has no codes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vouchers.is_empty()
    }
}
