//! Type-safe price representation using decimal arithmetic.
//!
//! The remote catalog stores prices as display strings (`"₹400"`,
//! `"Rs. 1,299.50"`). [`Price`] is the numeric type those strings are turned
//! into at the API boundary; formatting happens again only when rendering.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors that can occur when building a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The input contains no digits at all.
    #[error("price has no digits: {0:?}")]
    NoDigits(String),
    /// The extracted digits do not form a decimal number.
    #[error("price is not a number: {0:?}")]
    Invalid(String),
    /// Prices cannot be negative.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative monetary amount in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Extract the amount from a currency-formatted display string.
    ///
    /// Everything before the first digit is skipped, so a currency prefix
    /// like `"Rs."` does not contribute a decimal point. After that, every
    /// character other than a digit or `.` is dropped (thousands separators,
    /// trailing text) and only the first decimal point is kept.
    ///
    /// ```
    /// use bestie_core::Price;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Price::parse_display("₹400").unwrap().amount(), Decimal::from(400));
    /// assert_eq!(
    ///     Price::parse_display("Rs. 1,299.50").unwrap().amount(),
    ///     Decimal::new(129_950, 2),
    /// );
    /// assert!(Price::parse_display("free").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string has no digits or the digits do not
    /// form a valid decimal number.
    pub fn parse_display(s: &str) -> Result<Self, PriceError> {
        let start = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| PriceError::NoDigits(s.to_owned()))?;

        let mut digits = String::with_capacity(s.len());
        let mut seen_point = false;
        for c in s.get(start..).unwrap_or_default().chars() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if c == '.' {
                if seen_point {
                    break;
                }
                seen_point = true;
                digits.push(c);
            }
        }

        let digits = digits.trim_end_matches('.');
        let amount =
            Decimal::from_str(digits).map_err(|_| PriceError::Invalid(s.to_owned()))?;
        Self::new(amount)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The portion of this price covered by a fractional rate (e.g. `0.10`).
    #[must_use]
    pub fn portion(&self, rate: Decimal) -> Self {
        Self((self.0 * rate).max(Decimal::ZERO))
    }

    /// Subtract another price, stopping at zero.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self((self.0 - other.0).max(Decimal::ZERO))
    }

    /// The amount rounded to paise (two decimal places).
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.0.round_dp(2)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rs. {:.2}", self.rounded())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self::Output {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_display(s)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // The remote API expects plain JSON numbers.
        serializer.serialize_f64(self.rounded().to_f64().unwrap_or_default())
    }
}

/// Wire shapes a price can arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawPrice::deserialize(deserializer)? {
            RawPrice::Number(n) => Decimal::from_f64(n)
                .ok_or_else(|| PriceError::Invalid(n.to_string()))
                .and_then(Self::new)
                .map_err(serde::de::Error::custom),
            RawPrice::Text(s) => Self::parse_display(&s).map_err(serde::de::Error::custom),
        }
    }
}
