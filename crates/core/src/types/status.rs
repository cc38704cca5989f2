//! Stock status derived from a product's remaining inventory.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Availability band shown next to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// More than 50 units left.
    InStock,
    /// 11 to 50 units left.
    LowStock,
    /// 1 to 10 units left.
    VeryLowStock,
    /// Nothing left.
    OutOfStock,
}

impl StockStatus {
    /// Classify a stock count.
    #[must_use]
    pub const fn from_stock(stock: u32) -> Self {
        match stock {
            51.. => Self::InStock,
            11..=50 => Self::LowStock,
            1..=10 => Self::VeryLowStock,
            0 => Self::OutOfStock,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
            Self::VeryLowStock => "Very Low Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }

    /// Whether the product can be added to a cart at all.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !matches!(self, Self::OutOfStock)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(StockStatus::from_stock(51), StockStatus::InStock);
        assert_eq!(StockStatus::from_stock(50), StockStatus::LowStock);
        assert_eq!(StockStatus::from_stock(11), StockStatus::LowStock);
        assert_eq!(StockStatus::from_stock(10), StockStatus::VeryLowStock);
        assert_eq!(StockStatus::from_stock(1), StockStatus::VeryLowStock);
        assert_eq!(StockStatus::from_stock(0), StockStatus::OutOfStock);
    }

    #[test]
    fn test_availability() {
        assert!(StockStatus::VeryLowStock.is_available());
        assert!(!StockStatus::OutOfStock.is_available());
        assert_eq!(StockStatus::OutOfStock.to_string(), "Out of Stock");
    }
}
