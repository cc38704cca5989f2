//! Placed orders.

use serde::{Deserialize, Serialize};

use crate::types::{OrderId, Price, ProductId};

/// One product line on a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    /// Missing when the listing only reports product ids.
    pub quantity: Option<u32>,
}

/// An order as listed on the orders page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<OrderId>,
    /// `dd/mm/yyyy`, as recorded at placement.
    pub date: String,
    /// `HH:MM:SS`, as recorded at placement.
    pub time: String,
    /// Flattened shipping address.
    pub address: String,
    pub price: Price,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Date and time for display.
    #[must_use]
    pub fn placed_at(&self) -> String {
        format!("{} {}", self.date, self.time).trim().to_owned()
    }
}
