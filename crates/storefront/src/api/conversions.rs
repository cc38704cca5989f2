//! Conversions from wire records to domain types.
//!
//! Prices become [`Price`] here, so nothing past the client ever sees a
//! formatted price string.

use bestie_core::product::is_visible_flag;
use bestie_core::{Order, OrderId, OrderItem, Price, PriceError, Product, ProductId};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::types::{OrderRecord, ProductRecord};

/// A remote record that cannot be turned into a domain value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required field is absent or blank.
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    /// The price could not be read.
    #[error("bad price: {0}")]
    Price(#[from] PriceError),
}

/// Convert a product record.
///
/// Requires an id, a name and a readable price. Optional fields that fail
/// to parse are treated as absent; a missing stock count reads as zero.
pub fn convert_product(record: ProductRecord) -> Result<Product, RecordError> {
    let id = non_blank(record.product_id).ok_or(RecordError::MissingField("productId"))?;
    let name = non_blank(record.name).ok_or(RecordError::MissingField("name"))?;
    let price = convert_price(record.price.as_ref())?;

    Ok(Product {
        id: ProductId::from(id),
        name,
        price,
        image_url: non_blank(record.img),
        category: non_blank(record.category),
        rating: record.rating.as_ref().and_then(number_like),
        in_stock: record
            .in_stock_value
            .as_ref()
            .and_then(number_like)
            .filter(|n| n.is_finite() && *n > 0.0)
            .map_or(0, |n| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped below
                let stock = n.min(f64::from(u32::MAX)).floor() as u32;
                stock
            }),
        description: non_blank(record.description),
        visible: match record.visibility {
            Some(Value::Bool(flag)) => flag,
            Some(Value::String(flag)) => is_visible_flag(Some(&flag)),
            _ => false,
        },
    })
}

/// Convert a catalog, dropping records that cannot be used.
pub fn convert_products(records: Vec<ProductRecord>) -> Vec<Product> {
    records
        .into_iter()
        .filter_map(|record| {
            let object_id = record.object_id.clone();
            convert_product(record)
                .map_err(|e| warn!(object_id = ?object_id, error = %e, "Skipping product record"))
                .ok()
        })
        .collect()
}

/// Convert an order record.
///
/// Orders are display-only, so a missing or unreadable price shows as zero
/// rather than hiding the order.
pub fn convert_order(record: OrderRecord) -> Order {
    let price = convert_price(record.price.as_ref()).unwrap_or_else(|e| {
        warn!(order_id = ?record.id, error = %e, "Order has unreadable price");
        Price::ZERO
    });

    let items = if record.products_ordered.is_empty() {
        record
            .product_ids
            .into_iter()
            .map(|product_id| OrderItem {
                product_id,
                quantity: None,
            })
            .collect()
    } else {
        record
            .products_ordered
            .into_iter()
            .map(|p| OrderItem {
                product_id: p.product_id,
                quantity: p.product_qty,
            })
            .collect()
    };

    Order {
        id: non_blank(record.id).map(OrderId::from),
        date: record.date.unwrap_or_default(),
        time: record.time.unwrap_or_default(),
        address: record.address.unwrap_or_default(),
        price,
        items,
    }
}

fn convert_price(value: Option<&Value>) -> Result<Price, RecordError> {
    match value {
        Some(Value::String(s)) => Ok(Price::parse_display(s)?),
        Some(Value::Number(n)) => n
            .as_f64()
            .and_then(|f| rust_decimal::Decimal::try_from(f).ok())
            .ok_or_else(|| RecordError::Price(PriceError::Invalid(n.to_string())))
            .and_then(|amount| Price::new(amount).map_err(RecordError::from)),
        _ => Err(RecordError::MissingField("price")),
    }
}

/// Read a JSON number or numeric string.
fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> ProductRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_convert_full_product() {
        let product = convert_product(record(json!({
            "_id": "65f0",
            "productId": "P-1",
            "name": "Rose Mug",
            "price": "₹1,299.50",
            "img": "https://img/rose.jpg",
            "category": "Couple Gifts",
            "rating": 4.2,
            "inStockValue": 12,
            "description": "A mug",
            "visibility": "on"
        })))
        .unwrap();

        assert_eq!(product.id.as_str(), "P-1");
        assert_eq!(product.price.amount(), dec!(1299.50));
        assert_eq!(product.in_stock, 12);
        assert_eq!(product.rating, Some(4.2));
        assert!(product.visible);
        assert!(product.is_listable());
    }

    #[test]
    fn test_numeric_price_and_string_stock() {
        let product = convert_product(record(json!({
            "productId": "P-2", "name": "Card", "price": 99, "inStockValue": "7", "visibility": true
        })))
        .unwrap();
        assert_eq!(product.price.amount(), dec!(99));
        assert_eq!(product.in_stock, 7);
        assert!(product.visible);
        assert!(!product.is_listable());
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            convert_product(record(json!({"name": "x", "price": "1"}))),
            Err(RecordError::MissingField("productId"))
        );
        assert_eq!(
            convert_product(record(json!({"productId": "p", "name": "x"}))),
            Err(RecordError::MissingField("price"))
        );
        assert!(matches!(
            convert_product(record(json!({"productId": "p", "name": "x", "price": "TBD"}))),
            Err(RecordError::Price(_))
        ));
    }

    #[test]
    fn test_negative_stock_reads_as_zero() {
        let product = convert_product(record(json!({
            "productId": "p", "name": "x", "price": "1", "inStockValue": -3
        })))
        .unwrap();
        assert_eq!(product.in_stock, 0);
    }

    #[test]
    fn test_convert_products_skips_bad_records() {
        let products = convert_products(vec![
            record(json!({"productId": "a", "name": "A", "price": "₹10"})),
            record(json!({"productId": "b", "name": "B"})),
        ]);
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn test_convert_order_with_ids_only() {
        let order: OrderRecord = serde_json::from_value(json!({
            "_id": "o1", "date": "01/02/2025", "time": "10:00:00",
            "address": "x", "price": 450, "productIds": ["a", "b"]
        }))
        .unwrap();
        let order = convert_order(order);
        assert_eq!(order.price.amount(), dec!(450));
        assert_eq!(order.items.len(), 2);
        assert!(order.items.iter().all(|i| i.quantity.is_none()));
        assert_eq!(order.placed_at(), "01/02/2025 10:00:00");
    }

    #[test]
    fn test_convert_order_prefers_quantities() {
        let order: OrderRecord = serde_json::from_value(json!({
            "price": "Rs. 90", "productsOrdered": [{"productId": "a", "productQty": 3}]
        }))
        .unwrap();
        let order = convert_order(order);
        assert_eq!(order.items[0].quantity, Some(3));
        assert!(order.id.is_none());
    }
}
