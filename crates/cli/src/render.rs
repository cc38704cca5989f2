//! Table rendering for terminal output.

use bestie_core::{CartLine, CartTotals, Order, Product, ShippingAddress, Voucher};
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

fn finish(builder: Builder, numeric: std::ops::Range<usize>) -> String {
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(numeric), Alignment::right());
    table.to_string()
}

/// Products as a table: id, name, category, price, stock band.
pub fn products<'a>(products: impl IntoIterator<Item = &'a Product>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Category", "Price", "Stock"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.clone().unwrap_or_default(),
            product.price.to_string(),
            product.stock_status().label().to_string(),
        ]);
    }

    finish(builder, 3..4)
}

/// Product detail as a two-column table.
pub fn product_detail(product: &Product) -> String {
    let mut builder = Builder::default();
    let rating = product
        .rating
        .map(|r| format!("{r:.1}"))
        .unwrap_or_default();

    for (label, value) in [
        ("ID", product.id.to_string()),
        ("Name", product.name.clone()),
        ("Price", product.price.to_string()),
        ("Category", product.category.clone().unwrap_or_default()),
        ("Rating", rating),
        (
            "Stock",
            format!("{} ({})", product.stock_status().label(), product.in_stock),
        ),
        ("Description", product.description.clone().unwrap_or_default()),
    ] {
        builder.push_record([label.to_string(), value]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

/// Cart lines with unit price, quantity and line total.
pub fn cart(lines: &[CartLine]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Unit", "Qty", "Total"]);

    for line in lines {
        builder.push_record([
            line.product.id.to_string(),
            line.product.name.clone(),
            line.product.price.to_string(),
            line.quantity.to_string(),
            line.line_total().to_string(),
        ]);
    }

    finish(builder, 2..5)
}

/// Subtotal, discount, shipping and total.
pub fn totals(totals: &CartTotals, voucher: Option<&Voucher>) -> String {
    let discount_label = voucher.map_or_else(
        || "Discount".to_string(),
        |v| format!("Discount ({} {}%)", v.code, v.percent_display()),
    );

    let mut builder = Builder::default();
    builder.push_record(["Subtotal".to_string(), totals.subtotal.to_string()]);
    builder.push_record([discount_label, format!("- {}", totals.discount)]);
    builder.push_record(["Shipping".to_string(), totals.shipping.to_string()]);
    builder.push_record(["Total".to_string(), totals.total.to_string()]);

    finish(builder, 1..2)
}

/// Orders with date, address, amount and item list.
pub fn orders(orders: &[Order]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Order", "Placed", "Address", "Amount", "Items"]);

    for order in orders {
        let items = order
            .items
            .iter()
            .map(|item| match item.quantity {
                Some(qty) => format!("{} x{qty}", item.product_id),
                None => item.product_id.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");

        builder.push_record([
            order
                .id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            order.placed_at(),
            order.address.clone(),
            order.price.to_string(),
            items,
        ]);
    }

    finish(builder, 3..4)
}

/// The address form, one field per row.
pub fn address(address: &ShippingAddress) -> String {
    let mut builder = Builder::default();
    for field in bestie_core::AddressField::ALL {
        builder.push_record([field.as_str().to_string(), address.get(field).to_string()]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}
