//! Cart commands.

use std::io::Write;

use bestie_core::{ProductId, VoucherOutcome};
use bestie_storefront::AppState;
use bestie_storefront::services::cart::Cart;
use bestie_storefront::services::product;

use crate::{CliError, render};

/// Show the cart, optionally with a voucher applied.
pub async fn show(
    state: &AppState,
    out: &mut impl Write,
    voucher: Option<&str>,
) -> Result<(), CliError> {
    let mut cart = Cart::load(state).await?;
    if cart.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    if let Some(code) = voucher {
        match cart.redeem_voucher(code) {
            VoucherOutcome::Applied(voucher) => writeln!(out, "{}", voucher.message)?,
            VoucherOutcome::Invalid { message } => writeln!(out, "{message}")?,
        }
    }

    writeln!(out, "{}", render::cart(cart.lines()))?;
    writeln!(out, "{}", render::totals(&cart.totals(), cart.voucher()))?;
    Ok(())
}

/// Add a product to the cart.
pub async fn add(
    state: &AppState,
    out: &mut impl Write,
    product_id: &str,
    quantity: u32,
) -> Result<(), CliError> {
    let product_id = ProductId::parse(product_id)?;
    let product = state.client().get_product(&product_id).await?;
    product::add_to_cart(state, &product, quantity).await?;
    writeln!(out, "Added {quantity} x {} to cart", product.name)?;
    Ok(())
}

/// Change a line's quantity.
pub async fn change_quantity(
    state: &AppState,
    out: &mut impl Write,
    product_id: &str,
    delta: i64,
) -> Result<(), CliError> {
    let product_id = ProductId::parse(product_id)?;
    let mut cart = Cart::load(state).await?;
    let quantity = cart.change_quantity(&product_id, delta).await?;
    writeln!(out, "{product_id}: quantity {quantity}")?;
    writeln!(out, "{}", render::totals(&cart.totals(), None))?;
    Ok(())
}

/// Remove a line.
pub async fn remove(state: &AppState, out: &mut impl Write, product_id: &str) -> Result<(), CliError> {
    let product_id = ProductId::parse(product_id)?;
    let mut cart = Cart::load(state).await?;
    cart.remove(&product_id).await?;
    writeln!(out, "Removed {product_id}")?;
    Ok(())
}
