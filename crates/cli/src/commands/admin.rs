//! Seller verification.

use std::io::Write;

use bestie_core::SellerId;
use bestie_storefront::AppState;
use bestie_storefront::services::admin;

use crate::CliError;

/// Check a seller id against the store.
pub async fn verify(state: &AppState, out: &mut impl Write, seller_id: &str) -> Result<(), CliError> {
    let seller_id = SellerId::parse(seller_id)?;
    admin::verify_seller(state.client(), &seller_id).await?;
    writeln!(out, "Seller {seller_id} verified")?;
    Ok(())
}
