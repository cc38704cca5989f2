//! Order history.

use std::io::Write;

use bestie_storefront::AppState;
use bestie_storefront::services::orders;

use crate::{CliError, render};

/// List the logged-in user's orders.
pub async fn list(state: &AppState, out: &mut impl Write) -> Result<(), CliError> {
    let orders = orders::list(state).await?;
    if orders.is_empty() {
        writeln!(out, "No orders yet")?;
        return Ok(());
    }
    writeln!(out, "{}", render::orders(&orders))?;
    Ok(())
}
