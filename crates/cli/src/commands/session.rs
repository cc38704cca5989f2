//! Login, logout and the navigation summary.

use std::io::Write;

use bestie_core::UserId;
use bestie_storefront::AppState;

use crate::CliError;

/// Start a session.
pub fn login(state: &AppState, out: &mut impl Write, user_id: &str) -> Result<(), CliError> {
    let user_id = UserId::parse(user_id)?;
    state.session().login(&user_id)?;
    writeln!(out, "Logged in as {user_id}")?;
    Ok(())
}

/// End the session.
pub fn logout(state: &AppState, out: &mut impl Write) -> Result<(), CliError> {
    state.session().logout()?;
    writeln!(out, "Logged out")?;
    Ok(())
}

/// Show who is logged in and how many items are in their cart.
pub async fn whoami(state: &AppState, out: &mut impl Write) -> Result<(), CliError> {
    let session = state.session();
    let Some(user_id) = session.current_user()? else {
        writeln!(out, "Not logged in")?;
        return Ok(());
    };

    let summary = session.nav_summary().await?;
    match summary.name {
        Some(name) => writeln!(out, "{name} ({user_id})")?,
        None => writeln!(out, "{user_id}")?,
    }
    writeln!(out, "Cart: {} item(s)", summary.cart_count)?;
    Ok(())
}
