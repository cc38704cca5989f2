//! Checkout commands.

use std::io::Write;

use bestie_core::{AddressField, VoucherTable};
use bestie_storefront::AppState;
use bestie_storefront::services::address::AddressBook;
use bestie_storefront::services::checkout::Checkout;
use clap::ValueEnum;

use crate::{CliError, render};

/// On/off switch for address saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

/// Field edits from the command line. `None` leaves a field alone.
#[derive(Debug, Default)]
pub struct AddressEdits {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub phone: Option<String>,
}

impl AddressEdits {
    fn into_fields(self) -> impl Iterator<Item = (AddressField, String)> {
        [
            (AddressField::Street, self.street),
            (AddressField::City, self.city),
            (AddressField::State, self.state),
            (AddressField::Pincode, self.pincode),
            (AddressField::Phone, self.phone),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
    }
}

/// Apply edits to the address form and show it.
///
/// With saving off, edits are kept for the session and dropped on logout.
pub fn address(state: &AppState, out: &mut impl Write, edits: AddressEdits) -> Result<(), CliError> {
    let mut book = AddressBook::open(state)?;
    let mut edited = false;
    for (field, value) in edits.into_fields() {
        book.set_field(field, value)?;
        edited = true;
    }

    writeln!(out, "{}", render::address(book.address()))?;
    let missing = book.address().missing_fields();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(AddressField::as_str).collect();
        writeln!(out, "Missing: {}", names.join(", "))?;
    }
    if edited && !book.save_enabled() {
        writeln!(out, "Address saving is off; the form is kept until logout")?;
    }
    Ok(())
}

/// Turn address saving on or off.
pub fn save_address(state: &AppState, out: &mut impl Write, toggle: Toggle) -> Result<(), CliError> {
    let mut book = AddressBook::open(state)?;
    book.set_save(toggle == Toggle::On)?;
    match toggle {
        Toggle::On => writeln!(out, "Address saving on")?,
        Toggle::Off => writeln!(out, "Address saving off; saved address removed")?,
    }
    Ok(())
}

/// Place an order for the current cart.
pub async fn place(
    state: &AppState,
    out: &mut impl Write,
    voucher: Option<&str>,
    wait: bool,
) -> Result<(), CliError> {
    let voucher = match voucher.map(|code| VoucherTable::builtin().redeem(code)) {
        Some(outcome) => {
            writeln!(out, "{}", outcome.message())?;
            outcome.voucher().cloned()
        }
        None => None,
    };

    let checkout = Checkout::open(state, voucher).await?;
    writeln!(out, "{}", render::cart(checkout.lines()))?;
    writeln!(out, "{}", render::totals(&checkout.totals(), checkout.voucher()))?;

    let placed = checkout.place_order(chrono::Local::now().naive_local()).await?;
    writeln!(out, "{} ({})", placed.message, placed.total)?;

    if wait {
        out.flush()?;
        tokio::time::sleep(placed.redirect_after).await;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bestie_integration_tests::TestContext;
    use bestie_storefront::storage::keys;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;

    const FLAT_ADDRESS: &str = "12 MG Road, Pune, MH, 411001, 9999999999";

    fn full_edits() -> AddressEdits {
        AddressEdits {
            street: Some("12 MG Road".to_string()),
            city: Some("Pune".to_string()),
            state: Some("MH".to_string()),
            pincode: Some("411001".to_string()),
            phone: Some("9999999999".to_string()),
        }
    }

    async fn mount_place_order(ctx: &TestContext) {
        Mock::given(method("POST"))
            .and(path("/cart/place-order"))
            .and(body_partial_json(json!({"address": FLAT_ADDRESS})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "Order placed successfully"})),
            )
            .expect(1)
            .mount(&ctx.server)
            .await;
    }

    #[tokio::test]
    async fn test_unsaved_address_reaches_place_in_next_run() {
        let ctx = TestContext::logged_in().await;
        ctx.mount_cart(&[("a", 1)]).await;
        ctx.mount_product("a", "₹250", 10).await;
        mount_place_order(&ctx).await;

        let mut out = Vec::new();
        address(&ctx.state, &mut out, full_edits()).unwrap();

        let next_run = ctx.reopen();
        place(&next_run, &mut out, None, false).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("kept until logout"));
        assert!(text.contains("Order placed successfully"));
        assert_eq!(ctx.local_store().get(keys::SAVED_SHIPPING_ADDRESS).unwrap(), None);
    }

    #[tokio::test]
    async fn test_address_edits_accumulate_across_runs() {
        let ctx = TestContext::logged_in().await;
        let mut out = Vec::new();

        let street_only = AddressEdits {
            street: Some("12 MG Road".to_string()),
            ..AddressEdits::default()
        };
        address(&ctx.state, &mut out, street_only).unwrap();

        let rest = AddressEdits {
            street: None,
            ..full_edits()
        };
        address(&ctx.reopen(), &mut out, rest).unwrap();

        let book = AddressBook::open(&ctx.reopen()).unwrap();
        assert_eq!(book.address().flatten(), FLAT_ADDRESS);
    }

    #[tokio::test]
    async fn test_logout_drops_unsaved_address() {
        let ctx = TestContext::logged_in().await;
        let mut out = Vec::new();
        address(&ctx.state, &mut out, full_edits()).unwrap();

        ctx.state.session().logout().unwrap();

        let book = AddressBook::open(&ctx.reopen()).unwrap();
        assert!(!book.address().is_complete());
    }
}
