//! Identity and navigation summary.
//!
//! The session is a bare user id in the session store. There is no token:
//! the remote service decides what the id may do.

use bestie_core::UserId;
use bestie_core::cart::item_count;
use tracing::{info, instrument, warn};

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::state::AppState;
use crate::storage::keys;

/// Header data for the navigation bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavSummary {
    /// Display name, if it could be fetched.
    pub name: Option<String>,
    /// Total units across raw cart rows.
    pub cart_count: u64,
}

/// Session operations over an [`AppState`].
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    state: &'a AppState,
}

impl<'a> Session<'a> {
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Store the user id for this session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub fn login(&self, user_id: &UserId) -> Result<()> {
        self.state
            .session_store()
            .set(keys::USER_ID, user_id.as_str())?;
        set_sentry_user(user_id);
        info!(user_id = %user_id, "Logged in");
        Ok(())
    }

    /// End the session, wiping the session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be cleared.
    pub fn logout(&self) -> Result<()> {
        self.state.session_store().clear()?;
        clear_sentry_user();
        info!("Logged out");
        Ok(())
    }

    /// The logged-in user, if any. A blank stored id counts as logged out.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub fn current_user(&self) -> Result<Option<UserId>> {
        let stored = self.state.session_store().get(keys::USER_ID)?;
        Ok(stored.and_then(|id| UserId::parse(&id).ok()))
    }

    /// The logged-in user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotLoggedIn`] when there is no session.
    pub fn require_user(&self) -> Result<UserId> {
        self.current_user()?.ok_or(AppError::NotLoggedIn)
    }

    /// Display name and cart badge for the navigation bar.
    ///
    /// Each half is fetched independently; a failure leaves that half empty.
    ///
    /// # Errors
    ///
    /// Returns an error only if the session store cannot be read.
    #[instrument(skip(self))]
    pub async fn nav_summary(&self) -> Result<NavSummary> {
        let Some(user_id) = self.current_user()? else {
            return Ok(NavSummary::default());
        };

        let client = self.state.client();
        let (name, rows) = tokio::join!(client.get_user_name(&user_id), client.get_cart(&user_id));

        let name = name.unwrap_or_else(|e| {
            warn!(user_id = %user_id, error = %e, "Failed to fetch user name");
            None
        });
        let cart_count = match rows {
            Ok(rows) => item_count(rows.iter().map(|row| &row.product_qty)),
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Failed to fetch cart count");
                0
            }
        };

        Ok(NavSummary { name, cart_count })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ApiConfig;
    use crate::storage::MemoryStore;

    fn state(base_url: &str) -> AppState {
        AppState::with_stores(
            &ApiConfig::new(base_url).unwrap(),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_login_logout() {
        let state = state("http://localhost:9");
        let session = state.session();

        assert!(matches!(session.require_user(), Err(AppError::NotLoggedIn)));
        session.login(&UserId::from("u1")).unwrap();
        assert_eq!(session.require_user().unwrap().as_str(), "u1");

        session.logout().unwrap();
        assert_eq!(session.current_user().unwrap(), None);
    }

    #[test]
    fn test_blank_stored_id_is_logged_out() {
        let state = state("http://localhost:9");
        state.session_store().set(keys::USER_ID, "  ").unwrap();
        assert!(matches!(
            state.session().require_user(),
            Err(AppError::NotLoggedIn)
        ));
    }

    #[tokio::test]
    async fn test_nav_summary_counts_raw_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/user/u1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Asha"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cart/u1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "cart": [
                    {"productId": "a", "productQty": 2},
                    {"productId": "a", "productQty": 1},
                    {"productId": "b", "productQty": 4}
                ]
            })))
            .mount(&server)
            .await;

        let state = state(&server.uri());
        state.session().login(&UserId::from("u1")).unwrap();
        let summary = state.session().nav_summary().await.unwrap();
        assert_eq!(summary.name.as_deref(), Some("Asha"));
        assert_eq!(summary.cart_count, 7);
    }

    #[tokio::test]
    async fn test_nav_summary_tolerates_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let state = state(&server.uri());
        state.session().login(&UserId::from("u1")).unwrap();
        let summary = state.session().nav_summary().await.unwrap();
        assert_eq!(summary, NavSummary::default());
    }
}
