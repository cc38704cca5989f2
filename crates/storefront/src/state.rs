//! Application state shared across services.

use std::sync::Arc;

use crate::api::{ApiError, StoreApiClient};
use crate::config::{ApiConfig, StorefrontConfig};
use crate::session::Session;
use crate::storage::{FileStore, KeyValueStore};

/// Application state shared across all services.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// API client and the two client-side stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    client: StoreApiClient,
    local: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl AppState {
    /// Create state backed by file stores under the configured state directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        Self::with_stores(
            &config.api,
            Arc::new(FileStore::new(config.local_store_path())),
            Arc::new(FileStore::new(config.session_store_path())),
        )
    }

    /// Create state with explicit stores.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_stores(
        api: &ApiConfig,
        local: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            inner: Arc::new(AppStateInner {
                client: StoreApiClient::new(api)?,
                local,
                session,
            }),
        })
    }

    /// Get a reference to the store API client.
    #[must_use]
    pub fn client(&self) -> &StoreApiClient {
        &self.inner.client
    }

    /// Persistent local store (address, preferences, recently viewed).
    #[must_use]
    pub fn local_store(&self) -> &Arc<dyn KeyValueStore> {
        &self.inner.local
    }

    /// Session store (user id).
    #[must_use]
    pub fn session_store(&self) -> &Arc<dyn KeyValueStore> {
        &self.inner.session
    }

    /// Identity and navigation helpers for this state.
    #[must_use]
    pub fn session(&self) -> Session<'_> {
        Session::new(self)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("client", &self.inner.client)
            .finish_non_exhaustive()
    }
}
