//! Seller gate for the admin dashboard.

use bestie_core::SellerId;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::api::StoreApiClient;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    /// The seller is not logged in, or verification could not complete.
    #[error("Seller access denied: {0}")]
    Denied(String),
}

/// Check that `seller_id` belongs to a logged-in seller.
///
/// # Errors
///
/// Returns [`AdminError::Denied`] on any failure, including network errors.
#[instrument(skip(client), fields(seller_id = %seller_id))]
pub async fn verify_seller(client: &StoreApiClient, seller_id: &SellerId) -> Result<()> {
    match client.verify_seller(seller_id).await {
        Ok(()) => {
            info!("Seller verified");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Seller verification failed");
            Err(AdminError::Denied(e.to_string()).into())
        }
    }
}
