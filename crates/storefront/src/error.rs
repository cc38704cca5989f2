//! Unified error handling with Sentry integration.
//!
//! Every service returns `Result<T, AppError>`. Front ends decide how to show
//! an error; [`AppError::report`] forwards the ones worth tracking to Sentry.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::services::admin::AdminError;
use crate::services::cart::CartError;
use crate::services::catalog::CatalogError;
use crate::services::checkout::CheckoutError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store API call failed or was rejected.
    #[error("Store API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local or session storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog navigation failed.
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// A cart change was refused.
    #[error("{0}")]
    Cart(#[from] CartError),

    /// An order could not be placed.
    #[error("{0}")]
    Checkout(#[from] CheckoutError),

    /// Seller verification failed.
    #[error("{0}")]
    Admin(#[from] AdminError),

    /// No user id in the session.
    #[error("Not logged in")]
    NotLoggedIn,
}

impl AppError {
    /// Whether this error is a validation outcome rather than a fault.
    ///
    /// Validation errors are shown to the user as-is and never reported.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Catalog(_)
                | Self::Cart(_)
                | Self::Checkout(_)
                | Self::Admin(_)
                | Self::NotLoggedIn
        )
    }

    /// Log the error and capture faults to Sentry.
    pub fn report(&self) {
        if self.is_user_facing() {
            tracing::debug!(error = %self, "Request refused");
            return;
        }

        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Storefront error"
        );
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after login to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Changed quantity", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use bestie_core::QuantityError;

    use super::*;

    #[test]
    fn test_app_error_display() {
        assert_eq!(AppError::NotLoggedIn.to_string(), "Not logged in");

        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), CheckoutError::EmptyCart.to_string());

        let err = AppError::from(ApiError::Rejected("Cart not found".to_string()));
        assert_eq!(err.to_string(), "Store API error: Rejected: Cart not found");
    }

    #[test]
    fn test_user_facing_classification() {
        assert!(AppError::NotLoggedIn.is_user_facing());
        assert!(
            AppError::from(CartError::Quantity(QuantityError::BelowMinimum { requested: 0 }))
                .is_user_facing()
        );
        assert!(!AppError::from(ApiError::NotFound("x".to_string())).is_user_facing());
    }
}
