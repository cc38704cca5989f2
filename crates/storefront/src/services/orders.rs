//! Order history.

use bestie_core::Order;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::state::AppState;

/// List the logged-in user's orders.
///
/// # Errors
///
/// Returns [`crate::AppError::NotLoggedIn`] without a session, or an error
/// unless the service returns the list.
#[instrument(skip(state))]
pub async fn list(state: &AppState) -> Result<Vec<Order>> {
    let user_id = state.session().require_user()?;
    let orders = state.client().find_orders(&user_id).await?;
    debug!(count = orders.len(), "Orders fetched");
    Ok(orders)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use bestie_core::UserId;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ApiConfig;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_list_orders() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/find-my-order"))
            .and(body_json(json!({"userId": "u1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "orders": [
                    {"_id": "o1", "date": "05/03/2025", "time": "14:30:00",
                     "address": "x", "price": 900,
                     "productsOrdered": [{"productId": "a", "productQty": 2}]}
                ]
            })))
            .mount(&server)
            .await;

        let state = AppState::with_stores(
            &ApiConfig::new(&server.uri()).unwrap(),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
        )
        .unwrap();
        state.session().login(&UserId::from("u1")).unwrap();

        let orders = list(&state).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].placed_at(), "05/03/2025 14:30:00");
    }
}
