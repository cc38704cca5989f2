//! Recently viewed products, kept in the local store.

use std::sync::Arc;

use bestie_core::{Product, ProductId, RecentlyViewed};
use futures::future::join_all;
use tracing::warn;

use crate::api::StoreApiClient;
use crate::error::Result;
use crate::storage::{KeyValueStore, keys};

/// Load the recently viewed list. Unreadable data counts as empty.
///
/// # Errors
///
/// Returns an error only if the store cannot be read.
pub fn load(store: &Arc<dyn KeyValueStore>) -> Result<RecentlyViewed> {
    Ok(store
        .get_json::<RecentlyViewed>(keys::RECENTLY_VIEWED)?
        .unwrap_or_default())
}

/// Record a view and persist the list.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn record(store: &Arc<dyn KeyValueStore>, product_id: &ProductId) -> Result<RecentlyViewed> {
    let mut recent = load(store)?;
    recent.record(product_id.clone());
    store.set_json(keys::RECENTLY_VIEWED, &recent)?;
    Ok(recent)
}

/// Fetch the products on the list, newest first. Products that cannot be
/// fetched are skipped.
pub async fn products(client: &StoreApiClient, recent: &RecentlyViewed) -> Vec<Product> {
    let results = join_all(recent.iter().map(|id| client.get_product(id))).await;

    recent
        .iter()
        .zip(results)
        .filter_map(|(id, result)| {
            result
                .map_err(|e| warn!(product_id = %id, error = %e, "Skipping recently viewed product"))
                .ok()
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_record_persists_newest_first() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        for id in ["a", "b", "c", "d", "e"] {
            record(&store, &ProductId::from(id)).unwrap();
        }

        let recent = load(&store).unwrap();
        let ids: Vec<&str> = recent.iter().map(ProductId::as_str).collect();
        assert_eq!(ids, vec!["e", "d", "c", "b"]);
        assert_eq!(
            store.get(keys::RECENTLY_VIEWED).unwrap().as_deref(),
            Some(r#"["e","d","c","b"]"#)
        );
    }

    #[test]
    fn test_corrupt_list_is_empty() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(keys::RECENTLY_VIEWED, "not json").unwrap();
        assert!(load(&store).unwrap().is_empty());

        let recent = record(&store, &ProductId::from("x")).unwrap();
        assert_eq!(recent.len(), 1);
    }
}
