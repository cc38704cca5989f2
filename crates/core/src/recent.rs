//! Recently viewed products.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// How many product ids are remembered.
pub const RECENTLY_VIEWED_CAPACITY: usize = 4;

/// Most-recent-first list of viewed product ids, capped at
/// [`RECENTLY_VIEWED_CAPACITY`]. The oldest id is evicted when full.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentlyViewed {
    ids: VecDeque<ProductId>,
}

impl RecentlyViewed {
    /// Record a view. A repeat view moves the id to the front.
    pub fn record(&mut self, product_id: ProductId) {
        self.ids.retain(|id| *id != product_id);
        self.ids.push_front(product_id);
        self.ids.truncate(RECENTLY_VIEWED_CAPACITY);
    }

    /// Ids, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &ProductId> {
        self.ids.iter()
    }

    /// Number of remembered ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing has been viewed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids(recent: &RecentlyViewed) -> Vec<&str> {
        recent.iter().map(ProductId::as_str).collect()
    }

    #[test]
    fn test_evicts_oldest_at_capacity() {
        let mut recent = RecentlyViewed::default();
        for id in ["a", "b", "c", "d", "e"] {
            recent.record(ProductId::from(id));
        }
        assert_eq!(ids(&recent), vec!["e", "d", "c", "b"]);
    }

    #[test]
    fn test_repeat_view_moves_to_front() {
        let mut recent = RecentlyViewed::default();
        for id in ["a", "b", "c", "a"] {
            recent.record(ProductId::from(id));
        }
        assert_eq!(ids(&recent), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_json_is_plain_array() {
        let mut recent = RecentlyViewed::default();
        recent.record(ProductId::from("x"));
        assert_eq!(serde_json::to_string(&recent).unwrap(), r#"["x"]"#);
    }
}
