//! Request/response cache with mutation-triggered invalidation.
//!
//! One key per workspace-wide listing, one per filtered listing. Mutations
//! invalidate every key touching their workspace; invalidation is pure
//! bookkeeping and never blocks the caller on a refetch.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

/// Standard cache keys
pub mod keys {
    pub fn texts(workspace_id: &str) -> String {
        format!("texts:{}", workspace_id)
    }

    pub fn comments(workspace_id: &str) -> String {
        format!("comments:{}", workspace_id)
    }

    pub fn comments_by_text(workspace_id: &str, text_id: &str) -> String {
        format!("comments:{}:{}", workspace_id, text_id)
    }
}

#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().expect("cache lock").get(key).cloned()
    }

    pub fn put(&self, key: impl Into<String>, value: Value) {
        self.entries
            .write()
            .expect("cache lock")
            .insert(key.into(), value);
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.write().expect("cache lock").remove(key);
    }

    /// Drop every entry whose key starts with `prefix`; used by mutations to
    /// clear both the full listing and all filtered listings at once.
    pub fn invalidate_prefix(&self, prefix: &str) {
        self.entries
            .write()
            .expect("cache lock")
            .retain(|key, _| !key.starts_with(prefix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn put_get_invalidate() {
        let cache = QueryCache::new();
        cache.put(keys::texts("ws-1"), json!([{ "id": "t1" }]));

        assert!(cache.get(&keys::texts("ws-1")).is_some());
        cache.invalidate(&keys::texts("ws-1"));
        assert!(cache.get(&keys::texts("ws-1")).is_none());
    }

    #[test]
    fn prefix_invalidation_clears_filtered_listings() {
        let cache = QueryCache::new();
        cache.put(keys::comments("ws-1"), json!([]));
        cache.put(keys::comments_by_text("ws-1", "t1"), json!([]));
        cache.put(keys::comments_by_text("ws-1", "t2"), json!([]));
        cache.put(keys::comments("ws-2"), json!([]));

        cache.invalidate_prefix(&keys::comments("ws-1"));

        assert!(cache.get(&keys::comments("ws-1")).is_none());
        assert!(cache.get(&keys::comments_by_text("ws-1", "t1")).is_none());
        assert!(cache.get(&keys::comments_by_text("ws-1", "t2")).is_none());
        // Other workspaces are untouched
        assert!(cache.get(&keys::comments("ws-2")).is_some());
    }
}
