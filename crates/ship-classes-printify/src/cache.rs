use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// TTL-expiring response cache with namespaced keys.
///
/// Keys are slash-separated (`products/{shop}/{page}/{limit}`), so bulk
/// invalidation is a prefix sweep over structured keys rather than a
/// pattern match over opaque entries. A zero TTL disables caching: nothing
/// stored is ever considered fresh.
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

struct CacheEntry {
    stored_at: Instant,
    value: serde_json::Value,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a fresh entry. Expired entries are dropped on read.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: &str, value: serde_json::Value) {
        self.entries.lock().unwrap().insert(
            key.to_owned(),
            CacheEntry {
                stored_at: Instant::now(),
                value,
            },
        );
    }

    pub fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    /// Drop every entry whose key starts with `prefix`.
    pub fn remove_prefix(&self, prefix: &str) {
        self.entries
            .lock()
            .unwrap()
            .retain(|key, _| !key.starts_with(prefix));
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(n: u64) -> serde_json::Value {
        serde_json::json!({ "n": n })
    }

    #[test]
    fn fresh_entries_round_trip() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("shops", value(1));

        assert_eq!(cache.get("shops"), Some(value(1)));
        assert_eq!(cache.get("providers"), None);
    }

    #[test]
    fn zero_ttl_disables_caching() {
        let cache = ResponseCache::new(Duration::ZERO);
        cache.insert("shops", value(1));

        assert_eq!(cache.get("shops"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn remove_prefix_sweeps_a_namespace() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("shops", value(1));
        cache.insert("products/5/1/50", value(2));
        cache.insert("products/5/2/50", value(3));
        cache.insert("products/9/1/50", value(4));

        cache.remove_prefix("products/");

        assert_eq!(cache.get("shops"), Some(value(1)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn remove_drops_a_single_key() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("shops", value(1));
        cache.insert("providers", value(2));

        cache.remove("shops");

        assert_eq!(cache.get("shops"), None);
        assert_eq!(cache.get("providers"), Some(value(2)));
    }
}
