use crate::places::types::PlaceRecord;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// In-memory details cache using LRU eviction, keyed by place id.
///
/// Panning back over an area re-issues the nearby search, but the
/// per-result details are served from here instead of the provider.
#[derive(Debug, Clone)]
pub struct DetailsCache {
    cache: Option<Arc<Mutex<LruCache<String, PlaceRecord>>>>,
}

impl DetailsCache {
    /// Create a cache holding up to `capacity` records; 0 disables caching
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: NonZeroUsize::new(capacity).map(|cap| Arc::new(Mutex::new(LruCache::new(cap)))),
        }
    }

    pub fn get(&self, place_id: &str) -> Option<PlaceRecord> {
        self.cache.as_ref()?.lock().ok()?.get(place_id).cloned()
    }

    pub fn insert(&self, place_id: String, record: PlaceRecord) {
        if let Some(cache) = &self.cache {
            if let Ok(mut cache) = cache.lock() {
                cache.put(place_id, record);
            }
        }
    }

    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            if let Ok(mut cache) = cache.lock() {
                cache.clear();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|cache| cache.lock().ok().map(|c| c.len()))
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> PlaceRecord {
        PlaceRecord {
            name: Some(name.to_string()),
            ..PlaceRecord::default()
        }
    }

    #[test]
    fn test_insert_and_get() {
        let cache = DetailsCache::new(4);
        cache.insert("a".into(), record("A"));
        assert_eq!(cache.get("a").and_then(|r| r.name), Some("A".to_string()));
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = DetailsCache::new(2);
        cache.insert("a".into(), record("A"));
        cache.insert("b".into(), record("B"));
        let _ = cache.get("a");
        cache.insert("c".into(), record("C"));

        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_zero_capacity_disables() {
        let cache = DetailsCache::new(0);
        cache.insert("a".into(), record("A"));
        assert!(cache.get("a").is_none());
        assert!(cache.is_empty());
    }
}
