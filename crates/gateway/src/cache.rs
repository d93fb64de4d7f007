//! Bounded response cache for translated strings.
//!
//! Keys are exact `"v1|{target}|{text}"` strings with no normalization,
//! so "Hello" and "hello" are distinct entries. When the capacity bound
//! is reached, the single oldest-inserted entry is evicted before the
//! new one goes in (insertion-order FIFO, not LRU). Entries have no TTL
//! and live until evicted or the process restarts.

use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Key prefix, bumped whenever the cache key format changes.
const CACHE_VERSION: &str = "v1";

/// In-memory translation cache.
pub struct TranslationCache {
    entries: DashMap<String, String>,
    /// Insertion order, oldest first. Guarded separately; the lock is
    /// held across eviction so capacity is never exceeded.
    order: Mutex<VecDeque<String>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Cache counters for logs.
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl TranslationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn key(target: &str, text: &str) -> String {
        format!("{}|{}|{}", CACHE_VERSION, target, text)
    }

    pub fn get(&self, target: &str, text: &str) -> Option<String> {
        let found = self
            .entries
            .get(&Self::key(target, text))
            .map(|entry| entry.value().clone());
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    pub fn put(&self, target: &str, text: &str, translation: &str) {
        let key = Self::key(target, text);
        let mut order = self.order.lock().unwrap();

        if self.entries.contains_key(&key) {
            // Overwrite in place; insertion order is unchanged.
            self.entries.insert(key, translation.to_string());
            return;
        }

        if order.len() >= self.capacity {
            if let Some(oldest) = order.pop_front() {
                self.entries.remove(&oldest);
            }
        }

        order.push_back(key.clone());
        self.entries.insert(key, translation.to_string());
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_what_was_put() {
        let cache = TranslationCache::new(10);
        cache.put("es", "Hello", "Hola");
        assert_eq!(cache.get("es", "Hello"), Some("Hola".to_string()));
        assert_eq!(cache.get("es", "World"), None);
    }

    #[test]
    fn keys_are_case_and_language_sensitive() {
        let cache = TranslationCache::new(10);
        cache.put("es", "Hello", "Hola");
        assert_eq!(cache.get("es", "hello"), None);
        assert_eq!(cache.get("fr", "Hello"), None);
    }

    #[test]
    fn evicts_oldest_inserted_first() {
        let cache = TranslationCache::new(2);
        cache.put("es", "one", "uno");
        cache.put("es", "two", "dos");
        cache.put("es", "three", "tres");

        assert_eq!(cache.get("es", "one"), None);
        assert_eq!(cache.get("es", "two"), Some("dos".to_string()));
        assert_eq!(cache.get("es", "three"), Some("tres".to_string()));
    }

    #[test]
    fn fifo_not_lru() {
        let cache = TranslationCache::new(2);
        cache.put("es", "one", "uno");
        cache.put("es", "two", "dos");
        // Touching "one" must not save it: eviction is insertion-order.
        assert!(cache.get("es", "one").is_some());
        cache.put("es", "three", "tres");
        assert_eq!(cache.get("es", "one"), None);
    }

    #[test]
    fn overwrite_does_not_grow_the_cache() {
        let cache = TranslationCache::new(2);
        cache.put("es", "one", "uno");
        cache.put("es", "one", "UNO");
        cache.put("es", "two", "dos");

        assert_eq!(cache.get("es", "one"), Some("UNO".to_string()));
        assert_eq!(cache.get("es", "two"), Some("dos".to_string()));
        assert_eq!(cache.stats().entries, 2);
    }

    #[test]
    fn stats_count_hits_and_misses() {
        let cache = TranslationCache::new(10);
        cache.put("es", "Hello", "Hola");
        cache.get("es", "Hello");
        cache.get("es", "nope");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }
}
