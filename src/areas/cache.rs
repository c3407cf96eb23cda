use crate::artifacts::log::RevisionLog;
use derive_new::new;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Cache key: one normalized log per project stream, site language, and user
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct CacheKey {
    pub repro: String,
    pub language: String,
    pub user: String,
}

struct CacheSlot {
    stored_at: Instant,
    log: Arc<RevisionLog>,
}

/// Short-lived cache of normalized revision logs
///
/// Plain read-through semantics: a miss (or an expired slot) makes the
/// caller fetch and normalize afresh, then `put` the result. Concurrent
/// misses for the same key are tolerated and both fetch; the last insert
/// wins. This is the only shared mutable state in the engine.
pub struct LogCache {
    ttl: Duration,
    slots: RwLock<HashMap<CacheKey, CacheSlot>>,
}

impl LogCache {
    /// Default expiry for a cached log
    pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

    pub fn new(ttl: Duration) -> Self {
        LogCache {
            ttl,
            slots: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<RevisionLog>> {
        let slots = self.slots.read().ok()?;
        let slot = slots.get(key)?;

        if slot.stored_at.elapsed() > self.ttl {
            tracing::debug!(repro = %key.repro, "cached revision log expired");
            return None;
        }

        tracing::debug!(repro = %key.repro, "revision log cache hit");
        Some(slot.log.clone())
    }

    pub fn put(&self, key: CacheKey, log: Arc<RevisionLog>) {
        if let Ok(mut slots) = self.slots.write() {
            slots.insert(
                key,
                CacheSlot {
                    stored_at: Instant::now(),
                    log,
                },
            );
        }
    }
}

impl Default for LogCache {
    fn default() -> Self {
        LogCache::new(Self::DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(user: &str) -> CacheKey {
        CacheKey::new("project-data".to_string(), "en".to_string(), user.to_string())
    }

    fn log() -> Arc<RevisionLog> {
        Arc::new(RevisionLog::from_raw("project-data", vec![]))
    }

    #[test]
    fn miss_then_hit() {
        let cache = LogCache::default();

        assert!(cache.get(&key("u1")).is_none());

        cache.put(key("u1"), log());
        assert!(cache.get(&key("u1")).is_some());
    }

    #[test]
    fn keys_are_isolated_per_user() {
        let cache = LogCache::default();
        cache.put(key("u1"), log());

        assert!(cache.get(&key("u2")).is_none());
    }

    #[test]
    fn entries_expire_after_the_ttl() {
        let cache = LogCache::new(Duration::ZERO);
        cache.put(key("u1"), log());

        std::thread::sleep(Duration::from_millis(5));

        assert!(cache.get(&key("u1")).is_none());
    }

    #[test]
    fn put_replaces_an_existing_slot() {
        let cache = LogCache::default();
        cache.put(key("u1"), log());
        let replacement = Arc::new(RevisionLog::from_raw("project-data", vec![]));
        cache.put(key("u1"), replacement.clone());

        let cached = cache.get(&key("u1")).unwrap();
        assert!(Arc::ptr_eq(&cached, &replacement));
    }
}
