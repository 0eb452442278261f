//! Validation result caching.
//!
//! Keeps recent existence-oracle answers in memory so repeated checks for
//! the same candidate name skip the network round trip. Entries expire by
//! TTL and are evicted lazily on read.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::provider::ExistenceCheck;

/// A cached oracle answer with its expiry deadline.
struct CachedCheck {
    check: ExistenceCheck,
    expires_at: Instant,
}

impl CachedCheck {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Cache of existence-oracle answers keyed by resource type and name.
pub struct ResultCache {
    entries: RwLock<HashMap<String, CachedCheck>>,
}

impl ResultCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Build the cache key for a resource type and candidate name.
    #[must_use]
    pub fn key(resource_type: &str, name: &str) -> String {
        format!("{}:{}", resource_type.to_lowercase(), name.to_lowercase())
    }

    /// Get a cached answer, if present and not expired.
    ///
    /// An expired entry is removed on the spot and reported as a miss.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<ExistenceCheck> {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(cached) if !cached.is_expired() => return Some(cached.check.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: upgrade to a write lock and drop it.
        self.entries.write().remove(key);
        None
    }

    /// Store an answer under the given key for `ttl`.
    pub fn set(&self, key: &str, check: ExistenceCheck, ttl: Duration) {
        let mut entries = self.entries.write();
        entries.insert(
            key.to_string(),
            CachedCheck {
                check,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Remove every entry whose key starts with `prefix`.
    ///
    /// An empty prefix matches everything and clears the cache.
    pub fn invalidate(&self, prefix: &str) {
        let mut entries = self.entries.write();
        entries.retain(|key, _| !key.starts_with(prefix));
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of entries currently held, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}
