//! In-memory TTL store for audit results

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use log::debug;

use crate::models::AuditResult;

struct CacheEntry {
    result: AuditResult,
    stored_at: Instant,
}

/// TTL-bounded map from request fingerprint to audit result.
///
/// Entries are never mutated in place: `put` replaces, `get` evicts lazily
/// once age reaches the TTL. An expired entry is indistinguishable from an
/// absent one.
pub struct ResultCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResultCache {
    /// Create an empty cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Get a live entry, evicting it first if stale.
    pub fn get(&self, key: &str) -> Option<AuditResult> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");

        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                Some(entry.result.clone())
            }
            Some(_) => {
                debug!("Evicting stale cache entry {key}");
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a result, replacing any previous entry with a fresh timestamp.
    pub fn put(&self, key: &str, result: AuditResult) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            key.to_string(),
            CacheEntry {
                result,
                stored_at: Instant::now(),
            },
        );
    }

    /// Number of stored entries, expired ones included until next lookup.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().expect("cache lock poisoned").clear();
    }
}
