//! In-memory key store shared by all callers of one [`Client`](crate::Client).

use crate::jwk::Jwk;
use parking_lot::RwLock;
use std::collections::HashMap;

/// A thread-safe map from key id to [`Jwk`].
///
/// Readers run in parallel, while a [`put()`](Self::put) excludes every
/// other reader and writer. Once `put()` returns, all following
/// [`get()`](Self::get) calls for that key id observe the new value (or a
/// newer one).
///
/// Entries are never removed. A key that disappears from the endpoint stays
/// available until the process exits.
#[derive(Debug, Default)]
pub struct KeyCache {
    keys: RwLock<HashMap<String, Jwk>>,
}

impl KeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the cached key for `kid`, if there is one.
    pub fn get(&self, kid: &str) -> Option<Jwk> {
        self.keys.read().get(kid).cloned()
    }

    /// Inserts or replaces the cached key for `kid`.
    pub fn put(&self, kid: impl Into<String>, jwk: Jwk) {
        self.keys.write().insert(kid.into(), jwk);
    }

    /// Stores every key of a fetched key set under its own key id.
    ///
    /// The keys are written one at a time, so concurrent readers may observe
    /// a partially applied set. If the set contains a key id more than once,
    /// the last occurrence wins.
    pub fn put_all(&self, keys: impl IntoIterator<Item = Jwk>) {
        for jwk in keys {
            self.put(jwk.kid.clone(), jwk);
        }
    }

    /// Returns the currently cached key ids in sorted order.
    pub fn key_ids(&self) -> Vec<String> {
        let mut key_ids = self.keys.read().keys().cloned().collect::<Vec<_>>();
        key_ids.sort();
        key_ids
    }

    pub fn len(&self) -> usize {
        self.keys.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_none, assert_some_eq};
    use std::sync::Arc;
    use std::thread;

    fn jwk(kid: &str, n: &str) -> Jwk {
        Jwk {
            kty: "RSA".into(),
            kid: kid.into(),
            n: n.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_get_and_put() {
        let cache = KeyCache::new();
        assert!(cache.is_empty());
        assert_none!(cache.get("foo"));

        cache.put("foo", jwk("foo", "1"));
        assert_some_eq!(cache.get("foo"), jwk("foo", "1"));
        assert_none!(cache.get("bar"));

        cache.put("foo", jwk("foo", "2"));
        assert_some_eq!(cache.get("foo"), jwk("foo", "2"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_all_last_duplicate_wins() {
        let cache = KeyCache::new();
        cache.put_all([jwk("foo", "1"), jwk("bar", "1"), jwk("foo", "2")]);

        assert_eq!(cache.key_ids(), vec!["bar", "foo"]);
        assert_some_eq!(cache.get("foo"), jwk("foo", "2"));
        assert_some_eq!(cache.get("bar"), jwk("bar", "1"));
    }

    #[test]
    fn test_put_all_keeps_stale_entries() {
        let cache = KeyCache::new();
        cache.put_all([jwk("old", "1"), jwk("shared", "1")]);
        cache.put_all([jwk("shared", "2"), jwk("new", "1")]);

        assert_eq!(cache.key_ids(), vec!["new", "old", "shared"]);
        assert_some_eq!(cache.get("old"), jwk("old", "1"));
        assert_some_eq!(cache.get("shared"), jwk("shared", "2"));
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        const THREADS: usize = 8;
        const ROUNDS: usize = 500;

        let cache = Arc::new(KeyCache::new());

        let handles = (0..THREADS)
            .map(|thread| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let own = format!("key-{thread}");
                    for round in 0..ROUNDS {
                        cache.put(&own, jwk(&own, &round.to_string()));

                        // Our own writes are never lost or reordered.
                        let seen = cache.get(&own).map(|jwk| jwk.n);
                        assert_eq!(seen, Some(round.to_string()));

                        // Keys written by other threads are always consistent.
                        let other = format!("key-{}", (thread + 1) % THREADS);
                        if let Some(jwk) = cache.get(&other) {
                            assert_eq!(jwk.kid, other);
                        }
                    }
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), THREADS);
        for thread in 0..THREADS {
            let kid = format!("key-{thread}");
            assert_some_eq!(cache.get(&kid), jwk(&kid, &(ROUNDS - 1).to_string()));
        }
    }
}
