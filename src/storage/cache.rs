//! Short-lived request cache in front of a data source
//!
//! Successful responses are kept for a fixed time-to-live; failures are never
//! cached, so the next call retries. There is no invalidation beyond expiry.

use crate::entities::{Rocket, Ship};
use crate::storage::DataSource;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// Map of values that expire after a fixed time-to-live
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: RwLock<HashMap<K, Entry<V>>>,
}

impl<K: Eq + Hash + Clone, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get a value that is still fresh
    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub async fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        entries.insert(
            key,
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Return the fresh value for `key`, or run `fetch` and cache its success
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(value) = self.get(&key).await {
            return Ok(value);
        }
        let value = fetch().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

/// Data source wrapper caching every successful response for `ttl`
pub struct CachedDataSource<S> {
    inner: S,
    ships: TtlCache<(), Vec<Ship>>,
    ship: TtlCache<String, Option<Ship>>,
    rockets: TtlCache<(), Vec<Rocket>>,
    rocket: TtlCache<String, Option<Rocket>>,
}

impl<S: DataSource> CachedDataSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ships: TtlCache::new(ttl),
            ship: TtlCache::new(ttl),
            rockets: TtlCache::new(ttl),
            rocket: TtlCache::new(ttl),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drop every cached response
    pub async fn invalidate(&self) {
        self.ships.clear().await;
        self.ship.clear().await;
        self.rockets.clear().await;
        self.rocket.clear().await;
        debug!("request cache cleared");
    }
}

#[async_trait]
impl<S: DataSource> DataSource for CachedDataSource<S> {
    async fn list_ships(&self) -> Result<Vec<Ship>> {
        self.ships
            .get_or_fetch((), || self.inner.list_ships())
            .await
    }

    async fn get_ship(&self, id: &str) -> Result<Option<Ship>> {
        self.ship
            .get_or_fetch(id.to_string(), || self.inner.get_ship(id))
            .await
    }

    async fn list_rockets(&self) -> Result<Vec<Rocket>> {
        self.rockets
            .get_or_fetch((), || self.inner.list_rockets())
            .await
    }

    async fn get_rocket(&self, id: &str) -> Result<Option<Rocket>> {
        self.rocket
            .get_or_fetch(id.to_string(), || self.inner.get_rocket(id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryDataSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        inner: InMemoryDataSource,
        calls: AtomicUsize,
        fail: bool,
    }

    impl Counting {
        fn new(fail: bool) -> Self {
            Self {
                inner: InMemoryDataSource::sample(),
                calls: AtomicUsize::new(0),
                fail,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DataSource for Counting {
        async fn list_ships(&self) -> Result<Vec<Ship>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("boom");
            }
            self.inner.list_ships().await
        }

        async fn get_ship(&self, id: &str) -> Result<Option<Ship>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get_ship(id).await
        }

        async fn list_rockets(&self) -> Result<Vec<Rocket>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.list_rockets().await
        }

        async fn get_rocket(&self, id: &str) -> Result<Option<Rocket>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get_rocket(id).await
        }
    }

    #[tokio::test]
    async fn test_serves_from_cache_within_ttl() {
        let cached = CachedDataSource::new(Counting::new(false), Duration::from_secs(300));

        let first = cached.list_ships().await.unwrap();
        let second = cached.list_ships().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner().calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_always_refetches() {
        let cached = CachedDataSource::new(Counting::new(false), Duration::ZERO);

        cached.list_rockets().await.unwrap();
        cached.list_rockets().await.unwrap();

        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_detail_lookups_cached_per_id() {
        let cached = CachedDataSource::new(Counting::new(false), Duration::from_secs(300));

        assert!(cached.get_ship("ship-1").await.unwrap().is_some());
        assert!(cached.get_ship("ship-1").await.unwrap().is_some());
        assert!(cached.get_ship("missing").await.unwrap().is_none());
        assert!(cached.get_ship("missing").await.unwrap().is_none());

        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cached = CachedDataSource::new(Counting::new(true), Duration::from_secs(300));

        assert!(cached.list_ships().await.is_err());
        assert!(cached.list_ships().await.is_err());

        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cached = CachedDataSource::new(Counting::new(false), Duration::from_secs(300));

        cached.list_ships().await.unwrap();
        cached.invalidate().await;
        cached.list_ships().await.unwrap();

        assert_eq!(cached.inner().calls(), 2);
    }
}
