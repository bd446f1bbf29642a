use crate::cache::KeyCache;
use crate::error::{JwksError, Result};
use crate::fetcher::{HttpKeyFetcher, KeyFetcher};
use crate::jwk::Jwk;
use crate::pem;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Fetches and caches the JSON Web Keys published at one endpoint.
///
/// The key set is loaded once on construction. Looking up an unknown key id
/// refreshes the key set once before the lookup fails with
/// [`JwksError::KeyNotFound`]. Lookups of cached keys never touch the
/// network.
///
/// A lookup that misses the cache reuses a refresh of another caller only if
/// that refresh started after the miss and succeeded. Otherwise it fetches
/// the key set itself, so concurrent misses never see a key set that is
/// older than their own miss.
pub struct Client {
    endpoint: String,
    fetcher: Box<dyn KeyFetcher>,
    cache: KeyCache,
    /// Held for the duration of a refresh. Guards the start index of the
    /// latest successful refresh.
    refresh_lock: Mutex<u64>,
    /// Number of refreshes started so far, bumped under `refresh_lock`.
    started: AtomicU64,
}

impl Client {
    /// Creates a client that loads the key set over HTTP(S) with the given
    /// `reqwest` client.
    ///
    /// Fails if the initial key set can not be loaded.
    pub async fn new(endpoint: impl Into<String>, http: reqwest::Client) -> Result<Self> {
        Self::with_fetcher(endpoint, HttpKeyFetcher::new(http)).await
    }

    /// Creates a client that loads the key set through a custom
    /// [`KeyFetcher`].
    ///
    /// Fails if the initial key set can not be loaded.
    pub async fn with_fetcher(
        endpoint: impl Into<String>,
        fetcher: impl KeyFetcher + 'static,
    ) -> Result<Self> {
        let client = Self {
            endpoint: endpoint.into(),
            fetcher: Box::new(fetcher),
            cache: KeyCache::new(),
            refresh_lock: Mutex::new(0),
            started: AtomicU64::new(0),
        };

        let mut last_success = client.refresh_lock.lock().await;
        client.refresh(&mut last_success).await?;
        drop(last_success);

        Ok(client)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the key ids currently in the cache, sorted.
    pub fn key_ids(&self) -> Vec<String> {
        self.cache.key_ids()
    }

    /// Returns the key for `kid`.
    ///
    /// If the key is not cached, the key set is refreshed once. Errors of
    /// that refresh are returned as-is. If the key is still unknown
    /// afterwards, [`JwksError::KeyNotFound`] is returned.
    pub async fn lookup(&self, kid: &str) -> Result<Jwk> {
        if let Some(jwk) = self.cache.get(kid) {
            debug!(%kid, "JWKS cache hit");
            return Ok(jwk);
        }

        debug!(%kid, "JWKS cache miss");

        // Any refresh with a higher start index began after our miss.
        let seen = self.started.load(Ordering::Acquire);

        let mut last_success = self.refresh_lock.lock().await;
        if *last_success > seen {
            debug!(%kid, "Reusing concurrent JWKS refresh");
        } else {
            self.refresh(&mut last_success).await?;
        }
        drop(last_success);

        self.cache
            .get(kid)
            .ok_or_else(|| JwksError::KeyNotFound(kid.to_string()))
    }

    /// Returns the leaf certificate of the key for `kid` in PEM format.
    ///
    /// See [`lookup()`](Self::lookup) and [`pem::to_pem()`].
    pub async fn lookup_as_pem(&self, kid: &str) -> Result<Vec<u8>> {
        let jwk = self.lookup(kid).await?;
        pem::to_pem(&jwk)
    }

    /// Fetches the key set and upserts every key into the cache.
    ///
    /// Must be called with the `refresh_lock` guard, whose value is set to
    /// the start index of this refresh once it succeeds.
    async fn refresh(&self, last_success: &mut u64) -> Result<()> {
        let endpoint = &self.endpoint;
        let index = self.started.fetch_add(1, Ordering::AcqRel) + 1;

        let keys = self.fetcher.fetch(endpoint).await.inspect_err(|error| {
            warn!(%endpoint, %error, "Failed to refresh JWKS");
        })?;

        info!(%endpoint, num_keys = keys.len(), "Refreshed JWKS");

        self.cache.put_all(keys);
        *last_success = index;

        Ok(())
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("num_keys", &self.cache.len())
            .finish_non_exhaustive()
    }
}
