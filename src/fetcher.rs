//! Retrieval of JSON Web Key Sets from a remote endpoint.

use crate::error::Result;
use crate::jwk::{Jwk, JwkSet};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

/// A source of JSON Web Keys.
///
/// The main implementation is [`HttpKeyFetcher`], but for testing purposes
/// there is also a mock implementation available.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait KeyFetcher: Send + Sync {
    /// Retrieves the complete key set published at `endpoint`.
    ///
    /// Either all keys of the set are returned, or an error. No retries are
    /// attempted.
    async fn fetch(&self, endpoint: &str) -> Result<Vec<Jwk>>;
}

#[async_trait]
impl<T: KeyFetcher + ?Sized> KeyFetcher for Arc<T> {
    async fn fetch(&self, endpoint: &str) -> Result<Vec<Jwk>> {
        (**self).fetch(endpoint).await
    }
}

/// Fetches key sets over HTTP(S) with a preconfigured [`reqwest::Client`].
///
/// Timeouts and TLS settings are whatever the injected client was built
/// with, see [`TransportConfig`](crate::config::TransportConfig).
#[derive(Debug, Clone)]
pub struct HttpKeyFetcher {
    client: Client,
}

impl HttpKeyFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KeyFetcher for HttpKeyFetcher {
    async fn fetch(&self, endpoint: &str) -> Result<Vec<Jwk>> {
        let jwks = load_jwks(&self.client, endpoint).await?;
        Ok(jwks.keys)
    }
}

/// Loads a JSON Web Key Set with a single `GET` request.
///
/// Transport failures and non-success status codes are reported as
/// [`JwksError::Network`](crate::JwksError::Network). A successful response
/// whose body does not decode as a key set is reported as
/// [`JwksError::Decode`](crate::JwksError::Decode).
pub async fn load_jwks(client: &Client, url: &str) -> Result<JwkSet> {
    debug!(%url, "Loading JWKS");

    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.bytes().await?;
    let jwks: JwkSet = serde_json::from_slice(&body)?;

    debug!(%url, num_keys = jwks.keys.len(), "Loaded JWKS");
    Ok(jwks)
}
