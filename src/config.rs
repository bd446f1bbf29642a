//! Transport configuration
//!
//! - `HTTP_CLIENT_INSECURE`: Set to `true` to accept invalid TLS certificates
//!   from the JWKS endpoint. Only meant for local testing.
//! - `HTTP_CLIENT_TIMEOUT_SECS`: Upper bound for a single JWKS request,
//!   defaults to 30 seconds.

use anyhow::Context;
use jwks_cache_env_vars::{flag, var_parsed};
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_USER_AGENT: &str = concat!("jwks_cache/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Skip verification of the server's TLS certificate chain.
    pub insecure: bool,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl TransportConfig {
    pub fn from_environment() -> anyhow::Result<Self> {
        let insecure = flag("HTTP_CLIENT_INSECURE")?;

        let timeout = var_parsed("HTTP_CLIENT_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            insecure,
            timeout,
            ..Default::default()
        })
    }

    /// Builds the HTTP client that is injected into
    /// [`Client`](crate::Client).
    pub fn build_client(&self) -> anyhow::Result<reqwest::Client> {
        if self.insecure {
            warn!("TLS certificate verification is disabled for JWKS requests");
        }

        reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.insecure)
            .build()
            .context("Failed to build HTTP client")
    }
}
