/// Errors returned by the JWKS [`Client`](crate::Client) and its components.
///
/// Each variant corresponds to one failure kind, so callers can decide on
/// their own retry policy. Nothing in this crate retries internally.
#[derive(Debug, thiserror::Error)]
pub enum JwksError {
    /// The key set could not be retrieved: connection failure, timeout or a
    /// non-success status code.
    #[error("Failed to fetch JWKS: {0}")]
    Network(#[from] reqwest::Error),
    /// The response body is not a JSON document of the expected shape.
    #[error("Failed to decode JWKS: {0}")]
    Decode(#[from] serde_json::Error),
    /// The key id is unknown, even after refreshing the key set.
    #[error("Unrecognized key id: {0}")]
    KeyNotFound(String),
    /// The key has an empty `x5c` certificate chain.
    #[error("No certificate found for key id: {0}")]
    NoCertificate(String),
}

pub type Result<T, E = JwksError> = std::result::Result<T, E>;
