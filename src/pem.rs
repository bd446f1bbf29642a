//! Conversion of a [`Jwk`] certificate chain into PEM format.

use crate::error::{JwksError, Result};
use crate::jwk::Jwk;

const HEADER: &str = "-----BEGIN CERTIFICATE-----";
const FOOTER: &str = "-----END CERTIFICATE-----";

/// Wraps the leaf certificate of the `x5c` chain in PEM armor.
///
/// The output is `HEADER\n<base64>\nFOOTER` without a trailing newline.
/// Intermediate certificates are not included, and the base64 payload is
/// passed through as-is without being parsed as X.509.
pub fn to_pem(jwk: &Jwk) -> Result<Vec<u8>> {
    let leaf = jwk
        .x5c
        .first()
        .ok_or_else(|| JwksError::NoCertificate(jwk.kid.clone()))?;

    Ok(format!("{HEADER}\n{leaf}\n{FOOTER}").into_bytes())
}
