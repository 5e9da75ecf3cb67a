//! Signature Service
//!
//! Verifies the `x-nexus-webhook-signature` header: a hex-encoded
//! HMAC-SHA1 of the raw request body, keyed with the shared secret.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use thiserror::Error;

/// HMAC SHA1 type alias
type HmacSha1 = Hmac<Sha1>;

/// Length in bytes of an HMAC-SHA1 digest
pub const SIGNATURE_LEN: usize = 20;

/// A signature that cannot be checked at all
///
/// A well-formed signature that does not match is not an error; see [`verify`].
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("no signature")]
    Missing,

    #[error("signature is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("signature is {0} bytes long, expected {SIGNATURE_LEN}")]
    InvalidLength(usize),

    /// Only reachable through the fallible `KeyInit` API; HMAC keys have no
    /// length restriction, so no secret produces it.
    #[error("unusable secret: {0}")]
    Key(#[from] hmac::digest::InvalidLength),
}

/// Compute the hex-encoded signature of `body`, as Nexus does
#[cfg(test)]
pub fn sign(secret: &[u8], body: &[u8]) -> Result<String, SignatureError> {
    Ok(hex::encode(mac(secret, body)?.finalize().into_bytes()))
}

/// Check a transmitted signature against the body
///
/// The digest comparison runs in constant time.
pub fn verify(secret: &[u8], signature: &str, body: &[u8]) -> Result<bool, SignatureError> {
    if signature.is_empty() {
        return Err(SignatureError::Missing);
    }

    let transmitted = hex::decode(signature)?;
    if transmitted.len() != SIGNATURE_LEN {
        return Err(SignatureError::InvalidLength(transmitted.len()));
    }

    Ok(mac(secret, body)?.verify_slice(&transmitted).is_ok())
}

fn mac(secret: &[u8], body: &[u8]) -> Result<HmacSha1, SignatureError> {
    let mut mac = <HmacSha1 as Mac>::new_from_slice(secret)?;
    mac.update(body);
    Ok(mac)
}
