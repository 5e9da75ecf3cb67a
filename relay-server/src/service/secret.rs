//! Secret Service
//!
//! Loads the shared secret Nexus signs its webhook bodies with.
//! The file is read on every call so the secret can be rotated without a
//! restart.

use std::path::Path;
use thiserror::Error;

/// Failure to obtain a usable secret
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Failed to read secret {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Secret file {0} is empty")]
    Empty(String),
}

/// Read the raw secret bytes, exactly as stored in the file
pub async fn load_secret(path: &Path) -> Result<Vec<u8>, SecretError> {
    let secret = tokio::fs::read(path).await.map_err(|source| SecretError::Io {
        path: path.display().to_string(),
        source,
    })?;

    if secret.is_empty() {
        return Err(SecretError::Empty(path.display().to_string()));
    }

    Ok(secret)
}
