// Path: crates/crypto/src/digest.rs
//! Content digests of proposal files.

use crate::algorithms::hash::sha256;
use crate::error::HashError;
use cfp_types::app::ContentDigest;
use std::path::Path;

/// SHA-256 of the exact bytes given.
pub fn digest_bytes(bytes: &[u8]) -> Result<ContentDigest, HashError> {
    sha256(bytes).map(ContentDigest::new)
}

/// Reads the whole file and returns the digest of its content.
///
/// `None` stands for "the user picked no file" and yields `HashError::NoFile`
/// without touching the filesystem.
pub async fn digest_file(path: Option<&Path>) -> Result<ContentDigest, HashError> {
    let path = path.ok_or(HashError::NoFile)?;
    let bytes = tokio::fs::read(path).await.map_err(|e| HashError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let digest = digest_bytes(&bytes)?;
    tracing::debug!(
        target: "hash",
        path = %path.display(),
        len = bytes.len(),
        digest = %digest,
        "hashed proposal file"
    );
    Ok(digest)
}
