//! Storage abstraction trait
//!
//! This module defines the `ObjectStore` trait that all storage backends must
//! implement. Failures are modeled as tagged variants rather than by matching
//! substrings of provider error messages, so the HTTP layer can distinguish a
//! missing-bucket misconfiguration from an ordinary upload failure.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A stored object: the storage-relative key and its public URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub path: String,
    pub url: String,
}

/// Storage abstraction trait
///
/// All storage backends (Supabase bucket, local filesystem) must implement
/// this trait so the upload gateway can work with any backend without
/// coupling to provider details.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload raw bytes under `key` with the given content type.
    ///
    /// Uploads are no-overwrite: writing to an existing key fails with
    /// `StorageError::AlreadyExists`.
    async fn upload(
        &self,
        key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredObject>;

    /// Permanent public URL for a stored key.
    fn public_url(&self, key: &str) -> String;
}

/// Reject keys that could escape the bucket or storage root.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.contains("..") || key.starts_with('/') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
