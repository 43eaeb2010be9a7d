//! Supabase bucket storage backend.
//!
//! Objects are written with a single `POST /storage/v1/object/{bucket}/{key}`
//! call; the permanent public URL lives under
//! `/storage/v1/object/public/{bucket}/{key}`. Provider failures are mapped
//! to tagged `StorageError` variants from the response status, with the
//! response body consulted only to recognize the missing-bucket case.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, StatusCode};

use crate::traits::{validate_key, ObjectStore, StorageError, StorageResult, StoredObject};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Supabase bucket storage implementation
#[derive(Clone)]
pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    bucket: String,
    cache_seconds: u32,
}

impl SupabaseStorage {
    /// Create a new SupabaseStorage instance
    ///
    /// # Arguments
    /// * `base_url` - Project base URL (e.g., "https://xyz.supabase.co")
    /// * `api_key` - API key sent as both bearer token and `apikey` header
    /// * `bucket` - Bucket objects are written to
    /// * `cache_seconds` - max-age for the cache-control header on uploads
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        bucket: impl Into<String>,
        cache_seconds: u32,
    ) -> StorageResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StorageError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(SupabaseStorage {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            bucket: bucket.into(),
            cache_seconds,
        })
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            encode_key(key)
        )
    }
}

/// Percent-encode each path segment of a key, keeping the `/` separators.
fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    async fn upload(
        &self,
        key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredObject> {
        validate_key(key)?;
        let size = data.len();
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(self.object_url(key))
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header(header::CONTENT_TYPE, content_type)
            .header(
                header::CACHE_CONTROL,
                format!("max-age={}", self.cache_seconds),
            )
            .header("x-upsert", "false")
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("Storage request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                key = %key,
                status = %status,
                body = %body,
                "Bucket upload rejected"
            );
            return Err(classify_failure(status, &body, &self.bucket, key));
        }

        let url = self.public_url(key);
        tracing::info!(
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Bucket upload successful"
        );

        Ok(StoredObject {
            path: key.to_string(),
            url,
        })
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            encode_key(key)
        )
    }
}

/// Map a non-2xx storage response onto a tagged error variant.
fn classify_failure(status: StatusCode, body: &str, bucket: &str, key: &str) -> StorageError {
    let body_lower = body.to_lowercase();
    if status == StatusCode::NOT_FOUND || body_lower.contains("bucket not found") {
        return StorageError::BucketNotFound(bucket.to_string());
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return StorageError::PermissionDenied(format!("{}: {}", status, body));
    }
    if status == StatusCode::CONFLICT {
        return StorageError::AlreadyExists(key.to_string());
    }
    StorageError::UploadFailed(format!("{}: {}", status, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> SupabaseStorage {
        SupabaseStorage::new("https://project.supabase.co/", "anon-key", "images", 3600).unwrap()
    }

    #[test]
    fn test_public_url_format() {
        let url = storage().public_url("user/1700-abc.png");
        assert_eq!(
            url,
            "https://project.supabase.co/storage/v1/object/public/images/user/1700-abc.png"
        );
    }

    #[test]
    fn test_object_url_format() {
        let url = storage().object_url("user/1700-abc.png");
        assert_eq!(
            url,
            "https://project.supabase.co/storage/v1/object/images/user/1700-abc.png"
        );
    }

    #[test]
    fn test_encode_key_preserves_separators() {
        assert_eq!(encode_key("a b/c.png"), "a%20b/c.png");
    }

    #[test]
    fn test_classify_missing_bucket() {
        let err = classify_failure(StatusCode::BAD_REQUEST, "Bucket not found", "images", "k");
        assert!(matches!(err, StorageError::BucketNotFound(bucket) if bucket == "images"));

        let err = classify_failure(StatusCode::NOT_FOUND, "", "images", "k");
        assert!(matches!(err, StorageError::BucketNotFound(_)));
    }

    #[test]
    fn test_classify_permission_and_conflict() {
        let err = classify_failure(StatusCode::FORBIDDEN, "denied", "images", "k");
        assert!(matches!(err, StorageError::PermissionDenied(_)));

        let err = classify_failure(StatusCode::CONFLICT, "exists", "images", "k");
        assert!(matches!(err, StorageError::AlreadyExists(key) if key == "k"));
    }

    #[test]
    fn test_classify_other_failures() {
        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, "oops", "images", "k");
        assert!(matches!(err, StorageError::UploadFailed(msg) if msg.contains("oops")));
    }
}
