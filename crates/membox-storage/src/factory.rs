//! Config-driven storage backend construction.

use std::sync::Arc;

use membox_core::{Config, StorageBackend};

use crate::{LocalStorage, ObjectStore, StorageError, StorageResult, SupabaseStorage};

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn ObjectStore>> {
    match config.storage.backend {
        StorageBackend::Supabase => {
            let storage = SupabaseStorage::new(
                config.supabase.url.clone(),
                config.supabase.anon_key.clone(),
                config.storage.bucket.clone(),
                config.storage.cache_seconds,
            )?;
            Ok(Arc::new(storage))
        }

        StorageBackend::Local => {
            let base_path = config.storage.local_path.clone().ok_or_else(|| {
                StorageError::Config("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.storage.local_base_url.clone().ok_or_else(|| {
                StorageError::Config("LOCAL_STORAGE_BASE_URL not configured".to_string())
            })?;

            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }
    }
}
