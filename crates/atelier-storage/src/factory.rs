//! Media store construction from configuration.

use crate::{CloudinaryStore, LocalStore, MediaStore, StorageError, StorageResult};
use atelier_core::{Config, StorageBackend};
use std::sync::Arc;

/// Create the media store backend named by the configuration.
pub async fn create_media_store(config: &Config) -> StorageResult<Arc<dyn MediaStore>> {
    match config.storage_backend {
        StorageBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.local_storage_base_url.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
            })?;

            let store = LocalStore::new(base_path, base_url).await?;
            Ok(Arc::new(store))
        }

        StorageBackend::Cloudinary => {
            let cloud_name = config.cloudinary_cloud_name.clone().ok_or_else(|| {
                StorageError::ConfigError("CLOUDINARY_CLOUD_NAME not configured".to_string())
            })?;
            let api_key = config.cloudinary_api_key.clone().ok_or_else(|| {
                StorageError::ConfigError("CLOUDINARY_API_KEY not configured".to_string())
            })?;
            let api_secret = config.cloudinary_api_secret.clone().ok_or_else(|| {
                StorageError::ConfigError("CLOUDINARY_API_SECRET not configured".to_string())
            })?;

            Ok(Arc::new(CloudinaryStore::new(cloud_name, api_key, api_secret)))
        }
    }
}
