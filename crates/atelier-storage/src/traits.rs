//! Media store abstraction trait

use async_trait::async_trait;
use atelier_core::models::ResourceType;
use atelier_core::AppError;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UploadFailed(msg) => AppError::Upload(msg),
            StorageError::ConfigError(msg) => AppError::Config(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// A hosted object as the provider reports it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Provider-side identifier, needed to delete the object later
    pub provider_id: String,
    /// Publicly reachable URL
    pub url: String,
}

/// Hosted media provider contract.
///
/// Uploads go under a per-entity folder with a generated object key. Deletes
/// take the provider id plus a resource-type hint; callers on cleanup paths
/// treat every delete failure as non-fatal.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(
        &self,
        folder: &str,
        original_filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredObject>;

    async fn delete(&self, provider_id: &str, resource_type: ResourceType) -> StorageResult<()>;
}
