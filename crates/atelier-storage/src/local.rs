//! Local filesystem media store, for development and tests.

use crate::keys;
use crate::traits::{MediaStore, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use atelier_core::models::ResourceType;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[derive(Clone)]
pub struct LocalStore {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStore {
    /// `base_path` is the root directory files land in; `base_url` the URL
    /// prefix they are served under.
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStore {
            base_path,
            base_url,
        })
    }

    /// Convert an object key to a filesystem path, rejecting traversal
    /// sequences that could escape the base directory.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.contains("..") || key.starts_with('/') || key.contains('\\') {
            return Err(StorageError::InvalidKey(
                "Object key contains invalid characters".to_string(),
            ));
        }
        Ok(self.base_path.join(key))
    }

    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl MediaStore for LocalStore {
    async fn upload(
        &self,
        folder: &str,
        original_filename: &str,
        _content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredObject> {
        let key = keys::object_key(folder, original_filename);
        let path = self.key_to_path(&key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.generate_url(&key);

        tracing::info!(
            key = %key,
            size_bytes = size,
            "Local media store upload successful"
        );

        Ok(StoredObject {
            provider_id: key,
            url,
        })
    }

    async fn delete(&self, provider_id: &str, _resource_type: ResourceType) -> StorageResult<()> {
        let path = self.key_to_path(provider_id)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(key = %provider_id, "Local media store delete successful");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Already gone; deletes are idempotent.
                tracing::debug!(key = %provider_id, "Object already absent on delete");
                Ok(())
            }
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::new(dir.path(), "http://localhost:3000/media".to_string())
            .await
            .expect("store");
        (dir, store)
    }

    #[tokio::test]
    async fn upload_writes_file_and_reports_url() {
        let (dir, store) = store().await;
        let obj = store
            .upload(
                "blog-images",
                "photo.png",
                "image/png",
                Bytes::from_static(b"pixels"),
            )
            .await
            .expect("upload");

        assert!(obj.url.starts_with("http://localhost:3000/media/blog-images/"));
        let on_disk = dir.path().join(&obj.provider_id);
        assert_eq!(std::fs::read(on_disk).expect("read back"), b"pixels");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (_dir, store) = store().await;
        let obj = store
            .upload("docs", "a.pdf", "application/pdf", Bytes::from_static(b"x"))
            .await
            .expect("upload");

        store
            .delete(&obj.provider_id, ResourceType::Raw)
            .await
            .expect("first delete");
        store
            .delete(&obj.provider_id, ResourceType::Raw)
            .await
            .expect("second delete is a no-op");
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let (_dir, store) = store().await;
        let err = store
            .delete("../../etc/passwd", ResourceType::Raw)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
