//! Media attachment lifecycle shared by every media-carrying entity.
//!
//! Replacing an attachment deletes the old hosted object before uploading the
//! new one. The delete is best-effort: a provider that refuses to remove a
//! stale object must never block the caller's write, so failures become a
//! logged [`CleanupOutcome`] instead of an error.

use std::sync::Arc;

use atelier_core::models::{MediaRef, NewUpload};
use atelier_core::{AppError, AppResult};
use atelier_storage::MediaStore;
use chrono::Utc;

/// What happened to the previous hosted object during a replace or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// The provider confirmed the delete.
    Deleted,
    /// There was nothing attached to delete.
    Skipped,
    /// The provider refused; the object may be orphaned on its side.
    Failed(String),
}

#[derive(Clone)]
pub struct MediaAttachments {
    store: Arc<dyn MediaStore>,
}

impl MediaAttachments {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self { store }
    }

    /// Best-effort delete of a record's current attachment. Never fails.
    pub async fn discard(&self, media: Option<&MediaRef>, entity: &str) -> CleanupOutcome {
        let Some(media) = media else {
            return CleanupOutcome::Skipped;
        };
        match self
            .store
            .delete(&media.provider_id, media.resource_type())
            .await
        {
            Ok(()) => {
                tracing::debug!(entity, provider_id = %media.provider_id, "Deleted hosted media");
                CleanupOutcome::Deleted
            }
            Err(err) => {
                tracing::warn!(
                    entity,
                    provider_id = %media.provider_id,
                    error = %err,
                    "Failed to delete hosted media, continuing"
                );
                CleanupOutcome::Failed(err.to_string())
            }
        }
    }

    /// Discard the current attachment, then upload the new file into `folder`.
    ///
    /// The old object is removed before the upload starts, so a failed upload
    /// leaves the record without usable media until the caller retries. Upload
    /// failures surface as [`AppError::Upload`].
    pub async fn replace(
        &self,
        current: Option<&MediaRef>,
        upload: &NewUpload,
        folder: &str,
        entity: &str,
    ) -> AppResult<MediaRef> {
        self.discard(current, entity).await;

        let stored = self
            .store
            .upload(
                folder,
                &upload.original_filename,
                &upload.content_type,
                upload.bytes.clone(),
            )
            .await
            .map_err(|err| AppError::Upload(err.to_string()))?;

        Ok(MediaRef {
            url: stored.url,
            provider_id: stored.provider_id,
            kind: upload.kind(),
            content_type: upload.content_type.clone(),
            size_bytes: upload.size_bytes(),
            uploaded_at: Utc::now(),
        })
    }
}
