//! Generic CRUD orchestration for media-carrying content entities.
//!
//! One service covers blogs, podcasts and offerings; everything
//! entity-specific comes from the [`ContentEntity`] constants and callbacks.
//! Creation with an attached file is a small saga: insert the record, attach
//! the media, and compensate by removing the record if the attach fails, so a
//! failed upload never leaves an orphan row behind.

use std::sync::Arc;

use atelier_core::models::{Blog, ContentEntity, NewUpload, Offering, Podcast};
use atelier_core::pagination::{Page, PageInfo, PageRequest};
use atelier_core::repository::ContentRepository;
use atelier_core::{AppError, AppResult, Filter, SortOrder};
use atelier_storage::MediaStore;
use uuid::Uuid;

use crate::media::MediaAttachments;

/// List-endpoint parameters common to every entity.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub search: Option<String>,
    pub date: Option<String>,
    pub page: PageRequest,
    pub sort: SortOrder,
}

/// Parse a path identifier, reporting the entity noun on failure.
pub fn parse_id(raw: &str, kind: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidId(format!("Invalid {kind} id '{raw}'")))
}

/// Where a create-with-file request currently stands.
enum CreatePhase<E> {
    /// Record inserted, no file was supplied.
    Created(E),
    /// Record inserted and the upload attached.
    MediaAttached(E),
    /// Attach failed; the record was removed again.
    RolledBack { cause: AppError },
}

pub struct ContentService<E: ContentEntity> {
    repo: Arc<dyn ContentRepository<E>>,
    media: MediaAttachments,
    default_limit: u32,
}

pub type BlogService = ContentService<Blog>;
pub type PodcastService = ContentService<Podcast>;
pub type OfferingService = ContentService<Offering>;

impl<E: ContentEntity> ContentService<E> {
    pub fn new(
        repo: Arc<dyn ContentRepository<E>>,
        store: Arc<dyn MediaStore>,
        default_limit: u32,
    ) -> Self {
        Self {
            repo,
            media: MediaAttachments::new(store),
            default_limit,
        }
    }

    /// Validate and insert a new record, attaching the uploaded file if one
    /// was supplied. On attach failure the inserted record is removed and the
    /// attach error is returned.
    pub async fn create(&self, draft: E::Draft, file: Option<NewUpload>) -> AppResult<E> {
        E::validate_draft(&draft)?;
        let inserted = self.repo.insert(&draft).await?;
        tracing::debug!(kind = E::KIND, id = %inserted.id(), "Inserted record");

        let phase = match file {
            None => CreatePhase::Created(inserted),
            Some(upload) => self.attach(inserted, upload).await,
        };

        match phase {
            CreatePhase::Created(entity) | CreatePhase::MediaAttached(entity) => Ok(entity),
            CreatePhase::RolledBack { cause } => Err(cause),
        }
    }

    async fn attach(&self, mut entity: E, upload: NewUpload) -> CreatePhase<E> {
        let media = match self
            .media
            .replace(entity.media_ref(), &upload, E::MEDIA_FOLDER, E::KIND)
            .await
        {
            Ok(media) => media,
            Err(cause) => return self.roll_back(entity, cause).await,
        };

        entity.set_media_ref(Some(media));
        match self.repo.save(&entity).await {
            Ok(saved) => CreatePhase::MediaAttached(saved),
            Err(cause) => self.roll_back(entity, cause).await,
        }
    }

    /// Compensate for a failed attach by removing the freshly inserted record.
    async fn roll_back(&self, entity: E, cause: AppError) -> CreatePhase<E> {
        match self.repo.remove(entity.id()).await {
            Ok(_) => {
                tracing::warn!(kind = E::KIND, id = %entity.id(), error = %cause, "Rolled back create after attach failure");
            }
            Err(err) => {
                // The orphan row stays behind; nothing more we can do here.
                tracing::error!(kind = E::KIND, id = %entity.id(), error = %err, "Rollback after attach failure also failed");
            }
        }
        CreatePhase::RolledBack { cause }
    }

    pub async fn list(&self, query: ListQuery) -> AppResult<Page<E>> {
        let predicate = Filter::build(
            query.search.as_deref(),
            query.date.as_deref(),
            E::SEARCH_FIELDS,
        )?;
        let (page, limit) = query.page.normalize(self.default_limit);
        let total = self.repo.count(&predicate).await?;
        let pagination = PageInfo::compute(page, limit, total);
        let items = self
            .repo
            .search(&predicate, query.sort, pagination.offset(), limit)
            .await?;
        Ok(Page { items, pagination })
    }

    pub async fn get(&self, id: &str) -> AppResult<E> {
        let id = parse_id(id, E::KIND)?;
        self.repo
            .fetch(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} not found", E::KIND)))
    }

    /// Apply a partial update, replacing the attached media when a new file
    /// is supplied. Without a file the existing attachment is untouched.
    pub async fn update(&self, id: &str, patch: E::Patch, file: Option<NewUpload>) -> AppResult<E> {
        E::validate_patch(&patch)?;
        let mut entity = self.get(id).await?;
        entity.apply_patch(patch);

        if let Some(upload) = file {
            let media = self
                .media
                .replace(entity.media_ref(), &upload, E::MEDIA_FOLDER, E::KIND)
                .await?;
            entity.set_media_ref(Some(media));
        }

        self.repo.save(&entity).await
    }

    /// Delete the record and best-effort delete its hosted media. The record
    /// is removed even when the provider refuses the media delete.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let entity = self.get(id).await?;
        self.media.discard(entity.media_ref(), E::KIND).await;

        if !self.repo.remove(entity.id()).await? {
            return Err(AppError::NotFound(format!("{} not found", E::KIND)));
        }
        tracing::info!(kind = E::KIND, id = %entity.id(), "Deleted record");
        Ok(())
    }
}
