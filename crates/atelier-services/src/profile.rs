//! Account profile upserts.

use std::sync::Arc;

use atelier_core::models::{NewUpload, Profile, ProfilePatch};
use atelier_core::repository::ProfileRepository;
use atelier_core::{AppError, AppResult};
use atelier_storage::MediaStore;

use crate::content::parse_id;
use crate::media::MediaAttachments;

const MEDIA_FOLDER: &str = "profile-avatars";

pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
    media: MediaAttachments,
}

impl ProfileService {
    pub fn new(repo: Arc<dyn ProfileRepository>, store: Arc<dyn MediaStore>) -> Self {
        Self {
            repo,
            media: MediaAttachments::new(store),
        }
    }

    pub async fn get(&self, user_id: &str) -> AppResult<Profile> {
        let user_id = parse_id(user_id, "user")?;
        self.repo
            .fetch_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("profile not found".to_string()))
    }

    /// Upsert: a user without a profile row gets one created, then the patch
    /// and optional new avatar are applied on top.
    pub async fn update(
        &self,
        user_id: &str,
        patch: ProfilePatch,
        file: Option<NewUpload>,
    ) -> AppResult<Profile> {
        patch.validate()?;
        let user_id = parse_id(user_id, "user")?;

        let mut profile = match self.repo.fetch_by_user(user_id).await? {
            Some(profile) => profile,
            None => self.repo.create(user_id).await?,
        };
        profile.apply_patch(patch);

        if let Some(upload) = file {
            let media = self
                .media
                .replace(profile.media.as_ref(), &upload, MEDIA_FOLDER, "profile")
                .await?;
            profile.media = Some(media);
        }

        self.repo.save(&profile).await
    }
}
