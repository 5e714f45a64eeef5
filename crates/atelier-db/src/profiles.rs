//! Profile repository.

use async_trait::async_trait;
use atelier_core::models::Profile;
use atelier_core::repository::ProfileRepository;
use atelier_core::AppResult;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn fetch_by_user(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    async fn create(&self, user_id: Uuid) -> AppResult<Profile> {
        let profile = sqlx::query_as::<_, Profile>(
            "INSERT INTO profiles (user_id) VALUES ($1) RETURNING *",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn save(&self, profile: &Profile) -> AppResult<Profile> {
        let media = profile.media.as_ref();
        let saved = sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET full_name = $1, user_name = $2, email = $3, \
             phone_number = $4, bio = $5, media_url = $6, media_provider_id = $7, \
             media_kind = $8, media_content_type = $9, media_size_bytes = $10, \
             media_uploaded_at = $11, updated_at = now() WHERE id = $12 RETURNING *",
        )
        .bind(&profile.full_name)
        .bind(&profile.user_name)
        .bind(&profile.email)
        .bind(&profile.phone_number)
        .bind(&profile.bio)
        .bind(media.map(|m| m.url.clone()))
        .bind(media.map(|m| m.provider_id.clone()))
        .bind(media.map(|m| m.kind))
        .bind(media.map(|m| m.content_type.clone()))
        .bind(media.map(|m| m.size_bytes))
        .bind(media.map(|m| m.uploaded_at))
        .bind(profile.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }
}
