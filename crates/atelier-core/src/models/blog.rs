use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::content::ContentEntity;
use crate::models::media::MediaRef;
use crate::validation;

pub const BLOG_TITLE_MIN: usize = 3;
pub const BLOG_TITLE_MAX: usize = 200;
pub const BLOG_DESCRIPTION_MIN: usize = 10;
pub const BLOG_DESCRIPTION_MAX: usize = 20_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "blog_status", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    #[default]
    Draft,
    Published,
    Pending,
}

impl BlogStatus {
    pub fn parse(s: &str) -> Option<BlogStatus> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Some(BlogStatus::Draft),
            "published" => Some(BlogStatus::Published),
            "pending" => Some(BlogStatus::Pending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub read_time: String,
    pub description: String,
    pub featured: bool,
    pub status: BlogStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct BlogDraft {
    pub title: String,
    pub read_time: String,
    pub description: String,
    pub featured: bool,
    pub status: BlogStatus,
}

#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub read_time: Option<String>,
    pub description: Option<String>,
    pub featured: Option<bool>,
    pub status: Option<BlogStatus>,
}

impl ContentEntity for Blog {
    type Draft = BlogDraft;
    type Patch = BlogPatch;

    const KIND: &'static str = "blog";
    const MEDIA_FOLDER: &'static str = "blog-images";
    const SEARCH_FIELDS: &'static [&'static str] = &["title"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn media_ref(&self) -> Option<&MediaRef> {
        self.media.as_ref()
    }

    fn set_media_ref(&mut self, media: Option<MediaRef>) {
        self.media = media;
    }

    fn validate_draft(draft: &Self::Draft) -> AppResult<()> {
        validation::required_length("title", Some(&draft.title), BLOG_TITLE_MIN, BLOG_TITLE_MAX)?;
        validation::required_length(
            "description",
            Some(&draft.description),
            BLOG_DESCRIPTION_MIN,
            BLOG_DESCRIPTION_MAX,
        )?;
        Ok(())
    }

    fn validate_patch(patch: &Self::Patch) -> AppResult<()> {
        if let Some(title) = &patch.title {
            validation::length("title", title, BLOG_TITLE_MIN, BLOG_TITLE_MAX)?;
        }
        if let Some(description) = &patch.description {
            validation::length(
                "description",
                description,
                BLOG_DESCRIPTION_MIN,
                BLOG_DESCRIPTION_MAX,
            )?;
        }
        Ok(())
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(read_time) = patch.read_time {
            self.read_time = read_time;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

#[cfg(feature = "sqlx")]
impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for Blog {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;

        Ok(Blog {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            read_time: row.try_get("read_time")?,
            description: row.try_get("description")?,
            featured: row.try_get("featured")?,
            status: row.try_get("status")?,
            media: crate::models::media_ref_from_row(row)?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
