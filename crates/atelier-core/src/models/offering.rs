use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::content::ContentEntity;
use crate::models::media::MediaRef;
use crate::validation;

pub const OFFERING_NAME_MIN: usize = 3;
pub const OFFERING_NAME_MAX: usize = 200;

/// A service the studio offers (named "offering" to avoid colliding with the
/// service layer).
#[derive(Debug, Clone, Serialize)]
pub struct Offering {
    pub id: Uuid,
    pub name: String,
    pub session_info: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct OfferingDraft {
    pub name: String,
    pub session_info: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct OfferingPatch {
    pub name: Option<String>,
    pub session_info: Option<String>,
    pub description: Option<String>,
}

impl ContentEntity for Offering {
    type Draft = OfferingDraft;
    type Patch = OfferingPatch;

    const KIND: &'static str = "offering";
    const MEDIA_FOLDER: &'static str = "offering-images";
    const SEARCH_FIELDS: &'static [&'static str] = &["name"];

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
        validation::required_length(
            "name",
            Some(&draft.name),
            OFFERING_NAME_MIN,
            OFFERING_NAME_MAX,
        )?;
        validation::require("session_info", Some(&draft.session_info))?;
        Ok(())
    }

    fn validate_patch(patch: &Self::Patch) -> AppResult<()> {
        if let Some(name) = &patch.name {
            validation::length("name", name, OFFERING_NAME_MIN, OFFERING_NAME_MAX)?;
        }
        if let Some(session_info) = &patch.session_info {
            validation::require("session_info", Some(session_info))?;
        }
        Ok(())
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(session_info) = patch.session_info {
            self.session_info = session_info;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

#[cfg(feature = "sqlx")]
impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for Offering {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;

        Ok(Offering {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            session_info: row.try_get("session_info")?,
            description: row.try_get("description")?,
            media: crate::models::media_ref_from_row(row)?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
