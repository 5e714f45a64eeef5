use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::media::MediaRef;
use crate::validation;

/// Public profile attached to an account. Upserted on update, so every field
/// except `user_id` is optional input.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub user_name: String,
    pub email: String,
    pub phone_number: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
}

impl ProfilePatch {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(email) = &self.email {
            validation::email("email", email)?;
        }
        if let Some(full_name) = &self.full_name {
            validation::require("full_name", Some(full_name))?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.user_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.bio.is_none()
    }
}

impl Profile {
    pub fn apply_patch(&mut self, patch: ProfilePatch) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(user_name) = patch.user_name {
            self.user_name = user_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone_number) = patch.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
    }
}

#[cfg(feature = "sqlx")]
impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for Profile {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;

        Ok(Profile {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            full_name: row.try_get("full_name")?,
            user_name: row.try_get("user_name")?,
            email: row.try_get("email")?,
            phone_number: row.try_get("phone_number")?,
            bio: row.try_get("bio")?,
            media: crate::models::media_ref_from_row(row)?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
