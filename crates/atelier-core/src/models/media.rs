//! Media attachment types.
//!
//! A record either carries a fully-populated [`MediaRef`] or none at all; the
//! fields are set and cleared together, never piecemeal.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File kind, classified from the MIME type prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "file_kind", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Document,
}

impl FileKind {
    /// Prefix match on `image/`, `video/`, `audio/`; everything else is a
    /// document.
    pub fn from_content_type(content_type: &str) -> FileKind {
        if content_type.starts_with("image/") {
            FileKind::Image
        } else if content_type.starts_with("video/") {
            FileKind::Video
        } else if content_type.starts_with("audio/") {
            FileKind::Audio
        } else {
            FileKind::Document
        }
    }
}

/// The hosting provider's resource-type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Image,
    Video,
    Raw,
    Auto,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Image => "image",
            ResourceType::Video => "video",
            ResourceType::Raw => "raw",
            ResourceType::Auto => "auto",
        }
    }
}

impl From<FileKind> for ResourceType {
    fn from(kind: FileKind) -> Self {
        match kind {
            FileKind::Image => ResourceType::Image,
            FileKind::Video => ResourceType::Video,
            // The provider stores audio under its video bucket; kept for
            // compatibility with objects uploaded by earlier versions.
            FileKind::Audio => ResourceType::Video,
            FileKind::Document => ResourceType::Raw,
        }
    }
}

/// A record's currently attached hosted file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub url: String,
    pub provider_id: String,
    pub kind: FileKind,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl MediaRef {
    /// Resource-type hint to hand the provider when deleting this object.
    pub fn resource_type(&self) -> ResourceType {
        self.kind.into()
    }
}

/// An uploaded file payload as parsed from the request, before it reaches the
/// provider.
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub bytes: Bytes,
    pub original_filename: String,
    pub content_type: String,
}

impl NewUpload {
    pub fn size_bytes(&self) -> i64 {
        self.bytes.len() as i64
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_content_type(&self.content_type)
    }
}

/// Read the nullable-as-a-unit media columns from a row. A row either has
/// all six `media_*` columns populated or none of them (enforced by a CHECK
/// constraint in the schema).
#[cfg(feature = "sqlx")]
pub fn media_ref_from_row(row: &sqlx::postgres::PgRow) -> Result<Option<MediaRef>, sqlx::Error> {
    use sqlx::Row;

    let url: Option<String> = row.try_get("media_url")?;
    match url {
        Some(url) => Ok(Some(MediaRef {
            url,
            provider_id: row.try_get("media_provider_id")?,
            kind: row.try_get("media_kind")?,
            content_type: row.try_get("media_content_type")?,
            size_bytes: row.try_get("media_size_bytes")?,
            uploaded_at: row.try_get("media_uploaded_at")?,
        })),
        None => Ok(None),
    }
}
