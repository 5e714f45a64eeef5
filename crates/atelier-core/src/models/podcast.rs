use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::content::ContentEntity;
use crate::models::media::MediaRef;
use crate::validation;

pub const PODCAST_TITLE_MIN: usize = 3;
pub const PODCAST_TITLE_MAX: usize = 200;

/// Where the episode itself is hosted; the attached media is only the
/// thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "podcast_channel", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum PodcastChannel {
    #[default]
    YoutubeVideos,
    SpotifyAudios,
}

impl PodcastChannel {
    pub fn parse(s: &str) -> Option<PodcastChannel> {
        match s.to_ascii_lowercase().as_str() {
            "youtube_videos" | "youtube" => Some(PodcastChannel::YoutubeVideos),
            "spotify_audios" | "spotify" => Some(PodcastChannel::SpotifyAudios),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Podcast {
    pub id: Uuid,
    pub title: String,
    pub channel: PodcastChannel,
    pub description: String,
    pub link_name: String,
    pub link_url: String,
    pub creator_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct PodcastDraft {
    pub title: String,
    pub channel: PodcastChannel,
    pub description: String,
    pub link_name: String,
    pub link_url: String,
    pub creator_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct PodcastPatch {
    pub title: Option<String>,
    pub channel: Option<PodcastChannel>,
    pub description: Option<String>,
    pub link_name: Option<String>,
    pub link_url: Option<String>,
    pub creator_name: Option<String>,
}

impl ContentEntity for Podcast {
    type Draft = PodcastDraft;
    type Patch = PodcastPatch;

    const KIND: &'static str = "podcast";
    const MEDIA_FOLDER: &'static str = "podcast-thumbnails";
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
        validation::required_length(
            "title",
            Some(&draft.title),
            PODCAST_TITLE_MIN,
            PODCAST_TITLE_MAX,
        )?;
        validation::require("link_name", Some(&draft.link_name))?;
        Ok(())
    }

    fn validate_patch(patch: &Self::Patch) -> AppResult<()> {
        if let Some(title) = &patch.title {
            validation::length("title", title, PODCAST_TITLE_MIN, PODCAST_TITLE_MAX)?;
        }
        if let Some(link_name) = &patch.link_name {
            validation::require("link_name", Some(link_name))?;
        }
        Ok(())
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(channel) = patch.channel {
            self.channel = channel;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(link_name) = patch.link_name {
            self.link_name = link_name;
        }
        if let Some(link_url) = patch.link_url {
            self.link_url = link_url;
        }
        if let Some(creator_name) = patch.creator_name {
            self.creator_name = creator_name;
        }
    }
}

#[cfg(feature = "sqlx")]
impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for Podcast {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;

        Ok(Podcast {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            channel: row.try_get("channel")?,
            description: row.try_get("description")?,
            link_name: row.try_get("link_name")?,
            link_url: row.try_get("link_url")?,
            creator_name: row.try_get("creator_name")?,
            media: crate::models::media_ref_from_row(row)?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
