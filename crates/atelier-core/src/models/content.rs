//! The shared shape of media-carrying content entities.
//!
//! Blog, Podcast and Offering all follow the same lifecycle: validated
//! create, filtered/paginated list, partial update, media replacement,
//! delete. [`ContentEntity`] captures what the generic service and
//! repository need to know about each of them.

use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::media::MediaRef;

pub trait ContentEntity: Clone + Send + Sync + Serialize + 'static {
    /// Input for `create`, already shaped but not yet validated.
    type Draft: Send + Sync;
    /// Partial update: `None` fields are left untouched. An explicitly
    /// supplied value is validated against the entity's bounds, so clearing
    /// a required field to the empty string fails instead of being ignored.
    type Patch: Send + Sync;

    /// Lowercase noun used in error messages and log fields.
    const KIND: &'static str;
    /// Provider folder new uploads land in.
    const MEDIA_FOLDER: &'static str;
    /// Columns the free-text search matches against.
    const SEARCH_FIELDS: &'static [&'static str];

    fn id(&self) -> Uuid;
    fn media_ref(&self) -> Option<&MediaRef>;
    fn set_media_ref(&mut self, media: Option<MediaRef>);

    fn validate_draft(draft: &Self::Draft) -> AppResult<()>;
    fn validate_patch(patch: &Self::Patch) -> AppResult<()>;
    fn apply_patch(&mut self, patch: Self::Patch);
}
