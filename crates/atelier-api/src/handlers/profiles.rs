//! Profile endpoints: fetch by user, upsert with an optional avatar.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::response::IntoResponse;
use axum::Json;

use atelier_core::models::ProfilePatch;

use crate::error::HttpAppError;
use crate::forms::{self, FormData};
use crate::state::AppState;

fn patch_from_form(form: &FormData) -> ProfilePatch {
    ProfilePatch {
        full_name: form.value("full_name"),
        user_name: form.value("user_name"),
        email: form.value("email"),
        phone_number: form.value("phone_number"),
        bio: form.value("bio"),
    }
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let profile = state.profiles.get(&user_id).await?;
    Ok(Json(profile))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = forms::collect(multipart).await?;
    let profile = state
        .profiles
        .update(&user_id, patch_from_form(&form), form.file)
        .await?;
    Ok(Json(profile))
}
