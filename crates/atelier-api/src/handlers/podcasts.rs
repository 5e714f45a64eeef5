//! Podcast endpoints. The attached media is the episode thumbnail; the
//! episode itself lives on the linked channel.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use atelier_core::models::{PodcastChannel, PodcastDraft, PodcastPatch};
use atelier_core::AppError;

use crate::error::HttpAppError;
use crate::forms::{self, FormData};
use crate::handlers::ListParams;
use crate::state::AppState;

fn parse_channel(raw: &str) -> Result<PodcastChannel, AppError> {
    PodcastChannel::parse(raw)
        .ok_or_else(|| AppError::Validation(format!("Unknown podcast channel '{raw}'")))
}

fn draft_from_form(form: &FormData) -> Result<PodcastDraft, AppError> {
    Ok(PodcastDraft {
        title: form.text_or_default("title"),
        channel: match form.value("channel") {
            Some(raw) => parse_channel(&raw)?,
            None => PodcastChannel::default(),
        },
        description: form.text_or_default("description"),
        link_name: form.text_or_default("link_name"),
        link_url: form.text_or_default("link_url"),
        creator_name: form.text_or_default("creator_name"),
    })
}

fn patch_from_form(form: &FormData) -> Result<PodcastPatch, AppError> {
    Ok(PodcastPatch {
        title: form.value("title"),
        channel: form
            .value("channel")
            .map(|raw| parse_channel(&raw))
            .transpose()?,
        description: form.value("description"),
        link_name: form.value("link_name"),
        link_url: form.value("link_url"),
        creator_name: form.value("creator_name"),
    })
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = forms::collect(multipart).await?;
    let draft = draft_from_form(&form)?;
    let podcast = state.podcasts.create(draft, form.file).await?;
    Ok((StatusCode::CREATED, Json(podcast)))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, HttpAppError> {
    let page = state.podcasts.list(params.into_query()).await?;
    Ok(Json(page))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let podcast = state.podcasts.get(&id).await?;
    Ok(Json(podcast))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = forms::collect(multipart).await?;
    let patch = patch_from_form(&form)?;
    let podcast = state.podcasts.update(&id, patch, form.file).await?;
    Ok(Json(podcast))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.podcasts.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
