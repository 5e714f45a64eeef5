//! Blog endpoints: multipart create/update with an optional cover image.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use atelier_core::models::{BlogDraft, BlogPatch, BlogStatus};
use atelier_core::AppError;

use crate::error::HttpAppError;
use crate::forms::{self, FormData};
use crate::handlers::ListParams;
use crate::state::AppState;

fn parse_status(raw: &str) -> Result<BlogStatus, AppError> {
    BlogStatus::parse(raw)
        .ok_or_else(|| AppError::Validation(format!("Unknown blog status '{raw}'")))
}

fn draft_from_form(form: &FormData) -> Result<BlogDraft, AppError> {
    Ok(BlogDraft {
        title: form.text_or_default("title"),
        read_time: form.text_or_default("read_time"),
        description: form.text_or_default("description"),
        featured: form.bool_or("featured", false)?,
        status: match form.value("status") {
            Some(raw) => parse_status(&raw)?,
            None => BlogStatus::default(),
        },
    })
}

fn patch_from_form(form: &FormData) -> Result<BlogPatch, AppError> {
    Ok(BlogPatch {
        title: form.value("title"),
        read_time: form.value("read_time"),
        description: form.value("description"),
        featured: match form.value("featured") {
            Some(_) => Some(form.bool_or("featured", false)?),
            None => None,
        },
        status: form.value("status").map(|raw| parse_status(&raw)).transpose()?,
    })
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = forms::collect(multipart).await?;
    let draft = draft_from_form(&form)?;
    let blog = state.blogs.create(draft, form.file).await?;
    Ok((StatusCode::CREATED, Json(blog)))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, HttpAppError> {
    let page = state.blogs.list(params.into_query()).await?;
    Ok(Json(page))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let blog = state.blogs.get(&id).await?;
    Ok(Json(blog))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = forms::collect(multipart).await?;
    let patch = patch_from_form(&form)?;
    let blog = state.blogs.update(&id, patch, form.file).await?;
    Ok(Json(blog))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.blogs.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
