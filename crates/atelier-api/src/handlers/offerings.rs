//! Service-offering endpoints.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use atelier_core::models::{OfferingDraft, OfferingPatch};

use crate::error::HttpAppError;
use crate::forms::{self, FormData};
use crate::handlers::ListParams;
use crate::state::AppState;

fn draft_from_form(form: &FormData) -> OfferingDraft {
    OfferingDraft {
        name: form.text_or_default("name"),
        session_info: form.text_or_default("session_info"),
        description: form.text_or_default("description"),
    }
}

fn patch_from_form(form: &FormData) -> OfferingPatch {
    OfferingPatch {
        name: form.value("name"),
        session_info: form.value("session_info"),
        description: form.value("description"),
    }
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = forms::collect(multipart).await?;
    let offering = state
        .offerings
        .create(draft_from_form(&form), form.file)
        .await?;
    Ok((StatusCode::CREATED, Json(offering)))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, HttpAppError> {
    let page = state.offerings.list(params.into_query()).await?;
    Ok(Json(page))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let offering = state.offerings.get(&id).await?;
    Ok(Json(offering))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = forms::collect(multipart).await?;
    let offering = state
        .offerings
        .update(&id, patch_from_form(&form), form.file)
        .await?;
    Ok(Json(offering))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.offerings.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
