//! Contact-request endpoints. Submission is public JSON; the rest is the
//! admin surface.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use atelier_core::models::{ContractDraft, ContractStatus};
use atelier_core::AppError;

use crate::error::HttpAppError;
use crate::handlers::ListParams;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateContractBody {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RespondBody {
    #[serde(default)]
    pub message: String,
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateContractBody>,
) -> Result<impl IntoResponse, HttpAppError> {
    let draft = ContractDraft {
        full_name: body.full_name,
        email: body.email,
        phone_number: body.phone_number,
        occupation: body.occupation,
        message: body.message,
    };
    let contract = state.contracts.create(draft).await?;
    Ok((StatusCode::CREATED, Json(contract)))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, HttpAppError> {
    let status = match params.status.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(ContractStatus::parse(raw).ok_or_else(|| {
            AppError::Validation(format!("Unknown contract status '{raw}'"))
        })?),
    };
    let page = state.contracts.list(params.into_query(), status).await?;
    Ok(Json(page))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let contract = state.contracts.get(&id).await?;
    Ok(Json(contract))
}

pub async fn respond(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<RespondBody>,
) -> Result<impl IntoResponse, HttpAppError> {
    let contract = state.contracts.respond(&id, &body.message).await?;
    Ok(Json(contract))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.contracts.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
