//! Subscription and broadcast-mail endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::HttpAppError;
use crate::handlers::ListParams;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubscribeBody {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SendOneBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct SendAllBody {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub html: String,
}

pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SubscribeBody>,
) -> Result<impl IntoResponse, HttpAppError> {
    let subscriber = state.broadcasts.subscribe(&body.email).await?;
    Ok((StatusCode::CREATED, Json(subscriber)))
}

pub async fn list_subscribers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, HttpAppError> {
    let page = state
        .broadcasts
        .list_subscribers(params.into_query())
        .await?;
    Ok(Json(page))
}

pub async fn get_subscriber(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let subscriber = state.broadcasts.get_subscriber(&id).await?;
    Ok(Json(subscriber))
}

pub async fn unsubscribe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.broadcasts.unsubscribe(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn send_one(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SendOneBody>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state
        .broadcasts
        .send_one(&body.email, &body.subject, &body.html)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn send_to_all(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SendAllBody>,
) -> Result<impl IntoResponse, HttpAppError> {
    let report = state
        .broadcasts
        .send_to_all(&body.subject, &body.html)
        .await?;
    Ok(Json(report))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, HttpAppError> {
    let page = state.broadcasts.list_broadcasts(params.into_query()).await?;
    Ok(Json(page))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let broadcast = state.broadcasts.get_broadcast(&id).await?;
    Ok(Json(broadcast))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.broadcasts.delete_broadcast(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
