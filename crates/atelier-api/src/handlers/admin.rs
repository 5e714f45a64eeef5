//! Admin statistics endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::error::HttpAppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    pub year: Option<i32>,
}

/// Subscriber signups per month; defaults to the current year.
pub async fn monthly_signups(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> Result<impl IntoResponse, HttpAppError> {
    let year = params.year.unwrap_or_else(|| Utc::now().year());
    let months = state.admin.monthly_signups(year).await?;
    Ok(Json(months))
}
