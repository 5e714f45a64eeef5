//! HTTP error response conversion.
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`; service errors
//! convert via `?` and render with a consistent status, body and log line.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use atelier_core::{AppError, LogLevel};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper so we can implement `IntoResponse` for the core error type
/// (orphan rules forbid doing it directly).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(error = %error, code, "Request failed"),
        LogLevel::Warn => tracing::warn!(error = %error, code, "Request failed"),
        LogLevel::Error => tracing::error!(error = %error, code, "Request failed"),
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .map(|env| {
            let env = env.to_lowercase();
            env == "production" || env == "prod"
        })
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let error = &self.0;
        let status = StatusCode::from_u16(error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(error);

        // Server-side failure details stay out of production responses.
        let message = if status.is_server_error() && is_production_env() {
            "Internal server error".to_string()
        } else {
            error.to_string()
        };

        let body = Json(ErrorResponse {
            error: message,
            code: error.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
