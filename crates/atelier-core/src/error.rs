//! Error types module
//!
//! All errors in the service layer are unified under the [`AppError`] enum.
//! The HTTP layer maps these to status codes; nothing below it knows about
//! HTTP. The `Database` variant and `From<sqlx::Error>` are gated behind the
//! `sqlx` feature so the storage crate can depend on core without pulling in
//! the database stack.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors such as validation failures
    Debug,
    /// Recoverable issues
    Warn,
    /// Unexpected failures
    Error,
}

/// Mail failures keep "you gave me nothing to send" distinct from
/// "the provider refused to send it".
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Failed to send email: {0}")]
    Send(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Failure uploading *new* media. Old-media cleanup failures never land
    /// here; they are swallowed as a logged outcome.
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error(transparent)]
    Mail(#[from] MailError),

    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type used throughout the service layer
pub type AppResult<T> = Result<T, AppError>;

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::RowNotFound => AppError::NotFound("Record not found".to_string()),
            other => AppError::Database(other),
        }
    }
}

impl AppError {
    /// HTTP status code this error maps to at the API boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) | AppError::InvalidId(_) => 400,
            AppError::Mail(MailError::MissingField(_)) => 400,
            AppError::NotFound(_) => 404,
            AppError::Upload(_)
            | AppError::Mail(MailError::Send(_))
            | AppError::Storage(_)
            | AppError::Config(_)
            | AppError::Internal(_) => 500,
            #[cfg(feature = "sqlx")]
            AppError::Database(_) => 500,
        }
    }

    /// Machine-readable error code for response bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidId(_) => "INVALID_ID",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Upload(_) => "UPLOAD_FAILED",
            AppError::Mail(MailError::MissingField(_)) => "MAIL_MISSING_FIELD",
            AppError::Mail(MailError::Send(_)) => "MAIL_SEND_FAILED",
            #[cfg(feature = "sqlx")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Log level appropriate for this error.
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_)
            | AppError::InvalidId(_)
            | AppError::NotFound(_)
            | AppError::Mail(MailError::MissingField(_)) => LogLevel::Debug,
            AppError::Upload(_) | AppError::Mail(MailError::Send(_)) => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}
