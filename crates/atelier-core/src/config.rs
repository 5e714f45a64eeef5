//! Configuration module
//!
//! Environment-backed configuration for the API binary and services. Storage
//! and SMTP settings are grouped so each backend can validate only what it
//! needs at construction time.

use std::env;

use crate::error::AppError;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_PAGE_LIMIT: u32 = 10;
const DEFAULT_BROADCAST_CONCURRENCY: usize = 8;

/// Which media store backend to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Local filesystem, for development and tests
    Local,
    /// Cloudinary upload/destroy API
    Cloudinary,
}

impl StorageBackend {
    fn parse(s: &str) -> Result<Self, AppError> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(StorageBackend::Local),
            "cloudinary" => Ok(StorageBackend::Cloudinary),
            other => Err(AppError::Config(format!(
                "Unknown STORAGE_BACKEND '{other}' (expected 'local' or 'cloudinary')"
            ))),
        }
    }
}

/// SMTP settings for the outbound mailer. Absent when mail is not configured;
/// mail-sending operations then fail with a send error rather than at startup.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    pub starttls: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub environment: String,

    pub storage_backend: StorageBackend,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub cloudinary_cloud_name: Option<String>,
    pub cloudinary_api_key: Option<String>,
    pub cloudinary_api_secret: Option<String>,

    pub smtp: Option<SmtpConfig>,

    /// Default page size when a list request omits `limit`
    pub default_page_limit: u32,
    /// Worker-pool width for broadcast-to-all fan-out
    pub broadcast_concurrency: usize,
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn required(name: &str) -> Result<String, AppError> {
    var(name).ok_or_else(|| AppError::Config(format!("{name} must be set")))
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match var(name) {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("{name} is not a valid value: '{raw}'"))),
        None => Ok(default),
    }
}

impl Config {
    /// Load configuration from the environment. The API binary calls
    /// `dotenvy::dotenv()` before this so a local `.env` file works.
    pub fn from_env() -> Result<Self, AppError> {
        let storage_backend = StorageBackend::parse(
            &var("STORAGE_BACKEND").unwrap_or_else(|| "local".to_string()),
        )?;

        let smtp = match var("SMTP_HOST") {
            Some(host) => Some(SmtpConfig {
                host,
                port: parsed("SMTP_PORT", 587)?,
                username: var("SMTP_USER"),
                password: var("SMTP_PASSWORD"),
                from: required("SMTP_FROM")?,
                starttls: parsed("SMTP_STARTTLS", true)?,
            }),
            None => None,
        };

        Ok(Config {
            server_port: parsed("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            database_url: required("DATABASE_URL")?,
            db_max_connections: parsed("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            storage_backend,
            local_storage_path: var("LOCAL_STORAGE_PATH"),
            local_storage_base_url: var("LOCAL_STORAGE_BASE_URL"),
            cloudinary_cloud_name: var("CLOUDINARY_CLOUD_NAME"),
            cloudinary_api_key: var("CLOUDINARY_API_KEY"),
            cloudinary_api_secret: var("CLOUDINARY_API_SECRET"),
            smtp,
            default_page_limit: parsed("DEFAULT_PAGE_LIMIT", DEFAULT_PAGE_LIMIT)?,
            broadcast_concurrency: parsed(
                "BROADCAST_CONCURRENCY",
                DEFAULT_BROADCAST_CONCURRENCY,
            )?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
