//! Multipart form parsing shared by the content and profile endpoints.
//!
//! Requests arrive as `multipart/form-data`: text fields plus at most one
//! file part named `file`. Text fields keep their raw values; a field that is
//! present but blank still counts as supplied, so patches can reject attempts
//! to blank a required field instead of silently ignoring them.

use std::collections::HashMap;

use axum::extract::Multipart;

use atelier_core::models::NewUpload;
use atelier_core::{AppError, AppResult};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

pub struct FormData {
    fields: HashMap<String, String>,
    pub file: Option<NewUpload>,
}

impl FormData {
    /// Raw value of a supplied field, blank or not.
    pub fn value(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    /// Trimmed value, or the empty string when absent. Used for drafts where
    /// validation reports the missing field anyway.
    pub fn text_or_default(&self, name: &str) -> String {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    pub fn bool_or(&self, name: &str, default: bool) -> AppResult<bool> {
        match self.fields.get(name).map(|v| v.trim()) {
            None => Ok(default),
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" | "" => Ok(false),
                other => Err(AppError::Validation(format!(
                    "{name} is not a boolean: '{other}'"
                ))),
            },
        }
    }
}

/// Drain the multipart body into text fields plus the optional file part.
pub async fn collect(mut multipart: Multipart) -> AppResult<FormData> {
    let mut fields = HashMap::new();
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::Validation(format!("Malformed multipart body: {err}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(|s| s.to_string());
        let content_type = field.content_type().map(|s| s.to_string());

        match file_name {
            Some(original_filename) => {
                let bytes = field.bytes().await.map_err(|err| {
                    AppError::Validation(format!("Failed to read uploaded file: {err}"))
                })?;
                // Browsers send an empty file part when no file was chosen.
                if !bytes.is_empty() {
                    file = Some(NewUpload {
                        bytes,
                        original_filename,
                        content_type: content_type
                            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string()),
                    });
                }
            }
            None => {
                let value = field.text().await.map_err(|err| {
                    AppError::Validation(format!("Failed to read field '{name}': {err}"))
                })?;
                fields.insert(name, value);
            }
        }
    }

    Ok(FormData { fields, file })
}
