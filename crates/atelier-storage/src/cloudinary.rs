//! Cloudinary media store backend.
//!
//! Uploads go through the signed upload endpoint under the `auto` resource
//! type; deletes hit `destroy` with the resource-type hint derived from the
//! stored file kind. Requests are signed with SHA-256
//! (`signature_algorithm=sha256`).

use crate::keys;
use crate::traits::{MediaStore, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use atelier_core::models::ResourceType;
use bytes::Bytes;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Clone)]
pub struct CloudinaryStore {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Sign `(key, value)` pairs the way Cloudinary expects: parameters sorted by
/// key, joined `k=v&...`, with the API secret appended before hashing.
fn sign(params: &mut Vec<(&str, String)>, api_secret: &str) -> String {
    params.sort_by(|a, b| a.0.cmp(b.0));
    let joined = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

fn unix_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
        .to_string()
}

impl CloudinaryStore {
    pub fn new(cloud_name: String, api_key: String, api_secret: String) -> Self {
        CloudinaryStore {
            client: reqwest::Client::new(),
            cloud_name,
            api_key,
            api_secret,
        }
    }

    fn endpoint(&self, resource_type: &str, action: &str) -> String {
        format!("{API_BASE}/{}/{resource_type}/{action}", self.cloud_name)
    }
}

#[async_trait]
impl MediaStore for CloudinaryStore {
    async fn upload(
        &self,
        folder: &str,
        original_filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredObject> {
        let public_id = keys::random_object_id();
        let timestamp = unix_timestamp();
        let size = data.len();

        let mut signed_params = vec![
            ("folder", folder.to_string()),
            ("public_id", public_id.clone()),
            ("timestamp", timestamp.clone()),
        ];
        let signature = sign(&mut signed_params, &self.api_secret);

        let file_part = reqwest::multipart::Part::bytes(data.to_vec())
            .file_name(original_filename.to_string())
            .mime_str(content_type)
            .map_err(|e| StorageError::UploadFailed(format!("Invalid content type: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("public_id", public_id)
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
            .part("file", file_part);

        let response = self
            .client
            .post(self.endpoint(ResourceType::Auto.as_str(), "upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::UploadFailed(format!(
                "Provider returned {status}: {body}"
            )));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Malformed provider response: {e}")))?;

        tracing::info!(
            public_id = %uploaded.public_id,
            folder = %folder,
            size_bytes = size,
            "Cloudinary upload successful"
        );

        Ok(StoredObject {
            provider_id: uploaded.public_id,
            url: uploaded.secure_url,
        })
    }

    async fn delete(&self, provider_id: &str, resource_type: ResourceType) -> StorageResult<()> {
        let timestamp = unix_timestamp();

        let mut signed_params = vec![
            ("invalidate", "true".to_string()),
            ("public_id", provider_id.to_string()),
            ("timestamp", timestamp.clone()),
        ];
        let signature = sign(&mut signed_params, &self.api_secret);

        let form = [
            ("api_key", self.api_key.clone()),
            ("timestamp", timestamp),
            ("public_id", provider_id.to_string()),
            ("invalidate", "true".to_string()),
            ("signature", signature),
            ("signature_algorithm", "sha256".to_string()),
        ];

        let response = self
            .client
            .post(self.endpoint(resource_type.as_str(), "destroy"))
            .form(&form)
            .send()
            .await
            .map_err(|e| StorageError::DeleteFailed(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::DeleteFailed(format!(
                "Provider returned {status}: {body}"
            )));
        }

        let destroyed: DestroyResponse = response
            .json()
            .await
            .map_err(|e| StorageError::DeleteFailed(format!("Malformed provider response: {e}")))?;

        match destroyed.result.as_str() {
            "ok" => {
                tracing::info!(public_id = %provider_id, "Cloudinary delete successful");
                Ok(())
            }
            // Deleting an already-deleted object is not an error.
            "not found" => {
                tracing::debug!(public_id = %provider_id, "Object already absent on delete");
                Ok(())
            }
            other => Err(StorageError::DeleteFailed(format!(
                "Provider result '{other}' for {provider_id}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_sorts_params_and_appends_secret() {
        let mut params = vec![
            ("timestamp", "100".to_string()),
            ("folder", "blog-images".to_string()),
            ("public_id", "abc".to_string()),
        ];
        let got = sign(&mut params, "secret");

        let mut hasher = Sha256::new();
        hasher.update(b"folder=blog-images&public_id=abc&timestamp=100");
        hasher.update(b"secret");
        assert_eq!(got, hex::encode(hasher.finalize()));
    }
}
