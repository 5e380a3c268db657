//! Supabase Storage client.
//!
//! Two provider calls are used: an authenticated object upload and the
//! public-URL form for reading it back:
//!
//! - `POST {base}/storage/v1/object/{bucket}/{path}`
//! - `GET  {base}/storage/v1/object/public/{bucket}/{path}`

use async_trait::async_trait;
use reqwest::header;

use crate::config::StorageConfig;

use super::{ObjectStore, StorageError};

pub struct SupabaseStorage {
    http: reqwest::Client,
    config: StorageConfig,
}

impl SupabaseStorage {
    /// Create a client reusing the process-wide `reqwest::Client`.
    pub fn new(http: reqwest::Client, config: StorageConfig) -> Self {
        Self { http, config }
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn upload_endpoint(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base(),
            self.config.bucket,
            path
        )
    }
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let response = self
            .http
            .post(self.upload_endpoint(path))
            .bearer_auth(&self.config.api_key)
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected { status, detail });
        }

        tracing::debug!(path, "object uploaded");
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base(),
            self.config.bucket,
            path
        )
    }
}
