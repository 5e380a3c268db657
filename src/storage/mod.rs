//! Remote object storage abstraction.
//!
//! `SupabaseStorage` talks to the provider's HTTP API; `MockStore` records
//! uploads in memory so tests can assert on side effects.

use async_trait::async_trait;

mod supabase;

pub use supabase::SupabaseStorage;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("storage rejected upload with HTTP {status}: {detail}")]
    Rejected {
        status: reqwest::StatusCode,
        detail: String,
    },
}

/// A remote object store reachable over HTTP.
///
/// No deduplication or idempotence is promised: uploading the same path
/// twice issues two independent provider calls.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `bytes` to `path` inside the configured bucket.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Caller-resolvable public URL for an object at `path`.
    fn public_url(&self, path: &str) -> String;
}

/// One upload recorded by [`MockStore`].
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub path: String,
    pub size_bytes: usize,
    pub content_type: String,
}

/// In-memory store for tests. Records every upload, optional failure mode.
#[derive(Default)]
pub struct MockStore {
    uploads: std::sync::Mutex<Vec<RecordedUpload>>,
    fail: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every upload.
    pub fn failing() -> Self {
        Self {
            uploads: std::sync::Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Snapshot of all recorded uploads, in order.
    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().expect("mock store lock").clone()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().expect("mock store lock").len()
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Rejected {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                detail: "mock upload failure".into(),
            });
        }
        self.uploads.lock().expect("mock store lock").push(RecordedUpload {
            path: path.to_string(),
            size_bytes: bytes.len(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("mock://store/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_records_uploads_in_order() {
        let store = MockStore::new();
        store.upload("a/one.jpg", vec![0; 3], "image/jpeg").await.unwrap();
        store.upload("a/two.jpg", vec![0; 5], "image/jpeg").await.unwrap();

        let uploads = store.uploads();
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[0].path, "a/one.jpg");
        assert_eq!(uploads[1].size_bytes, 5);
    }

    #[tokio::test]
    async fn mock_does_not_deduplicate() {
        let store = MockStore::new();
        store.upload("same.jpg", vec![1], "image/jpeg").await.unwrap();
        store.upload("same.jpg", vec![1], "image/jpeg").await.unwrap();

        assert_eq!(store.upload_count(), 2);
    }

    #[tokio::test]
    async fn failing_mock_records_nothing() {
        let store = MockStore::failing();
        let err = store.upload("x.jpg", vec![1], "image/jpeg").await.unwrap_err();

        assert!(matches!(err, StorageError::Rejected { .. }));
        assert_eq!(store.upload_count(), 0);
    }
}
