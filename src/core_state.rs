//! Process-wide shared state.
//!
//! The model and storage client are initialized once at startup and never
//! torn down or reloaded. `CoreState` is wrapped in `Arc` and handed to the
//! router, so every request handler borrows the same singletons.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::model::{EsrganModel, InferenceError, SuperResolution};
use crate::storage::{ObjectStore, SupabaseStorage};

pub struct CoreState {
    pub model: Arc<dyn SuperResolution>,
    pub store: Arc<dyn ObjectStore>,
    pub http: reqwest::Client,
    pub config: ServiceConfig,
}

impl CoreState {
    /// Initialize production state: load the ONNX model from disk and wire
    /// the storage client to the shared HTTP client.
    pub fn init(config: ServiceConfig) -> Result<Self, InferenceError> {
        let http = reqwest::Client::new();

        tracing::info!(model = %config.model_path.display(), "loading super-resolution model");
        let model = EsrganModel::load(&config.model_path)?;
        tracing::info!("super-resolution model ready");

        let store = SupabaseStorage::new(http.clone(), config.storage.clone());

        Ok(Self {
            model: Arc::new(model),
            store: Arc::new(store),
            http,
            config,
        })
    }

    /// Assemble state from pre-built parts. Used by tests to substitute
    /// mock model/store implementations.
    pub fn with_parts(
        model: Arc<dyn SuperResolution>,
        store: Arc<dyn ObjectStore>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            model,
            store,
            http: reqwest::Client::new(),
            config,
        }
    }
}
