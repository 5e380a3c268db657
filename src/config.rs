use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "pixelift";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Object names are prefixed with this marker so upscaled files are
/// distinguishable from their sources in the bucket.
pub const UPSCALED_NAME_PREFIX: &str = "AI-";

/// Fixed descriptive label returned in the diagnostics payload.
pub const IMPROVEMENT_LABEL: &str = "4x Resolution Enhancement";

/// JPEG quality for the encoded output image.
pub const JPEG_QUALITY: u8 = 95;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MODEL_PATH: &str = "models/esrgan-x4.onnx";
const DEFAULT_STORAGE_URL: &str = "http://127.0.0.1:54321";
const DEFAULT_BUCKET: &str = "images";
const DEFAULT_UPLOAD_PREFIX: &str = "upscaled/";

/// Service configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Path to the ONNX super-resolution model.
    pub model_path: PathBuf,
    pub storage: StorageConfig,
}

/// Object storage connection settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Base URL of the storage provider (no trailing slash required).
    pub base_url: String,
    /// API key sent as a bearer token on uploads.
    pub api_key: String,
    /// Bucket receiving upscaled images.
    pub bucket: String,
    /// Path prefix inside the bucket, e.g. `upscaled/`.
    pub upload_prefix: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.parse().expect("default bind addr is valid"),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_STORAGE_URL.to_string(),
            api_key: String::new(),
            bucket: DEFAULT_BUCKET.to_string(),
            upload_prefix: DEFAULT_UPLOAD_PREFIX.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults so the binary starts with no environment at all.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_addr = match std::env::var("UPSCALE_BIND_ADDR") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid UPSCALE_BIND_ADDR, using default");
                defaults.bind_addr
            }),
            Err(_) => defaults.bind_addr,
        };

        Self {
            bind_addr,
            model_path: std::env::var("UPSCALE_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            storage: StorageConfig {
                base_url: env_or("STORAGE_URL", defaults.storage.base_url),
                api_key: env_or("STORAGE_KEY", defaults.storage.api_key),
                bucket: env_or("STORAGE_BUCKET", defaults.storage.bucket),
                upload_prefix: env_or("STORAGE_PREFIX", defaults.storage.upload_prefix),
            },
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}
