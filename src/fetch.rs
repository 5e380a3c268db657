//! Source image download.
//!
//! One shared `reqwest::Client` lives in `CoreState`; this module only
//! performs the GET and basic sanity checks on the body.

/// Maximum size of a downloaded source image. Prevents OOM on
/// adversarial or misdirected URLs (e.g. a video file).
const MAX_DOWNLOAD_BYTES: usize = 50 * 1024 * 1024; // 50 MB

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("source returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("source body is empty")]
    Empty,
    #[error("source exceeds {limit} byte limit ({got} bytes)")]
    TooLarge { limit: usize, got: usize },
}

/// Download the source image at `url` and return its raw bytes.
pub async fn fetch_image(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let body = response.bytes().await?;
    if body.is_empty() {
        return Err(FetchError::Empty);
    }
    if body.len() > MAX_DOWNLOAD_BYTES {
        return Err(FetchError::TooLarge {
            limit: MAX_DOWNLOAD_BYTES,
            got: body.len(),
        });
    }

    Ok(body.to_vec())
}
