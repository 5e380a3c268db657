//! The upscale endpoint. The whole request pipeline lives here:
//! download, preprocess, inference, quality scoring, encode, upload,
//! respond.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::config::{IMPROVEMENT_LABEL, JPEG_QUALITY, UPSCALED_NAME_PREFIX};
use crate::core_state::CoreState;
use crate::fetch::fetch_image;
use crate::pipeline::encode::encode_jpeg;
use crate::pipeline::preprocess::prepare_input;
use crate::pipeline::score::psnr;

#[derive(Debug, Deserialize)]
pub struct UpscaleRequest {
    /// URL of the source image to fetch.
    pub image_url: String,
    /// Destination file name; the upload path is derived from it.
    pub file_name: String,
}

#[derive(Debug, Serialize)]
pub struct UpscaleResponse {
    /// Public URL of the uploaded upscaled image.
    pub upscaled_url: String,
    pub analysis: Analysis,
}

#[derive(Debug, Serialize)]
pub struct Analysis {
    /// Elapsed inference time, e.g. `"1.52s"`.
    pub duration: String,
    /// Fidelity score against the resized source, e.g. `"27.41 dB"`.
    pub psnr: String,
    /// Fixed descriptive label.
    pub improvement: &'static str,
}

/// `POST /upscale`: fetch a source image, upscale it, and publish the
/// JPEG result to object storage.
///
/// Any stage failure is reported uniformly as HTTP 500 with no partial
/// result and no retry; on failure nothing is uploaded.
pub async fn handle(
    State(core): State<Arc<CoreState>>,
    Json(request): Json<UpscaleRequest>,
) -> Result<Json<UpscaleResponse>, ApiError> {
    let bytes = fetch_image(&core.http, &request.image_url).await?;
    let source = prepare_input(&bytes)?;

    // Blocking, unscheduled computation with no cancellation or timeout.
    let started = Instant::now();
    let upscaled = core.model.upscale(&source)?;
    let duration = started.elapsed();

    let score = psnr(&source, &upscaled);

    tracing::info!(
        source = format!("{}x{}", source.width(), source.height()),
        output = format!("{}x{}", upscaled.width(), upscaled.height()),
        psnr_db = score,
        duration_ms = duration.as_millis() as u64,
        "inference complete"
    );

    let jpeg = encode_jpeg(&upscaled, JPEG_QUALITY)?;

    let object_path = format!(
        "{}{}{}",
        core.config.storage.upload_prefix, UPSCALED_NAME_PREFIX, request.file_name
    );
    core.store.upload(&object_path, jpeg, "image/jpeg").await?;
    let upscaled_url = core.store.public_url(&object_path);

    Ok(Json(UpscaleResponse {
        upscaled_url,
        analysis: Analysis {
            duration: format!("{:.2}s", duration.as_secs_f64()),
            psnr: format!("{score:.2} dB"),
            improvement: IMPROVEMENT_LABEL,
        },
    }))
}
