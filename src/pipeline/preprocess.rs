//! Normalizes a downloaded image for model input.
//!
//! Pipeline flow:
//! 1. Decode bytes
//! 2. Downscale so neither dimension exceeds [`MAX_INPUT_DIM`] (sweet spot
//!    for inference cost; never upscales)
//! 3. Convert to RGB, dropping any alpha channel
//! 4. Top-left crop both dimensions to a multiple of [`MODEL_ALIGN`]

use image::imageops::FilterType;
use image::RgbImage;
use tracing::debug;

/// Largest dimension allowed into inference. Inputs above this are
/// downscaled first (a fixed performance/quality trade-off).
pub const MAX_INPUT_DIM: u32 = 256;

/// The model requires spatial dimensions to be multiples of this.
pub const MODEL_ALIGN: u32 = 4;

#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("image too small for the model: {width}x{height}")]
    TooSmall { width: u32, height: u32 },
}

/// Prepare raw image bytes for inference.
///
/// The returned image is RGB, at most 256 px on either side, and both
/// dimensions are exact multiples of 4. Remainder pixels beyond the
/// alignment boundary are discarded.
pub fn prepare_input(bytes: &[u8]) -> Result<RgbImage, PreprocessError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| PreprocessError::Decode(e.to_string()))?;
    let (orig_w, orig_h) = (img.width(), img.height());

    // Lanczos3 matches the downscale filter the upstream tooling uses for
    // photographic content.
    let img = if orig_w > MAX_INPUT_DIM || orig_h > MAX_INPUT_DIM {
        img.resize(MAX_INPUT_DIM, MAX_INPUT_DIM, FilterType::Lanczos3)
    } else {
        img
    };

    let rgb = img.to_rgb8();

    let aligned_w = rgb.width() / MODEL_ALIGN * MODEL_ALIGN;
    let aligned_h = rgb.height() / MODEL_ALIGN * MODEL_ALIGN;
    if aligned_w == 0 || aligned_h == 0 {
        return Err(PreprocessError::TooSmall {
            width: rgb.width(),
            height: rgb.height(),
        });
    }

    let out = if aligned_w == rgb.width() && aligned_h == rgb.height() {
        rgb
    } else {
        image::imageops::crop_imm(&rgb, 0, 0, aligned_w, aligned_h).to_image()
    };

    debug!(
        original = format!("{orig_w}x{orig_h}"),
        prepared = format!("{}x{}", out.width(), out.height()),
        "source image prepared for inference"
    );

    Ok(out)
}
