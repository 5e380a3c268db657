//! Super-resolution model abstraction.
//!
//! The service treats the network as a frozen black box: RGB in, larger
//! RGB out. `EsrganModel` is the production implementation backed by ONNX
//! Runtime; `MockUpscaler` stands in for it in tests.

use std::path::PathBuf;

use image::RgbImage;

mod esrgan;

pub use esrgan::EsrganModel;

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("model file not found: {0}")]
    ModelNotFound(PathBuf),
    #[error("failed to initialize inference session: {0}")]
    SessionInit(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("unexpected model output shape: {0}")]
    OutputShape(String),
}

/// A frozen super-resolution network.
///
/// Implementations must be shareable across request handlers; any interior
/// mutability required by the runtime is the implementation's concern.
pub trait SuperResolution: Send + Sync {
    /// Run one forward pass. The output is the input enlarged by
    /// [`scale_factor`](Self::scale_factor) in each dimension, clipped to
    /// the displayable value range.
    fn upscale(&self, input: &RgbImage) -> Result<RgbImage, InferenceError>;

    /// Nominal spatial upscale factor (4 for the ESRGAN family).
    fn scale_factor(&self) -> u32;
}

/// Mock model for testing: deterministic nearest-neighbour enlargement,
/// no ONNX runtime involved.
pub struct MockUpscaler {
    scale: u32,
    fail: bool,
}

impl MockUpscaler {
    pub fn new() -> Self {
        Self { scale: 4, fail: false }
    }

    /// A mock that fails every inference call.
    pub fn failing() -> Self {
        Self { scale: 4, fail: true }
    }
}

impl Default for MockUpscaler {
    fn default() -> Self {
        Self::new()
    }
}

impl SuperResolution for MockUpscaler {
    fn upscale(&self, input: &RgbImage) -> Result<RgbImage, InferenceError> {
        if self.fail {
            return Err(InferenceError::Inference("mock inference failure".into()));
        }
        Ok(image::imageops::resize(
            input,
            input.width() * self.scale,
            input.height() * self.scale,
            image::imageops::FilterType::Nearest,
        ))
    }

    fn scale_factor(&self) -> u32 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn mock_output_is_4x() {
        let model = MockUpscaler::new();
        let input = RgbImage::from_pixel(12, 8, Rgb([9, 9, 9]));

        let output = model.upscale(&input).unwrap();
        assert_eq!((output.width(), output.height()), (48, 32));
    }

    #[test]
    fn mock_preserves_pixel_values() {
        let model = MockUpscaler::new();
        let input = RgbImage::from_pixel(4, 4, Rgb([7, 77, 177]));

        let output = model.upscale(&input).unwrap();
        assert_eq!(output.get_pixel(0, 0).0, [7, 77, 177]);
        assert_eq!(output.get_pixel(15, 15).0, [7, 77, 177]);
    }

    #[test]
    fn failing_mock_errors() {
        let model = MockUpscaler::failing();
        let input = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));

        let err = model.upscale(&input).unwrap_err();
        assert!(matches!(err, InferenceError::Inference(_)));
    }
}
