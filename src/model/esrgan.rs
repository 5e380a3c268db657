//! ESRGAN inference via ONNX Runtime.
//!
//! The model is an off-the-shelf FP32 ESRGAN-family network: input and
//! output are NCHW `[1, 3, H, W]` tensors in the 0–255 value range, with a
//! nominal 4x spatial scale. Both spatial dimensions must be multiples of 4
//! (preprocessing guarantees this).

use std::path::Path;
use std::sync::Mutex;

use image::RgbImage;
use ndarray::Array4;
use ort::session::Session;
use ort::value::TensorRef;

use super::{InferenceError, SuperResolution};

/// Nominal scale of the ESRGAN family. The real scale is derived from the
/// output shape on every run; this value is reported via `scale_factor`.
const NOMINAL_SCALE: u32 = 4;

/// Frozen ESRGAN model loaded once at startup.
///
/// Uses interior mutability (Mutex) because `ort::Session::run` requires
/// `&mut self` but the `SuperResolution` trait exposes `&self` for shared
/// usage from request handlers. Inference is a blocking computation with no
/// cancellation or timeout.
#[derive(Debug)]
pub struct EsrganModel {
    session: Mutex<Session>,
}

impl EsrganModel {
    /// Load the ONNX model from a file path.
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        if !path.exists() {
            return Err(InferenceError::ModelNotFound(path.to_path_buf()));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError::SessionInit(e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e| InferenceError::SessionInit(e.to_string()))?
            .commit_from_file(path)
            .map_err(|e| InferenceError::SessionInit(format!("ONNX load failed: {e}")))?;

        tracing::info!("ESRGAN model loaded from {}", path.display());

        Ok(Self {
            session: Mutex::new(session),
        })
    }

    fn infer(&self, input: &RgbImage) -> Result<RgbImage, InferenceError> {
        let (w, h) = (input.width() as usize, input.height() as usize);
        let hw = w * h;

        // HWC u8 → NCHW f32, keeping the 0–255 range the FP32 ESRGAN
        // family expects.
        let mut nchw = Array4::<f32>::zeros((1, 3, h, w));
        {
            let slice = nchw
                .as_slice_mut()
                .ok_or_else(|| InferenceError::Inference("input tensor not contiguous".to_string()))?;
            for (i, pixel) in input.pixels().enumerate() {
                slice[i] = pixel.0[0] as f32;
                slice[hw + i] = pixel.0[1] as f32;
                slice[2 * hw + i] = pixel.0[2] as f32;
            }
        }

        let input_tensor = TensorRef::from_array_view(&nchw)
            .map_err(|e| InferenceError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| InferenceError::Inference("session lock poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Inference(format!("ONNX inference failed: {e}")))?;

        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Inference(format!("output extraction: {e}")))?;

        if shape.len() != 4 || shape[0] != 1 || shape[1] != 3 {
            return Err(InferenceError::OutputShape(format!(
                "{shape:?}, expected [1, 3, H, W]"
            )));
        }
        let (out_h, out_w) = (shape[2] as usize, shape[3] as usize);
        if out_h % h != 0 || out_w % w != 0 || out_h / h != out_w / w {
            return Err(InferenceError::OutputShape(format!(
                "{out_w}x{out_h} is not an integer multiple of {w}x{h}"
            )));
        }

        // NCHW f32 → HWC u8, clipped to the displayable range.
        let out_hw = out_h * out_w;
        let mut out = RgbImage::new(out_w as u32, out_h as u32);
        for (i, pixel) in out.pixels_mut().enumerate() {
            pixel.0[0] = data[i].clamp(0.0, 255.0).round() as u8;
            pixel.0[1] = data[out_hw + i].clamp(0.0, 255.0).round() as u8;
            pixel.0[2] = data[2 * out_hw + i].clamp(0.0, 255.0).round() as u8;
        }

        Ok(out)
    }
}

impl SuperResolution for EsrganModel {
    fn upscale(&self, input: &RgbImage) -> Result<RgbImage, InferenceError> {
        self.infer(input)
    }

    fn scale_factor(&self) -> u32 {
        NOMINAL_SCALE
    }
}
