//! Image pipeline: decode + normalize, fidelity scoring, JPEG encoding.
//!
//! Pure image-to-image transforms with no I/O and no model calls.

pub mod encode;
pub mod preprocess;
pub mod score;
