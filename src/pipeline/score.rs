//! Fidelity scoring: PSNR between the model output and a resized reference.

use image::imageops::FilterType;
use image::RgbImage;

/// Peak signal value for 8-bit channels.
const PEAK: f64 = 255.0;

/// Score returned when the two images are identical (MSE of zero would
/// otherwise push PSNR to infinity; callers expect a finite number).
pub const PSNR_CAP_DB: f32 = 100.0;

/// Peak signal-to-noise ratio in decibels, higher is better.
///
/// The reference is resized to the output's dimensions with a bicubic
/// (CatmullRom) filter, then the mean squared error is taken across all
/// pixels and channels: `10 * log10(255^2 / mse)`.
pub fn psnr(reference: &RgbImage, output: &RgbImage) -> f32 {
    let resized;
    let reference = if reference.dimensions() == output.dimensions() {
        reference
    } else {
        resized = image::imageops::resize(
            reference,
            output.width(),
            output.height(),
            FilterType::CatmullRom,
        );
        &resized
    };

    let mut sum_sq = 0.0f64;
    for (a, b) in reference.pixels().zip(output.pixels()) {
        for c in 0..3 {
            let diff = a.0[c] as f64 - b.0[c] as f64;
            sum_sq += diff * diff;
        }
    }

    let samples = (output.width() as f64) * (output.height() as f64) * 3.0;
    let mse = sum_sq / samples;
    if mse <= 0.0 {
        return PSNR_CAP_DB;
    }

    let db = 10.0 * (PEAK * PEAK / mse).log10();
    db.min(PSNR_CAP_DB as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn flat(width: u32, height: u32, value: u8) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([value, value, value]))
    }

    /// Deterministic speckle so tests don't need an RNG.
    fn noisy(base: &RgbImage, amplitude: i16) -> RgbImage {
        let mut out = base.clone();
        for (x, y, p) in out.enumerate_pixels_mut() {
            let offset = if (x + y) % 2 == 0 { amplitude } else { -amplitude };
            for c in 0..3 {
                p.0[c] = (p.0[c] as i16 + offset).clamp(0, 255) as u8;
            }
        }
        out
    }

    #[test]
    fn identical_images_hit_cap() {
        let img = flat(32, 32, 128);
        assert_eq!(psnr(&img, &img), PSNR_CAP_DB);
    }

    #[test]
    fn score_is_finite_and_non_negative() {
        let reference = flat(16, 16, 0);
        let output = flat(64, 64, 255); // worst case: maximal per-pixel error
        let score = psnr(&reference, &output);
        assert!(score.is_finite());
        assert!(score >= 0.0);
    }

    #[test]
    fn more_noise_scores_lower() {
        let reference = flat(64, 64, 128);
        let slightly = psnr(&reference, &noisy(&reference, 5));
        let heavily = psnr(&reference, &noisy(&reference, 50));
        assert!(slightly > heavily, "{slightly} vs {heavily}");
    }

    #[test]
    fn reference_resized_to_output_dimensions() {
        // 4x output of a flat image still compares cleanly after resize.
        let reference = flat(16, 16, 90);
        let output = flat(64, 64, 90);
        assert_eq!(psnr(&reference, &output), PSNR_CAP_DB);
    }

    #[test]
    fn known_mse_matches_formula() {
        // Uniform difference of 10 on every sample: mse = 100.
        let reference = flat(8, 8, 100);
        let output = flat(8, 8, 110);
        let expected = 10.0 * (255.0f64 * 255.0 / 100.0).log10();
        assert!((psnr(&reference, &output) as f64 - expected).abs() < 1e-4);
    }
}
