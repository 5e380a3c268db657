//! JPEG encoding of the upscaled result.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

#[derive(Debug, thiserror::Error)]
#[error("JPEG encoding failed: {0}")]
pub struct EncodeError(String);

/// Encode an RGB image as JPEG bytes at the given quality.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let mut cursor = Cursor::new(Vec::new());
    let mut encoder = JpegEncoder::new_with_quality(&mut cursor, quality);
    encoder
        .encode(img.as_raw(), img.width(), img.height(), image::ColorType::Rgb8)
        .map_err(|e| EncodeError(e.to_string()))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JPEG_QUALITY;
    use image::Rgb;

    #[test]
    fn output_decodes_to_same_dimensions() {
        let img = RgbImage::from_pixel(40, 24, Rgb([200, 100, 50]));
        let jpeg = encode_jpeg(&img, JPEG_QUALITY).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 24));
    }

    #[test]
    fn output_is_jpeg() {
        let img = RgbImage::from_pixel(8, 8, Rgb([1, 2, 3]));
        let jpeg = encode_jpeg(&img, JPEG_QUALITY).unwrap();
        // SOI marker
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }
}
