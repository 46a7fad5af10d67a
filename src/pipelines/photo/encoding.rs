// SPDX-License-Identifier: GPL-3.0-only

//! Photo codec adapter
//!
//! Decodes captured bytes (JPEG or PNG) into an RGB raster and encodes rasters
//! back to JPEG. Both directions are synchronous; callers run them on the
//! filter worker.

use super::RasterImage;
use crate::constants::encoding::MAX_QUALITY;
use crate::errors::ImageError;
use tracing::debug;

/// Encoding quality settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EncodingQuality {
    /// Low quality (high compression)
    Low,
    /// Medium quality (balanced)
    Medium,
    /// High quality (low compression)
    #[default]
    High,
    /// Maximum quality (minimal compression)
    Maximum,
}

impl EncodingQuality {
    /// Get JPEG quality value (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            EncodingQuality::Low => 60,
            EncodingQuality::Medium => 80,
            EncodingQuality::High => 92,
            EncodingQuality::Maximum => 98,
        }
    }
}

/// Decode image bytes into an RGB raster
///
/// Alpha, if present, is dropped.
pub fn decode(bytes: &[u8]) -> Result<RasterImage, ImageError> {
    let image = image::load_from_memory(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;
    let rgb = image.to_rgb8();

    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidImage { width, height });
    }

    debug!(width, height, size = bytes.len(), "Decoded image");
    Ok(rgb)
}

/// Encode a raster as JPEG
///
/// `quality` is clamped to 1..=100. Output is deterministic for identical
/// input and quality.
pub fn encode(image: &RasterImage, quality: u8) -> Result<Vec<u8>, ImageError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidImage { width, height });
    }

    let quality = quality.clamp(1, MAX_QUALITY);
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);

    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);
    encoder
        .encode(
            image.as_raw(),
            width,
            height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(format!("JPEG encoding failed: {}", e)))?;

    debug!(width, height, quality, size = buffer.len(), "Encoded JPEG");
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_jpeg_quality_values() {
        assert_eq!(EncodingQuality::Low.jpeg_quality(), 60);
        assert_eq!(EncodingQuality::Medium.jpeg_quality(), 80);
        assert_eq!(EncodingQuality::High.jpeg_quality(), 92);
        assert_eq!(EncodingQuality::Maximum.jpeg_quality(), 98);
    }

    #[test]
    fn test_presets_parse_from_names() {
        use clap::ValueEnum;
        assert_eq!(
            EncodingQuality::from_str("maximum", true),
            Ok(EncodingQuality::Maximum)
        );
        assert_eq!(EncodingQuality::from_str("low", true), Ok(EncodingQuality::Low));
        assert!(EncodingQuality::from_str("ultra", true).is_err());
    }

    #[test]
    fn test_round_trip_keeps_dimensions() {
        let image = RasterImage::from_fn(33, 17, |x, y| Rgb([x as u8 * 7, y as u8 * 13, 90]));
        let bytes = encode(&image, 100).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (33, 17));
    }

    #[test]
    fn test_encode_deterministic() {
        let image = RasterImage::from_pixel(16, 16, Rgb([10, 200, 60]));
        assert_eq!(encode(&image, 92).unwrap(), encode(&image, 92).unwrap());
    }

    #[test]
    fn test_truncated_jpeg_fails() {
        let image = RasterImage::from_pixel(64, 64, Rgb([120, 80, 40]));
        let bytes = encode(&image, 90).unwrap();
        // Cut inside the headers, before any frame data
        let truncated = &bytes[..20];
        assert!(matches!(decode(truncated), Err(ImageError::Decode(_))));
    }

    #[test]
    fn test_unknown_format_fails() {
        assert!(matches!(decode(&[0u8; 32]), Err(ImageError::Decode(_))));
    }

    #[test]
    fn test_decode_png_drops_alpha() {
        let rgba = image::RgbaImage::from_pixel(4, 3, image::Rgba([1, 2, 3, 128]));
        let mut png = Vec::new();
        rgba.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let decoded = decode(&png).unwrap();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(0, 0).0, [1, 2, 3]);
    }
}
