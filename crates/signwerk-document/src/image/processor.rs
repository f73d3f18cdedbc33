// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: decode uploaded documents and signatures, and encode
// rasters back to PNG, in memory with the `image` crate.

use image::{DynamicImage, ImageFormat, RgbaImage};
use signwerk_core::data_url;
use signwerk_core::error::SignwerkError;
use tracing::{debug, instrument};

/// Decoder and encoder around a single in-memory image.
///
/// ```ignore
/// let rgba = ImageProcessor::from_bytes(&upload)?.into_rgba();
/// let png = ImageProcessor::from_rgba(rgba).to_png_bytes()?;
/// ```
#[derive(Debug)]
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, SignwerkError> {
        let img = image::load_from_memory(data).map_err(|err| {
            SignwerkError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an RGBA buffer.
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self {
            image: DynamicImage::ImageRgba8(image),
        }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return an RGBA copy of the image.
    pub fn into_rgba(self) -> RgbaImage {
        self.image.into_rgba8()
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, SignwerkError> {
        encode_to_format(&self.image, ImageFormat::Png)
    }

    /// Encode the current image as a PNG data URL.
    pub fn to_png_data_url(&self) -> Result<String, SignwerkError> {
        let png = self.to_png_bytes()?;
        Ok(data_url::encode("image/png", &png))
    }
}

/// Uniform scale factor fitting `width` x `height` inside the given box.
pub fn fit_scale(width: u32, height: u32, max_width: u32, max_height: u32) -> f32 {
    if width == 0 || height == 0 {
        return 1.0;
    }
    (max_width as f32 / width as f32).min(max_height as f32 / height as f32)
}

/// `length * factor`, rounded, never below one pixel.
pub fn scaled_dimension(length: u32, factor: f32) -> u32 {
    ((length as f32 * factor).round() as u32).max(1)
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(
    image: &DynamicImage,
    format: ImageFormat,
) -> Result<Vec<u8>, SignwerkError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image.write_to(&mut cursor, format).map_err(|err| {
        SignwerkError::ImageError(format!("image encoding failed: {}", err))
    })?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        ImageProcessor::from_rgba(RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255])))
            .to_png_bytes()
            .unwrap()
    }

    #[test]
    fn png_roundtrip_keeps_dimensions() {
        let decoded = ImageProcessor::from_bytes(&sample_png(40, 20)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 20));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = ImageProcessor::from_bytes(b"%PDF-1.7 not an image").unwrap_err();
        assert!(matches!(err, SignwerkError::ImageError(_)));
    }

    #[test]
    fn fit_upscales_and_preserves_aspect() {
        // 400x250 into 800x1000 is limited by width: factor 2.
        assert_eq!(fit_scale(400, 250, 800, 1000), 2.0);
        assert_eq!(fit_scale(1600, 1000, 800, 1000), 0.5);
        assert_eq!(fit_scale(0, 10, 800, 1000), 1.0);
    }

    #[test]
    fn scaling_never_collapses_to_zero() {
        assert_eq!(scaled_dimension(2, 0.01), 1);
        assert_eq!(scaled_dimension(400, 1.2), 480);
    }
}
