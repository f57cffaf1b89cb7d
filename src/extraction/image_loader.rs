//! Image decoding from raw bytes
//!
//! Any format the `image` crate can sniff from the byte stream is accepted
//! (JPEG, PNG, GIF first frame, WebP, TIFF, BMP, ICO, TGA, PNM, QOI, ...).
//! Every decoded image is normalized to 8-bit RGB; alpha is dropped.
//!
//! Downscaling keeps the aspect ratio and never enlarges.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, ImageReader, RgbImage};
use tracing::debug;

use crate::error::{PaletteError, Result};

/// Decode image bytes into an RGB8 buffer
///
/// # Errors
///
/// Returns [`PaletteError::ImageDecodeError`] if:
/// - The byte stream is empty
/// - No known format signature is found
/// - Decoding fails or yields an image without pixels
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage> {
    if bytes.is_empty() {
        return Err(PaletteError::ImageDecodeError {
            message: "image data is empty".into(),
            source: None,
        });
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PaletteError::image_decode("Failed to read image header", e))?;

    let format: ImageFormat = reader.format().ok_or_else(|| PaletteError::ImageDecodeError {
        message: "unrecognized image format".into(),
        source: None,
    })?;

    let decoded = reader
        .decode()
        .map_err(|e| PaletteError::image_decode(format!("Failed to decode {:?} image", format), e))?;

    let rgb = decoded.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(PaletteError::ImageDecodeError {
            message: "image has no pixels".into(),
            source: None,
        });
    }

    debug!(?format, width = rgb.width(), height = rgb.height(), "image decoded");
    Ok(rgb)
}

/// Target dimensions so the longer edge is at most `max_dimension`
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_dimension || max_dimension == 0 {
        return (width, height);
    }
    let scale = f64::from(max_dimension) / f64::from(longest);
    let scaled = |edge: u32| ((f64::from(edge) * scale).round() as u32).clamp(1, max_dimension);
    (scaled(width), scaled(height))
}

/// Shrink with Lanczos resampling so the longer edge is at most `max_dimension`
pub fn downscale(image: RgbImage, max_dimension: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    let (new_width, new_height) = fit_within(width, height, max_dimension);
    if (new_width, new_height) == (width, height) {
        return image;
    }
    debug!(width, height, new_width, new_height, "downscaling image");
    imageops::resize(&image, new_width, new_height, FilterType::Lanczos3)
}
