//! Logo sampling: image bytes to an average color.
//!
//! Logos arrive either as raw image bytes or as base64 text (the form they
//! travel in at the storage boundary). The image is shrunk, transparent and
//! pure white pixels are ignored, and the remaining pixels are averaged.

// Allow intentional type casts for pixel math
#![allow(clippy::cast_precision_loss)]

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::imageops::FilterType;
use image::Rgba;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::NormalizedRgb;

/// Each dimension is divided by this before sampling.
const DOWNSCALE: u32 = 4;

/// Pixels at or below this alpha are treated as background.
const ALPHA_THRESHOLD: u8 = 128;

const OPAQUE_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Computes the average color of a logo.
///
/// # Errors
///
/// Returns [`Error::ImageDecode`] when the bytes are not a supported image or
/// when the image has no opaque, non-white pixel.
pub fn average_color(bytes: &[u8]) -> Result<NormalizedRgb> {
    let decoded = decode(bytes)?;
    let rgba = decoded.to_rgba8();

    let width = (rgba.width() / DOWNSCALE).max(1);
    let height = (rgba.height() / DOWNSCALE).max(1);
    let sampled = image::imageops::resize(&rgba, width, height, FilterType::Nearest);

    let mut sum = [0u64; 3];
    let mut count = 0u64;
    for pixel in sampled.pixels() {
        if pixel[3] <= ALPHA_THRESHOLD || *pixel == OPAQUE_WHITE {
            continue;
        }
        sum[0] += u64::from(pixel[0]);
        sum[1] += u64::from(pixel[1]);
        sum[2] += u64::from(pixel[2]);
        count += 1;
    }

    if count == 0 {
        return Err(Error::image_decode_msg(
            "logo has no opaque, non-white pixels to sample",
        ));
    }

    let scale = count as f64 * 255.0;
    let color = NormalizedRgb::new(
        sum[0] as f64 / scale,
        sum[1] as f64 / scale,
        sum[2] as f64 / scale,
    );
    debug!(width, height, sampled = count, hex = %color.to_hex(), "Sampled logo");
    Ok(color)
}

/// Decodes raw or base64-encoded image bytes.
fn decode(bytes: &[u8]) -> Result<image::DynamicImage> {
    match image::load_from_memory(bytes) {
        Ok(img) => Ok(img),
        Err(raw_err) => {
            let Some(raw) = decode_base64(bytes) else {
                return Err(Error::image_decode("unsupported or corrupt image", raw_err));
            };
            image::load_from_memory(&raw)
                .map_err(|e| Error::image_decode("unsupported or corrupt image", e))
        }
    }
}

/// Strips whitespace and decodes base64 text, if it is base64.
fn decode_base64(bytes: &[u8]) -> Option<Vec<u8>> {
    let compact: Vec<u8> = bytes
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if compact.is_empty() {
        return None;
    }
    BASE64.decode(compact).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn png(img: &RgbaImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn solid(r: u8, g: u8, b: u8) -> Vec<u8> {
        png(&ImageBuffer::from_pixel(16, 16, Rgba([r, g, b, 255])))
    }

    #[test]
    fn test_solid_color() {
        let color = average_color(&solid(204, 204, 204)).unwrap();
        assert_eq!(color.to_hex(), "#cccccc");
    }

    #[test]
    fn test_ignores_transparent_and_white() {
        // Left half blue, top right see-through red, bottom right white.
        let img: RgbaImage = ImageBuffer::from_fn(8, 8, |x, y| {
            if x < 4 {
                Rgba([0, 0, 255, 255])
            } else if y < 4 {
                Rgba([255, 0, 0, 10])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let color = average_color(&png(&img)).unwrap();
        assert_eq!(color.to_hex(), "#0000ff");
    }

    #[test]
    fn test_tiny_image_is_sampled() {
        let img: RgbaImage = ImageBuffer::from_pixel(1, 1, Rgba([10, 20, 30, 255]));
        let color = average_color(&png(&img)).unwrap();
        assert_eq!(color.to_rgb8(), crate::models::RgbColor::new(10, 20, 30));
    }

    #[test]
    fn test_base64_input() {
        let encoded = BASE64.encode(solid(0, 128, 0));
        let color = average_color(encoded.as_bytes()).unwrap();
        assert_eq!(color.to_hex(), "#008000");
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = average_color(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::ImageDecode { .. }));
        assert!(matches!(average_color(b"").unwrap_err(), Error::ImageDecode { .. }));
    }

    #[test]
    fn test_all_white_is_decode_error() {
        let err = average_color(&solid(255, 255, 255)).unwrap_err();
        assert!(matches!(err, Error::ImageDecode { .. }));
    }
}
