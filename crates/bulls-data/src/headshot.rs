//! Player headshot decoding.

use bulls_common::Result;
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

/// Default headshot size in pixels.
pub const DEFAULT_HEADSHOT_SIZE: (u32, u32) = (300, 300);

/// Fill color of the placeholder used when a headshot is unavailable.
pub const PLACEHOLDER_GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);

/// Decode encoded image bytes and resize them to exactly `size`.
pub fn decode_headshot(bytes: &[u8], size: (u32, u32)) -> Result<RgbaImage> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(decoded
        .resize_exact(size.0, size.1, FilterType::Lanczos3)
        .to_rgba8())
}

/// Solid gray stand-in of the requested size.
#[must_use]
pub fn placeholder(size: (u32, u32)) -> RgbaImage {
    RgbaImage::from_pixel(size.0, size.1, PLACEHOLDER_GRAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([206, 17, 65, 255]));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageOutputFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_decode_and_resize() {
        let img = decode_headshot(&png_bytes(104, 76), DEFAULT_HEADSHOT_SIZE).unwrap();
        assert_eq!(img.dimensions(), (300, 300));
        assert!((i32::from(img.get_pixel(150, 150)[0]) - 206).abs() <= 1);
    }

    #[test]
    fn test_garbage_bytes_fail() {
        assert!(decode_headshot(b"not an image", (10, 10)).is_err());
    }

    #[test]
    fn test_placeholder() {
        let img = placeholder((20, 10));
        assert_eq!(img.dimensions(), (20, 10));
        assert_eq!(*img.get_pixel(5, 5), PLACEHOLDER_GRAY);
    }
}
