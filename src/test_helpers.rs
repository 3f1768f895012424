//! Shared test utilities for the poster-gal test suite.
//!
//! Provides synthetic image writers (JPEG, PNG with and without alpha,
//! indexed-color PNG) and small filesystem helpers for building working
//! directories.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let work = TempDir::new().unwrap();
//! create_test_png(&work.path().join("poster.png"), 1190, 1684, true);
//! touch(work.path(), "__Event.jpg");
//! ```

use image::{ExtendedColorType, ImageEncoder, RgbImage, RgbaImage};
use std::path::Path;

// =========================================================================
// Synthetic images
// =========================================================================

/// Write a small gradient JPEG with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a gradient PNG, RGBA with a varying alpha channel when `alpha` is set.
pub fn create_test_png(path: &Path, width: u32, height: u32, alpha: bool) {
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    let encoder = image::codecs::png::PngEncoder::new(writer);
    if alpha {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 200, ((x + y) % 256) as u8])
        });
        encoder
            .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
            .unwrap();
    } else {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 64])
        });
        encoder
            .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
            .unwrap();
    }
}

/// Write an indexed-color (palette) PNG with a transparent palette entry.
///
/// The `image` encoders only produce truecolor PNGs, so this goes through
/// the `png` encoder directly.
pub fn create_test_palette_png(path: &Path, width: u32, height: u32) {
    let mut indices = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            indices.push(((x / 8 + y / 8) % 3) as u8);
        }
    }

    let file = std::fs::File::create(path).unwrap();
    let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(vec![255, 0, 0, 0, 0, 255, 0, 255, 0]);
    encoder.set_trns(vec![255, 255, 0]);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&indices).unwrap();
    writer.finish().unwrap();
}

// =========================================================================
// Filesystem helpers
// =========================================================================

/// Create an empty file named `name` inside `dir`.
pub fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), b"").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_png_decodes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("palette.png");
        create_test_palette_png(&path, 20, 28);

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (20, 28));
        // tRNS makes the expanded palette image carry alpha
        assert!(img.color().has_alpha());
    }

    #[test]
    fn palette_png_is_indexed_on_disk() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("palette.png");
        create_test_palette_png(&path, 16, 16);

        let decoder = png::Decoder::new(std::fs::File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().color_type, png::ColorType::Indexed);
    }
}
