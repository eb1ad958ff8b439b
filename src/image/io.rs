//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, OwnedImage};
use crate::util::{ImgSearchError, ImgSearchResult};
use std::path::Path;

/// Channel layout requested when decoding a file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Single-channel luma.
    #[default]
    Gray,
    /// Three interleaved channels (R, G, B).
    Rgb,
}

/// Creates a borrowed single-channel view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> ImgSearchResult<ImageView<'_, u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageView::from_slice(img.as_raw(), width, height)
}

/// Creates a borrowed three-channel view from an RGB image buffer.
pub fn view_from_rgb_image(img: &image::RgbImage) -> ImgSearchResult<ImageView<'_, u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageView::with_channels(img.as_raw(), width, height, 3)
}

/// Converts a dynamic image into an owned buffer with the requested layout.
pub fn owned_from_dynamic_image(
    img: &image::DynamicImage,
    mode: ColorMode,
) -> ImgSearchResult<OwnedImage<u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    match mode {
        ColorMode::Gray => OwnedImage::new(img.to_luma8().into_raw(), width, height, 1),
        ColorMode::Rgb => OwnedImage::new(img.to_rgb8().into_raw(), width, height, 3),
    }
}

/// Loads an image from disk with the requested channel layout.
pub fn load_image<P: AsRef<Path>>(path: P, mode: ColorMode) -> ImgSearchResult<OwnedImage<u8>> {
    let img = image::open(path).map_err(|err| ImgSearchError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img, mode)
}

/// Loads an image from disk and converts it to grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> ImgSearchResult<OwnedImage<u8>> {
    load_image(path, ColorMode::Gray)
}

/// Loads an image from disk and converts it to RGB.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> ImgSearchResult<OwnedImage<u8>> {
    load_image(path, ColorMode::Rgb)
}
