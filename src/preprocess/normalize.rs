//! Image preprocessing for the leaf classifier.
//!
//! Decodes image bytes (PNG/JPEG/BMP/GIF), forces RGB, resizes to the
//! classifier's square input with Lanczos3 and rescales pixels into [-1, 1].

use image::imageops::{self, FilterType};
use tracing::debug;

use crate::constants::{IMAGE_CHANNELS, IMAGE_SIZE};
use crate::error::{Error, Result};
use crate::preprocess::tensor::ImageTensor;

/// Turns raw image bytes into the `(1, 128, 128, 3)` tensor the classifier
/// consumes.
///
/// Steps: decode, convert to RGB8, resize (Lanczos3), divide by 255, apply
/// `(x - 0.5) * 2`, add the batch dimension. Identical bytes always give a
/// bit-identical tensor.
pub fn normalize(bytes: &[u8]) -> Result<ImageTensor> {
    normalize_to(bytes, IMAGE_SIZE)
}

/// Same as [`normalize`] with an explicit square side length.
pub fn normalize_to(bytes: &[u8], size: u32) -> Result<ImageTensor> {
    if bytes.is_empty() {
        return Err(Error::InvalidImage("empty upload".into()));
    }
    let img = image::load_from_memory(bytes)?;
    debug!(width = img.width(), height = img.height(), color = ?img.color(), "decoded image");

    // Must match the resize filter used when the model was trained.
    let rgb = img.to_rgb8();
    let resized = imageops::resize(&rgb, size, size, FilterType::Lanczos3);

    let data: Vec<f32> = resized
        .pixels()
        .flat_map(|p| p.0.iter().map(|&c| (c as f32 / 255.0 - 0.5) * 2.0))
        .collect();

    let side = size as usize;
    let tensor = ImageTensor::new([1, side, side, IMAGE_CHANNELS], data)?;
    tensor.check_range()?;
    Ok(tensor)
}
