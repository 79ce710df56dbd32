//! Input preprocessing for the classifier
//!
//! Decodes arbitrary uploaded bytes into the fixed-shape tensor the model
//! serves on. Do not use these functions to load images for any other
//! purpose.

use image::imageops::FilterType;
use ndarray::{Array, Dim};

use diascreen_common::{Error, Result};

/// Model input edge length in pixels
pub const IMAGE_INPUT_SIZE: usize = 224;

/// Decode uploaded bytes into a `[1, 224, 224, 3]` float tensor in `[0, 1]`.
///
/// Resizing is bilinear and ignores the source aspect ratio, so the output
/// shape never depends on the source resolution. Channel values scale from
/// `[0, 255]` to `[0.0, 1.0]`. Bytes that do not decode as an image fail
/// with `UnsupportedImage`.
pub fn normalize(raw_bytes: &[u8]) -> Result<Array<f32, Dim<[usize; 4]>>> {
    let img = image::load_from_memory(raw_bytes)
        .map_err(|e| Error::UnsupportedImage(e.to_string()))?;

    let img = img
        .resize_exact(
            IMAGE_INPUT_SIZE as u32,
            IMAGE_INPUT_SIZE as u32,
            FilterType::Triangle,
        )
        .to_rgb8();

    // NHWC layout, matching the model's serving signature
    let mut input = Array::zeros((1, IMAGE_INPUT_SIZE, IMAGE_INPUT_SIZE, 3));
    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        input[[0, y as usize, x as usize, 0]] = (r as f32) / 255.;
        input[[0, y as usize, x as usize, 1]] = (g as f32) / 255.;
        input[[0, y as usize, x as usize, 2]] = (b as f32) / 255.;
    }

    Ok(input)
}
