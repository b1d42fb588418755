use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::{EmojifyError, Result};

/// Downsample `photo` so it fits within `max_width` × `max_height`.
///
/// The aspect ratio is preserved and photos that already fit are returned
/// unchanged; this never upscales. Run detection on the resampled photo so
/// face coordinates match the image that gets composited.
pub fn fit_within(photo: &RgbaImage, max_width: u32, max_height: u32) -> Result<RgbaImage> {
    if max_width == 0 || max_height == 0 {
        return Err(EmojifyError::InvalidViewport);
    }

    let (src_w, src_h) = photo.dimensions();
    if src_w <= max_width && src_h <= max_height {
        return Ok(photo.clone());
    }

    let scale = (max_width as f64 / src_w as f64).min(max_height as f64 / src_h as f64);
    let new_w = ((src_w as f64 * scale).round() as u32).clamp(1, max_width);
    let new_h = ((src_h as f64 * scale).round() as u32).clamp(1, max_height);

    tracing::debug!(src_w, src_h, new_w, new_h, "resampling photo for viewport");
    Ok(imageops::resize(photo, new_w, new_h, FilterType::Triangle))
}
