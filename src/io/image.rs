//! Image loading, validation, resizing, and export

use crate::io::error::{EffectError, Result, invalid_source};
use image::imageops::FilterType;
use image::{ImageReader, RgbImage, imageops};
use std::path::Path;

/// Load an image file and convert it to 8-bit RGB
///
/// Alpha channels are dropped; palette and grayscale inputs are expanded.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded, or if the
/// decoded image has zero area.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let reader = ImageReader::open(path).map_err(|e| EffectError::FileSystem {
        path: path.to_path_buf(),
        operation: "open image",
        source: e,
    })?;
    let decoded = reader.decode().map_err(|e| EffectError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let image = decoded.to_rgb8();
    validate_shape(&image)?;
    Ok(image)
}

/// Reject images no engine can work with
///
/// # Errors
///
/// Returns an error for zero-area images.
pub fn validate_shape(image: &RgbImage) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(invalid_source(&format!(
            "image has zero area ({}x{})",
            image.width(),
            image.height()
        )));
    }
    Ok(())
}

/// Scale an image so its longer side equals `target` pixels
///
/// Small inputs are scaled up; the effects are tuned for canvases in the
/// few-thousand-pixel range and produce sparse output on tiny images.
pub fn resize_long_side(image: &RgbImage, target: u32) -> RgbImage {
    let long_side = image.width().max(image.height());
    if long_side == 0 || long_side == target {
        return image.clone();
    }
    let scale = f64::from(target) / f64::from(long_side);
    let width = ((f64::from(image.width()) * scale).round() as u32).max(1);
    let height = ((f64::from(image.height()) * scale).round() as u32).max(1);
    imageops::resize(image, width, height, FilterType::Triangle)
}

/// Save the result image, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if a parent directory cannot be created or the image
/// cannot be encoded to the target path.
pub fn save_image(image: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| EffectError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    image.save(path).map_err(|e| EffectError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}
