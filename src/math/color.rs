//! Pixel color scaling and averaging helpers

use image::{GrayImage, Rgb, RgbImage};

/// Multiply every channel by `factor`, saturating into 0..=255
///
/// Brightness sums never raise an error; they clamp.
pub fn scale_rgb(color: Rgb<u8>, factor: f64) -> Rgb<u8> {
    let scale = |c: u8| (f64::from(c) * factor).round().clamp(0.0, 255.0) as u8;
    Rgb([scale(color[0]), scale(color[1]), scale(color[2])])
}

/// Per-channel mean color over the whole image
pub fn mean_rgb(image: &RgbImage) -> [f64; 3] {
    let mut sums = [0.0f64; 3];
    for pixel in image.pixels() {
        sums[0] += f64::from(pixel[0]);
        sums[1] += f64::from(pixel[1]);
        sums[2] += f64::from(pixel[2]);
    }
    let count = (image.width() * image.height()).max(1) as f64;
    [sums[0] / count, sums[1] / count, sums[2] / count]
}

/// Mean intensity over a grayscale image
pub fn mean_luma(image: &GrayImage) -> f64 {
    let sum: f64 = image.pixels().map(|p| f64::from(p[0])).sum();
    sum / ((image.width() * image.height()).max(1) as f64)
}

/// Mean of the three per-channel means, as a single gray level
pub fn mean_gray(image: &RgbImage) -> f64 {
    let [r, g, b] = mean_rgb(image);
    (r + g + b) / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_rgb_saturates() {
        assert_eq!(scale_rgb(Rgb([200, 10, 0]), 2.0), Rgb([255, 20, 0]));
        assert_eq!(scale_rgb(Rgb([100, 100, 100]), 0.5), Rgb([50, 50, 50]));
    }

    #[test]
    fn test_mean_rgb_uniform() {
        let image = RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]));
        let [r, g, b] = mean_rgb(&image);
        assert!((r - 10.0).abs() < 1e-12);
        assert!((g - 20.0).abs() < 1e-12);
        assert!((b - 30.0).abs() < 1e-12);
        assert!((mean_gray(&image) - 20.0).abs() < 1e-12);
    }
}
