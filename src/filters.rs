//! Optional preprocessing filters applied before an engine runs

use crate::io::configuration::SOFTEN_SIGMA;
use image::{GrayImage, RgbImage};
use imageproc::filter::{filter3x3, gaussian_blur_f32};
use rand::Rng;

/// Center-weighted 3x3 sharpening kernel with negative cross taps; sums
/// to 1 so flat regions pass through unchanged
const SHARPEN_KERNEL: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

/// Gaussian blur used to calm high-frequency detail ahead of an effect
pub fn soften(source: &RgbImage) -> RgbImage {
    gaussian_blur_f32(source, SOFTEN_SIGMA)
}

/// 3x3 sharpening convolution over all three channels
pub fn sharpen(source: &RgbImage) -> RgbImage {
    filter3x3(source, &SHARPEN_KERNEL)
}

/// Add zero-mean uniform dither of +/- `amount / 2` to a grayscale image
///
/// The scribble tracer can stall on large flat-color areas where every
/// direction looks equally attractive; a little noise breaks the ties.
pub fn dither_grayscale<R: Rng>(source: &GrayImage, amount: u8, rng: &mut R) -> GrayImage {
    if amount == 0 {
        return source.clone();
    }
    let half = i16::from(amount) / 2;
    let mut result = source.clone();
    for pixel in result.pixels_mut() {
        let noise = rng.random_range(0..i16::from(amount)) - half;
        pixel[0] = (i16::from(pixel[0]) + noise).clamp(0, 255) as u8;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_dither_stays_in_range_and_near_mean() {
        let source = GrayImage::from_pixel(32, 32, image::Luma([128]));
        let mut rng = StdRng::seed_from_u64(7);
        let dithered = dither_grayscale(&source, 10, &mut rng);

        let mut sum = 0.0;
        for pixel in dithered.pixels() {
            assert!(pixel[0] >= 118 && pixel[0] <= 138);
            sum += f64::from(pixel[0]);
        }
        let mean = sum / 1024.0;
        assert!((mean - 128.0).abs() < 2.0, "dither should be near zero-mean");
    }

    #[test]
    fn test_sharpen_preserves_flat_color_regions() {
        let source = RgbImage::from_pixel(16, 16, image::Rgb([90, 140, 30]));
        let sharpened = sharpen(&source);

        assert_eq!(sharpened.dimensions(), (16, 16));
        // Kernel sums to 1, so a uniform image is a fixed point
        assert_eq!(*sharpened.get_pixel(8, 8), image::Rgb([90, 140, 30]));
    }

    #[test]
    fn test_zero_amount_is_identity() {
        let source = GrayImage::from_pixel(8, 8, image::Luma([50]));
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(dither_grayscale(&source, 0, &mut rng), source);
    }
}
