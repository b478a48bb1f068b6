//! Halftone dot grid
//!
//! Walks the image in fixed-size blocks and draws one filled black dot per
//! block on a white canvas, sized by how dark the block is on average.

use crate::io::configuration::{DOT_GRID_STEP, DOT_MAX_RADIUS};
use crate::io::progress::ProgressSink;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

/// Render the halftone dot effect
pub fn dots(source: &RgbImage, progress: &mut dyn ProgressSink) -> RgbImage {
    let width = source.width();
    let height = source.height();
    let step = DOT_GRID_STEP;

    let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

    for y in (0..height).step_by(step as usize) {
        for x in (0..width).step_by(step as usize) {
            let mean = block_mean(source, x, y, step);
            let radius = ((255.0 - mean) / 255.0 * DOT_MAX_RADIUS) as i32;
            if radius > 0 {
                let cx = (x + step / 2) as i32;
                let cy = (y + step / 2) as i32;
                draw_filled_circle_mut(&mut canvas, (cx, cy), radius, Rgb([0, 0, 0]));
            }
        }
        progress.update(u64::from(y), u64::from(height));
    }

    progress.update(u64::from(height), u64::from(height));
    progress.finished();
    canvas
}

/// Mean intensity of a block clipped to the image bounds
fn block_mean(source: &RgbImage, x0: u32, y0: u32, step: u32) -> f64 {
    let x1 = (x0 + step).min(source.width());
    let y1 = (y0 + step).min(source.height());

    let mut sum = 0.0;
    let mut count = 0u32;
    for y in y0..y1 {
        for x in x0..x1 {
            let pixel = source.get_pixel(x, y);
            sum += (f64::from(pixel[0]) + f64::from(pixel[1]) + f64::from(pixel[2])) / 3.0;
            count += 1;
        }
    }
    if count == 0 { 255.0 } else { sum / f64::from(count) }
}
