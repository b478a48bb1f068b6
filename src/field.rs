//! Scalar working field derived from image luminance
//!
//! Each engine that consumes a [`DarknessField`] owns it exclusively for the
//! duration of the run and mutates it in place as a visited-region marker:
//! the scribble tracer brightens cleared discs toward 255 (exhausted), the
//! triangulator zeroes consumed neighborhoods. This destructive bookkeeping
//! is the mechanism that prevents revisiting the same area, so the field is
//! always a copy, never an alias of the source pixels.

use crate::io::configuration::FIELD_CEILING;
use crate::math::color::mean_luma;
use image::{GrayImage, Luma};
use imageproc::contrast::equalize_histogram;
use imageproc::drawing::draw_filled_circle_mut;

/// A 2-D intensity grid aligned 1:1 with the source image pixels
#[derive(Debug, Clone)]
pub struct DarknessField {
    grid: GrayImage,
}

impl DarknessField {
    /// Luminance with values above [`FIELD_CEILING`] capped
    ///
    /// The cap keeps near-white regions below the exhausted marker (255) so
    /// the initial search never permanently ignores them. Used by the mono
    /// scribble, where low values are dark and attractive.
    pub fn from_luma_capped(gray: &GrayImage) -> Self {
        let mut grid = gray.clone();
        for pixel in grid.pixels_mut() {
            pixel[0] = pixel[0].min(FIELD_CEILING);
        }
        Self { grid }
    }

    /// Inverted luminance (`255 - v`) with the same ceiling applied
    ///
    /// Used by the color scribble; after inversion the capped values are the
    /// regions the tracer seeks out last.
    pub fn inverted_capped(gray: &GrayImage) -> Self {
        let mut grid = gray.clone();
        for pixel in grid.pixels_mut() {
            pixel[0] = (255 - pixel[0]).min(FIELD_CEILING);
        }
        Self { grid }
    }

    /// Histogram-equalized luminance linearly compressed to roughly 2..=251
    ///
    /// The triangulator marks consumed neighborhoods with 0 and treats values
    /// below 2 as consumed, so the compression keeps headroom at both ends.
    pub fn equalized_compressed(gray: &GrayImage) -> Self {
        let mut grid = equalize_histogram(gray);
        for pixel in grid.pixels_mut() {
            pixel[0] = f64::from(pixel[0]).mul_add(0.98, 2.0) as u8;
        }
        Self { grid }
    }

    /// Field width in pixels
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Field height in pixels
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Value at `(x, y)`, or `None` outside the field
    pub fn sample(&self, x: i64, y: i64) -> Option<u8> {
        if x < 0 || y < 0 {
            return None;
        }
        self.grid
            .get_pixel_checked(x as u32, y as u32)
            .map(|p| p[0])
    }

    /// Value at an in-bounds coordinate
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.grid.get_pixel(x, y)[0]
    }

    /// Paint a filled disc of `value`, clipped to the field bounds
    pub fn paint_disc(&mut self, cx: i32, cy: i32, radius: i32, value: u8) {
        if radius <= 0 {
            if cx >= 0 && cy >= 0 {
                if let Some(pixel) = self.grid.get_pixel_mut_checked(cx as u32, cy as u32) {
                    pixel[0] = value;
                }
            }
            return;
        }
        draw_filled_circle_mut(&mut self.grid, (cx, cy), radius, Luma([value]));
    }

    /// Mean field value
    pub fn mean(&self) -> f64 {
        mean_luma(&self.grid)
    }
}
