//! Advancing-front circle packing
//!
//! Grows a non-overlapping circle pattern outward from a random seed point.
//! The circle list doubles as the growth front: circles are appended in
//! insertion order and swept once each by a moving cursor, spawning children
//! around themselves where clearance allows. Old, fully surrounded circles
//! are pruned from the list so the neighbor scan stays cheap on large
//! canvases.

use crate::io::configuration::{
    AREA_PER_CIRCLE, CIRCLES_BACKGROUND_SCALE, CIRCLE_SWEEP_STEP_DEG, DEFAULT_CIRCLE_RADIUS,
    DEFAULT_PACKING_FACTOR, PRUNE_AGE_WINDOW, PRUNE_INTERVAL,
};
use crate::io::progress::ProgressSink;
use crate::math::color::{mean_rgb, scale_rgb};
use crate::math::tables::AngleTables;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};
use rand::Rng;

/// Concentric shading layers: fraction of the base radius paired with the
/// brightness multiplier applied to the sampled source color, outer first
const SHADING_LAYERS: [(f64, f64); 5] = [
    (1.0, 0.75),
    (0.85, 0.85),
    (0.70, 0.90),
    (0.60, 0.95),
    (0.40, 1.0),
];

/// Brightness multiplier for the 1-px outline around every circle
const OUTLINE_SCALE: f64 = 0.5;

/// One placed circle
///
/// `active` marks circles whose neighborhood has not yet been swept for
/// room to place children; it flips to false exactly once. `birth_index`
/// is the cursor position of the parent at spawn time and is used only
/// for pruning, never for geometry.
#[derive(Debug, Clone, Copy)]
pub struct Circle {
    /// Center x in pixels
    pub x: i32,
    /// Center y in pixels
    pub y: i32,
    /// Radius in pixels
    pub radius: i32,
    /// Whether this circle can still spawn children
    pub active: bool,
    /// Cursor position of the spawning parent (0 for the seed)
    pub birth_index: usize,
}

/// Parameters for the circle packing engine
#[derive(Debug, Clone, Copy)]
pub struct CirclesConfig {
    /// Clearance multiplier tested against the available radius at a
    /// candidate site; must be >= 1.0
    pub packing_factor: f64,
    /// Radius of every circle, in pixels
    pub radius: i32,
    /// Shade circles with concentric brightness layers instead of a flat fill
    pub smooth_shading: bool,
}

impl Default for CirclesConfig {
    fn default() -> Self {
        Self {
            packing_factor: DEFAULT_PACKING_FACTOR,
            radius: DEFAULT_CIRCLE_RADIUS,
            smooth_shading: true,
        }
    }
}

/// Circle packing state, exposed for inspection in tests
pub struct CirclePacker<'a> {
    source: &'a RgbImage,
    canvas: RgbImage,
    circles: Vec<Circle>,
    config: CirclesConfig,
    placed: usize,
}

impl<'a> CirclePacker<'a> {
    /// Initialize the canvas and seed the growth front
    ///
    /// The seed circle lands at a random point within the central half of
    /// the image.
    pub fn new<R: Rng>(source: &'a RgbImage, config: CirclesConfig, rng: &mut R) -> Self {
        let width = source.width() as i32;
        let height = source.height() as i32;

        let [r, g, b] = mean_rgb(source);
        let background = scale_rgb(
            Rgb([r.round() as u8, g.round() as u8, b.round() as u8]),
            CIRCLES_BACKGROUND_SCALE,
        );
        let canvas = RgbImage::from_pixel(source.width(), source.height(), background);

        let seed_x = rng.random_range(0..(width / 2).max(1)) + width / 4;
        let seed_y = rng.random_range(0..(height / 2).max(1)) + height / 4;
        let seed = Circle {
            x: seed_x,
            y: seed_y,
            radius: config.radius,
            active: true,
            birth_index: 0,
        };

        Self {
            source,
            canvas,
            circles: vec![seed],
            config,
            placed: 0,
        }
    }

    /// Run the growth front to completion
    ///
    /// Terminates when the cursor reaches the end of the (shrinking) list.
    pub fn run<R: Rng>(&mut self, rng: &mut R, progress: &mut dyn ProgressSink) {
        let width = self.source.width() as i32;
        let height = self.source.height() as i32;
        let radius = self.config.radius;
        let clearance = f64::from(radius) * self.config.packing_factor;

        // Offsets from a parent center to its candidate sites
        let tables =
            AngleTables::scaled(2.0 * self.config.packing_factor * f64::from(radius));
        let search_window = 2 * radius;

        let area = f64::from(width) * f64::from(height);
        let estimate = (area / AREA_PER_CIRCLE).max(1.0) as u64;

        let mut cursor = 0usize;
        let mut processed = 0usize;

        while cursor < self.circles.len() {
            if processed % 10 == 0 {
                progress.update(self.placed as u64, estimate);
            }
            processed += 1;

            let current = self.circles[cursor];
            if current.active {
                let phase = rng.random_range(0..360i32);
                for sweep in (0..360).step_by(CIRCLE_SWEEP_STEP_DEG) {
                    let angle = phase + sweep;
                    let tx = (f64::from(current.x) + tables.cos(angle)) as i32;
                    let ty = (f64::from(current.y) + tables.sin(angle)) as i32;

                    // Candidates outside the canvas are skipped, not errors
                    if tx < 0 || tx >= width || ty < 0 || ty >= height {
                        continue;
                    }

                    let Some(available) = self.available_radius(tx, ty, search_window) else {
                        // Inside an existing circle
                        continue;
                    };
                    if f64::from(available) >= clearance {
                        self.circles.push(Circle {
                            x: tx,
                            y: ty,
                            radius,
                            active: true,
                            birth_index: cursor,
                        });
                        self.placed += 1;
                        self.render_circle(tx, ty);
                    }
                }
                self.circles[cursor].active = false;
            }

            if cursor % PRUNE_INTERVAL == 0 {
                cursor = cursor.saturating_sub(self.prune(cursor));
            }
            cursor += 1;
        }

        progress.update(self.placed as u64, estimate);
        progress.finished();
    }

    /// Largest radius available at `(x, y)` given the circles within a
    /// square window of `window` pixels
    ///
    /// Returns `None` when the point lies inside an existing circle. With no
    /// neighbor inside the window the base radius itself is reported, which
    /// the caller's clearance test then rejects.
    fn available_radius(&self, x: i32, y: i32, window: i32) -> Option<i32> {
        let mut smallest: Option<f64> = None;

        for circle in &self.circles {
            let dx = x - circle.x;
            if dx > window || dx < -window {
                continue;
            }
            let dy = y - circle.y;
            if dy > window || dy < -window {
                continue;
            }

            let distance = f64::from(dx * dx + dy * dy).sqrt() - f64::from(circle.radius);
            if distance <= 0.0 {
                return None;
            }
            smallest = Some(smallest.map_or(distance, |s: f64| s.min(distance)));
        }

        Some(smallest.map_or(self.config.radius, |s| s as i32))
    }

    /// Drop inactive circles born more than [`PRUNE_AGE_WINDOW`] positions
    /// before the cursor; returns how many removals happened at or before
    /// the cursor so the caller can keep its logical position
    ///
    /// Circles that old and already swept are fully surrounded and can no
    /// longer influence placement inside the bounded search window.
    fn prune(&mut self, cursor: usize) -> usize {
        let cutoff = cursor.saturating_sub(PRUNE_AGE_WINDOW);
        let mut index = 0usize;
        let mut removed_before_cursor = 0usize;

        self.circles.retain(|circle| {
            let stale = !circle.active && circle.birth_index < cutoff;
            if stale && index <= cursor {
                removed_before_cursor += 1;
            }
            index += 1;
            !stale
        });

        removed_before_cursor
    }

    /// Draw one circle onto the canvas, colored from the source pixel at
    /// its center
    fn render_circle(&mut self, x: i32, y: i32) {
        let base = *self.source.get_pixel(x as u32, y as u32);
        let radius = self.config.radius;

        if self.config.smooth_shading {
            for (radius_fraction, brightness) in SHADING_LAYERS {
                draw_filled_circle_mut(
                    &mut self.canvas,
                    (x, y),
                    (f64::from(radius) * radius_fraction) as i32,
                    scale_rgb(base, brightness),
                );
            }
        } else {
            draw_filled_circle_mut(&mut self.canvas, (x, y), radius, base);
        }
        draw_hollow_circle_mut(&mut self.canvas, (x, y), radius, scale_rgb(base, OUTLINE_SCALE));
    }

    /// Circles currently in the list (survivors of pruning)
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    /// Total circles placed, excluding the seed
    pub const fn placed(&self) -> usize {
        self.placed
    }

    /// Consume the packer, yielding the rendered canvas
    pub fn into_canvas(self) -> RgbImage {
        self.canvas
    }
}

/// Pack circles over the source image and return the rendered canvas
pub fn pack<R: Rng>(
    source: &RgbImage,
    config: CirclesConfig,
    rng: &mut R,
    progress: &mut dyn ProgressSink,
) -> RgbImage {
    let mut packer = CirclePacker::new(source, config, &mut *rng);
    packer.run(rng, progress);
    packer.into_canvas()
}
