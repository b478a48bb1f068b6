//! Greedy directional scribble tracing
//!
//! Traces one continuous path across the canvas, greedily steering toward
//! the most attractive (lowest) value in a working field derived from the
//! source luminance. Every accepted target is cleared from the field by
//! painting a brightened disc over it, so the tracer never farms the same
//! region twice. The path is rendered as short interpolated curves of line
//! segments.
//!
//! Mono mode works on the equalized luminance directly (dark pixels are
//! attractive) and draws a fixed line color on white. Color mode inverts
//! the luminance and re-samples each segment's color from the unmodified
//! source, drawing on black.

use crate::field::DarknessField;
use crate::filters::dither_grayscale;
use crate::io::configuration::{
    CLEARING_BRIGHTEN, CLEARING_RADIUS_DIVISOR, CURVE_STEP_SPEED, CURVE_SUB_STEPS,
    PROGRESS_UPDATE_INTERVAL, SCRIBBLE_BUDGET_DIVISOR, SEARCH_STEP_DEG, SEARCH_WINDOW_DEG,
};
use crate::io::progress::ProgressSink;
use crate::math::tables::AngleTables;
use image::{Rgb, RgbImage, imageops};
use imageproc::contrast::equalize_histogram;
use imageproc::drawing::draw_line_segment_mut;
use rand::Rng;

/// Which scribble variant to trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScribbleMode {
    /// Fixed black line on a white background, following dark regions of
    /// the equalized luminance
    Mono,
    /// Source-sampled line colors on a black background, following the
    /// inverted luminance
    Color,
}

/// Parameters for the scribble tracer
#[derive(Debug, Clone, Copy)]
pub struct ScribbleConfig {
    /// Variant to trace
    pub mode: ScribbleMode,
    /// Optional dither amplitude applied to the working luminance before
    /// equalization; helps on images with large flat-color areas
    pub dither: Option<u8>,
}

/// What a trace run did
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceSummary {
    /// Curves actually drawn
    pub curves: usize,
    /// Whether the run terminated because the field was exhausted
    pub early_stop: bool,
    /// Accepted targets that had to be clamped back into bounds
    pub clamped_targets: usize,
}

/// Continuous pen state between curves
#[derive(Debug, Clone, Copy)]
struct PathCursor {
    x: f64,
    y: f64,
    /// Heading in degrees; fractional while interpolating
    heading: f64,
}

/// Result of one direction search
enum SearchOutcome {
    /// Angle, target point, and the field value found there
    Found {
        heading: f64,
        target: (i64, i64),
        darkest: u8,
    },
    /// The widening search outgrew the canvas: the field is exhausted
    Exhausted,
}

/// Trace a scribble over the source image
///
/// Runs until the empirical curve budget is spent or the field is
/// exhausted, whichever comes first.
pub fn trace<R: Rng>(
    source: &RgbImage,
    config: ScribbleConfig,
    rng: &mut R,
    progress: &mut dyn ProgressSink,
) -> (RgbImage, TraceSummary) {
    let width = source.width();
    let height = source.height();

    let mut gray = imageops::grayscale(source);
    if let Some(amount) = config.dither {
        gray = dither_grayscale(&gray, amount, rng);
    }

    let (mut field, background, line_color) = match config.mode {
        ScribbleMode::Mono => (
            DarknessField::from_luma_capped(&equalize_histogram(&gray)),
            Rgb([255, 255, 255]),
            Rgb([0, 0, 0]),
        ),
        ScribbleMode::Color => (
            DarknessField::inverted_capped(&gray),
            Rgb([0, 0, 0]),
            Rgb([0, 0, 0]),
        ),
    };

    let mut canvas = RgbImage::from_pixel(width, height, background);

    // Empirical budget; the tracer is expected to exhaust the field and
    // stop early well before spending it on most images
    let area = f64::from(width) * f64::from(height);
    let budget = (area * (255.0 - field.mean()) / SCRIBBLE_BUDGET_DIVISOR) as usize;

    let tables = AngleTables::unit();
    let mut cursor = PathCursor {
        x: f64::from(rng.random_range(0..width)),
        y: f64::from(rng.random_range(0..height)),
        heading: 0.0,
    };
    // First search distance; later searches look one curve length ahead
    let mut travel_distance = 20.0;

    let mut summary = TraceSummary::default();

    for t in 0..budget {
        if t % PROGRESS_UPDATE_INTERVAL == 0 {
            progress.update(t as u64, budget as u64);
        }

        let (heading, target, darkest) =
            match search_direction(&field, &tables, cursor, travel_distance) {
                SearchOutcome::Found {
                    heading,
                    target,
                    darkest,
                } => (heading, target, darkest),
                SearchOutcome::Exhausted => {
                    summary.early_stop = true;
                    break;
                }
            };

        // An accepted target always sampled in bounds, but keep a defined
        // fallback: clamp rather than chase undefined state
        let (tx, ty) = target;
        let clamped = (
            tx.clamp(0, i64::from(width) - 1),
            ty.clamp(0, i64::from(height) - 1),
        );
        if clamped != target {
            summary.clamped_targets += 1;
        }

        clear_target(&mut field, clamped, darkest);

        draw_curve(
            &mut canvas,
            source,
            &tables,
            &mut cursor,
            heading,
            config.mode,
            line_color,
        );
        summary.curves += 1;

        // Distance the next search should look ahead
        travel_distance = CURVE_STEP_SPEED * CURVE_SUB_STEPS as f64 * 1.7;
    }

    progress.update(budget as u64, budget as u64);
    progress.finished();

    (canvas, summary)
}

/// Scan an angular cone ahead of the cursor for the lowest field value,
/// widening the cone and reach until something non-exhausted turns up
///
/// The widening is capped by the canvas extent: once the search distance
/// exceeds the larger image dimension nothing is left to find.
fn search_direction(
    field: &DarknessField,
    tables: &AngleTables,
    cursor: PathCursor,
    initial_distance: f64,
) -> SearchOutcome {
    let extent = f64::from(field.width().max(field.height()));

    let mut step = SEARCH_STEP_DEG;
    let mut distance = initial_distance;
    let mut window = SEARCH_WINDOW_DEG;

    loop {
        let mut darkest: u8 = 255;
        let mut heading = cursor.heading;
        let mut target = (cursor.x as i64, cursor.y as i64);

        let mut a = 0;
        while a < window {
            let angle = (cursor.heading + f64::from(a) - f64::from(window) / 2.0) as i32;
            let tx = tables.cos(angle).mul_add(distance, cursor.x) as i64;
            let ty = tables.sin(angle).mul_add(distance, cursor.y) as i64;
            let value = field.sample(tx, ty).unwrap_or(255);

            if value <= darkest {
                darkest = value;
                heading = f64::from(angle);
                target = (tx, ty);
            }
            a += step;
        }

        if darkest < 255 {
            return SearchOutcome::Found {
                heading,
                target,
                darkest,
            };
        }

        // Nothing usable: tighten the angular step, look further, and open
        // the cone
        if step > 1 {
            step -= 1;
        }
        distance += 2.0;
        window = (window + 1).min(360);

        if distance > extent {
            return SearchOutcome::Exhausted;
        }
    }
}

/// Mark the accepted target as visited by painting a brightened disc over
/// it in the field
fn clear_target(field: &mut DarknessField, target: (i64, i64), darkest: u8) {
    let sum = u16::from(darkest) + CLEARING_BRIGHTEN;
    // Radius derives from the unclamped sum, matching the tuned behavior
    let radius = i32::from(sum) / CLEARING_RADIUS_DIVISOR;
    let value = sum.min(255) as u8;
    field.paint_disc(target.0 as i32, target.1 as i32, radius, value);
}

/// Advance the cursor toward `new_heading` over fixed sub-steps, drawing a
/// line segment per sub-step
///
/// In color mode each segment re-samples the unmodified source at the
/// current sub-position; out-of-bounds sub-positions keep the last color.
fn draw_curve(
    canvas: &mut RgbImage,
    source: &RgbImage,
    tables: &AngleTables,
    cursor: &mut PathCursor,
    new_heading: f64,
    mode: ScribbleMode,
    fixed_color: Rgb<u8>,
) {
    let width = source.width();
    let height = source.height();

    let heading_step = (new_heading - cursor.heading) / CURVE_SUB_STEPS as f64;
    let mut prev = (cursor.x, cursor.y);
    let mut color = fixed_color;

    for _ in 0..CURVE_SUB_STEPS {
        cursor.heading += heading_step;
        let angle = cursor.heading as i32;
        cursor.x = tables.cos(angle).mul_add(CURVE_STEP_SPEED, cursor.x);
        cursor.y = tables.sin(angle).mul_add(CURVE_STEP_SPEED, cursor.y);

        if mode == ScribbleMode::Color
            && cursor.x >= 0.0
            && cursor.y >= 0.0
            && (cursor.x as u32) < width
            && (cursor.y as u32) < height
        {
            color = *source.get_pixel(cursor.x as u32, cursor.y as u32);
        }

        draw_line_segment_mut(
            canvas,
            (prev.0 as f32, prev.1 as f32),
            (cursor.x as f32, cursor.y as f32),
            color,
        );
        prev = (cursor.x, cursor.y);
    }
}
