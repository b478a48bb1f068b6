//! Point-cloud Delaunay triangulation
//!
//! Scatters a darkness-biased point cloud over the image, triangulates it,
//! and renders every triangle filled with the reference color at its
//! centroid, with a separate outline pass so edges are never painted over
//! by later fills.

use crate::field::DarknessField;
use crate::io::configuration::{
    ADMISSION_THRESHOLD_DIVISOR, CANDIDATE_POINT_BUDGET, CONSUMED_BELOW,
    SCATTER_PROGRESS_INTERVAL,
};
use crate::io::progress::ProgressSink;
use crate::math::color::{mean_gray, mean_luma};
use delaunator::{Point as SitePoint, triangulate as delaunay};
use image::{GrayImage, Rgb, RgbImage, imageops};
use imageproc::contrast::equalize_histogram;
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;
use rand::Rng;

/// Outline color drawn over triangle edges
const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Render the triangulated effect
///
/// With `grayscale` set, triangle colors come from the equalized luminance
/// instead of the color source.
pub fn triangulate<R: Rng>(
    source: &RgbImage,
    grayscale: bool,
    rng: &mut R,
    progress: &mut dyn ProgressSink,
) -> RgbImage {
    let gray = imageops::grayscale(source);
    let reference_gray = equalize_histogram(&gray);
    let mut field = DarknessField::equalized_compressed(&gray);

    // Canvas starts at the reference's mean gray level
    let mean = if grayscale {
        mean_luma(&reference_gray)
    } else {
        mean_gray(source)
    };
    let gray_level = mean.round().clamp(0.0, 255.0) as u8;
    let mut canvas = RgbImage::from_pixel(
        source.width(),
        source.height(),
        Rgb([gray_level, gray_level, gray_level]),
    );

    let points = scatter_points(&mut field, rng, progress);
    if points.len() >= 3 {
        let sites: Vec<SitePoint> = points
            .iter()
            .map(|&(x, y)| SitePoint {
                x: f64::from(x),
                y: f64::from(y),
            })
            .collect();
        let triangulation = delaunay(&sites);

        render_triangles(
            &mut canvas,
            source,
            &reference_gray,
            grayscale,
            &points,
            &triangulation.triangles,
        );
    }

    progress.finished();
    canvas
}

/// Scatter admission-biased random points, consuming the field as it goes
///
/// Each candidate is admitted only if its field value is below a threshold
/// that grows over the run (`t / 3000 + 1`), so the darkest regions are
/// populated first and lighter regions join progressively. Accepted points
/// zero a disc around themselves so near neighbors are rejected as
/// consumed. Every returned point lies inside the field bounds.
pub fn scatter_points<R: Rng>(
    field: &mut DarknessField,
    rng: &mut R,
    progress: &mut dyn ProgressSink,
) -> Vec<(u32, u32)> {
    let width = field.width();
    let height = field.height();
    let mut points = Vec::new();

    for t in 0..CANDIDATE_POINT_BUDGET {
        if t % SCATTER_PROGRESS_INTERVAL == 0 {
            progress.update(t as u64, CANDIDATE_POINT_BUDGET as u64);
        }

        let x = rng.random_range(0..width);
        let y = rng.random_range(0..height);
        let value = field.get(x, y);

        let limit = t as f64 / ADMISSION_THRESHOLD_DIVISOR + 1.0;
        if f64::from(value) > limit {
            // Too light for this stage of the run
            continue;
        }
        if value < CONSUMED_BELOW {
            continue;
        }

        let radius = i32::from(value) / 6 + 5;
        field.paint_disc(x as i32 + 2, y as i32 + 2, radius, 0);
        points.push((x, y));
    }

    progress.update(CANDIDATE_POINT_BUDGET as u64, CANDIDATE_POINT_BUDGET as u64);
    points
}

/// Fill all triangles, then redraw their edges in a separate pass
fn render_triangles(
    canvas: &mut RgbImage,
    source: &RgbImage,
    reference_gray: &GrayImage,
    grayscale: bool,
    points: &[(u32, u32)],
    triangles: &[usize],
) {
    let width = source.width();
    let height = source.height();

    for indices in triangles.chunks_exact(3) {
        let p0 = points[indices[0]];
        let p1 = points[indices[1]];
        let p2 = points[indices[2]];

        // Degenerate triangles cannot be filled as polygons
        if p0 == p1 || p1 == p2 || p0 == p2 {
            continue;
        }

        // Near-boundary centroids are clamped before sampling
        let cx = ((p0.0 + p1.0 + p2.0) / 3).min(width - 1);
        let cy = ((p0.1 + p1.1 + p2.1) / 3).min(height - 1);
        let color = if grayscale {
            let v = reference_gray.get_pixel(cx, cy)[0];
            Rgb([v, v, v])
        } else {
            *source.get_pixel(cx, cy)
        };

        let polygon = [
            Point::new(p0.0 as i32, p0.1 as i32),
            Point::new(p1.0 as i32, p1.1 as i32),
            Point::new(p2.0 as i32, p2.1 as i32),
        ];
        draw_polygon_mut(canvas, &polygon, color);
    }

    // Outlines last so fills never paint over them
    for indices in triangles.chunks_exact(3) {
        let p0 = points[indices[0]];
        let p1 = points[indices[1]];
        let p2 = points[indices[2]];

        for (a, b) in [(p0, p1), (p1, p2), (p2, p0)] {
            draw_line_segment_mut(
                canvas,
                (a.0 as f32, a.1 as f32),
                (b.0 as f32, b.1 as f32),
                OUTLINE_COLOR,
            );
        }
    }
}
