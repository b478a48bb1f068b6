//! Stylized procedural art generation from raster photographs
//!
//! Derives a scalar importance field from a source image, then runs one of
//! several sequential, stateful generative engines that consume that field
//! to place geometric primitives onto a canvas: radial circle packing,
//! greedy directional scribble tracing (mono and color), halftone dots, and
//! biased point scattering with Delaunay triangle rendering. The image
//! itself colors the output.

#![forbid(unsafe_code)]

/// The generative engines: circles, dots, scribble, triangulate
pub mod engine;
/// Scalar working field derived from image luminance
pub mod field;
/// Optional preprocessing filters
pub mod filters;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for the effects
pub mod math;

pub use io::error::{EffectError, Result};
