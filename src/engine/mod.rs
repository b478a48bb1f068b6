//! The generative engines
//!
//! Each engine exposes one pure entry point of the shape
//! `(image, parameters, rng, progress) -> image`. Engines are synchronous
//! and single-threaded, own their working state for the duration of the
//! call, and have no side effects beyond progress notifications. With a
//! seeded generator every engine is bit-identical across runs.

/// Advancing-front circle packing colored from the source image
pub mod circles;
/// Halftone dot grid on a white canvas
pub mod dots;
/// Greedy darkness-following scribble tracing, mono and color
pub mod scribble;
/// Biased point scattering and Delaunay triangle rendering
pub mod triangulate;
