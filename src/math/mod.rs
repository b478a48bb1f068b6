//! Mathematical utilities for the effects

/// Pixel color scaling and averaging helpers
pub mod color;
/// Precomputed sine/cosine lookup tables
pub mod tables;
