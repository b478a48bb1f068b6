//! Input/output operations: CLI, configuration, errors, images, progress

/// Command-line interface and effect dispatch
pub mod cli;
/// Effect constants and runtime configuration defaults
pub mod configuration;
/// Error types for loading, validation, and export
pub mod error;
/// Image loading, validation, resizing, and export
pub mod image;
/// Progress reporting for long-running engine loops
pub mod progress;
