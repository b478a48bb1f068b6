//! Command-line interface for rendering one effect over one image

use crate::engine::circles::{CirclesConfig, pack};
use crate::engine::dots::dots;
use crate::engine::scribble::{ScribbleConfig, ScribbleMode, trace};
use crate::engine::triangulate::triangulate;
use crate::filters::{sharpen, soften};
use crate::io::configuration::{
    DEFAULT_CIRCLE_RADIUS, DEFAULT_PACKING_FACTOR, DOTS_RESIZE_LONG_SIDE, OUTPUT_SUFFIX,
    RESIZE_LONG_SIDE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{load_image, resize_long_side, save_image};
use crate::io::progress::{ConsoleProgress, ProgressSink, SilentSink};
use clap::{Parser, ValueEnum};
use image::{Rgb, RgbImage, imageops};
use imageproc::contrast::equalize_histogram;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Available generative effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Effect {
    /// Colored packed circles on a dark background
    Circles,
    /// Black halftone dots on a white background
    Dots,
    /// Single-color scribble line on a white background
    Scribble,
    /// Source-colored scribble line on a black background
    ColorScribble,
    /// Color Delaunay triangle mosaic
    Triangulate,
    /// Grayscale Delaunay triangle mosaic
    TriangulateGray,
}

impl Effect {
    /// Display label used for progress and timing output
    pub const fn label(self) -> &'static str {
        match self {
            Self::Circles => "circles effect",
            Self::Dots => "dots effect",
            Self::Scribble => "mono scribble effect",
            Self::ColorScribble => "color scribble effect",
            Self::Triangulate => "triangulate effect",
            Self::TriangulateGray => "grayscale triangulate effect",
        }
    }

    /// Long-side target the effect's constants are tuned for
    const fn resize_target(self) -> u32 {
        match self {
            Self::Dots => DOTS_RESIZE_LONG_SIDE,
            _ => RESIZE_LONG_SIDE,
        }
    }
}

#[derive(Parser)]
#[command(name = "rasterart")]
#[command(
    author,
    version,
    about = "Turn a raster photograph into stylized procedural art"
)]
/// Command-line arguments for the effect renderer
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Effect to render
    #[arg(short, long, value_enum)]
    pub effect: Effect,

    /// Output file; defaults to `<input>_result.<ext>` next to the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Random seed for reproducible output; unseeded runs use OS entropy
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Suppress progress and timing output
    #[arg(short, long)]
    pub quiet: bool,

    /// Override the long-side resize target in pixels
    #[arg(long)]
    pub long_side: Option<u32>,

    /// Draw flat circles instead of smooth-shaded ones
    #[arg(long)]
    pub flat: bool,

    /// Clearance multiplier for circle packing (>= 1.0)
    #[arg(long, default_value_t = DEFAULT_PACKING_FACTOR)]
    pub packing: f64,

    /// Circle radius in pixels for circle packing
    #[arg(long, default_value_t = DEFAULT_CIRCLE_RADIUS)]
    pub radius: i32,

    /// Gaussian-blur the source before processing
    #[arg(long)]
    pub soften: bool,

    /// Sharpen the source before processing
    #[arg(long)]
    pub sharpen: bool,

    /// Dither amplitude applied before the mono scribble
    #[arg(long)]
    pub dither: Option<u8>,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs one effect over one input file
pub struct EffectRunner {
    cli: Cli,
}

impl EffectRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load, preprocess, render, and save
    ///
    /// # Errors
    ///
    /// Returns an error if parameters are invalid, the input cannot be
    /// loaded, or the result cannot be saved.
    // Allow print for user-facing timing and summary output
    #[allow(clippy::print_stderr)]
    pub fn process(&self) -> Result<()> {
        self.validate()?;

        let source = load_image(&self.cli.input)?;
        let prepared = self.preprocess(&source);

        let mut rng = match self.cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut sink: Box<dyn ProgressSink> = if self.cli.should_show_progress() {
            Box::new(ConsoleProgress::new(self.cli.effect.label()))
        } else {
            Box::new(SilentSink)
        };

        let start = Instant::now();
        let result = match self.cli.effect {
            Effect::Circles => {
                let config = CirclesConfig {
                    packing_factor: self.cli.packing,
                    radius: self.cli.radius,
                    smooth_shading: !self.cli.flat,
                };
                pack(&prepared, config, &mut rng, sink.as_mut())
            }
            Effect::Dots => dots(&prepared, sink.as_mut()),
            Effect::Scribble | Effect::ColorScribble => {
                let mode = if self.cli.effect == Effect::Scribble {
                    ScribbleMode::Mono
                } else {
                    ScribbleMode::Color
                };
                let config = ScribbleConfig {
                    mode,
                    dither: self.cli.dither,
                };
                let (canvas, summary) = trace(&prepared, config, &mut rng, sink.as_mut());
                if !self.cli.quiet {
                    if summary.early_stop {
                        eprintln!("Field exhausted ahead of the curve budget");
                    }
                    if summary.clamped_targets > 0 {
                        eprintln!(
                            "Clamped {} search targets back into bounds",
                            summary.clamped_targets
                        );
                    }
                    eprintln!("Drew {} curves", summary.curves);
                }
                canvas
            }
            Effect::Triangulate => triangulate(&prepared, false, &mut rng, sink.as_mut()),
            Effect::TriangulateGray => triangulate(&prepared, true, &mut rng, sink.as_mut()),
        };

        if !self.cli.quiet {
            eprintln!(
                "{} finished in {:.3} s",
                self.cli.effect.label(),
                start.elapsed().as_secs_f64()
            );
        }

        let output = self
            .cli
            .output
            .clone()
            .unwrap_or_else(|| Self::default_output_path(&self.cli.input));
        save_image(&result, &output)
    }

    fn validate(&self) -> Result<()> {
        if self.cli.packing < 1.0 {
            return Err(invalid_parameter(
                "packing",
                &self.cli.packing,
                &"must be at least 1.0",
            ));
        }
        if self.cli.radius < 1 {
            return Err(invalid_parameter(
                "radius",
                &self.cli.radius,
                &"must be at least 1 pixel",
            ));
        }
        if let Some(target) = self.cli.long_side {
            if target == 0 {
                return Err(invalid_parameter(
                    "long-side",
                    &target,
                    &"must be at least 1 pixel",
                ));
            }
        }
        Ok(())
    }

    fn preprocess(&self, source: &RgbImage) -> RgbImage {
        let target = self
            .cli
            .long_side
            .unwrap_or_else(|| self.cli.effect.resize_target());
        let mut prepared = resize_long_side(source, target);
        if self.cli.soften {
            prepared = soften(&prepared);
        }
        if self.cli.sharpen {
            prepared = sharpen(&prepared);
        }
        if self.cli.effect == Effect::Dots {
            // Dot sizes track the equalized luminance, not raw brightness
            let equalized = equalize_histogram(&imageops::grayscale(&prepared));
            prepared = RgbImage::from_fn(prepared.width(), prepared.height(), |x, y| {
                let v = equalized.get_pixel(x, y)[0];
                Rgb([v, v, v])
            });
        }
        prepared
    }

    /// Output path derived from the input: `<stem>_result.<ext>`
    pub fn default_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = if extension.is_empty() {
            format!("{}{}", stem.to_string_lossy(), OUTPUT_SUFFIX)
        } else {
            format!(
                "{}{}.{}",
                stem.to_string_lossy(),
                OUTPUT_SUFFIX,
                extension.to_string_lossy()
            )
        };

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
