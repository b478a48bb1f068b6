//! Effect constants and runtime configuration defaults
//!
//! Several of these are hand-tuned empirical values. They are kept verbatim
//! because the output characteristics of the effects depend on them; they
//! carry no derivation beyond "this is what looks right".

// Circle packing
/// Default clearance multiplier applied to a circle radius when testing
/// whether a candidate site has room; values above 1.0 leave visible gaps
pub const DEFAULT_PACKING_FACTOR: f64 = 1.05;

/// Default radius of every packed circle, in pixels
pub const DEFAULT_CIRCLE_RADIUS: i32 = 18;

/// Angular step in degrees when sweeping a circle for child sites
pub const CIRCLE_SWEEP_STEP_DEG: usize = 5;

/// Expected canvas area covered per packed circle at the default radius,
/// used only for the progress estimate (empirical, radius 18)
pub const AREA_PER_CIRCLE: f64 = 1350.0;

/// Number of processed circles between pruning passes
pub const PRUNE_INTERVAL: usize = 20;

/// Inactive circles born more than this many list positions before the
/// cursor are assumed fully surrounded and are dropped from the front
pub const PRUNE_AGE_WINDOW: usize = 100;

/// Brightness multiplier for the circle-packing background fill
pub const CIRCLES_BACKGROUND_SCALE: f64 = 0.2;

// Scribble tracing
/// Ceiling applied to working-field values so no pixel starts fully
/// exhausted; 255 marks a region the tracer will never enter again
pub const FIELD_CEILING: u8 = 250;

/// Divisor in the empirical curve-budget estimate
/// `width * height * (255 - mean) / 2200`
pub const SCRIBBLE_BUDGET_DIVISOR: f64 = 2200.0;

/// Amount added to the darkest found value when clearing a visited disc
pub const CLEARING_BRIGHTEN: u16 = 80;

/// Divisor converting a clearing value into the cleared disc radius
pub const CLEARING_RADIUS_DIVISOR: i32 = 30;

/// Sub-steps drawn per accepted search target
pub const CURVE_SUB_STEPS: usize = 10;

/// Distance advanced per sub-step, in pixels
pub const CURVE_STEP_SPEED: f64 = 1.5;

/// Initial angular window of the direction search, in degrees
pub const SEARCH_WINDOW_DEG: i32 = 180;

/// Initial angular step of the direction search, in degrees
pub const SEARCH_STEP_DEG: i32 = 6;

// Triangulation
/// Number of uniformly random candidate points scattered per run;
/// most are rejected
pub const CANDIDATE_POINT_BUDGET: usize = 1_000_000;

/// Divisor in the progressive admission threshold `t / 3000 + 1`, which
/// admits only the darkest regions early and relaxes over the run
pub const ADMISSION_THRESHOLD_DIVISOR: f64 = 3000.0;

/// Field values below this are considered already consumed
pub const CONSUMED_BELOW: u8 = 2;

/// Candidate iterations between progress bar updates in the scatter loop
pub const SCATTER_PROGRESS_INTERVAL: usize = 1000;

// Dots
/// Block size in pixels for the halftone dot grid
pub const DOT_GRID_STEP: u32 = 20;

/// Largest dot radius, reached for a fully dark block
pub const DOT_MAX_RADIUS: f64 = 12.0;

// Preprocessing
/// Long-side target in pixels for most effects
pub const RESIZE_LONG_SIDE: u32 = 3000;

/// Long-side target in pixels for the dots effect
pub const DOTS_RESIZE_LONG_SIDE: u32 = 4000;

/// Gaussian sigma used by the soften filter
pub const SOFTEN_SIGMA: f32 = 2.0;

// Progress display
/// Iterations between progress bar updates in the engines
pub const PROGRESS_UPDATE_INTERVAL: usize = 100;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
