//! Precomputed sine/cosine lookup tables
//!
//! The engines evaluate trigonometry once per candidate angle in tight inner
//! loops; a 360-entry table with degree resolution is accurate enough for
//! pixel targets and measurably faster than calling `sin`/`cos` directly.

/// Sine and cosine values for whole degrees, optionally pre-scaled
#[derive(Debug, Clone)]
pub struct AngleTables {
    sin: Vec<f64>,
    cos: Vec<f64>,
}

impl AngleTables {
    /// Build tables of `sin(a)` and `cos(a)` for a in 0..360 degrees
    pub fn unit() -> Self {
        Self::scaled(1.0)
    }

    /// Build tables with every entry multiplied by `scale`
    ///
    /// Circle packing uses `scale = 2 * packing * radius` so a table lookup
    /// directly yields the candidate offset from a parent circle center.
    pub fn scaled(scale: f64) -> Self {
        let mut sin = Vec::with_capacity(360);
        let mut cos = Vec::with_capacity(360);
        for a in 0..360 {
            let radians = f64::from(a).to_radians();
            sin.push(radians.sin() * scale);
            cos.push(radians.cos() * scale);
        }
        Self { sin, cos }
    }

    /// Sine of an angle in whole degrees, wrapping outside 0..360
    pub fn sin(&self, degrees: i32) -> f64 {
        self.sin[wrap_degrees(degrees)]
    }

    /// Cosine of an angle in whole degrees, wrapping outside 0..360
    pub fn cos(&self, degrees: i32) -> f64 {
        self.cos[wrap_degrees(degrees)]
    }
}

// Negative headings appear routinely during direction interpolation
const fn wrap_degrees(degrees: i32) -> usize {
    degrees.rem_euclid(360) as usize
}
