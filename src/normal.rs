//! Exact standard-normal variate generators.
//!
//! Three interchangeable algorithms, all exact (no central-limit or
//! table-interpolation shortcuts):
//!
//! | Generator | Method | Uniforms per value |
//! |---|---|---|
//! | [`BoxMuller`] | trigonometric transform of two uniforms | 1 (pairs, memoized) |
//! | [`PolarBoxMuller`] | rejection in the unit disc, no trig calls | ≈ 1.27 (pairs, memoized) |
//! | [`Ziggurat`] | table-driven rejection over 128 equal-area strips | ≈ 2 |
//!
//! [`standard_normal`] is the default entry point and uses the Ziggurat
//! method.
//!
//! # State
//! The Box-Muller variants produce values in pairs. Each generator struct
//! owns its memoized spare, so independent streams use independent
//! generator values. The Ziggurat table is built once per process on first
//! use ([`ZigguratTable::standard`]) and is read-only afterwards; sharing
//! it across threads is safe.
//!
//! References:
//! - Box & Muller (1958), "A Note on the Generation of Random Normal
//!   Deviates", *Ann. Math. Statist.* 29(2).
//! - Marsaglia & Bray (1964), "A Convenient Method for Generating Normal
//!   Variables", *SIAM Review* 6(3).
//! - Doornik (2005), "An Improved Ziggurat Method to Generate Normal
//!   Random Samples".

use std::f64::consts::PI;
use std::sync::OnceLock;

use rand::distr::Distribution;
use rand::Rng;

use crate::random::{uniform_open, uniform_signed};

/// Number of Ziggurat blocks.
pub const ZIGGURAT_BLOCKS: usize = 128;

/// Start of the right tail, `R`.
pub const ZIGGURAT_TAIL_START: f64 = 3.442619855899;

/// Common block area: `(R·φ(R) + P(X ≥ R))·√(2π)`.
pub const ZIGGURAT_VOLUME: f64 = 9.91256303526217e-3;

/// A source of standard-normal variates.
///
/// Implemented by every generator in this module so callers can swap
/// algorithms without changing call sites.
pub trait NormalSampler {
    /// Draws one N(0, 1) value.
    fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64;
}

/// Transforms two independent uniforms into two independent N(0, 1)
/// values.
///
/// `(√(−2 ln x₁)·cos 2πx₂, √(−2 ln x₁)·sin 2πx₂)`. `x₁` must lie in
/// `(0, 1]`; `x₁ = 0` yields infinities.
///
/// # Examples
/// ```
/// use descstats::normal::box_muller_transform;
/// let (y1, y2) = box_muller_transform(0.3, 0.2);
/// assert!((y1 - 0.47951886809696076).abs() < 1e-14);
/// assert!((y2 - 1.475807326106928).abs() < 1e-14);
/// ```
pub fn box_muller_transform(x1: f64, x2: f64) -> (f64, f64) {
    let radius = (-2.0 * x1.ln()).sqrt();
    let theta = 2.0 * PI * x2;
    (radius * theta.cos(), radius * theta.sin())
}

// ============================================================================
// Box-Muller
// ============================================================================

/// Box-Muller generator returning one value per call.
///
/// Each pair is computed on every other call; the second value is kept
/// and returned by the next call.
///
/// # Examples
/// ```
/// use descstats::normal::{BoxMuller, NormalSampler};
/// use descstats::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let mut bm = BoxMuller::new();
/// let z = bm.sample(&mut rng);
/// assert!(z.is_finite());
/// assert!(bm.has_spare());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxMuller {
    spare: Option<f64>,
}

impl BoxMuller {
    /// Creates a generator with no memoized value.
    pub fn new() -> Self {
        Self { spare: None }
    }

    /// Draws a fresh pair, bypassing the memoized spare.
    pub fn sample_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let x1 = uniform_open(rng);
        let x2 = rng.random::<f64>();
        box_muller_transform(x1, x2)
    }

    /// Returns `true` if the next call to `sample` will return the memoized
    /// value without drawing uniforms.
    pub fn has_spare(&self) -> bool {
        self.spare.is_some()
    }

    /// Discards any memoized value.
    pub fn reset(&mut self) {
        self.spare = None;
    }
}

impl NormalSampler for BoxMuller {
    fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        let (z, spare) = self.sample_pair(rng);
        self.spare = Some(spare);
        z
    }
}

// ============================================================================
// Polar Box-Muller
// ============================================================================

/// Marsaglia's polar variant of Box-Muller.
///
/// Rejection-samples a point uniformly in the unit disc (expected
/// 4/π ≈ 1.27 attempts), then scales it by `√(−2 ln d / d)`.
/// Memoizes the second value of each pair like [`BoxMuller`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolarBoxMuller {
    spare: Option<f64>,
}

impl PolarBoxMuller {
    /// Creates a generator with no memoized value.
    pub fn new() -> Self {
        Self { spare: None }
    }

    /// Draws a fresh pair, bypassing the memoized spare.
    pub fn sample_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        loop {
            let x = uniform_signed(rng);
            let y = uniform_signed(rng);
            let d = x * x + y * y;
            if d < 1.0 && d != 0.0 {
                let f = (-2.0 * d.ln() / d).sqrt();
                return (f * x, f * y);
            }
        }
    }

    /// Returns `true` if the next `sample` call needs no uniforms.
    pub fn has_spare(&self) -> bool {
        self.spare.is_some()
    }

    /// Discards any memoized value.
    pub fn reset(&mut self) {
        self.spare = None;
    }
}

impl NormalSampler for PolarBoxMuller {
    fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        let (z, spare) = self.sample_pair(rng);
        self.spare = Some(spare);
        z
    }
}

// ============================================================================
// Ziggurat
// ============================================================================

/// Error type for invalid Ziggurat table constants.
#[derive(Debug, Clone, PartialEq)]
pub enum ZigguratError {
    /// Constants violate the table's construction requirements.
    InvalidParameters(String),
}

impl std::fmt::Display for ZigguratError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZigguratError::InvalidParameters(msg) => {
                write!(f, "invalid ziggurat parameters: {msg}")
            }
        }
    }
}

impl std::error::Error for ZigguratError {}

/// Strip coordinates for the Ziggurat method.
///
/// `x[0..=C]` are the right edges of `C` equal-area strips under the
/// unnormalized half density `f(x) = exp(−x²/2)`, with `x[0] = V / f(R)`
/// (the base strip, which includes the tail), `x[1] = R`, and `x[C] = 0`.
/// `ratio[i] = x[i+1] / x[i]` drives the fast acceptance test.
#[derive(Debug, Clone, PartialEq)]
pub struct ZigguratTable {
    x: Vec<f64>,
    ratio: Vec<f64>,
    tail_start: f64,
}

static STANDARD_TABLE: OnceLock<ZigguratTable> = OnceLock::new();

impl ZigguratTable {
    /// Builds a table from custom constants.
    ///
    /// # Errors
    /// Returns `Err` if `blocks` is not a power of two of at least 2, if
    /// `tail_start` or `volume` is not finite and positive, or if the three
    /// constants do not describe `blocks` equal-area strips closing at 0
    /// (edges must be finite and strictly decreasing, and the top strip's
    /// area must match `volume` to 1e-6 relative).
    pub fn new(blocks: usize, tail_start: f64, volume: f64) -> Result<Self, ZigguratError> {
        if blocks < 2 || !blocks.is_power_of_two() {
            return Err(ZigguratError::InvalidParameters(format!(
                "block count must be a power of two ≥ 2, got {blocks}"
            )));
        }
        if !tail_start.is_finite() || tail_start <= 0.0 || !volume.is_finite() || volume <= 0.0 {
            return Err(ZigguratError::InvalidParameters(format!(
                "requires finite R > 0 and V > 0, got R={tail_start}, V={volume}"
            )));
        }
        tracing::debug!(blocks, tail_start, volume, "building custom ziggurat table");
        let table = Self::build(blocks, tail_start, volume);
        table.check_consistency(volume)?;
        Ok(table)
    }

    /// The process-wide table for the standard constants, built on first
    /// call.
    pub fn standard() -> &'static ZigguratTable {
        STANDARD_TABLE.get_or_init(|| {
            tracing::debug!(
                blocks = ZIGGURAT_BLOCKS,
                tail_start = ZIGGURAT_TAIL_START,
                volume = ZIGGURAT_VOLUME,
                "building standard ziggurat table"
            );
            Self::build(ZIGGURAT_BLOCKS, ZIGGURAT_TAIL_START, ZIGGURAT_VOLUME)
        })
    }

    fn build(blocks: usize, tail_start: f64, volume: f64) -> Self {
        let mut x = vec![0.0; blocks + 1];
        let mut f = (-0.5 * tail_start * tail_start).exp();
        x[0] = volume / f;
        x[1] = tail_start;
        for i in 2..blocks {
            x[i] = (-2.0 * (volume / x[i - 1] + f).ln()).sqrt();
            f = (-0.5 * x[i] * x[i]).exp();
        }
        let ratio = (0..blocks).map(|i| x[i + 1] / x[i]).collect();
        Self {
            x,
            ratio,
            tail_start,
        }
    }

    fn check_consistency(&self, volume: f64) -> Result<(), ZigguratError> {
        if let Some(i) = self.x.iter().position(|v| !v.is_finite()) {
            return Err(ZigguratError::InvalidParameters(format!(
                "strip edge {i} is not finite; constants do not fit {} blocks",
                self.blocks()
            )));
        }
        if let Some(i) = self.x.windows(2).position(|w| w[0] <= w[1]) {
            return Err(ZigguratError::InvalidParameters(format!(
                "strip edges are not strictly decreasing at {i}"
            )));
        }
        if self.ratio.iter().any(|r| !(0.0..1.0).contains(r)) {
            return Err(ZigguratError::InvalidParameters(
                "edge ratios must lie in [0, 1)".to_string(),
            ));
        }
        let top = self.x[self.blocks() - 1];
        let top_area = top * (1.0 - (-0.5 * top * top).exp());
        if ((top_area - volume) / volume).abs() > 1e-6 {
            return Err(ZigguratError::InvalidParameters(format!(
                "top strip area {top_area} does not match V={volume}"
            )));
        }
        Ok(())
    }

    /// Number of strips `C`.
    pub fn blocks(&self) -> usize {
        self.ratio.len()
    }

    /// Start of the tail, `R`.
    pub fn tail_start(&self) -> f64 {
        self.tail_start
    }

    /// Strip edges `x[0..=C]`.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Ratios `x[i+1] / x[i]` for `i < C`.
    pub fn ratios(&self) -> &[f64] {
        &self.ratio
    }
}

/// Exact sampler for the normal tail beyond `tail_start`.
///
/// Draws exponential candidates until `−2y ≥ x²` holds, then returns a
/// value at least `tail_start` in magnitude with the requested sign.
///
/// Reference: Marsaglia (1964), "Generating a Variable from the Tail of
/// the Normal Distribution", *Technometrics* 6(1).
pub fn ziggurat_tail<R: Rng + ?Sized>(rng: &mut R, tail_start: f64, negative: bool) -> f64 {
    tracing::trace!(tail_start, negative, "ziggurat tail sample");
    let x = loop {
        let x = uniform_open(rng).ln() / tail_start;
        let y = uniform_open(rng).ln();
        if -2.0 * y >= x * x {
            break x;
        }
    };
    if negative {
        x - tail_start
    } else {
        tail_start - x
    }
}

/// Ziggurat generator (Doornik's variant).
///
/// Stateless apart from a shared reference to its table, so it also
/// implements [`rand::distr::Distribution<f64>`].
///
/// # Examples
/// ```
/// use descstats::normal::Ziggurat;
/// use descstats::random::create_rng;
/// use rand::distr::Distribution;
///
/// let zig = Ziggurat::new();
/// let mut rng = create_rng(1);
/// let samples: Vec<f64> = zig.sample_iter(&mut rng).take(1000).collect();
/// let mean = samples.iter().sum::<f64>() / 1000.0;
/// assert!(mean.abs() < 0.2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Ziggurat<'a> {
    table: &'a ZigguratTable,
}

impl Ziggurat<'static> {
    /// Uses the process-wide standard table.
    pub fn new() -> Self {
        Self {
            table: ZigguratTable::standard(),
        }
    }
}

impl Default for Ziggurat<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Ziggurat<'a> {
    /// Uses a caller-built table.
    pub fn with_table(table: &'a ZigguratTable) -> Self {
        Self { table }
    }

    /// The strip table this generator samples from.
    pub fn table(&self) -> &'a ZigguratTable {
        self.table
    }

    /// Draws one N(0, 1) value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let x = &self.table.x;
        let ratio = &self.table.ratio;
        let mask = self.table.blocks() - 1;
        loop {
            let u = 2.0 * rng.random::<f64>() - 1.0;
            let i = rng.next_u32() as usize & mask;
            // Rectangle interior: accept immediately.
            if u.abs() < ratio[i] {
                return u * x[i];
            }
            // Base strip: fall back to the exact tail.
            if i == 0 {
                return ziggurat_tail(rng, self.table.tail_start, u < 0.0);
            }
            // Wedge: compare against the density between the strip edges.
            let z = u * x[i];
            let f0 = (-0.5 * (x[i] * x[i] - z * z)).exp();
            let f1 = (-0.5 * (x[i + 1] * x[i + 1] - z * z)).exp();
            if f1 + rng.random::<f64>() * (f0 - f1) < 1.0 {
                return z;
            }
        }
    }
}

impl NormalSampler for Ziggurat<'_> {
    fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        Ziggurat::sample(self, rng)
    }
}

impl Distribution<f64> for Ziggurat<'_> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        Ziggurat::sample(self, rng)
    }
}

/// Draws one N(0, 1) value with the Ziggurat method.
///
/// # Examples
/// ```
/// use descstats::normal::standard_normal;
/// use descstats::random::create_rng;
/// let mut rng = create_rng(3);
/// assert!(standard_normal(&mut rng).is_finite());
/// ```
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    Ziggurat::new().sample(rng)
}

// ============================================================================
// Tests
// ============================================================================
