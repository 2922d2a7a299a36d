//! Simple linear regression, online and batch.
//!
//! Both paths fit `y = intercept + slope·x` by ordinary least squares from
//! the centered sums
//!
//! ```text
//! Sxx = Σ(x − x̄)²    Syy = Σ(y − ȳ)²    Sxy = Σ(x − x̄)(y − ȳ)
//! ```
//!
//! | Quantity | Formula | Defined from |
//! |---|---|---|
//! | slope | `Sxy / Sxx` | n ≥ 2 |
//! | intercept | `ȳ − slope·x̄` | n ≥ 2 |
//! | r² | `Sxy² / (Sxx·Syy)` | n ≥ 2 |
//! | s² (residual variance) | `(Syy − slope·Sxy) / (n − 2)` | n ≥ 3 |
//! | slope std. error | `√(s² / Sxx)` | n ≥ 3 |
//! | intercept std. error | `√(s²·(1/n + x̄²/Sxx))` | n ≥ 3 |
//!
//! Undefined quantities are `f64::NAN`. A constant `x` (`Sxx = 0`) leaves
//! every slope-derived value undefined; a constant `y` (`Syy = 0`) leaves
//! r² undefined.

use crate::stats;

/// Error type for batch regression input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegressionError {
    /// No (x, y) pairs were supplied.
    EmptyInput,
    /// `x` and `y` have different lengths.
    LengthMismatch { x_len: usize, y_len: usize },
}

impl std::fmt::Display for RegressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegressionError::EmptyInput => write!(f, "regression requires at least one (x, y) pair"),
            RegressionError::LengthMismatch { x_len, y_len } => {
                write!(f, "x and y lengths differ: x has {x_len}, y has {y_len}")
            }
        }
    }
}

impl std::error::Error for RegressionError {}

/// Result of a least-squares fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionSummary {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub count: u64,
    pub slope_std_err: f64,
    pub intercept_std_err: f64,
}

impl RegressionSummary {
    /// Returns `(slope, intercept, r_squared, count, slope_std_err, intercept_std_err)`.
    pub fn into_tuple(self) -> (f64, f64, f64, u64, f64, f64) {
        (
            self.slope,
            self.intercept,
            self.r_squared,
            self.count,
            self.slope_std_err,
            self.intercept_std_err,
        )
    }
}

/// Centered sums shared by the online and batch fits.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CoMoments {
    count: u64,
    mean_x: f64,
    mean_y: f64,
    sxx: f64,
    syy: f64,
    sxy: f64,
}

impl CoMoments {
    fn slope(&self) -> f64 {
        if self.count < 2 || self.sxx == 0.0 {
            return f64::NAN;
        }
        self.sxy / self.sxx
    }

    fn intercept(&self) -> f64 {
        self.mean_y - self.slope() * self.mean_x
    }

    fn r_squared(&self) -> f64 {
        if self.count < 2 || self.sxx == 0.0 || self.syy == 0.0 {
            return f64::NAN;
        }
        self.sxy * self.sxy / (self.sxx * self.syy)
    }

    /// Residual variance estimate s² with n − 2 degrees of freedom.
    fn residual_variance(&self) -> f64 {
        if self.count < 3 || self.sxx == 0.0 {
            return f64::NAN;
        }
        // Rounding can push a perfect fit slightly below zero.
        let ss_res = (self.syy - self.slope() * self.sxy).max(0.0);
        ss_res / (self.count - 2) as f64
    }

    fn slope_std_err(&self) -> f64 {
        (self.residual_variance() / self.sxx).sqrt()
    }

    fn intercept_std_err(&self) -> f64 {
        let n = self.count as f64;
        (self.residual_variance() * (1.0 / n + self.mean_x * self.mean_x / self.sxx)).sqrt()
    }

    fn summary(&self) -> RegressionSummary {
        RegressionSummary {
            slope: self.slope(),
            intercept: self.intercept(),
            r_squared: self.r_squared(),
            count: self.count,
            slope_std_err: self.slope_std_err(),
            intercept_std_err: self.intercept_std_err(),
        }
    }
}

// ---------------------------------------------------------------------------
// Online accumulator
// ---------------------------------------------------------------------------

/// Streaming least-squares fit over (x, y) pairs.
///
/// Keeps running means and co-moment sums, updated with the bivariate
/// Welford recurrence, so memory stays O(1).
///
/// # Examples
/// ```
/// use descstats::RegressionAccumulator;
///
/// let mut r = RegressionAccumulator::new();
/// for (x, y) in [(1.0, 2.0), (2.0, 4.0), (3.0, 5.0), (4.0, 4.0), (5.0, 5.0)] {
///     r.update(x, y);
/// }
/// assert!((r.slope() - 0.6).abs() < 1e-12);
/// assert!((r.intercept() - 2.2).abs() < 1e-12);
/// assert!((r.r_squared() - 0.6).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionAccumulator {
    moments: CoMoments,
}

impl RegressionAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self {
            moments: CoMoments {
                count: 0,
                mean_x: 0.0,
                mean_y: 0.0,
                sxx: 0.0,
                syy: 0.0,
                sxy: 0.0,
            },
        }
    }

    /// Adds one (x, y) observation.
    pub fn update(&mut self, x: f64, y: f64) {
        let m = &mut self.moments;
        m.count += 1;
        let n = m.count as f64;
        let dx = x - m.mean_x;
        let dy = y - m.mean_y;
        m.mean_x += dx / n;
        m.mean_y += dy / n;
        // Welford: old deviation times new deviation.
        m.sxx += dx * (x - m.mean_x);
        m.syy += dy * (y - m.mean_y);
        m.sxy += dx * (y - m.mean_y);
    }

    /// Merges another accumulator into this one.
    ///
    /// Reference: Pébay (2008), SAND2008-6212, pairwise co-moment update.
    pub fn merge(&mut self, other: &RegressionAccumulator) {
        let b = &other.moments;
        if b.count == 0 {
            return;
        }
        if self.moments.count == 0 {
            *self = other.clone();
            return;
        }
        let a = &mut self.moments;
        let na = a.count as f64;
        let nb = b.count as f64;
        let n = na + nb;
        let dx = b.mean_x - a.mean_x;
        let dy = b.mean_y - a.mean_y;
        let weight = na * nb / n;

        a.sxx += b.sxx + dx * dx * weight;
        a.syy += b.syy + dy * dy * weight;
        a.sxy += b.sxy + dx * dy * weight;
        a.mean_x += dx * nb / n;
        a.mean_y += dy * nb / n;
        a.count += b.count;
    }

    /// Resets to the empty state.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Number of pairs seen so far.
    pub fn count(&self) -> u64 {
        self.moments.count
    }

    /// Running mean of x; `0.0` when empty.
    pub fn mean_x(&self) -> f64 {
        self.moments.mean_x
    }

    /// Running mean of y; `0.0` when empty.
    pub fn mean_y(&self) -> f64 {
        self.moments.mean_y
    }

    /// Least-squares slope; NaN below 2 pairs or for constant x.
    pub fn slope(&self) -> f64 {
        self.moments.slope()
    }

    /// Least-squares intercept; NaN whenever the slope is.
    pub fn intercept(&self) -> f64 {
        self.moments.intercept()
    }

    /// Coefficient of determination (squared Pearson correlation).
    pub fn r_squared(&self) -> f64 {
        self.moments.r_squared()
    }

    /// Standard error of the slope; NaN below 3 pairs.
    pub fn slope_standard_error(&self) -> f64 {
        self.moments.slope_std_err()
    }

    /// Standard error of the intercept; NaN below 3 pairs.
    pub fn intercept_standard_error(&self) -> f64 {
        self.moments.intercept_std_err()
    }

    /// All fit results at once.
    pub fn summary(&self) -> RegressionSummary {
        self.moments.summary()
    }
}

impl Default for RegressionAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<(f64, f64)> for RegressionAccumulator {
    fn extend<I: IntoIterator<Item = (f64, f64)>>(&mut self, iter: I) {
        for (x, y) in iter {
            self.update(x, y);
        }
    }
}

impl FromIterator<(f64, f64)> for RegressionAccumulator {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Fits `y = intercept + slope·x` over paired slices.
///
/// Two-pass: means first (compensated sums), then centered co-moments.
///
/// # Errors
/// - [`RegressionError::EmptyInput`] if both slices are empty.
/// - [`RegressionError::LengthMismatch`] if the lengths differ.
///
/// # Examples
/// ```
/// use descstats::regression::linear_regression;
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.0, 4.0, 5.0, 4.0, 5.0];
/// let fit = linear_regression(&x, &y).unwrap();
/// assert!((fit.slope - 0.6).abs() < 1e-12);
/// assert_eq!(fit.count, 5);
/// ```
pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<RegressionSummary, RegressionError> {
    if x.len() != y.len() {
        return Err(RegressionError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.is_empty() {
        return Err(RegressionError::EmptyInput);
    }
    // Constant inputs keep their exact value as the mean, so Sxx or Syy is 0.
    let mean_x = stats::mean(x);
    let mean_y = stats::mean(y);
    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    let moments = CoMoments {
        count: x.len() as u64,
        mean_x,
        mean_y,
        sxx,
        syy,
        sxy,
    };
    Ok(moments.summary())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a.is_nan() && b.is_nan()) || (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        // --- online and batch agree on the same pairs ---
        #[test]
        fn online_matches_batch(
            pairs in proptest::collection::vec((-1e3_f64..1e3, -1e3_f64..1e3), 3..60),
        ) {
            let (x, y): (Vec<f64>, Vec<f64>) = pairs.iter().copied().unzip();
            let online: RegressionAccumulator = pairs.iter().copied().collect();
            let batch = linear_regression(&x, &y).unwrap();
            let s = online.summary();
            prop_assert_eq!(s.count, batch.count);
            prop_assert!(close(s.slope, batch.slope, 1e-8), "slope {} vs {}", s.slope, batch.slope);
            prop_assert!(close(s.intercept, batch.intercept, 1e-8));
            prop_assert!(close(s.r_squared, batch.r_squared, 1e-8));
            prop_assert!(close(s.slope_std_err, batch.slope_std_err, 1e-6));
            prop_assert!(close(s.intercept_std_err, batch.intercept_std_err, 1e-6));
        }

        #[test]
        fn r_squared_in_unit_interval(
            pairs in proptest::collection::vec((-1e3_f64..1e3, -1e3_f64..1e3), 2..60),
        ) {
            let r: RegressionAccumulator = pairs.into_iter().collect();
            let r2 = r.r_squared();
            if !r2.is_nan() {
                prop_assert!((-1e-12..=1.0 + 1e-12).contains(&r2), "r² = {}", r2);
            }
        }
    }
}
