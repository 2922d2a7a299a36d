//! Streaming moment accumulator.
//!
//! [`MomentAccumulator`] keeps count, min, max, sum, and the second,
//! third, and fourth central moment sums of an unbounded stream in O(1)
//! memory. Samples are never stored.
//!
//! # Algorithm
//! Extended Welford recurrence for higher-order moments. For each new
//! sample, with `δ = x − x̄_old`, `δₙ = δ/n`, and `t = δ·δₙ·(n−1)`:
//!
//! ```text
//! M₄ += t·δₙ²·(n² − 3n + 3) + 6·δₙ²·M₂ − 4·δₙ·M₃
//! M₃ += t·δₙ·(n − 2) − 3·δₙ·M₂
//! M₂ += t
//! ```
//!
//! The updates run M₄ → M₃ → M₂, each reading the *previous* value of the
//! lower moments.
//!
//! References:
//! - Welford (1962), *Technometrics* 4(3), pp. 419–420.
//! - Terriberry (2007), "Computing Higher-Order Moments Online".
//! - Pébay (2008), "Formulas for Robust, One-Pass Parallel Computation
//!   of Covariances and Arbitrary-Order Statistical Moments",
//!   Sandia Report SAND2008-6212.
//!
//! # Threading
//! The accumulator is a plain value mutated through `&mut self`. To
//! aggregate across threads, give each thread its own accumulator and
//! combine them with [`MomentAccumulator::merge`].

use crate::stats::{DescriptiveSummary, MomentSums};

/// Running descriptive statistics over a stream of `f64` samples.
///
/// Queries follow the same undefined-statistic policy as the batch
/// functions in [`crate::stats`]: NaN until enough samples have arrived.
///
/// # Examples
/// ```
/// use descstats::MomentAccumulator;
///
/// let mut acc = MomentAccumulator::new();
/// for x in [1.0, 2.0, 3.0, 4.0, 5.0] {
///     acc.update(x);
/// }
/// assert_eq!(acc.count(), 5);
/// assert!((acc.mean() - 3.0).abs() < 1e-15);
/// assert!((acc.sample_variance() - 2.5).abs() < 1e-14);
/// assert!((acc.sample_kurtosis() + 1.2).abs() < 1e-12);
/// ```
///
/// Two accumulators fed disjoint parts of a stream combine into one:
///
/// ```
/// use descstats::MomentAccumulator;
///
/// let mut left: MomentAccumulator = [1.0, 2.0, 3.0].into_iter().collect();
/// let right: MomentAccumulator = [4.0, 5.0, 6.0].into_iter().collect();
/// left.merge(&right);
/// assert_eq!(left.count(), 6);
/// assert!((left.mean() - 3.5).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MomentAccumulator {
    count: u64,
    min: f64,
    max: f64,
    sum: f64,
    mean_acc: f64,
    m2: f64,
    m3: f64,
    m4: f64,
}

impl MomentAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            min: 0.0,
            max: 0.0,
            sum: 0.0,
            mean_acc: 0.0,
            m2: 0.0,
            m3: 0.0,
            m4: 0.0,
        }
    }

    /// Feeds one sample into the accumulator.
    ///
    /// NaN and infinite inputs are not filtered; they propagate into the
    /// statistics.
    pub fn update(&mut self, value: f64) {
        let n1 = self.count;
        self.count += 1;
        self.sum += value;

        if n1 == 0 {
            // First sample: mean = value, all moments stay zero.
            self.min = value;
            self.max = value;
            self.mean_acc = value;
            return;
        }

        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }

        let n = self.count as f64;
        let delta = value - self.mean_acc;
        let delta_n = delta / n;
        let delta_n2 = delta_n * delta_n;
        let term1 = delta * delta_n * n1 as f64;

        // M₄ before M₃ before M₂: each reads the pre-update lower moments.
        self.m4 += term1 * delta_n2 * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n2 * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;
        self.mean_acc += delta_n;
    }

    /// Alias for [`update`](Self::update).
    #[inline]
    pub fn append(&mut self, value: f64) {
        self.update(value);
    }

    /// Feeds every value of `values` in order.
    ///
    /// Equivalent to calling [`update`](Self::update) on each element, so
    /// appending a slice in several contiguous chunks yields exactly the
    /// same state as appending it whole.
    pub fn append_slice(&mut self, values: &[f64]) {
        for &x in values {
            self.update(x);
        }
    }

    /// Merges another accumulator into this one.
    ///
    /// Uses Chan's pairwise algorithm extended to M₃ and M₄. The result
    /// matches sequential updates over the concatenated streams up to
    /// floating-point rounding.
    ///
    /// References:
    /// - Chan, Golub & LeVeque (1979), "Updating Formulae and a
    ///   Pairwise Algorithm for Computing Sample Variances".
    /// - Pébay (2008), SAND2008-6212 (M₃, M₄ merge formulas).
    pub fn merge(&mut self, other: &MomentAccumulator) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }
        let na = self.count as f64;
        let nb = other.count as f64;
        let total = self.count + other.count;
        let n = total as f64;
        let delta = other.mean_acc - self.mean_acc;
        let delta2 = delta * delta;
        let delta3 = delta2 * delta;
        let delta4 = delta2 * delta2;

        let new_mean = self.mean_acc + delta * (nb / n);

        let new_m2 = self.m2 + other.m2 + delta2 * na * nb / n;

        let new_m3 = self.m3
            + other.m3
            + delta3 * na * nb * (na - nb) / (n * n)
            + 3.0 * delta * (na * other.m2 - nb * self.m2) / n;

        let new_m4 = self.m4
            + other.m4
            + delta4 * na * nb * (na * na - na * nb + nb * nb) / (n * n * n)
            + 6.0 * delta2 * (na * na * other.m2 + nb * nb * self.m2) / (n * n)
            + 4.0 * delta * (na * other.m3 - nb * self.m3) / n;

        self.count = total;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.mean_acc = new_mean;
        self.m2 = new_m2;
        self.m3 = new_m3;
        self.m4 = new_m4;
    }

    /// Resets to the empty state.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns the number of samples seen so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns `true` if no samples have been added.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Smallest sample, or `0.0` when empty.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest sample, or `0.0` when empty.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `max − min`, or `0.0` when empty.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Plain running sum of the samples.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// `sum / count`, or `0.0` when empty.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    fn moments(&self) -> MomentSums {
        MomentSums {
            count: self.count,
            m2: self.m2,
            m3: self.m3,
            m4: self.m4,
        }
    }

    /// `M₂ / n`; NaN below 2 samples.
    pub fn population_variance(&self) -> f64 {
        self.moments().population_variance()
    }

    /// `M₂ / (n − 1)`; NaN below 2 samples.
    pub fn sample_variance(&self) -> f64 {
        self.moments().sample_variance()
    }

    /// Square root of [`population_variance`](Self::population_variance).
    pub fn population_std_dev(&self) -> f64 {
        self.population_variance().sqrt()
    }

    /// Square root of [`sample_variance`](Self::sample_variance).
    pub fn sample_std_dev(&self) -> f64 {
        self.sample_variance().sqrt()
    }

    /// `√n · M₃ / M₂^{3/2}`; NaN below 2 samples or with zero variance.
    pub fn population_skew(&self) -> f64 {
        self.moments().population_skew()
    }

    /// Bias-corrected skew; NaN below 3 samples or with zero variance.
    pub fn sample_skew(&self) -> f64 {
        self.moments().sample_skew()
    }

    /// `n · M₄ / M₂² − 3`; NaN below 2 samples or with zero variance.
    pub fn population_kurtosis(&self) -> f64 {
        self.moments().population_kurtosis()
    }

    /// Bias-corrected excess kurtosis; NaN below 4 samples or with zero
    /// variance.
    pub fn sample_kurtosis(&self) -> f64 {
        self.moments().sample_kurtosis()
    }

    /// Snapshot of every statistic.
    pub fn summary(&self) -> DescriptiveSummary {
        let moments = self.moments();
        let population_variance = moments.population_variance();
        let sample_variance = moments.sample_variance();
        DescriptiveSummary {
            count: self.count,
            min: self.min,
            max: self.max,
            sum: self.sum,
            mean: self.mean(),
            population_variance,
            sample_variance,
            population_std_dev: population_variance.sqrt(),
            sample_std_dev: sample_variance.sqrt(),
            population_skew: moments.population_skew(),
            sample_skew: moments.sample_skew(),
            population_kurtosis: moments.population_kurtosis(),
            sample_kurtosis: moments.sample_kurtosis(),
        }
    }
}

impl Default for MomentAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<f64> for MomentAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.update(x);
        }
    }
}

impl<'a> Extend<&'a f64> for MomentAccumulator {
    fn extend<I: IntoIterator<Item = &'a f64>>(&mut self, iter: I) {
        for &x in iter {
            self.update(x);
        }
    }
}

impl FromIterator<f64> for MomentAccumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
