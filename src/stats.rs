//! Batch descriptive statistics over a fixed slice.
//!
//! Every function here is pure: it reads the slice and returns a value,
//! retaining nothing between calls. Central moments are computed with an
//! explicit two-pass method (mean first, then deviation powers), and the
//! variance, skew, and kurtosis formulas are shared with
//! [`MomentAccumulator`](crate::accumulator::MomentAccumulator), so the
//! two paths agree to within rounding on the same data.
//!
//! # Undefined statistics
//!
//! Statistics that are undefined for the given sample size return
//! `f64::NAN`. Callers check with [`f64::is_nan`]. The thresholds are:
//!
//! | Count | Defined |
//! |---|---|
//! | 0 | count, min, max, sum, mean (all report 0) |
//! | 1 | min, max, sum, mean |
//! | 2 | + variances, std devs, population skew and kurtosis |
//! | 3 | + sample skew |
//! | ≥ 4 | + sample kurtosis |
//!
//! Skew and kurtosis also return NaN when all values are equal, since
//! both divide by the second central moment.
//!
//! # Algorithms
//!
//! - **Sum/Mean**: Neumaier compensated summation.
//! - **Moments**: two-pass `Σ(x−x̄)^k` for k = 2, 3, 4.

/// Snapshot of every statistic the crate computes for a univariate sample.
///
/// Produced by [`describe`] and by
/// [`MomentAccumulator::summary`](crate::accumulator::MomentAccumulator::summary).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub mean: f64,
    pub population_variance: f64,
    pub sample_variance: f64,
    pub population_std_dev: f64,
    pub sample_std_dev: f64,
    pub population_skew: f64,
    pub sample_skew: f64,
    pub population_kurtosis: f64,
    pub sample_kurtosis: f64,
}

// ---------------------------------------------------------------------------
// Shared moment formulas
// ---------------------------------------------------------------------------

/// Sums of powers of deviations from the mean, with the sample size.
///
/// `m2 = Σ(x−x̄)²`, `m3 = Σ(x−x̄)³`, `m4 = Σ(x−x̄)⁴`. Both the batch
/// functions and the online accumulator derive every higher statistic
/// from this triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MomentSums {
    pub(crate) count: u64,
    pub(crate) m2: f64,
    pub(crate) m3: f64,
    pub(crate) m4: f64,
}

impl MomentSums {
    pub(crate) fn population_variance(&self) -> f64 {
        if self.count < 2 {
            return f64::NAN;
        }
        self.m2 / self.count as f64
    }

    pub(crate) fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            return f64::NAN;
        }
        self.m2 / (self.count - 1) as f64
    }

    /// Biased skewness: g₁ = √n × M₃ / M₂^(3/2)
    pub(crate) fn population_skew(&self) -> f64 {
        if self.count < 2 || self.m2 == 0.0 {
            return f64::NAN;
        }
        let n = self.count as f64;
        n.sqrt() * self.m3 / self.m2.powf(1.5)
    }

    /// Adjusted skewness: G₁ = [√(n(n−1)) / (n−2)] × g₁
    pub(crate) fn sample_skew(&self) -> f64 {
        if self.count < 3 {
            return f64::NAN;
        }
        let n = self.count as f64;
        (n * (n - 1.0)).sqrt() / (n - 2.0) * self.population_skew()
    }

    /// Biased excess kurtosis: g₂ = n × M₄ / M₂² − 3
    pub(crate) fn population_kurtosis(&self) -> f64 {
        if self.count < 2 || self.m2 == 0.0 {
            return f64::NAN;
        }
        let n = self.count as f64;
        n * self.m4 / (self.m2 * self.m2) - 3.0
    }

    /// Adjusted excess kurtosis: G₂ = [(n−1)/((n−2)(n−3))] × [(n+1)×g₂ + 6]
    pub(crate) fn sample_kurtosis(&self) -> f64 {
        if self.count < 4 {
            return f64::NAN;
        }
        let n = self.count as f64;
        (n - 1.0) / ((n - 2.0) * (n - 3.0)) * ((n + 1.0) * self.population_kurtosis() + 6.0)
    }
}

/// Two-pass central moment sums.
fn moment_sums(data: &[f64]) -> MomentSums {
    let m = mean(data);
    let mut sum2 = 0.0;
    let mut sum3 = 0.0;
    let mut sum4 = 0.0;
    for &x in data {
        let d = x - m;
        let d2 = d * d;
        sum2 += d2;
        sum3 += d2 * d;
        sum4 += d2 * d2;
    }
    MomentSums {
        count: data.len() as u64,
        m2: sum2,
        m3: sum3,
        m4: sum4,
    }
}

// ---------------------------------------------------------------------------
// Batch functions
// ---------------------------------------------------------------------------

/// Returns the number of values.
pub fn count(data: &[f64]) -> usize {
    data.len()
}

/// Returns the minimum value, or `0.0` for an empty slice.
///
/// # Examples
/// ```
/// use descstats::stats::min;
/// assert_eq!(min(&[3.0, 1.0, 4.0, 1.0, 5.0]), 1.0);
/// assert_eq!(min(&[]), 0.0);
/// ```
pub fn min(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Returns the maximum value, or `0.0` for an empty slice.
///
/// # Examples
/// ```
/// use descstats::stats::max;
/// assert_eq!(max(&[3.0, 1.0, 4.0, 1.0, 5.0]), 5.0);
/// ```
pub fn max(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Returns the compensated sum of all values.
pub fn sum(data: &[f64]) -> f64 {
    kahan_sum(data)
}

/// Computes the arithmetic mean, or `0.0` for an empty slice.
///
/// # Examples
/// ```
/// use descstats::stats::mean;
/// let v = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert!((mean(&v) - 3.0).abs() < 1e-15);
/// ```
pub fn mean(data: &[f64]) -> f64 {
    let Some(&first) = data.first() else {
        return 0.0;
    };
    // A constant sample's mean is the constant itself, so its deviations
    // (and every central moment) come out exactly zero.
    if data.iter().all(|&x| x == first) {
        return first;
    }
    kahan_sum(data) / data.len() as f64
}

/// Population variance `Σ(x−x̄)² / n`; NaN for fewer than 2 values.
///
/// # Examples
/// ```
/// use descstats::stats::population_variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((population_variance(&v) - 4.0).abs() < 1e-10);
/// assert!(population_variance(&[1.0]).is_nan());
/// ```
pub fn population_variance(data: &[f64]) -> f64 {
    moment_sums(data).population_variance()
}

/// Sample variance `Σ(x−x̄)² / (n−1)`; NaN for fewer than 2 values.
///
/// # Examples
/// ```
/// use descstats::stats::sample_variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((sample_variance(&v) - 4.571428571428571).abs() < 1e-10);
/// ```
pub fn sample_variance(data: &[f64]) -> f64 {
    moment_sums(data).sample_variance()
}

/// Square root of [`population_variance`].
pub fn population_std_dev(data: &[f64]) -> f64 {
    population_variance(data).sqrt()
}

/// Square root of [`sample_variance`].
pub fn sample_std_dev(data: &[f64]) -> f64 {
    sample_variance(data).sqrt()
}

/// Population (biased) skewness `√n·M₃ / M₂^{3/2}`.
///
/// NaN for fewer than 2 values or zero variance.
pub fn population_skew(data: &[f64]) -> f64 {
    moment_sums(data).population_skew()
}

/// Fisher's adjusted sample skewness (G₁), matching Excel `SKEW()`.
///
/// NaN for fewer than 3 values or zero variance.
///
/// Reference: Joanes & Gill (1998), "Comparing measures of sample skewness
/// and kurtosis", *The Statistician* 47(1), pp. 183–189.
///
/// # Examples
/// ```
/// use descstats::stats::sample_skew;
/// assert!(sample_skew(&[1.0, 2.0, 3.0, 4.0, 5.0]).abs() < 1e-14);
/// assert!(sample_skew(&[1.0, 2.0, 3.0, 4.0, 50.0]) > 0.0);
/// assert!(sample_skew(&[1.0, 2.0]).is_nan());
/// ```
pub fn sample_skew(data: &[f64]) -> f64 {
    moment_sums(data).sample_skew()
}

/// Population excess kurtosis `n·M₄ / M₂² − 3`.
///
/// NaN for fewer than 2 values or zero variance.
pub fn population_kurtosis(data: &[f64]) -> f64 {
    moment_sums(data).population_kurtosis()
}

/// Fisher's adjusted sample excess kurtosis (G₂), matching Excel `KURT()`.
///
/// Returns 0 for a normal distribution, positive for heavy tails
/// (leptokurtic), negative for light tails (platykurtic). NaN for fewer
/// than 4 values or zero variance.
///
/// # Examples
/// ```
/// use descstats::stats::sample_kurtosis;
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// assert!(sample_kurtosis(&data) < 0.0); // platykurtic
/// ```
pub fn sample_kurtosis(data: &[f64]) -> f64 {
    moment_sums(data).sample_kurtosis()
}

/// Computes the full statistic set in one two-pass sweep.
///
/// # Examples
/// ```
/// use descstats::stats::describe;
/// let s = describe(&[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(s.count, 5);
/// assert!((s.sample_variance - 2.5).abs() < 1e-14);
/// ```
pub fn describe(data: &[f64]) -> DescriptiveSummary {
    let moments = moment_sums(data);
    let population_variance = moments.population_variance();
    let sample_variance = moments.sample_variance();
    DescriptiveSummary {
        count: moments.count,
        min: min(data),
        max: max(data),
        sum: sum(data),
        mean: mean(data),
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

// ---------------------------------------------------------------------------
// Kahan compensated summation
// ---------------------------------------------------------------------------

/// Neumaier compensated summation for O(ε) error independent of `n`.
///
/// This is an improved variant of Kahan summation that also handles the
/// case where the addend is larger in magnitude than the running sum.
///
/// Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
/// zur Summation endlicher Summen", *ZAMM* 54(1).
///
/// # Complexity
/// Time: O(n), Space: O(1)
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn assert_close(actual: f64, expected: f64, what: &str) {
        assert!(
            (actual - expected).abs() <= TOL * expected.abs().max(1.0),
            "{what}: expected {expected}, got {actual}"
        );
    }

    const TEN: [f64; 10] = [1.0, -2.0, 13.0, 47.0, 115.0, -0.03, -123.4, 23.0, -23.04, 12.3];

    // --- fixtures ---

    #[test]
    fn test_one_to_five() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(count(&a), 5);
        assert_eq!(min(&a), 1.0);
        assert_eq!(max(&a), 5.0);
        assert_close(sum(&a), 15.0, "sum");
        assert_close(mean(&a), 3.0, "mean");
        assert_close(population_variance(&a), 2.0, "population_variance");
        assert_close(sample_variance(&a), 2.5, "sample_variance");
        assert_close(population_std_dev(&a), 1.414213562373095, "population_std_dev");
        assert_close(sample_std_dev(&a), 1.5811388300841898, "sample_std_dev");
        assert_close(population_skew(&a), 0.0, "population_skew");
        assert_close(sample_skew(&a), 0.0, "sample_skew");
        assert_close(population_kurtosis(&a), -1.3, "population_kurtosis");
        assert_close(sample_kurtosis(&a), -1.2, "sample_kurtosis");
    }

    #[test]
    fn test_ten_values() {
        assert_eq!(count(&TEN), 10);
        assert_eq!(min(&TEN), -123.4);
        assert_eq!(max(&TEN), 115.0);
        assert_close(sum(&TEN), 62.83, "sum");
        assert_close(mean(&TEN), 6.283, "mean");
        assert_close(population_variance(&TEN), 3165.19316100, "population_variance");
        assert_close(sample_variance(&TEN), 3516.88129, "sample_variance");
        assert_close(population_std_dev(&TEN), 56.2600494223032, "population_std_dev");
        assert_close(sample_std_dev(&TEN), 59.3032991493728, "sample_std_dev");
        assert_close(population_skew(&TEN), -0.4770396201629045, "population_skew");
        assert_close(sample_skew(&TEN), -0.565699400196136, "sample_skew");
        assert_close(population_kurtosis(&TEN), 1.253240236214162, "population_kurtosis");
        assert_close(sample_kurtosis(&TEN), 3.179835417592894, "sample_kurtosis");
    }

    // --- degenerate sizes ---

    #[test]
    fn test_empty() {
        let a: [f64; 0] = [];
        assert_eq!(count(&a), 0);
        assert_eq!(min(&a), 0.0);
        assert_eq!(max(&a), 0.0);
        assert_eq!(sum(&a), 0.0);
        assert_eq!(mean(&a), 0.0);
        assert!(population_variance(&a).is_nan());
        assert!(sample_variance(&a).is_nan());
        assert!(population_std_dev(&a).is_nan());
        assert!(sample_std_dev(&a).is_nan());
        assert!(population_skew(&a).is_nan());
        assert!(sample_skew(&a).is_nan());
        assert!(population_kurtosis(&a).is_nan());
        assert!(sample_kurtosis(&a).is_nan());
    }

    #[test]
    fn test_single_value() {
        let a = [2.3];
        assert_eq!(min(&a), 2.3);
        assert_eq!(max(&a), 2.3);
        assert_eq!(sum(&a), 2.3);
        assert_eq!(mean(&a), 2.3);
        assert!(population_variance(&a).is_nan());
        assert!(sample_variance(&a).is_nan());
        assert!(population_skew(&a).is_nan());
        assert!(sample_kurtosis(&a).is_nan());
    }

    #[test]
    fn test_two_values() {
        let a = [2.3, 0.4];
        assert_close(population_variance(&a), 0.9025, "population_variance");
        assert_close(sample_variance(&a), 1.805, "sample_variance");
        assert_close(population_kurtosis(&a), -2.0, "population_kurtosis");
        assert!(sample_skew(&a).is_nan());
        assert!(sample_kurtosis(&a).is_nan());
    }

    #[test]
    fn test_three_values() {
        let a = [2.3, 0.4, -3.4];
        assert_close(sample_skew(&a), -0.935219529582825, "sample_skew");
        assert_close(population_kurtosis(&a), -1.5, "population_kurtosis");
        assert!(sample_kurtosis(&a).is_nan());
    }

    #[test]
    fn test_all_zeros() {
        for n in 2..=10 {
            let a = vec![0.0; n];
            assert_eq!(population_variance(&a), 0.0);
            assert_eq!(sample_variance(&a), 0.0);
            assert_eq!(population_std_dev(&a), 0.0);
            assert_eq!(sample_std_dev(&a), 0.0);
            assert!(population_skew(&a).is_nan());
            assert!(sample_skew(&a).is_nan());
            assert!(population_kurtosis(&a).is_nan());
            assert!(sample_kurtosis(&a).is_nan());
        }
    }

    // --- describe ---

    #[test]
    fn test_describe_matches_individual_functions() {
        let s = describe(&TEN);
        assert_eq!(s.count, 10);
        assert_eq!(s.min, min(&TEN));
        assert_eq!(s.max, max(&TEN));
        assert_eq!(s.sum, sum(&TEN));
        assert_eq!(s.mean, mean(&TEN));
        assert_eq!(s.sample_variance, sample_variance(&TEN));
        assert_eq!(s.sample_skew, sample_skew(&TEN));
        assert_eq!(s.sample_kurtosis, sample_kurtosis(&TEN));
    }

    #[test]
    fn test_batch_calls_are_idempotent() {
        let first = describe(&TEN);
        let second = describe(&TEN);
        assert_eq!(first, second);
        assert_eq!(sample_kurtosis(&TEN), sample_kurtosis(&TEN));
    }

    // --- kahan ---

    #[test]
    fn test_kahan_sum_recovers_small_terms() {
        // 1.0 followed by many tiny values that naive summation drops
        let mut data = vec![1.0];
        data.extend(std::iter::repeat(1e-16).take(10_000));
        let s = kahan_sum(&data);
        assert!((s - (1.0 + 1e-12)).abs() < 1e-15, "got {s}");
    }

    #[test]
    fn test_variance_large_offset() {
        // Naive E[X²] − E[X]² would suffer catastrophic cancellation.
        let data: Vec<f64> = (1..=5).map(|i| 1e9 + i as f64).collect();
        let var = sample_variance(&data);
        assert!((var - 2.5).abs() < 1e-5, "expected ~2.5, got {var}");
    }
}
