//! # descstats
//!
//! Descriptive statistics, simple linear regression, and exact
//! standard-normal generation.
//!
//! The crate provides streaming and batch estimators for the first four
//! moments of a sample, a least-squares line fit with standard errors, and
//! three interchangeable normal-variate generators driven by any
//! [`rand::Rng`].
//!
//! ## Modules
//!
//! - [`accumulator`] — Single-pass moment accumulator with merge support
//! - [`stats`] — Two-pass batch moments over slices
//! - [`regression`] — Online and batch simple linear regression
//! - [`normal`] — Box-Muller, polar Box-Muller and Ziggurat generators
//! - [`random`] — Uniform helpers and seeded generator construction
//!
//! ## Conventions
//!
//! - **Undefined is NaN**: statistics that need more observations than are
//!   available (or a non-zero spread) return `f64::NAN` instead of failing.
//! - **Numerical stability first**: Welford-style updates for streaming
//!   moments, Neumaier summation and two passes for batch moments.
//! - **Property-based testing**: streaming/batch agreement and merge
//!   invariants are verified via proptest.
//!
//! ## Example
//! ```
//! use descstats::{MomentAccumulator, linear_regression};
//!
//! let acc: MomentAccumulator = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
//!     .into_iter()
//!     .collect();
//! assert_eq!(acc.mean(), 5.0);
//! assert!((acc.population_std_dev() - 2.0).abs() < 1e-12);
//!
//! let fit = linear_regression(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
//! assert!((fit.slope - 2.0).abs() < 1e-12);
//! ```

pub mod accumulator;
pub mod normal;
pub mod random;
pub mod regression;
pub mod stats;

pub use accumulator::MomentAccumulator;
pub use normal::{
    box_muller_transform, standard_normal, BoxMuller, NormalSampler, PolarBoxMuller, Ziggurat,
    ZigguratError, ZigguratTable,
};
pub use regression::{linear_regression, RegressionAccumulator, RegressionError, RegressionSummary};
pub use stats::DescriptiveSummary;
