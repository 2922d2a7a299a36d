//! Reference values exercised through the public API.

use descstats::{
    box_muller_transform, linear_regression, stats, MomentAccumulator, NormalSampler,
    PolarBoxMuller, RegressionAccumulator, Ziggurat, ZigguratTable,
};

const TEN: [f64; 10] = [1.0, -2.0, 13.0, 47.0, 115.0, -0.03, -123.4, 23.0, -23.04, 12.3];

fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol * scale,
        "{what}: expected {expected}, got {actual}"
    );
}

#[test]
fn one_to_five_online_and_batch() {
    let data = [1.0, 2.0, 3.0, 4.0, 5.0];
    let mut acc = MomentAccumulator::new();
    acc.append_slice(&data);

    for (label, s) in [("online", acc.summary()), ("batch", stats::describe(&data))] {
        assert_eq!(s.count, 5, "{label}");
        assert_close(s.mean, 3.0, 1e-14, label);
        assert_close(s.population_variance, 2.0, 1e-14, label);
        assert_close(s.sample_variance, 2.5, 1e-14, label);
        assert_close(s.population_skew, 0.0, 1e-14, label);
        assert_close(s.sample_skew, 0.0, 1e-14, label);
        assert_close(s.population_kurtosis, -1.3, 1e-14, label);
        assert_close(s.sample_kurtosis, -1.2, 1e-14, label);
    }
}

#[test]
fn two_values() {
    let acc: MomentAccumulator = [2.3, 0.4].into_iter().collect();
    assert_eq!(acc.count(), 2);
    assert_eq!(acc.min(), 0.4);
    assert_eq!(acc.max(), 2.3);
    assert_close(acc.sum(), 2.7, 1e-14, "sum");
    assert_close(acc.mean(), 1.35, 1e-14, "mean");
    assert_close(acc.population_variance(), 0.9025, 1e-14, "population variance");
    assert_close(acc.sample_variance(), 1.805, 1e-14, "sample variance");
    assert!(acc.sample_skew().is_nan());
    assert!(acc.sample_kurtosis().is_nan());
    assert!(acc.population_skew().is_finite());
    assert!(acc.population_kurtosis().is_finite());
}

#[test]
fn ten_values_kurtosis() {
    let acc: MomentAccumulator = TEN.into_iter().collect();
    assert_eq!(acc.count(), 10);
    assert_close(acc.sum(), 62.83, 1e-12, "sum");
    assert_close(acc.mean(), 6.283, 1e-12, "mean");
    assert_close(acc.population_kurtosis(), 1.25324023621, 1e-10, "population kurtosis");
    assert_close(acc.sample_kurtosis(), 3.17983541759, 1e-10, "sample kurtosis");

    assert_close(stats::sum(&TEN), 62.83, 1e-12, "batch sum");
    assert_close(stats::population_kurtosis(&TEN), 1.25324023621, 1e-10, "batch kurtosis");
    assert_close(stats::sample_kurtosis(&TEN), 3.17983541759, 1e-10, "batch sample kurtosis");
}

#[test]
fn empty_and_single_accumulators() {
    let empty = MomentAccumulator::new();
    assert_eq!(empty.count(), 0);
    assert_eq!(empty.sum(), 0.0);
    assert_eq!(empty.mean(), 0.0);
    assert!(empty.population_variance().is_nan());
    assert!(empty.sample_kurtosis().is_nan());

    let single: MomentAccumulator = std::iter::once(-7.5).collect();
    assert_eq!(single.count(), 1);
    assert_eq!(single.sum(), -7.5);
    assert_eq!(single.mean(), -7.5);
    for v in [
        single.population_variance(),
        single.sample_variance(),
        single.population_std_dev(),
        single.sample_std_dev(),
        single.population_skew(),
        single.sample_skew(),
        single.population_kurtosis(),
        single.sample_kurtosis(),
    ] {
        assert!(v.is_nan());
    }
}

#[test]
fn split_streams_merge_to_whole() {
    let mut left: MomentAccumulator = TEN[..4].iter().copied().collect();
    let right: MomentAccumulator = TEN[4..].iter().copied().collect();
    left.merge(&right);
    let whole: MomentAccumulator = TEN.into_iter().collect();

    assert_eq!(left.count(), whole.count());
    assert_close(left.mean(), whole.mean(), 1e-12, "mean");
    assert_close(left.sample_variance(), whole.sample_variance(), 1e-12, "variance");
    assert_close(left.sample_skew(), whole.sample_skew(), 1e-12, "skew");
    assert_close(left.sample_kurtosis(), whole.sample_kurtosis(), 1e-12, "kurtosis");
}

#[test]
fn regression_online_matches_batch() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    let y = [2.0, 4.0, 5.0, 4.0, 5.0];
    let online: RegressionAccumulator = x.iter().copied().zip(y.iter().copied()).collect();
    let (slope, intercept, r2, n, se_slope, se_intercept) =
        linear_regression(&x, &y).unwrap().into_tuple();

    assert_eq!(n, 5);
    assert_close(slope, 0.6, 1e-12, "slope");
    assert_close(intercept, 2.2, 1e-12, "intercept");
    assert_close(r2, 0.6, 1e-12, "r squared");
    assert_close(se_slope, 0.08_f64.sqrt(), 1e-12, "slope standard error");
    assert_close(se_intercept, 0.88_f64.sqrt(), 1e-12, "intercept standard error");

    assert_close(online.slope(), slope, 1e-12, "online slope");
    assert_close(online.intercept(), intercept, 1e-12, "online intercept");
    assert_close(online.r_squared(), r2, 1e-12, "online r squared");
    assert_close(online.slope_standard_error(), se_slope, 1e-12, "online slope se");
    assert_close(online.intercept_standard_error(), se_intercept, 1e-12, "online intercept se");
}

#[test]
fn box_muller_reference_pair() {
    let (y1, y2) = box_muller_transform(0.3, 0.2);
    assert_close(y1, 0.47951886809696076, 1e-14, "first");
    assert_close(y2, 1.475807326106928, 1e-14, "second");
}

#[test]
fn batch_queries_are_idempotent() {
    let first = stats::describe(&TEN);
    let second = stats::describe(&TEN);
    assert_eq!(first, second);
}

#[test]
fn ziggurat_table_is_reproducible() {
    let rebuilt = ZigguratTable::new(
        descstats::normal::ZIGGURAT_BLOCKS,
        descstats::normal::ZIGGURAT_TAIL_START,
        descstats::normal::ZIGGURAT_VOLUME,
    )
    .unwrap();
    assert_eq!(&rebuilt, ZigguratTable::standard());
}

#[test]
fn generators_are_interchangeable() {
    fn mean_of<S: NormalSampler>(mut sampler: S) -> f64 {
        let mut rng = descstats::random::create_rng(2024);
        let acc: MomentAccumulator = (0..20_000).map(|_| sampler.sample(&mut rng)).collect();
        acc.mean()
    }
    assert!(mean_of(descstats::BoxMuller::new()).abs() < 0.05);
    assert!(mean_of(PolarBoxMuller::new()).abs() < 0.05);
    assert!(mean_of(Ziggurat::new()).abs() < 0.05);
}
