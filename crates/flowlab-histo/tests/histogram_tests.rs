//! Histogram integration tests
//!
//! Scenario checks for filling, integration and sampling, plus
//! property-based checks of the counting and moment invariants.

use flowlab_histo::{
    BookConfig, HistoError, Histogram, HistogramBook, RenderSnapshot, PROBABILITY_SLOTS,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// === Scenarios ===

#[test]
fn test_fill_lands_in_expected_bin() {
    let mut h = Histogram::new_1d("scenario", 10, 0.0, 100.0).unwrap();
    h.fill(55.0);

    let bin = h.counts().iter().position(|&c| c == 1).unwrap();
    assert_eq!(bin, 5);
    assert_eq!(h.bin_left_edges()[bin], 50.0);
    assert_eq!(h.entries(), 1);
    assert_eq!(h.x_mean(), 55.0);
    assert_eq!(h.x_rms(), 0.0);
}

#[test]
fn test_right_edge_is_in_range() {
    let mut h = Histogram::new_1d("edge", 10, 0.0, 100.0).unwrap();
    h.fill(100.0);
    assert_eq!(h.counts()[9], 1);
    assert_eq!(h.entries(), 1);
}

#[test]
fn test_underflow_and_overflow() {
    let mut h = Histogram::new_1d("overflow", 10, 0.0, 100.0).unwrap();
    h.fill(-5.0);
    h.fill(150.0);
    assert_eq!(h.entries_including_overflows(), 2);
    assert_eq!(h.entries(), 0);
    assert_eq!(h.counts().iter().sum::<u64>(), 0);
}

#[test]
fn test_cumulative_of_three_bins() {
    let mut h = Histogram::new_1d("thirds", 3, 0.0, 3.0).unwrap();
    h.fill_many([0.0, 1.0, 2.0]);
    h.build_cumulative().unwrap();

    let expected = [1.0 / 3.0, 2.0 / 3.0, 1.0];
    let values = h.cumulative().unwrap().values();
    for (got, want) in values.iter().zip(expected) {
        assert!((got - want).abs() < 1e-12, "{} vs {}", got, want);
    }
    assert_eq!(
        h.cumulative().unwrap().quantile_table().len(),
        PROBABILITY_SLOTS
    );
}

#[test]
fn test_2d_rejects_integration_and_sampling() {
    let mut h = Histogram::new_2d("scatter", 10, 0.0, 100.0, 15, 0.0, 4.0).unwrap();
    h.fill_xy(10.0, 1.0);
    h.fill_xy(90.0, 3.0);
    let before = h.counts().to_vec();

    assert!(matches!(
        h.build_cumulative(),
        Err(HistoError::UnsupportedOperation { .. })
    ));
    assert!(h.sample().is_nan());
    assert_eq!(h.counts(), before.as_slice());
    assert_eq!(h.entries(), 2);
}

#[test]
fn test_pressure_workflow() {
    let config = BookConfig::from_toml(
        r#"
        [[histograms]]
        title = "1. p0 - p1, Pascals"
        x = { bins = 1401, min = -2.0, max = 12.0 }
        x_label = "p0 - p1"
        y_label = "N"

        [[histograms]]
        title = "1b. p0 - p1, Pascals"
        x = { bins = 601, min = 3.5, max = 9.5 }
        x_label = "p0 - p1"
        y_label = "N"
        "#,
    )
    .unwrap();
    let mut book = HistogramBook::from_config(&config).unwrap();

    let readings = [0.4, 4.1, 5.6, 6.2, 6.9, 7.7, 11.8, 13.0];
    for &dp in &readings {
        book.fill("1. p0 - p1, Pascals", dp).unwrap();
        if (3.5..=9.5).contains(&dp) {
            book.fill("1b. p0 - p1, Pascals", dp).unwrap();
        }
    }

    let wide = book.get("1. p0 - p1, Pascals").unwrap();
    assert_eq!(wide.entries(), 7);
    assert_eq!(wide.overflows(), 1);
    let narrow = book.get("1b. p0 - p1, Pascals").unwrap();
    assert_eq!(narrow.entries(), 5);

    let snapshot = RenderSnapshot::from_histogram(wide).with_log_scale();
    assert!(snapshot.stats_message().ends_with("N = 7"));
    let plot = snapshot.step_plot.unwrap();
    assert_eq!(plot.edges.len(), 1402);
    assert_eq!(plot.heights.len(), 1402);
}

#[test]
fn test_seeded_sampling_is_reproducible() {
    let mut h = Histogram::new_1d("seeded", 20, -1.0, 1.0).unwrap();
    h.fill_many((0..200).map(|i| ((i as f64) * 0.37).sin()));

    let mut a = StdRng::seed_from_u64(99);
    let mut b = StdRng::seed_from_u64(99);
    let first: Vec<f64> = (0..50).map(|_| h.sample_with(&mut a)).collect();
    let second: Vec<f64> = (0..50).map(|_| h.sample_with(&mut b)).collect();
    assert_eq!(first, second);
}

#[test]
fn test_sample_mean_tracks_histogram_mean() {
    let mut h = Histogram::new_1d("tracking", 50, 0.0, 10.0).unwrap();
    h.fill_many((0..5000).map(|i| 2.0 + 4.0 * ((i % 100) as f64) / 100.0));

    let mut rng = StdRng::seed_from_u64(5);
    let n = 20_000;
    let mean = (0..n).map(|_| h.sample_with(&mut rng)).sum::<f64>() / n as f64;
    assert!((mean - h.x_mean()).abs() < 0.15, "{} vs {}", mean, h.x_mean());
}

// === Properties ===

fn batch_mean_rms(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

proptest! {
    #[test]
    fn test_bin_edges_span_domain(
        bins in 1usize..500,
        min in -1.0e3f64..1.0e3,
        span in 1.0e-3f64..1.0e3,
    ) {
        let max = min + span;
        let h = Histogram::new_1d("edges", bins, min, max).unwrap();
        let width = h.x_axis().width();
        prop_assert!((width - span / bins as f64).abs() <= 1e-9 * span);

        let edges = h.bin_left_edges();
        prop_assert_eq!(edges.len(), bins);
        prop_assert_eq!(edges[0], min);
        prop_assert!(edges.windows(2).all(|w| w[0] < w[1]));
        prop_assert!((edges[bins - 1] - (max - width)).abs() <= 1e-9 * span.max(min.abs()));
    }

    #[test]
    fn test_counts_match_domain_predicate(
        values in prop::collection::vec(-50.0f64..150.0, 0..300),
    ) {
        let mut h = Histogram::new_1d("counts", 10, 0.0, 100.0).unwrap();
        h.fill_many(values.iter().copied());

        let in_domain = values.iter().filter(|&&x| (0.0..=100.0).contains(&x)).count() as u64;
        prop_assert_eq!(h.entries(), in_domain);
        prop_assert_eq!(h.entries_including_overflows(), values.len() as u64);
        prop_assert!(h.entries() <= h.entries_including_overflows());
        prop_assert_eq!(h.counts().iter().sum::<u64>(), h.entries());
    }

    #[test]
    fn test_2d_grid_sum_matches_entries(
        pairs in prop::collection::vec((-10.0f64..110.0, -1.0f64..5.0), 0..300),
    ) {
        let mut h = Histogram::new_2d("grid", 10, 0.0, 100.0, 15, 0.0, 4.0).unwrap();
        for &(x, y) in &pairs {
            h.fill_xy(x, y);
        }
        let accepted = pairs
            .iter()
            .filter(|(x, y)| (0.0..=100.0).contains(x) && (0.0..=4.0).contains(y))
            .count() as u64;
        prop_assert_eq!(h.entries(), accepted);
        prop_assert_eq!(h.counts().iter().sum::<u64>(), accepted);
    }

    #[test]
    fn test_incremental_moments_match_batch(
        values in prop::collection::vec(0.0f64..100.0, 1..300),
    ) {
        let mut h = Histogram::new_1d("moments", 25, 0.0, 100.0).unwrap();
        h.fill_many(values.iter().copied());
        let (mean, rms) = batch_mean_rms(&values);
        prop_assert!((h.x_mean() - mean).abs() < 1e-9);
        // Compare variances: sqrt amplifies rounding when the spread is tiny
        prop_assert!((h.x_rms().powi(2) - rms.powi(2)).abs() < 1e-6);
    }

    #[test]
    fn test_cumulative_is_monotone_and_normalized(
        values in prop::collection::vec(0.0f64..10.0, 1..300),
        bins in 1usize..60,
    ) {
        let mut h = Histogram::new_1d("cdf", bins, 0.0, 10.0).unwrap();
        h.fill_many(values.iter().copied());
        h.build_cumulative().unwrap();

        let cdf = h.cumulative().unwrap();
        let v = cdf.values();
        prop_assert!(v.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(*v.last().unwrap(), 1.0);
        prop_assert!(v[0] >= 0.0);

        let table = cdf.quantile_table();
        prop_assert!(table.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(table.iter().all(|&x| (0.0..=10.0).contains(&x)));
    }

    #[test]
    fn test_samples_stay_in_domain(
        values in prop::collection::vec(-3.0f64..3.0, 1..200),
        seed in any::<u64>(),
    ) {
        let mut h = Histogram::new_1d("samples", 30, -3.0, 3.0).unwrap();
        h.fill_many(values.iter().copied());
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..200 {
            let x = h.try_sample_with(&mut rng).unwrap();
            prop_assert!((-3.0..=3.0).contains(&x), "sample {} out of domain", x);
        }
    }
}
