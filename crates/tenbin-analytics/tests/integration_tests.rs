//! Integration tests for tenbin-analytics.
//!
//! These tests run the engine and classifier over small but realistic
//! index pairs.

use approx::assert_relative_eq;
use tenbin_analytics::prelude::*;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn record(code: &str, sector: &str, weight: f64, pbr: f64, roe: f64, dy: f64) -> ConstituentRecord {
    ConstituentRecord::new(code)
        .with_sector(sector)
        .with_weight(weight)
        .with_pbr(pbr)
        .with_roe(roe)
        .with_dividend_yield(dy)
}

/// Two-name equal-weight index mirroring the ingest fixture.
fn yomiuri() -> IndexSnapshot {
    IndexSnapshot::new(
        INDEX_A,
        vec![
            record("1001", "Materials", 0.5, 0.8, 5.0, 2.6),
            record("2002", "Industrials", 0.5, 1.2, 3.6, 2.1),
        ],
    )
}

/// Three-name cap-weighted benchmark.
fn topix() -> IndexSnapshot {
    IndexSnapshot::new(
        BENCHMARK,
        vec![
            record("1001", "Materials", 0.6, 1.4, 7.5, 1.8),
            record("2002", "Industrials", 0.25, 0.9, 5.5, 1.9),
            record("3003", "IT", 0.15, 2.1, 10.5, 1.2),
        ],
    )
}

// =============================================================================
// METRICS
// =============================================================================

#[test]
fn test_metrics_for_sample_pair() {
    let metrics = compute_comparison(&yomiuri(), &topix(), &AnalyticsConfig::default());

    let a = &metrics.index_a;
    assert_relative_eq!(a.get(Metric::PbrBelow1Ratio).unwrap(), 0.5);
    assert_relative_eq!(a.get(Metric::RoeMedian).unwrap(), 4.3, epsilon = 1e-9);
    assert_relative_eq!(a.get(Metric::DividendYieldMean).unwrap(), 2.35, epsilon = 1e-9);
    assert_relative_eq!(a.get(Metric::SectorHhi).unwrap(), 0.5, epsilon = 1e-12);

    let b = &metrics.benchmark;
    assert_relative_eq!(b.get(Metric::PbrBelow1Ratio).unwrap(), 1.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(b.get(Metric::RoeMedian).unwrap(), 7.5);
    // 0.36 + 0.0625 + 0.0225
    assert_relative_eq!(b.get(Metric::SectorHhi).unwrap(), 0.445, epsilon = 1e-12);
    assert_relative_eq!(b.get(Metric::Top10Weight).unwrap(), 1.0, epsilon = 1e-12);
    assert_eq!(b.get(Metric::ConstituentCount), Some(3.0));
}

#[test]
fn test_end_to_end_reference_values() {
    let a = IndexSnapshot::new(
        INDEX_A,
        vec![
            ConstituentRecord::new("A1").with_pbr(0.8).with_roe(5.0).with_sector("X").with_weight(0.6),
            ConstituentRecord::new("A2").with_pbr(1.2).with_roe(15.0).with_sector("Y").with_weight(0.4),
        ],
    );
    let table = compute_metrics(&a, &AnalyticsConfig::default());
    assert_relative_eq!(table.get(Metric::PbrBelow1Ratio).unwrap(), 0.5);
    assert_relative_eq!(table.get(Metric::RoeMedian).unwrap(), 10.0);
    assert_relative_eq!(table.get(Metric::SectorHhi).unwrap(), 0.52, epsilon = 1e-12);
}

#[test]
fn test_partial_data_is_tolerated() {
    let mut snapshot = topix();
    snapshot.constituents[0].pbr = None;
    snapshot.constituents[1].sector = None;
    snapshot.constituents[2].roe = None;

    let table = compute_metrics(&snapshot, &AnalyticsConfig::default());
    // 0.9 < 1 out of {0.9, 2.1}
    assert_relative_eq!(table.get(Metric::PbrBelow1Ratio).unwrap(), 0.5);
    assert_relative_eq!(table.get(Metric::RoeMedian).unwrap(), 6.5);
    // Materials 0.6/0.75, IT 0.15/0.75
    assert_relative_eq!(table.get(Metric::SectorHhi).unwrap(), 0.68, epsilon = 1e-12);
    assert_eq!(table.get(Metric::PbrCount), Some(2.0));
}

#[test]
fn test_weight_invariant_is_a_warning_only() {
    let mut snapshot = topix();
    snapshot.constituents[2].weight = Some(0.5);

    let config = AnalyticsConfig::default();
    let warnings = weight_warnings(&[&snapshot], &config);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].index, BENCHMARK);

    let table = compute_metrics(&snapshot, &config);
    assert_relative_eq!(table.get(Metric::Top10Weight).unwrap(), 1.35, epsilon = 1e-12);
    assert!(table.get(Metric::SectorHhi).unwrap() <= 1.0);
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

#[test]
fn test_logic_summary_for_sample_pair() {
    let metrics = compute_comparison(&yomiuri(), &topix(), &AnalyticsConfig::default());
    let logic = classify(&metrics, &RuleSet::standard());

    assert!(logic.strengths.iter().any(|s| s.contains("PBR")));
    assert!(logic.weaknesses.iter().any(|s| s.contains("ROE")));
    // Dividend yield 2.35 vs 1.63
    assert!(logic.strengths.iter().any(|s| s.starts_with("配当利回り")));
    // HHI 0.5 vs 0.445
    assert!(logic.weaknesses.iter().any(|s| s.starts_with("セクターHHI")));
    assert!(logic.cautions.is_empty());
}

#[test]
fn test_missing_benchmark_produces_cautions() {
    let metrics = compute_comparison(
        &yomiuri(),
        &IndexSnapshot::empty(BENCHMARK),
        &AnalyticsConfig::default(),
    );
    let logic = classify(&metrics, &RuleSet::standard());

    assert!(logic.strengths.is_empty());
    assert!(logic.weaknesses.is_empty());
    assert_eq!(logic.cautions.len(), 3);
}

#[test]
fn test_insights_cover_every_dimension() {
    let metrics = compute_comparison(&yomiuri(), &topix(), &AnalyticsConfig::default());
    let insights = derive_insights(&metrics);
    assert_eq!(insights.len(), 4);
    assert!(insights[0].starts_with("バリュー"));
    assert!(insights[1].contains("低い水準(4.30 vs 7.50)"));
    assert!(insights[3].contains("0.500"));
}
