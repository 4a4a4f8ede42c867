//! Logic classifier.
//!
//! Evaluates a [`RuleSet`] against the metric tables of the evaluated index
//! and its benchmark. Rules are visited in definition order and each fired
//! rule appends its statement to its category's list, so output order is
//! rule order.

mod insights;
mod message;
mod rules;

pub use insights::derive_insights;
pub use message::Message;
pub use rules::{Category, Predicate, Rule, RuleSet, Scope, DEFAULT_EPSILON};

use tenbin_core::ClassificationResult;

use crate::metrics::ComparisonMetrics;

/// Classifies the evaluated index against the benchmark.
#[must_use]
pub fn classify(metrics: &ComparisonMetrics, rules: &RuleSet) -> ClassificationResult {
    let mut result = ClassificationResult::new();
    for rule in &rules.rules {
        let Some(statement) = rule.evaluate(metrics) else {
            continue;
        };
        match rule.category {
            Category::Strength => result.strengths.push(statement),
            Category::Weakness => result.weaknesses.push(statement),
            Category::Caution => result.cautions.push(statement),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenbin_core::{Metric, MetricsTable, BENCHMARK, INDEX_A};

    fn metrics(a: &[(Metric, f64)], b: &[(Metric, f64)]) -> ComparisonMetrics {
        ComparisonMetrics::new(
            MetricsTable::from_values(INDEX_A, a.iter().map(|(m, v)| (*m, Some(*v)))),
            MetricsTable::from_values(BENCHMARK, b.iter().map(|(m, v)| (*m, Some(*v)))),
        )
    }

    #[test]
    fn test_all_missing_yields_only_cautions() {
        let result = classify(&ComparisonMetrics::empty(), &RuleSet::standard());
        assert!(result.strengths.is_empty());
        assert!(result.weaknesses.is_empty());
        assert_eq!(result.cautions.len(), 5);
        assert!(result.cautions[0].starts_with("PBR"));
        assert!(result.cautions[4].starts_with("上位構成比"));
    }

    #[test]
    fn test_output_follows_rule_order() {
        let m = metrics(
            &[
                (Metric::PbrBelow1Ratio, 0.6),
                (Metric::RoeMedian, 9.0),
                (Metric::DividendYieldMean, 2.5),
                (Metric::SectorHhi, 0.08),
                (Metric::Top10Weight, 0.04),
            ],
            &[
                (Metric::PbrBelow1Ratio, 0.4),
                (Metric::RoeMedian, 8.0),
                (Metric::DividendYieldMean, 2.0),
                (Metric::SectorHhi, 0.1),
                (Metric::Top10Weight, 0.2),
            ],
        );
        let result = classify(&m, &RuleSet::standard());
        assert_eq!(result.strengths.len(), 4);
        assert!(result.strengths[0].starts_with("PBR"));
        assert!(result.strengths[1].starts_with("ROE"));
        assert!(result.strengths[2].starts_with("配当"));
        assert!(result.strengths[3].starts_with("セクター"));
        assert!(result.weaknesses.is_empty());
        assert!(result.cautions.is_empty());
    }

    #[test]
    fn test_ties_are_skipped() {
        let m = metrics(
            &[(Metric::RoeMedian, 8.0), (Metric::Top10Weight, 0.1)],
            &[(Metric::RoeMedian, 8.0)],
        );
        let result = classify(&m, &RuleSet::standard());
        assert!(result.strengths.iter().all(|s| !s.starts_with("ROE")));
        assert!(result.weaknesses.iter().all(|s| !s.starts_with("ROE")));
        assert!(result.cautions.iter().all(|s| !s.starts_with("ROE")));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let m = metrics(
            &[(Metric::SectorHhi, 0.5), (Metric::RoeMedian, 4.3)],
            &[(Metric::SectorHhi, 0.4), (Metric::RoeMedian, 7.5)],
        );
        let first = classify(&m, &RuleSet::standard());
        let second = classify(&m, &RuleSet::standard());
        assert_eq!(first, second);
        assert_eq!(first.weaknesses.len(), 2);
        assert!(first.weaknesses[0].starts_with("ROE"));
        assert!(first.weaknesses[1].starts_with("セクター"));
    }
}
