//! Rule definitions.
//!
//! A rule pairs a pure predicate over the two metric tables with the
//! statement it emits and the list the statement goes to.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tenbin_core::Metric;

use super::message::Message;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::metrics::ComparisonMetrics;

/// Default tie band for benchmark comparisons.
pub const DEFAULT_EPSILON: f64 = 1e-9;

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

/// Output list a rule writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Structural strength.
    Strength,
    /// Structural weakness.
    Weakness,
    /// Data caveat.
    Caution,
}

/// Which tables a missing-data predicate inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Only the evaluated index.
    IndexA,
    /// The evaluated index or the benchmark.
    Either,
}

/// Condition under which a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Index value exceeds the benchmark by more than `epsilon`.
    AboveBenchmark {
        /// Compared metric.
        metric: Metric,
        /// Tie band.
        #[serde(default = "default_epsilon")]
        epsilon: f64,
    },
    /// Index value trails the benchmark by more than `epsilon`.
    BelowBenchmark {
        /// Compared metric.
        metric: Metric,
        /// Tie band.
        #[serde(default = "default_epsilon")]
        epsilon: f64,
    },
    /// Metric is missing.
    Missing {
        /// Inspected metric.
        metric: Metric,
        /// Tables inspected.
        scope: Scope,
    },
}

impl Predicate {
    /// Metric the predicate reads.
    pub fn metric(&self) -> Metric {
        match *self {
            Predicate::AboveBenchmark { metric, .. }
            | Predicate::BelowBenchmark { metric, .. }
            | Predicate::Missing { metric, .. } => metric,
        }
    }

    /// Returns true if the predicate holds.
    ///
    /// Comparisons with a missing side, or within the tie band, do not hold.
    pub fn holds(&self, metrics: &ComparisonMetrics) -> bool {
        let (a, b) = metrics.pair(self.metric());
        match *self {
            Predicate::AboveBenchmark { epsilon, .. } => {
                matches!((a, b), (Some(a), Some(b)) if a - b > epsilon)
            }
            Predicate::BelowBenchmark { epsilon, .. } => {
                matches!((a, b), (Some(a), Some(b)) if b - a > epsilon)
            }
            Predicate::Missing { scope, .. } => match scope {
                Scope::IndexA => a.is_none(),
                Scope::Either => a.is_none() || b.is_none(),
            },
        }
    }
}

/// One classification rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Stable identifier.
    pub id: String,
    /// Destination list.
    pub category: Category,
    /// Firing condition.
    pub predicate: Predicate,
    /// Emitted statement.
    pub message: Message,
}

impl Rule {
    /// Creates a rule.
    #[must_use]
    pub fn new(id: impl Into<String>, category: Category, predicate: Predicate, message: Message) -> Self {
        Self {
            id: id.into(),
            category,
            predicate,
            message,
        }
    }

    /// Statement text if the rule fires.
    pub fn evaluate(&self, metrics: &ComparisonMetrics) -> Option<String> {
        if !self.predicate.holds(metrics) {
            return None;
        }
        let (a, b) = metrics.pair(self.predicate.metric());
        Some(self.message.render(a, b))
    }
}

/// Versioned, ordered list of rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Version label, bumped whenever rules change.
    pub version: String,
    /// Rules in evaluation order.
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// The built-in rule set.
    #[must_use]
    pub fn standard() -> Self {
        use Category::{Caution, Strength, Weakness};
        use Predicate::{AboveBenchmark, BelowBenchmark, Missing};

        let epsilon = DEFAULT_EPSILON;
        let rules = vec![
            Rule::new(
                "pbr_value_tilt",
                Strength,
                AboveBenchmark { metric: Metric::PbrBelow1Ratio, epsilon },
                Message::PbrValueTilt,
            ),
            Rule::new(
                "pbr_value_limited",
                Weakness,
                BelowBenchmark { metric: Metric::PbrBelow1Ratio, epsilon },
                Message::PbrValueLimited,
            ),
            Rule::new(
                "pbr_data_gap",
                Caution,
                Missing { metric: Metric::PbrBelow1Ratio, scope: Scope::Either },
                Message::PbrDataGap,
            ),
            Rule::new(
                "roe_at_par",
                Strength,
                AboveBenchmark { metric: Metric::RoeMedian, epsilon },
                Message::RoeAtPar,
            ),
            Rule::new(
                "roe_lag",
                Weakness,
                BelowBenchmark { metric: Metric::RoeMedian, epsilon },
                Message::RoeLag,
            ),
            Rule::new(
                "roe_data_gap",
                Caution,
                Missing { metric: Metric::RoeMedian, scope: Scope::Either },
                Message::RoeDataGap,
            ),
            Rule::new(
                "yield_premium",
                Strength,
                AboveBenchmark { metric: Metric::DividendYieldMean, epsilon },
                Message::YieldPremium,
            ),
            Rule::new(
                "yield_shortfall",
                Weakness,
                BelowBenchmark { metric: Metric::DividendYieldMean, epsilon },
                Message::YieldShortfall,
            ),
            Rule::new(
                "yield_data_gap",
                Caution,
                Missing { metric: Metric::DividendYieldMean, scope: Scope::Either },
                Message::YieldDataGap,
            ),
            Rule::new(
                "sector_concentrated",
                Weakness,
                AboveBenchmark { metric: Metric::SectorHhi, epsilon },
                Message::SectorConcentrated,
            ),
            Rule::new(
                "sector_diversified",
                Strength,
                BelowBenchmark { metric: Metric::SectorHhi, epsilon },
                Message::SectorDiversified,
            ),
            Rule::new(
                "sector_data_gap",
                Caution,
                Missing { metric: Metric::SectorHhi, scope: Scope::IndexA },
                Message::SectorDataGap,
            ),
            Rule::new(
                "top_weight_data_gap",
                Caution,
                Missing { metric: Metric::Top10Weight, scope: Scope::IndexA },
                Message::TopWeightDataGap,
            ),
        ];

        Self {
            version: "2024.1".to_string(),
            rules,
        }
    }

    /// Checks ids are unique and tie bands are finite and non-negative.
    pub fn validate(&self) -> AnalyticsResult<()> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(AnalyticsError::invalid_rule_set(format!(
                    "duplicate rule id '{}'",
                    rule.id
                )));
            }
            if let Predicate::AboveBenchmark { epsilon, .. } | Predicate::BelowBenchmark { epsilon, .. } =
                rule.predicate
            {
                if !epsilon.is_finite() || epsilon < 0.0 {
                    return Err(AnalyticsError::invalid_rule_set(format!(
                        "rule '{}' has invalid epsilon {}",
                        rule.id, epsilon
                    )));
                }
            }
        }
        Ok(())
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
