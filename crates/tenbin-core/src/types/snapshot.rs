//! Index snapshot: a named set of constituents at one point in time.

use serde::{Deserialize, Serialize};

use super::ConstituentRecord;
use crate::error::WeightInvariantWarning;

/// A named index and its constituents.
///
/// Constituent order carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    /// Index name (`"yomiuri333"`, `"topix"`, ...).
    pub name: String,

    /// Constituent records.
    pub constituents: Vec<ConstituentRecord>,
}

impl IndexSnapshot {
    /// Creates a snapshot.
    #[must_use]
    pub fn new(name: impl Into<String>, constituents: Vec<ConstituentRecord>) -> Self {
        Self {
            name: name.into(),
            constituents,
        }
    }

    /// Creates a snapshot with no constituents.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Number of constituents.
    pub fn len(&self) -> usize {
        self.constituents.len()
    }

    /// Returns true if the snapshot has no constituents.
    pub fn is_empty(&self) -> bool {
        self.constituents.is_empty()
    }

    /// Sum of the present, finite weights.
    pub fn weight_sum(&self) -> f64 {
        self.constituents
            .iter()
            .filter_map(ConstituentRecord::finite_weight)
            .sum()
    }

    /// Checks that weights sum to 1 within `tolerance`.
    ///
    /// A snapshot without any weight passes: equal weighting is assumed
    /// downstream. An empty snapshot also passes.
    pub fn check_weights(&self, tolerance: f64) -> Result<(), WeightInvariantWarning> {
        let has_weights = self
            .constituents
            .iter()
            .any(|c| c.finite_weight().is_some());
        if !has_weights {
            return Ok(());
        }

        let sum = self.weight_sum();
        if (sum - 1.0).abs() <= tolerance {
            Ok(())
        } else {
            Err(WeightInvariantWarning {
                index: self.name.clone(),
                sum,
                tolerance,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn weighted(weights: &[f64]) -> IndexSnapshot {
        let constituents = weights
            .iter()
            .enumerate()
            .map(|(i, w)| ConstituentRecord::new(format!("{}", 1000 + i)).with_weight(*w))
            .collect();
        IndexSnapshot::new("topix", constituents)
    }

    #[test]
    fn test_weight_sum() {
        let snapshot = weighted(&[0.6, 0.25, 0.15]);
        assert_relative_eq!(snapshot.weight_sum(), 1.0, epsilon = 1e-12);
        assert!(snapshot.check_weights(1e-9).is_ok());
    }

    #[test]
    fn test_weight_violation_is_reported() {
        let snapshot = weighted(&[0.6, 0.25]);
        let warning = snapshot.check_weights(0.01).unwrap_err();
        assert_eq!(warning.index, "topix");
        assert_relative_eq!(warning.sum, 0.85, epsilon = 1e-12);
    }

    #[test]
    fn test_unweighted_snapshot_passes() {
        let snapshot = IndexSnapshot::new(
            "yomiuri333",
            vec![ConstituentRecord::new("1001"), ConstituentRecord::new("2002")],
        );
        assert!(snapshot.check_weights(0.0).is_ok());
        assert!(IndexSnapshot::empty("topix").check_weights(0.0).is_ok());
    }
}
