//! Classifier output.

use serde::{Deserialize, Serialize};

/// Ordered statements about the index's structural profile.
///
/// Statement order is the order in which rules fired. An empty list is a
/// valid result and means "evaluated, nothing found"; "not evaluated" is
/// expressed by the caller as `Option<ClassificationResult>::None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Structural strengths.
    pub strengths: Vec<String>,
    /// Structural weaknesses.
    pub weaknesses: Vec<String>,
    /// Caveats about data quality or coverage.
    pub cautions: Vec<String>,
}

impl ClassificationResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of statements.
    pub fn len(&self) -> usize {
        self.strengths.len() + self.weaknesses.len() + self.cautions.len()
    }

    /// Returns true if no statement was produced.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len() {
        let mut result = ClassificationResult::new();
        assert!(result.is_empty());
        result.strengths.push("a".into());
        result.cautions.push("b".into());
        assert_eq!(result.len(), 2);
    }
}
