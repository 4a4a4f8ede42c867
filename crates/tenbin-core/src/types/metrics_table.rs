//! Per-index table of computed metrics.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::Metric;

/// Metrics computed for one index.
///
/// Every [`Metric`] is always present as a key. A `None` value means the
/// underlying data was missing, which is distinct from the key itself being
/// absent (that never happens).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsTable {
    /// Index the metrics belong to.
    pub index: String,

    #[serde(deserialize_with = "deserialize_values")]
    values: BTreeMap<Metric, Option<f64>>,
}

impl MetricsTable {
    /// Creates a table with every metric missing.
    #[must_use]
    pub fn empty(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            values: Metric::ALL.iter().map(|m| (*m, None)).collect(),
        }
    }

    /// Builds a table from `(metric, value)` pairs; unspecified metrics are missing.
    #[must_use]
    pub fn from_values(
        index: impl Into<String>,
        values: impl IntoIterator<Item = (Metric, Option<f64>)>,
    ) -> Self {
        let mut table = Self::empty(index);
        for (metric, value) in values {
            table.values.insert(metric, value.filter(|v| v.is_finite()));
        }
        table
    }

    /// Builds a table from a name-keyed map. Unknown names are ignored.
    #[must_use]
    pub fn from_named_map(index: impl Into<String>, map: &BTreeMap<String, Option<f64>>) -> Self {
        Self::from_values(
            index,
            map.iter()
                .filter_map(|(name, value)| name.parse::<Metric>().ok().map(|m| (m, *value))),
        )
    }

    /// Value of a metric, `None` when missing.
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied().flatten()
    }

    /// Returns true if every metric is missing.
    pub fn is_all_missing(&self) -> bool {
        self.values.values().all(Option::is_none)
    }

    /// Metrics whose value is missing.
    pub fn missing(&self) -> Vec<Metric> {
        self.values
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(m, _)| *m)
            .collect()
    }

    /// Iterates `(metric, value)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, Option<f64>)> + '_ {
        self.values.iter().map(|(m, v)| (*m, *v))
    }

    /// Name-keyed copy of the values.
    pub fn to_named_map(&self) -> BTreeMap<String, Option<f64>> {
        self.values
            .iter()
            .map(|(m, v)| (m.as_str().to_string(), *v))
            .collect()
    }
}

fn deserialize_values<'de, D>(deserializer: D) -> Result<BTreeMap<Metric, Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Option<f64>>::deserialize(deserializer)?;
    Ok(MetricsTable::from_named_map("", &raw).values)
}
