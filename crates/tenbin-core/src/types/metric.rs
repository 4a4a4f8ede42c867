//! Metric names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A summary statistic computed per index.
///
/// Declaration order is the canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Share of constituents with PBR below 1 (over constituents with a PBR).
    #[serde(rename = "pbr_below_1_ratio")]
    PbrBelow1Ratio,
    /// Mean PBR.
    PbrMean,
    /// Median PBR.
    PbrMedian,
    /// Number of constituents with a PBR.
    PbrCount,
    /// Median ROE.
    RoeMedian,
    /// 25th percentile ROE.
    #[serde(rename = "roe_q25")]
    RoeQ25,
    /// 75th percentile ROE.
    #[serde(rename = "roe_q75")]
    RoeQ75,
    /// Number of constituents with an ROE.
    RoeCount,
    /// Mean dividend yield.
    DividendYieldMean,
    /// Number of constituents with a dividend yield.
    DividendYieldCount,
    /// Herfindahl-Hirschman index of sector weights.
    SectorHhi,
    /// Combined weight of the ten largest constituents.
    #[serde(rename = "top10_weight")]
    Top10Weight,
    /// Number of constituents.
    ConstituentCount,
}

impl Metric {
    /// All metrics in display order.
    pub const ALL: [Metric; 13] = [
        Metric::PbrBelow1Ratio,
        Metric::PbrMean,
        Metric::PbrMedian,
        Metric::PbrCount,
        Metric::RoeMedian,
        Metric::RoeQ25,
        Metric::RoeQ75,
        Metric::RoeCount,
        Metric::DividendYieldMean,
        Metric::DividendYieldCount,
        Metric::SectorHhi,
        Metric::Top10Weight,
        Metric::ConstituentCount,
    ];

    /// Stable snake_case name used in templates and JSON.
    pub const fn as_str(self) -> &'static str {
        match self {
            Metric::PbrBelow1Ratio => "pbr_below_1_ratio",
            Metric::PbrMean => "pbr_mean",
            Metric::PbrMedian => "pbr_median",
            Metric::PbrCount => "pbr_count",
            Metric::RoeMedian => "roe_median",
            Metric::RoeQ25 => "roe_q25",
            Metric::RoeQ75 => "roe_q75",
            Metric::RoeCount => "roe_count",
            Metric::DividendYieldMean => "dividend_yield_mean",
            Metric::DividendYieldCount => "dividend_yield_count",
            Metric::SectorHhi => "sector_hhi",
            Metric::Top10Weight => "top10_weight",
            Metric::ConstituentCount => "constituent_count",
        }
    }

    /// Short human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Metric::PbrBelow1Ratio => "PBR<1 ratio",
            Metric::PbrMean => "PBR mean",
            Metric::PbrMedian => "PBR median",
            Metric::PbrCount => "PBR count",
            Metric::RoeMedian => "ROE median (%)",
            Metric::RoeQ25 => "ROE 25th pct (%)",
            Metric::RoeQ75 => "ROE 75th pct (%)",
            Metric::RoeCount => "ROE count",
            Metric::DividendYieldMean => "Dividend yield mean (%)",
            Metric::DividendYieldCount => "Dividend yield count",
            Metric::SectorHhi => "Sector HHI",
            Metric::Top10Weight => "Top-10 weight",
            Metric::ConstituentCount => "Constituents",
        }
    }

    /// Returns true for metrics expressed as a fraction of the index.
    pub const fn is_fraction(self) -> bool {
        matches!(self, Metric::PbrBelow1Ratio | Metric::Top10Weight)
    }

    /// Returns true for count metrics.
    pub const fn is_count(self) -> bool {
        matches!(
            self,
            Metric::PbrCount
                | Metric::RoeCount
                | Metric::DividendYieldCount
                | Metric::ConstituentCount
        )
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CoreError::invalid_metric(s))
    }
}
