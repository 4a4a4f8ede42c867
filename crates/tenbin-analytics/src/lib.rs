//! # Tenbin Analytics
//!
//! Metrics engine and rule-based classifier for comparing an equal-weight
//! index with its market-cap-weighted benchmark.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Fail-soft per metric**: A metric without data is recorded as missing;
//!   the other metrics are still computed
//! - **Rules as data**: Classification rules are plain records evaluated in
//!   declaration order, so output order is reproducible
//! - **Config-driven parallelism**: Optional rayon support for many snapshots
//!
//! ## Quick Start
//!
//! ```rust
//! use tenbin_analytics::prelude::*;
//!
//! let yomiuri = IndexSnapshot::new(
//!     INDEX_A,
//!     vec![
//!         ConstituentRecord::new("1001").with_sector("X").with_pbr(0.8).with_roe(5.0).with_weight(0.6),
//!         ConstituentRecord::new("2002").with_sector("Y").with_pbr(1.2).with_roe(15.0).with_weight(0.4),
//!     ],
//! );
//! let topix = IndexSnapshot::empty(BENCHMARK);
//!
//! let config = AnalyticsConfig::default();
//! let metrics = compute_comparison(&yomiuri, &topix, &config);
//! assert_eq!(metrics.index_a.get(Metric::RoeMedian), Some(10.0));
//!
//! let logic = classify(&metrics, &RuleSet::standard());
//! assert!(!logic.cautions.is_empty());
//! ```
//!
//! ## Module Overview
//!
//! - [`metrics`] - Valuation, profitability, income and concentration metrics
//! - [`classifier`] - Strength / weakness / caution rules and insights
//! - [`config`] - Computation settings
//!
//! ## Feature Flags
//!
//! - `parallel`: Compute independent snapshots on rayon tasks in
//!   [`compute_comparison`] and [`compute_many`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod classifier;
pub mod config;
pub mod error;
pub mod metrics;

pub use error::{AnalyticsError, AnalyticsResult};

pub use config::AnalyticsConfig;

pub use metrics::{
    compute_comparison, compute_many, compute_metrics, dividend_yield_mean, pbr_below_1_ratio,
    roe_median, sector_hhi, top_n_weight, weight_warnings, ComparisonMetrics,
};

pub use classifier::{
    classify, derive_insights, Category, Message, Predicate, Rule, RuleSet, Scope,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::classifier::{classify, derive_insights, RuleSet};
    pub use crate::config::AnalyticsConfig;
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::metrics::{
        compute_comparison, compute_many, compute_metrics, weight_warnings, ComparisonMetrics,
    };

    pub use tenbin_core::prelude::*;
}
