//! # Tenbin Core
//!
//! Core types and number formatting for the Tenbin index comparison toolkit.
//!
//! Tenbin compares an equal-weight Japanese stock index (`yomiuri333`) with a
//! market-cap-weighted benchmark (`topix`). This crate holds the pieces shared
//! by every other crate in the workspace:
//!
//! - **Types**: [`ConstituentRecord`], [`IndexSnapshot`], [`Metric`],
//!   [`MetricsTable`], [`ClassificationResult`]
//! - **Formatting**: [`format_percent`] and [`format_number`] with
//!   half-to-even rounding and an `"N/A"` sentinel for missing values
//! - **Errors**: [`CoreError`] and the non-fatal [`WeightInvariantWarning`]
//!
//! ## Example
//!
//! ```rust
//! use tenbin_core::prelude::*;
//!
//! let snapshot = IndexSnapshot::new(
//!     INDEX_A,
//!     vec![
//!         ConstituentRecord::new("1001").with_pbr(0.8).with_weight(0.6),
//!         ConstituentRecord::new("2002").with_pbr(1.2).with_weight(0.4),
//!     ],
//! );
//! assert!(snapshot.check_weights(0.01).is_ok());
//! assert_eq!(format_percent(Some(0.1234), 2), "12.34%");
//! assert_eq!(format_number(None, 2), "N/A");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod error;
pub mod format;
pub mod types;

pub use error::{CoreError, CoreResult, WeightInvariantWarning};
pub use format::{format_number, format_percent, MISSING_SENTINEL};
pub use types::{
    ClassificationResult, ConstituentRecord, IndexSnapshot, Metric, MetricsTable, BENCHMARK,
    INDEX_A,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult, WeightInvariantWarning};
    pub use crate::format::{format_number, format_percent, MISSING_SENTINEL};
    pub use crate::types::{
        ClassificationResult, ConstituentRecord, IndexSnapshot, Metric, MetricsTable, BENCHMARK,
        INDEX_A,
    };
}
