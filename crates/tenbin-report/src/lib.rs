//! # Tenbin Report
//!
//! Renders the published comparison report (README and HTML page) from
//! computed metrics.
//!
//! ## Overview
//!
//! - **Template language**: [`Template`] parses a small Jinja-like syntax into
//!   an explicit AST and renders it against a [`RenderContext`]
//! - **Context assembly**: [`RenderContextBuilder`] maps metrics, classifier
//!   output, notes, and [`BuildMetadata`] onto the keys templates use
//! - **Fallbacks**: [`fallback`] holds the text shown when a section is empty
//! - **Pipeline**: [`ReportPipeline`] classifies metrics and renders one of
//!   the built-in templates ([`README_TEMPLATE`], [`SITE_TEMPLATE`])
//!
//! Rendering performs no I/O. The same inputs always produce byte-identical
//! output.
//!
//! ## Example
//!
//! ```rust
//! use tenbin_report::prelude::*;
//!
//! let pipeline = ReportPipeline::readme(README_TEMPLATE).unwrap();
//! let metadata = BuildMetadata::new("2024-01-02 03:04 UTC", Badges::for_repository("acme/tenbin"));
//! let readme = pipeline.render(&ReportInputs::new(metadata)).unwrap();
//!
//! assert!(readme.contains(fallback::STRENGTHS));
//! assert!(readme.ends_with('\n'));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod context;
pub mod error;
pub mod fallback;
pub mod pipeline;
pub mod template;
pub mod value;

pub use context::{
    current_timestamp, format_timestamp, Badge, Badges, BuildMetadata, RenderContext,
    RenderContextBuilder, DEFAULT_REPOSITORY,
};
pub use error::{ReportError, ReportResult};
pub use pipeline::{ReportInputs, ReportPipeline, README_TEMPLATE, SITE_TEMPLATE};
pub use template::{render_str, RenderOptions, Template};
pub use value::Value;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::context::{current_timestamp, Badges, BuildMetadata, RenderContext};
    pub use crate::error::{ReportError, ReportResult};
    pub use crate::fallback;
    pub use crate::pipeline::{ReportInputs, ReportPipeline, README_TEMPLATE, SITE_TEMPLATE};
    pub use crate::template::{RenderOptions, Template};
    pub use crate::value::Value;
}
