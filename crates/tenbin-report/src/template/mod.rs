//! A small logic-less template language.
//!
//! Supported syntax:
//!
//! - `{{ path }}`, `{{ path | format_percent(1) }}`, chained filters
//! - `{% if [not] path %}...{% else %}...{% endif %}`
//! - `{% for item in path %}...{% endfor %}`
//! - `{# comment #}`
//!
//! Interpolating a key that the context does not define is an error rather
//! than an empty string, so a typo in a template cannot silently publish a
//! blank value. Conditions on a missing key are simply false.

pub mod ast;
mod filters;
mod lexer;
mod parser;
mod render;

use crate::context::RenderContext;
use crate::error::ReportResult;

pub use ast::{Filter, FilterCall, Node, Path};

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// HTML-escape every interpolated value.
    pub autoescape: bool,
}

impl RenderOptions {
    /// Options for HTML output.
    #[must_use]
    pub fn html() -> Self {
        Self { autoescape: true }
    }
}

/// A parsed template, reusable across renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template source.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Syntax`](crate::ReportError::Syntax) or
    /// [`ReportError::UnknownFilter`](crate::ReportError::UnknownFilter) for
    /// malformed source.
    pub fn parse(source: &str) -> ReportResult<Self> {
        let tokens = lexer::tokenize(source)?;
        let nodes = parser::parse(tokens)?;
        Ok(Self { nodes })
    }

    /// Top-level syntax tree nodes.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Render against `context`.
    ///
    /// # Errors
    ///
    /// Fails on unbound interpolations, non-list `for` targets, unprintable
    /// values, and filters applied to unsupported values.
    pub fn render(&self, context: &RenderContext, options: RenderOptions) -> ReportResult<String> {
        let mut out = String::new();
        render::Renderer::new(context, options).render(&self.nodes, &mut out)?;
        Ok(out)
    }
}

/// Parse and render in one step.
///
/// # Errors
///
/// See [`Template::parse`] and [`Template::render`].
pub fn render_str(
    source: &str,
    context: &RenderContext,
    options: RenderOptions,
) -> ReportResult<String> {
    Template::parse(source)?.render(context, options)
}
