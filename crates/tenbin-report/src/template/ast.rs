//! Parsed template representation.

use std::fmt;

/// Dotted lookup path such as `metrics.topix.sector_hhi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Build a path from already-validated segments.
    pub(crate) fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Path segments in lookup order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Formatting filter applied to an interpolated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Fraction rendered as a percentage.
    FormatPercent,
    /// Fixed-decimal number.
    FormatNumber,
}

impl Filter {
    /// Resolve a filter by its template name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "format_percent" => Some(Filter::FormatPercent),
            "format_number" => Some(Filter::FormatNumber),
            _ => None,
        }
    }

    /// Template name of the filter.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Filter::FormatPercent => "format_percent",
            Filter::FormatNumber => "format_number",
        }
    }
}

/// A filter with its optional decimals argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCall {
    /// Which filter.
    pub filter: Filter,
    /// Decimal places; `None` means the default of zero.
    pub decimals: Option<u32>,
}

/// `{{ path | filter... }}`
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    /// Value to print.
    pub path: Path,
    /// Filters applied left to right.
    pub filters: Vec<FilterCall>,
    /// 1-based source line.
    pub line: usize,
}

/// `{% if [not] path %}...{% else %}...{% endif %}`
#[derive(Debug, Clone, PartialEq)]
pub struct IfBlock {
    /// Condition path.
    pub path: Path,
    /// Whether the condition is negated with `not`.
    pub negated: bool,
    /// Rendered when the condition holds.
    pub then_branch: Vec<Node>,
    /// Rendered otherwise; empty without `else`.
    pub else_branch: Vec<Node>,
    /// 1-based source line.
    pub line: usize,
}

/// `{% for binding in iterable %}...{% endfor %}`
#[derive(Debug, Clone, PartialEq)]
pub struct ForBlock {
    /// Loop variable name.
    pub binding: String,
    /// List to iterate.
    pub iterable: Path,
    /// Loop body.
    pub body: Vec<Node>,
    /// 1-based source line.
    pub line: usize,
}

/// Template syntax tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text.
    Text(String),
    /// Interpolation.
    Output(Output),
    /// Conditional.
    If(IfBlock),
    /// Loop.
    For(ForBlock),
}
