//! Fixed text substituted for report sections that have nothing to show.
//!
//! The strings are published verbatim, so they are exposed both as constants
//! and under the `fallback` key of every [`RenderContext`](crate::RenderContext).

/// Shown when the classifier found no strengths.
pub const STRENGTHS: &str = "データ不足のため強みを特定できません。";

/// Shown when the classifier found no weaknesses.
pub const WEAKNESSES: &str = "データ不足のため弱みを特定できません。";

/// Shown when no commentary notes are available.
pub const NOTES: &str = "最新のCodexコメントは未取得です（OPENAI_API_KEY未設定またはエラー）。";
