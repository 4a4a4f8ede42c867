//! Tree-walking renderer.

use super::ast::{ForBlock, IfBlock, Node, Output, Path};
use super::RenderOptions;
use crate::context::RenderContext;
use crate::error::{ReportError, ReportResult};
use crate::value::Value;

pub(crate) struct Renderer<'a> {
    context: &'a RenderContext,
    options: RenderOptions,
    /// Loop variables, innermost last.
    scopes: Vec<(&'a str, &'a Value)>,
}

impl<'a> Renderer<'a> {
    pub(crate) fn new(context: &'a RenderContext, options: RenderOptions) -> Self {
        Self {
            context,
            options,
            scopes: Vec::new(),
        }
    }

    pub(crate) fn render(&mut self, nodes: &'a [Node], out: &mut String) -> ReportResult<()> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Output(output) => self.render_output(output, out)?,
                Node::If(block) => self.render_if(block, out)?,
                Node::For(block) => self.render_for(block, out)?,
            }
        }
        Ok(())
    }

    /// Resolve a dotted path. Loop variables shadow root keys.
    fn lookup(&self, path: &Path) -> Option<&'a Value> {
        let (first, rest) = path.segments().split_first()?;
        let mut current = self
            .scopes
            .iter()
            .rev()
            .find(|(name, _)| *name == first.as_str())
            .map(|(_, value)| *value)
            .or_else(|| self.context.get(first))?;
        for segment in rest {
            current = current.get(segment)?;
        }
        Some(current)
    }

    fn render_output(&self, output: &Output, out: &mut String) -> ReportResult<()> {
        let value = self
            .lookup(&output.path)
            .ok_or_else(|| ReportError::binding(output.path.to_string(), output.line))?;

        let mut current = value.clone();
        for filter in &output.filters {
            current = filter.apply(&current, output.line)?;
        }

        let text = current.to_display().ok_or_else(|| ReportError::NotPrintable {
            path: output.path.to_string(),
            kind: current.kind().to_string(),
            line: output.line,
        })?;
        if self.options.autoescape {
            push_escaped(out, &text);
        } else {
            out.push_str(&text);
        }
        Ok(())
    }

    fn render_if(&mut self, block: &'a IfBlock, out: &mut String) -> ReportResult<()> {
        let truthy = self.lookup(&block.path).is_some_and(Value::is_truthy);
        if truthy != block.negated {
            self.render(&block.then_branch, out)
        } else {
            self.render(&block.else_branch, out)
        }
    }

    fn render_for(&mut self, block: &'a ForBlock, out: &mut String) -> ReportResult<()> {
        let value = self
            .lookup(&block.iterable)
            .ok_or_else(|| ReportError::binding(block.iterable.to_string(), block.line))?;

        match value {
            Value::Null => Ok(()),
            Value::List(items) => {
                for item in items {
                    self.scopes.push((block.binding.as_str(), item));
                    let result = self.render(&block.body, out);
                    self.scopes.pop();
                    result?;
                }
                Ok(())
            }
            other => Err(ReportError::NotIterable {
                path: block.iterable.to_string(),
                kind: other.kind().to_string(),
                line: block.line,
            }),
        }
    }
}

/// HTML-escape `text` into `out`.
///
/// Uses the same entities as markupsafe's `escape`: quotes become the
/// numeric references `&#34;` and `&#39;`.
fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        let mut out = String::new();
        push_escaped(&mut out, "<b>\"A&B\"</b> 'x'");
        assert_eq!(out, "&lt;b&gt;&#34;A&amp;B&#34;&lt;/b&gt; &#39;x&#39;");
    }
}
