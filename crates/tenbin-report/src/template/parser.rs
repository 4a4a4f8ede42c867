//! Builds the syntax tree from lexer tokens.

use super::ast::{Filter, FilterCall, ForBlock, IfBlock, Node, Output, Path};
use super::lexer::Token;
use crate::error::{ReportError, ReportResult};

/// Parse a token stream into a list of top-level nodes.
pub(crate) fn parse(tokens: Vec<Token>) -> ReportResult<Vec<Node>> {
    let mut parser = Parser {
        tokens: tokens.into_iter(),
    };
    let (nodes, end) = parser.parse_block(&[])?;
    debug_assert!(end.is_none());
    Ok(nodes)
}

/// Closing tag that ended a block.
struct BlockEnd {
    keyword: &'static str,
}

struct Parser {
    tokens: std::vec::IntoIter<Token>,
}

impl Parser {
    /// Parse nodes until one of `terminators` or end of input.
    ///
    /// Reaching end of input is only valid when no terminator is expected.
    fn parse_block(
        &mut self,
        terminators: &[&'static str],
    ) -> ReportResult<(Vec<Node>, Option<BlockEnd>)> {
        let mut nodes = Vec::new();

        while let Some(token) = self.tokens.next() {
            match token {
                Token::Text(text) => nodes.push(Node::Text(text)),
                Token::Expr { body, line } => nodes.push(Node::Output(parse_output(&body, line)?)),
                Token::Tag { body, line } => {
                    let words: Vec<&str> = body.split_whitespace().collect();
                    match words.as_slice() {
                        ["if", rest @ ..] => nodes.push(self.parse_if(rest, line)?),
                        ["for", rest @ ..] => nodes.push(self.parse_for(rest, line)?),
                        [keyword @ ("else" | "endif" | "endfor")] => {
                            let Some(&end) = terminators.iter().find(|t| **t == *keyword) else {
                                return Err(ReportError::syntax(
                                    line,
                                    format!("unexpected '{{% {keyword} %}}'"),
                                ));
                            };
                            return Ok((nodes, Some(BlockEnd { keyword: end })));
                        }
                        [] => return Err(ReportError::syntax(line, "empty tag")),
                        [other, ..] => {
                            return Err(ReportError::syntax(line, format!("unknown tag '{other}'")))
                        }
                    }
                }
            }
        }

        Ok((nodes, None))
    }

    fn parse_if(&mut self, words: &[&str], line: usize) -> ReportResult<Node> {
        let (negated, path) = match words {
            ["not", path] => (true, *path),
            [path] => (false, *path),
            _ => return Err(ReportError::syntax(line, "expected '{% if [not] path %}'")),
        };
        let path = parse_path(path, line)?;

        let (then_branch, end) = self.parse_block(&["else", "endif"])?;
        let else_branch = match end {
            Some(BlockEnd { keyword: "else", .. }) => match self.parse_block(&["endif"])? {
                (nodes, Some(_)) => nodes,
                (_, None) => return Err(unclosed("if", line)),
            },
            Some(_) => Vec::new(),
            None => return Err(unclosed("if", line)),
        };

        Ok(Node::If(IfBlock {
            path,
            negated,
            then_branch,
            else_branch,
            line,
        }))
    }

    fn parse_for(&mut self, words: &[&str], line: usize) -> ReportResult<Node> {
        let [binding, "in", iterable] = words else {
            return Err(ReportError::syntax(line, "expected '{% for name in path %}'"));
        };
        if !is_identifier(binding) {
            return Err(ReportError::syntax(line, format!("invalid loop variable '{binding}'")));
        }
        let iterable = parse_path(iterable, line)?;

        let body = match self.parse_block(&["endfor"])? {
            (nodes, Some(_)) => nodes,
            (_, None) => return Err(unclosed("for", line)),
        };

        Ok(Node::For(ForBlock {
            binding: binding.to_string(),
            iterable,
            body,
            line,
        }))
    }
}

fn unclosed(keyword: &str, line: usize) -> ReportError {
    ReportError::syntax(line, format!("'{{% {keyword} %}}' is never closed"))
}

fn is_identifier(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_path(raw: &str, line: usize) -> ReportResult<Path> {
    let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
    if segments.iter().all(|s| is_identifier(s)) {
        Ok(Path::new(segments))
    } else {
        Err(ReportError::syntax(line, format!("invalid variable path '{raw}'")))
    }
}

/// Parse `path | filter | filter(n)`.
fn parse_output(body: &str, line: usize) -> ReportResult<Output> {
    let mut parts = body.split('|').map(str::trim);
    let path = parse_path(parts.next().unwrap_or_default(), line)?;
    let filters = parts
        .map(|part| parse_filter(part, line))
        .collect::<ReportResult<Vec<_>>>()?;
    Ok(Output {
        path,
        filters,
        line,
    })
}

fn parse_filter(raw: &str, line: usize) -> ReportResult<FilterCall> {
    let (name, decimals) = match raw.split_once('(') {
        Some((name, args)) => {
            let Some(arg) = args.strip_suffix(')') else {
                return Err(ReportError::syntax(line, format!("malformed filter '{raw}'")));
            };
            let arg = arg.trim();
            let decimals = if arg.is_empty() {
                None
            } else {
                Some(arg.parse::<u32>().map_err(|_| {
                    ReportError::syntax(line, format!("filter argument '{arg}' is not a whole number"))
                })?)
            };
            (name.trim(), decimals)
        }
        None => (raw, None),
    };

    let filter = Filter::from_name(name).ok_or_else(|| ReportError::UnknownFilter {
        name: name.to_string(),
        line,
    })?;
    Ok(FilterCall { filter, decimals })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::lexer::tokenize;

    fn parse_str(source: &str) -> ReportResult<Vec<Node>> {
        parse(tokenize(source)?)
    }

    #[test]
    fn test_output_with_filters() {
        let nodes = parse_str("{{ metrics.topix.pbr_mean | format_number(2) }}").unwrap();
        let Node::Output(output) = &nodes[0] else {
            panic!("expected output node");
        };
        assert_eq!(output.path.to_string(), "metrics.topix.pbr_mean");
        assert_eq!(
            output.filters,
            vec![FilterCall {
                filter: Filter::FormatNumber,
                decimals: Some(2)
            }]
        );
    }

    #[test]
    fn test_if_else() {
        let nodes = parse_str("{% if not notes %}a{% else %}b{% endif %}").unwrap();
        let Node::If(block) = &nodes[0] else {
            panic!("expected if node");
        };
        assert!(block.negated);
        assert_eq!(block.then_branch, vec![Node::Text("a".into())]);
        assert_eq!(block.else_branch, vec![Node::Text("b".into())]);
    }

    #[test]
    fn test_nested_for() {
        let nodes = parse_str("{% for s in strengths %}{% if s %}- {{ s }}{% endif %}{% endfor %}").unwrap();
        let Node::For(block) = &nodes[0] else {
            panic!("expected for node");
        };
        assert_eq!(block.binding, "s");
        assert_eq!(block.iterable.to_string(), "strengths");
        assert!(matches!(block.body[0], Node::If(_)));
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(
            parse_str("{% if x %}never closed"),
            Err(ReportError::Syntax { line: 1, .. })
        ));
        assert!(matches!(
            parse_str("a\n{% endfor %}"),
            Err(ReportError::Syntax { line: 2, .. })
        ));
        assert!(matches!(
            parse_str("{% for x of y %}{% endfor %}"),
            Err(ReportError::Syntax { .. })
        ));
        assert!(matches!(
            parse_str("{{ a..b }}"),
            Err(ReportError::Syntax { .. })
        ));
        assert!(matches!(
            parse_str("{{ x | format_number(two) }}"),
            Err(ReportError::Syntax { .. })
        ));
        assert!(matches!(
            parse_str("{% while x %}"),
            Err(ReportError::Syntax { .. })
        ));
    }

    #[test]
    fn test_unknown_filter() {
        assert_eq!(
            parse_str("\n{{ x | upper }}"),
            Err(ReportError::UnknownFilter {
                name: "upper".into(),
                line: 2
            })
        );
    }
}
