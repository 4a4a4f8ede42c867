//! Splits template source into text, expression, and tag tokens.

use crate::error::{ReportError, ReportResult};

/// Lexical token.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Text(String),
    Expr { body: String, line: usize },
    Tag { body: String, line: usize },
}

#[derive(Clone, Copy)]
enum Delimiter {
    Expr,
    Tag,
    Comment,
}

impl Delimiter {
    fn open(next: Option<char>) -> Option<Self> {
        match next {
            Some('{') => Some(Delimiter::Expr),
            Some('%') => Some(Delimiter::Tag),
            Some('#') => Some(Delimiter::Comment),
            _ => None,
        }
    }

    fn close(self) -> &'static str {
        match self {
            Delimiter::Expr => "}}",
            Delimiter::Tag => "%}",
            Delimiter::Comment => "#}",
        }
    }

    fn is_block(self) -> bool {
        matches!(self, Delimiter::Tag | Delimiter::Comment)
    }
}

fn line_at(source: &str, offset: usize) -> usize {
    1 + source[..offset].matches('\n').count()
}

fn is_inline_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Tokenize `source`.
///
/// A tag or comment that is alone on its line swallows the line's
/// indentation and its trailing newline, so block structure does not leave
/// blank lines in the output.
pub(crate) fn tokenize(source: &str) -> ReportResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut pos = 0;

    while pos < source.len() {
        let Some(offset) = source[pos..].find('{') else {
            text.push_str(&source[pos..]);
            break;
        };
        let start = pos + offset;
        text.push_str(&source[pos..start]);

        let Some(delimiter) = Delimiter::open(source[start + 1..].chars().next()) else {
            text.push('{');
            pos = start + 1;
            continue;
        };

        let line = line_at(source, start);
        let body_start = start + 2;
        let Some(close) = source[body_start..].find(delimiter.close()) else {
            return Err(ReportError::syntax(
                line,
                format!("missing closing '{}'", delimiter.close()),
            ));
        };
        let body_end = body_start + close;
        let mut next = body_end + 2;

        if delimiter.is_block() {
            let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
            let (line_end, after_newline) = match source[next..].find('\n') {
                Some(i) => (next + i, next + i + 1),
                None => (source.len(), source.len()),
            };
            let leading_blank = source[line_start..start].chars().all(is_inline_space);
            let trailing_blank = source[next..line_end]
                .chars()
                .all(|c| is_inline_space(c) || c == '\r');
            if leading_blank && trailing_blank {
                text.truncate(text.len() - (start - line_start));
                next = after_newline;
            }
        }

        pos = next;
        let body = source[body_start..body_end].trim().to_string();
        let token = match delimiter {
            Delimiter::Expr => Token::Expr { body, line },
            Delimiter::Tag => Token::Tag { body, line },
            Delimiter::Comment => continue,
        };
        if !text.is_empty() {
            tokens.push(Token::Text(std::mem::take(&mut text)));
        }
        tokens.push(token);
    }

    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
    Ok(tokens)
}
