//! Unfolding and tokenizing of content lines (RFC 5545 §3.1).

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{ContentLine, Parameter, is_valid_name};

/// Splits input into logical content lines, merging folded continuations.
///
/// Accepts CRLF and bare LF endings. A physical line starting with SPACE or
/// HTAB continues the previous one; the fold (line break plus that single
/// whitespace character) is removed. Blank lines are skipped. Each entry
/// carries the 1-based number of the physical line it started on.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut logical: Vec<(usize, String)> = Vec::new();

    let physical = input
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .enumerate()
        .filter(|(_, l)| !l.is_empty());
    for (idx, text) in physical {
        match (text.strip_prefix([' ', '\t']), logical.last_mut()) {
            (Some(rest), Some((_, open))) => open.push_str(rest),
            (Some(rest), None) => logical.push((idx + 1, rest.to_owned())),
            (None, _) => logical.push((idx + 1, text.to_owned())),
        }
    }

    logical
}

/// Cursor over one content line.
struct Cursor<'a> {
    line: &'a str,
    pos: usize,
    line_num: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::at(kind, self.line_num, self.pos + 1)
    }

    /// Consumes a name (ALPHA / DIGIT / "-") and returns it uppercased.
    fn name(&mut self, invalid: ParseErrorKind) -> ParseResult<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '-' {
                self.bump();
            } else if matches!(c, ';' | ':' | '=') {
                break;
            } else {
                return Err(self.error(invalid));
            }
        }
        Ok(self.line[start..self.pos].to_ascii_uppercase())
    }

    /// Consumes one parameter value, quoted (with RFC 6868 caret decoding)
    /// or bare.
    fn param_value(&mut self) -> ParseResult<String> {
        if self.peek() != Some('"') {
            let start = self.pos;
            while let Some(c) = self.peek() {
                if matches!(c, ',' | ';' | ':') {
                    break;
                }
                self.bump();
            }
            return Ok(self.line[start..self.pos].to_string());
        }

        let open = self.error(ParseErrorKind::UnclosedQuote);
        self.bump();
        let mut decoded = String::new();
        loop {
            let c = self.bump().ok_or_else(|| open.clone())?;
            if c == '"' {
                return Ok(decoded);
            }
            if c != '^' {
                decoded.push(c);
                continue;
            }
            let replacement = match self.peek() {
                Some('^') => '^',
                Some('n') => '\n',
                Some('\'') => '"',
                // unknown escape, caret stays literal
                _ => {
                    decoded.push('^');
                    continue;
                }
            };
            self.bump();
            decoded.push(replacement);
        }
    }
}

/// Tokenizes `name *(";" param) ":" value`. The value is kept raw.
///
/// ## Errors
/// Fails on a bad name, a malformed parameter, an unterminated quote or a
/// missing `:`; `line_num` and the byte column are reported.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let mut cur = Cursor {
        line,
        pos: 0,
        line_num,
    };

    let name = cur.name(ParseErrorKind::InvalidPropertyName)?;
    if name.is_empty() {
        return Err(ParseError::at(ParseErrorKind::MissingPropertyName, line_num, 1));
    }

    let mut params: Vec<Parameter> = Vec::new();
    loop {
        match cur.bump() {
            Some(':') => break,
            Some(';') => {
                let param_name = cur.name(ParseErrorKind::InvalidParameter)?;
                if !is_valid_name(&param_name) || cur.bump() != Some('=') {
                    return Err(cur
                        .error(ParseErrorKind::InvalidParameter)
                        .with_detail("NAME=VALUE expected"));
                }
                let mut values = vec![cur.param_value()?];
                while cur.peek() == Some(',') {
                    cur.bump();
                    values.push(cur.param_value()?);
                }
                params.push(Parameter::with_values(param_name, values));
            }
            Some(c) => {
                return Err(cur
                    .error(ParseErrorKind::InvalidParameter)
                    .with_detail(format!("unexpected character '{c}'")));
            }
            None => return Err(cur.error(ParseErrorKind::MissingColon)),
        }
    }

    Ok(ContentLine {
        name,
        params,
        raw_value: line[cur.pos..].to_string(),
    })
}

/// Reverses TEXT escaping (RFC 5545 §3.3.11).
///
/// Unknown escapes are preserved as-is.
#[must_use]
pub fn unescape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw.chars();

    while let Some(c) = rest.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match rest.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(lit @ (',' | ';' | '\\')) => out.push(lit),
            None => out.push('\\'),
            Some(other) => out.extend(['\\', other]),
        }
    }

    out
}
