//! Parse failures, located by line and column of the unfolded input.

/// Result type for iCalendar parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("no content lines")]
    EmptyInput,
    #[error("content line has no name")]
    MissingPropertyName,
    #[error("illegal character in name")]
    InvalidPropertyName,
    #[error("no ':' before the value")]
    MissingColon,
    #[error("malformed parameter")]
    InvalidParameter,
    #[error("quoted parameter value never closed")]
    UnclosedQuote,
    #[error("expected BEGIN:VCALENDAR")]
    MissingBegin,
    #[error("component never ended")]
    MissingEnd,
    #[error("END does not match BEGIN")]
    MismatchedComponent,
    #[error("content after the calendar ended")]
    TrailingContent,
    #[error("not an INTEGER")]
    InvalidInteger,
}

/// A located parse failure. `line` and `column` are 1-based; `line` is the
/// physical line a (possibly folded) content line starts on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}, column {column}: {kind}{}", suffix(.detail.as_deref()))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
    pub detail: Option<String>,
}

fn suffix(detail: Option<&str>) -> String {
    detail.map(|d| format!(" ({d})")).unwrap_or_default()
}

impl ParseError {
    #[must_use]
    pub const fn at(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            line,
            column,
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_detail() {
        let err = ParseError::at(ParseErrorKind::MissingColon, 1, 10);
        assert_eq!(err.to_string(), "line 1, column 10: no ':' before the value");
    }

    #[test]
    fn display_with_detail() {
        let err = ParseError::at(ParseErrorKind::MismatchedComponent, 3, 1)
            .with_detail("expected END:VEVENT, got END:VALARM");
        assert_eq!(
            err.to_string(),
            "line 3, column 1: END does not match BEGIN (expected END:VEVENT, got END:VALARM)"
        );
    }
}
