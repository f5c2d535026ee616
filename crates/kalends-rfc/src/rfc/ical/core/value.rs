//! Typed property values (RFC 5545 §3.3).

use super::{DateTime, Duration, RRule, UtcOffset};

/// What a property's value holds. The text it serializes to is kept on
/// `Property::raw_value`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    CalAddress(String),
    DateTime(DateTime),
    Duration(Duration),
    Integer(i32),
    Recur(Box<RRule>),
    /// Unescaped text.
    Text(String),
    UtcOffset(UtcOffset),
    /// Not typed by the parser; the raw text is kept.
    Unknown(String),
}

impl Value {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self { Some(s) } else { None }
    }

    #[must_use]
    pub const fn as_integer(&self) -> Option<i32> {
        if let Self::Integer(n) = self { Some(*n) } else { None }
    }
}
