//! Property parameters (RFC 5545 §3.2).

use std::fmt;

use crate::error::{RfcError, RfcResult};

/// `NAME=value[,value...]` attached to a property. Names are upper-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// Usually one entry; parsed input may split a list into several.
    pub values: Vec<String>,
}

/// Whether `name` matches the content-line `name` rule: ALPHA, DIGIT and
/// `-`, at least one character.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_values(name, vec![value.into()])
    }

    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        let mut name = name.into();
        name.make_ascii_uppercase();
        Self { name, values }
    }

    /// ## Errors
    /// Returns `RfcError::ValidationError` if `name` is not a legal name.
    pub fn checked(name: &str, value: impl Into<String>) -> RfcResult<Self> {
        if is_valid_name(name) {
            Ok(Self::new(name, value))
        } else {
            Err(RfcError::ValidationError(format!(
                "invalid parameter name '{name}'"
            )))
        }
    }

    /// Reads `KEY=VALUE`, splitting at the first `=`. The value may be
    /// empty.
    ///
    /// ## Errors
    /// Returns `RfcError::ValidationError` without an `=` or for an illegal
    /// key.
    pub fn from_literal(literal: &str) -> RfcResult<Self> {
        match literal.split_once('=') {
            Some((name, value)) => Self::checked(name, value),
            None => Err(RfcError::ValidationError(format!(
                "parameter '{literal}' is not KEY=VALUE"
            ))),
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    #[must_use]
    pub fn tzid(tzid: impl Into<String>) -> Self {
        Self::new(names::TZID, tzid)
    }

    /// `VALUE=`, overriding a property's default value type.
    #[must_use]
    pub fn value_type(value_type: impl Into<String>) -> Self {
        Self::new(names::VALUE, value_type)
    }

    #[must_use]
    pub fn cn(name: impl Into<String>) -> Self {
        Self::new(names::CN, name)
    }

    #[must_use]
    pub fn cutype(cutype: impl Into<String>) -> Self {
        Self::new(names::CUTYPE, cutype)
    }

    #[must_use]
    pub fn partstat(status: impl Into<String>) -> Self {
        Self::new(names::PARTSTAT, status)
    }

    #[must_use]
    pub fn role(role: impl Into<String>) -> Self {
        Self::new(names::ROLE, role)
    }

    #[must_use]
    pub fn rsvp(rsvp: bool) -> Self {
        Self::new(names::RSVP, if rsvp { "TRUE" } else { "FALSE" })
    }

    #[must_use]
    pub fn sent_by(address: impl Into<String>) -> Self {
        Self::new(names::SENT_BY, address)
    }

    // Address lists are emitted as a single comma-joined value, which the
    // serializer then quotes as a whole.

    #[must_use]
    pub fn member(addresses: &[String]) -> Self {
        Self::new(names::MEMBER, addresses.join(","))
    }

    #[must_use]
    pub fn delegated_to(addresses: &[String]) -> Self {
        Self::new(names::DELEGATED_TO, addresses.join(","))
    }

    #[must_use]
    pub fn delegated_from(addresses: &[String]) -> Self {
        Self::new(names::DELEGATED_FROM, addresses.join(","))
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.name)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(&crate::rfc::ical::build::escape_param_value(value))?;
        }
        Ok(())
    }
}

pub mod names {
    pub const CN: &str = "CN";
    pub const CUTYPE: &str = "CUTYPE";
    pub const DELEGATED_FROM: &str = "DELEGATED-FROM";
    pub const DELEGATED_TO: &str = "DELEGATED-TO";
    pub const MEMBER: &str = "MEMBER";
    pub const PARTSTAT: &str = "PARTSTAT";
    pub const ROLE: &str = "ROLE";
    pub const RSVP: &str = "RSVP";
    pub const SENT_BY: &str = "SENT-BY";
    pub const TZID: &str = "TZID";
    pub const VALUE: &str = "VALUE";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_quoted_values() {
        assert_eq!(
            Parameter::tzid("America/New_York").to_string(),
            "TZID=America/New_York"
        );
        assert_eq!(Parameter::cn("Doe; Jane").to_string(), "CN=\"Doe; Jane\"");
    }

    #[test]
    fn split_values_rejoin() {
        let param = Parameter::with_values("member", vec!["a".into(), "b:c".into()]);
        assert_eq!(param.to_string(), "MEMBER=a,\"b:c\"");
    }

    #[test]
    fn joined_delegates_are_one_quoted_value() {
        let param = Parameter::delegated_to(&[
            "mailto:a@example.com".to_string(),
            "mailto:b@example.com".to_string(),
        ]);
        assert_eq!(param.values.len(), 1);
        assert_eq!(
            param.to_string(),
            "DELEGATED-TO=\"mailto:a@example.com,mailto:b@example.com\""
        );
    }

    #[test]
    fn names_are_uppercased() {
        assert_eq!(Parameter::new("x-foo", "1").name, "X-FOO");
    }

    #[test]
    fn from_literal_splits_on_first_equals() {
        let param = Parameter::from_literal("X-TEST=a=b").unwrap();
        assert_eq!(param.name, "X-TEST");
        assert_eq!(param.value(), Some("a=b"));
    }

    #[test]
    fn from_literal_rejects_bad_names() {
        assert!(Parameter::from_literal("NOVALUE").is_err());
        assert!(Parameter::from_literal("BAD NAME=x").is_err());
        assert!(Parameter::from_literal("=x").is_err());
    }
}
