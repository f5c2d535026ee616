//! Properties (RFC 5545 §3.8) and the untyped content lines they are read
//! from (§3.1).

use super::parameter::is_valid_name;
use super::{DateTime, Duration, Parameter, RRule, UtcOffset, Value};
use crate::error::{RfcError, RfcResult};

fn find_param<'a>(params: &'a [Parameter], name: &str) -> Option<&'a Parameter> {
    params.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// One unfolded line split into name, parameters and the still-escaped
/// value text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub name: String,
    pub params: Vec<Parameter>,
    pub raw_value: String,
}

impl ContentLine {
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        find_param(&self.params, name)
    }
}

/// A property with a typed value and the text that value serializes to.
/// Parameters keep insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub params: Vec<Parameter>,
    pub value: Value,
    /// Value text after the colon, unescaped for TEXT.
    pub raw_value: String,
}

impl Property {
    fn build(name: impl Into<String>, value: Value, raw_value: String) -> Self {
        let mut name = name.into();
        name.make_ascii_uppercase();
        Self {
            name,
            params: Vec::new(),
            value,
            raw_value,
        }
    }

    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self::build(name, Value::Text(value.clone()), value)
    }

    #[must_use]
    pub fn integer(name: impl Into<String>, value: i32) -> Self {
        Self::build(name, Value::Integer(value), value.to_string())
    }

    /// DATE-TIME; a zoned value also gets its `TZID` parameter.
    #[must_use]
    pub fn datetime(name: impl Into<String>, dt: DateTime) -> Self {
        let raw = dt.to_string();
        let tzid = dt.tzid().map(str::to_string);
        let mut prop = Self::build(name, Value::DateTime(dt), raw);
        if let Some(tzid) = tzid {
            prop.add_param(Parameter::tzid(tzid));
        }
        prop
    }

    #[must_use]
    pub fn duration(name: impl Into<String>, d: Duration) -> Self {
        let raw = d.to_string();
        Self::build(name, Value::Duration(d), raw)
    }

    /// CAL-ADDRESS, normally a `mailto:` URI.
    #[must_use]
    pub fn cal_address(name: impl Into<String>, address: impl Into<String>) -> Self {
        let address = address.into();
        Self::build(name, Value::CalAddress(address.clone()), address)
    }

    #[must_use]
    pub fn recur(name: impl Into<String>, rule: RRule) -> Self {
        let raw = rule.to_string();
        Self::build(name, Value::Recur(Box::new(rule)), raw)
    }

    #[must_use]
    pub fn utc_offset(name: impl Into<String>, offset: UtcOffset) -> Self {
        Self::build(name, Value::UtcOffset(offset), offset.to_string())
    }

    /// A caller-named TEXT property, typically `X-...`.
    ///
    /// ## Errors
    /// Returns `RfcError::ValidationError` if `name` is not a legal name.
    pub fn extension(name: &str, value: impl Into<String>) -> RfcResult<Self> {
        if is_valid_name(name) {
            Ok(Self::text(name, value))
        } else {
            Err(RfcError::ValidationError(format!(
                "invalid property name '{name}'"
            )))
        }
    }

    /// Keeps a content line as-is, value untyped.
    #[must_use]
    pub fn from_content_line(cl: ContentLine) -> Self {
        Self {
            name: cl.name,
            params: cl.params,
            value: Value::Unknown(cl.raw_value.clone()),
            raw_value: cl.raw_value,
        }
    }

    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        find_param(&self.params, name)
    }

    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name)?.value()
    }

    pub fn add_param(&mut self, param: Parameter) {
        self.params.push(param);
    }

    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.add_param(param);
        self
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i32> {
        self.value.as_integer()
    }
}

pub mod names {
    pub const METHOD: &str = "METHOD";
    pub const PRODID: &str = "PRODID";
    pub const VERSION: &str = "VERSION";

    pub const DESCRIPTION: &str = "DESCRIPTION";
    pub const SUMMARY: &str = "SUMMARY";

    pub const DTEND: &str = "DTEND";
    pub const DTSTART: &str = "DTSTART";
    pub const DURATION: &str = "DURATION";
    pub const TRANSP: &str = "TRANSP";

    pub const TZID: &str = "TZID";
    pub const TZNAME: &str = "TZNAME";
    pub const TZOFFSETFROM: &str = "TZOFFSETFROM";
    pub const TZOFFSETTO: &str = "TZOFFSETTO";
    pub const X_LIC_LOCATION: &str = "X-LIC-LOCATION";

    pub const ATTENDEE: &str = "ATTENDEE";
    pub const ORGANIZER: &str = "ORGANIZER";
    pub const UID: &str = "UID";

    pub const RRULE: &str = "RRULE";

    pub const ACTION: &str = "ACTION";
    pub const REPEAT: &str = "REPEAT";
    pub const TRIGGER: &str = "TRIGGER";

    pub const CREATED: &str = "CREATED";
    pub const DTSTAMP: &str = "DTSTAMP";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::DateTimeForm;

    #[test]
    fn names_are_uppercased() {
        let location = Property::text("location", "Room 4");
        assert_eq!(
            (location.name.as_str(), location.as_text()),
            ("LOCATION", Some("Room 4"))
        );

        let repeat = Property::integer("repeat", 3);
        assert_eq!((repeat.as_integer(), repeat.raw_value.as_str()), (Some(3), "3"));
        assert_eq!(repeat.as_text(), None);
    }

    #[test]
    fn content_line_keeps_value_untyped() {
        let cl = ContentLine {
            name: "X-WR-CALNAME".into(),
            params: vec![Parameter::new("X-ORIGIN", "import")],
            raw_value: "Team\\, shared".into(),
        };
        let prop = Property::from_content_line(cl);
        assert_eq!(prop.get_param_value("x-origin"), Some("import"));
        assert_eq!(prop.as_text(), None);
        assert_eq!(prop.raw_value, "Team\\, shared");
    }

    #[test]
    fn zoned_datetime_carries_tzid() {
        let dt = DateTime::sample(
            "20200509T110000",
            DateTimeForm::Zoned {
                tzid: "Europe/Berlin".into(),
            },
        );
        let prop = Property::datetime("DTSTART", dt);
        assert_eq!(prop.get_param_value("TZID"), Some("Europe/Berlin"));
        assert_eq!(prop.raw_value, "20200509T110000");
    }

    #[test]
    fn utc_datetime_has_no_params() {
        let prop = Property::datetime("DTSTAMP", DateTime::sample("19700101T000000", DateTimeForm::Utc));
        assert!(prop.params.is_empty());
        assert_eq!(prop.raw_value, "19700101T000000Z");
    }

    #[test]
    fn extension_names_are_checked() {
        assert!(Property::extension("X-CUSTOM", "v").is_ok());
        assert!(Property::extension("X CUSTOM", "v").is_err());
        assert!(Property::extension("", "v").is_err());
    }
}
