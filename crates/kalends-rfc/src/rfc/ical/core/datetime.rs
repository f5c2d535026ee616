//! DATE-TIME (RFC 5545 §3.3.5) and UTC-OFFSET (§3.3.14) values.

use std::fmt;

use chrono::{Datelike, NaiveDateTime};

use crate::error::{RfcError, RfcResult};

/// Signed offset from UTC in seconds, east positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtcOffset(i32);

impl UtcOffset {
    pub const UTC: Self = Self(0);

    #[must_use]
    pub const fn from_seconds(seconds: i32) -> Self {
        Self(seconds)
    }

    #[must_use]
    pub const fn as_seconds(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UtcOffset {
    /// `+HHMM`, or `+HHMMSS` when the offset is not a whole minute.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let abs = self.0.unsigned_abs();
        let (hhmm, ss) = ((abs / 3600) * 100 + (abs / 60) % 60, abs % 60);
        if ss == 0 {
            write!(f, "{sign}{hhmm:04}")
        } else {
            write!(f, "{sign}{hhmm:04}{ss:02}")
        }
    }
}

/// How a DATE-TIME is anchored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeForm {
    /// Same wall-clock time in every zone.
    Floating,
    /// Trailing `Z`.
    Utc,
    /// Local to the zone named by `tzid`, emitted verbatim as the `TZID`
    /// parameter.
    Zoned { tzid: String },
}

/// A wall-clock timestamp plus its anchoring. Years are limited to the four
/// digits the text form allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTime {
    wall: NaiveDateTime,
    form: DateTimeForm,
}

impl DateTime {
    /// ## Errors
    /// Returns `RfcError::OutOfRange` for years outside 0..=9999.
    pub fn new(wall: NaiveDateTime, form: DateTimeForm) -> RfcResult<Self> {
        let year = wall.year();
        if !(0..=9999).contains(&year) {
            return Err(RfcError::OutOfRange {
                field: "year",
                value: i64::from(year),
            });
        }
        Ok(Self { wall, form })
    }

    #[must_use]
    pub const fn wall(&self) -> NaiveDateTime {
        self.wall
    }

    #[must_use]
    pub const fn form(&self) -> &DateTimeForm {
        &self.form
    }

    #[must_use]
    pub const fn is_utc(&self) -> bool {
        matches!(self.form, DateTimeForm::Utc)
    }

    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.form {
            DateTimeForm::Zoned { tzid } => Some(tzid.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
impl DateTime {
    /// Builds a value from `YYYYMMDDTHHMMSS` text in tests.
    pub(crate) fn sample(wall: &str, form: DateTimeForm) -> Self {
        let wall = NaiveDateTime::parse_from_str(wall, "%Y%m%dT%H%M%S").unwrap();
        Self::new(wall, form).unwrap()
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wall.format("%Y%m%dT%H%M%S"))?;
        if self.is_utc() {
            f.write_str("Z")?;
        }
        Ok(())
    }
}
