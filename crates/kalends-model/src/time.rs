//! Points in time as the calendar model sees them.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use kalends_rfc::rfc::ical::TimezoneDatabase;
use kalends_rfc::rfc::ical::core::{DateTime as IcalDateTime, DateTimeForm};

use crate::error::{EncodeError, EncodeResult};

/// A time point with an explicit zone policy.
///
/// `Floating` means "the same wall-clock time everywhere" and must be
/// chosen deliberately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarTime {
    Utc(DateTime<Utc>),
    Zoned(DateTime<Tz>),
    Floating(NaiveDateTime),
}

impl CalendarTime {
    /// The named zone of this time, unless it is UTC under another name.
    #[must_use]
    pub fn zone(&self) -> Option<Tz> {
        match self {
            Self::Zoned(dt) if !TimezoneDatabase::is_utc(dt.timezone()) => Some(dt.timezone()),
            _ => None,
        }
    }

    /// The same instant in UTC. Floating times are read as if they were UTC.
    #[must_use]
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            Self::Utc(dt) => *dt,
            Self::Zoned(dt) => dt.with_timezone(&Utc),
            Self::Floating(naive) => Utc.from_utc_datetime(naive),
        }
    }

    /// Calendar year of the wall-clock time.
    #[must_use]
    pub fn year(&self) -> i32 {
        match self {
            Self::Utc(dt) => dt.year(),
            Self::Zoned(dt) => dt.year(),
            Self::Floating(naive) => naive.year(),
        }
    }

    /// ## Summary
    /// Converts to the codec's DATE-TIME. A zoned value carries the TZID the
    /// timezone database produces, prefixed or bare.
    ///
    /// ## Errors
    /// Returns `EncodeError::DateOutOfRange` for years outside 0..=9999.
    pub fn to_ical(&self, tzdb: &TimezoneDatabase, prefixed: bool) -> EncodeResult<IcalDateTime> {
        match self {
            Self::Utc(dt) => wall_clock(&dt.naive_utc(), DateTimeForm::Utc),
            Self::Zoned(dt) if TimezoneDatabase::is_utc(dt.timezone()) => {
                wall_clock(&dt.naive_utc(), DateTimeForm::Utc)
            }
            Self::Zoned(dt) => wall_clock(
                &dt.naive_local(),
                DateTimeForm::Zoned {
                    tzid: tzdb.tzid(dt.timezone(), prefixed),
                },
            ),
            Self::Floating(naive) => wall_clock(naive, DateTimeForm::Floating),
        }
    }

    /// ## Summary
    /// Converts to a UTC DATE-TIME, keeping floating values floating.
    ///
    /// ## Errors
    /// Returns `EncodeError::DateOutOfRange` for years outside 0..=9999.
    pub fn to_ical_utc(&self) -> EncodeResult<IcalDateTime> {
        match self {
            Self::Floating(naive) => wall_clock(naive, DateTimeForm::Floating),
            _ => wall_clock(&self.to_utc().naive_utc(), DateTimeForm::Utc),
        }
    }
}

impl From<DateTime<Utc>> for CalendarTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Utc(dt)
    }
}

impl From<DateTime<Tz>> for CalendarTime {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::Zoned(dt)
    }
}

fn wall_clock(naive: &NaiveDateTime, form: DateTimeForm) -> EncodeResult<IcalDateTime> {
    let year = naive.year();
    if !(0..=9999).contains(&year) {
        return Err(EncodeError::DateOutOfRange { year });
    }
    Ok(IcalDateTime::new(*naive, form)?)
}
