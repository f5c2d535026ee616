//! Calendar assembly and the header round-trip (RFC 5545 §3.4, §3.6.5).

use std::fmt;
use std::ops::RangeInclusive;

use chrono_tz::Tz;
use kalends_core::config::{CalendarConfig, TimezoneConfig};
use kalends_core::constants::{DEFAULT_PRODID, ICALENDAR_VERSION};
use kalends_rfc::rfc::ical::core::{ComponentKind, ICalendar, Property, prop_names};
use kalends_rfc::rfc::ical::{self, TimezoneDatabase, build};

use crate::error::{EncodeResult, ParseError};
use crate::event::VEvent;
use crate::time::CalendarTime;

/// iTIP method (RFC 5546 §1.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Publish,
    Request,
    Reply,
    Add,
    Cancel,
    Refresh,
    Counter,
    DeclineCounter,
    Create,
    Response,
    Move,
    Modify,
    GenerateUid,
    Delete,
    PollStatus,
    X(String),
}

impl Method {
    const KNOWN: [Self; 15] = [
        Self::Publish,
        Self::Request,
        Self::Reply,
        Self::Add,
        Self::Cancel,
        Self::Refresh,
        Self::Counter,
        Self::DeclineCounter,
        Self::Create,
        Self::Response,
        Self::Move,
        Self::Modify,
        Self::GenerateUid,
        Self::Delete,
        Self::PollStatus,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Publish => "PUBLISH",
            Self::Request => "REQUEST",
            Self::Reply => "REPLY",
            Self::Add => "ADD",
            Self::Cancel => "CANCEL",
            Self::Refresh => "REFRESH",
            Self::Counter => "COUNTER",
            Self::DeclineCounter => "DECLINECOUNTER",
            Self::Create => "CREATE",
            Self::Response => "RESPONSE",
            Self::Move => "MOVE",
            Self::Modify => "MODIFY",
            Self::GenerateUid => "GENERATEUID",
            Self::Delete => "DELETE",
            Self::PollStatus => "POLLSTATUS",
            Self::X(value) => value,
        }
    }

    /// Reads a METHOD value, ignoring case and surrounding whitespace.
    /// Anything unrecognized becomes `X` with the trimmed text.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        Self::KNOWN
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(value))
            .unwrap_or_else(|| Self::X(value.to_string()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A zone to define, keyed by the TZID it is emitted under.
struct ZoneRef {
    tzid: String,
    tz: Tz,
    prefixed: bool,
}

/// A calendar: header properties, timezone definitions and events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCalendar {
    pub prodid: String,
    pub method: Option<Method>,
    /// Zones defined regardless of whether any event uses them.
    pub timezones: Vec<Tz>,
    pub events: Vec<VEvent>,
    /// Also define every zone an event's start or end refers to.
    pub autoinclude_timezones: bool,
    /// TZID form for the zones listed in `timezones`.
    pub use_tzid_prefix: bool,
}

impl Default for VCalendar {
    fn default() -> Self {
        Self {
            prodid: DEFAULT_PRODID.to_string(),
            method: None,
            timezones: Vec::new(),
            events: Vec::new(),
            autoinclude_timezones: true,
            use_tzid_prefix: true,
        }
    }
}

impl VCalendar {
    /// Creates an empty calendar with the configured product identifier,
    /// zone inclusion and TZID prefix policy.
    #[must_use]
    pub fn from_config(calendar: &CalendarConfig, timezone: &TimezoneConfig) -> Self {
        Self {
            prodid: calendar.prodid.clone(),
            autoinclude_timezones: calendar.autoinclude_timezones,
            use_tzid_prefix: timezone.use_prefix,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn with_event(mut self, event: VEvent) -> Self {
        self.events.push(event);
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.timezones.push(tz);
        self
    }

    /// Distinct zones to define, explicit ones first, then event
    /// references in event order.
    fn zone_refs(&self, tzdb: &TimezoneDatabase) -> Vec<ZoneRef> {
        let explicit = self
            .timezones
            .iter()
            .filter(|tz| !TimezoneDatabase::is_utc(**tz))
            .map(|tz| (*tz, self.use_tzid_prefix));
        let referenced = self
            .events
            .iter()
            .filter(|_| self.autoinclude_timezones)
            .flat_map(|event| {
                event
                    .zones()
                    .into_iter()
                    .map(move |tz| (tz, event.use_tzid_prefix))
            });

        let mut refs: Vec<ZoneRef> = Vec::new();
        for (tz, prefixed) in explicit.chain(referenced) {
            let tzid = tzdb.tzid(tz, prefixed);
            if refs.iter().all(|r| r.tzid != tzid) {
                refs.push(ZoneRef { tzid, tz, prefixed });
            }
        }
        refs
    }

    /// Years a zone definition should cover: from the earliest to the latest
    /// year any event uses the zone in, else the span of all event years.
    fn zone_years(&self, zone: &ZoneRef) -> Option<RangeInclusive<i32>> {
        let times = || {
            self.events
                .iter()
                .flat_map(|e| std::iter::once(&e.dtstart).chain(e.dtend.as_ref()))
        };
        let span = |years: Vec<i32>| {
            let first = years.iter().min()?;
            let last = years.iter().max()?;
            Some(*first..=*last)
        };
        span(
            times()
                .filter(|t| t.zone() == Some(zone.tz))
                .map(CalendarTime::year)
                .collect(),
        )
        .or_else(|| span(times().map(CalendarTime::year).collect()))
    }

    /// ## Summary
    /// Builds the calendar tree: `PRODID`, `VERSION`, optional `METHOD`,
    /// every `VTIMEZONE`, then every `VEVENT`.
    ///
    /// ## Errors
    /// Returns the first encode failure of any zone or event.
    #[tracing::instrument(skip(self, tzdb), fields(events = self.events.len()))]
    pub fn to_component(&self, tzdb: &TimezoneDatabase) -> EncodeResult<ICalendar> {
        let mut calendar = ICalendar::new(self.prodid.as_str());
        if let Some(method) = &self.method {
            calendar
                .root
                .add_property(Property::text(prop_names::METHOD, method.as_str()));
        }

        for zone in self.zone_refs(tzdb) {
            tracing::debug!(tzid = %zone.tzid, "Including timezone definition");
            let years = self.zone_years(&zone);
            calendar.add(tzdb.definition(zone.tz, zone.prefixed, years)?);
        }

        for event in &self.events {
            calendar.add(event.to_component(tzdb)?);
        }

        Ok(calendar)
    }

    /// ## Summary
    /// Renders the calendar as iCalendar text.
    ///
    /// ## Errors
    /// Same as [`Self::to_component`].
    pub fn to_ical_string(&self, tzdb: &TimezoneDatabase) -> EncodeResult<String> {
        Ok(build::serialize(&self.to_component(tzdb)?))
    }

    /// ## Summary
    /// Recovers `PRODID`, `VERSION` and `METHOD` from iCalendar text.
    /// Events and zones are not read back.
    ///
    /// ## Errors
    /// Returns `ParseError::InvalidCalendar` if the text is not a calendar,
    /// `ParseError::MissingProperty` without `VERSION` or `PRODID`, and
    /// `ParseError::UnsupportedValue` for a version other than 2.0.
    #[tracing::instrument(skip(text), fields(len = text.len()))]
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let parsed = ical::parse(text).map_err(|e| {
            tracing::warn!(error = %e, "Rejected calendar text");
            ParseError::InvalidCalendar(e.to_string())
        })?;

        if parsed.root.kind != ComponentKind::Calendar {
            return Err(ParseError::InvalidCalendar(format!(
                "root component is {}",
                parsed.root.name
            )));
        }

        let version = parsed
            .version()
            .ok_or(ParseError::MissingProperty(prop_names::VERSION))?
            .trim();
        if version != ICALENDAR_VERSION {
            return Err(ParseError::UnsupportedValue {
                property: prop_names::VERSION,
                value: version.to_string(),
            });
        }

        let prodid = parsed
            .prodid()
            .ok_or(ParseError::MissingProperty(prop_names::PRODID))?;

        let method = parsed
            .method()
            .filter(|m| !m.trim().is_empty())
            .map(Method::parse);

        Ok(Self {
            prodid: prodid.to_string(),
            method,
            ..Self::default()
        })
    }
}
