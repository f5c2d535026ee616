//! Events (RFC 5545 §3.6.1).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use kalends_rfc::rfc::ical::TimezoneDatabase;
use kalends_rfc::rfc::ical::core::{Component, Property, prop_names};
use uuid::Uuid;

use crate::alarm::VAlarm;
use crate::duration::Duration;
use crate::error::EncodeResult;
use crate::participant::{Attendee, Organizer};
use crate::recurrence::RecurrenceRule;
use crate::time::CalendarTime;

/// Whether an event blocks time (`TRANSP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transparency {
    #[default]
    Opaque,
    Transparent,
}

impl Transparency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opaque => "OPAQUE",
            Self::Transparent => "TRANSPARENT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VEvent {
    pub summary: String,
    pub description: Option<String>,
    pub dtstamp: DateTime<Utc>,
    pub dtstart: CalendarTime,
    pub dtend: Option<CalendarTime>,
    pub uid: String,
    pub created: DateTime<Utc>,
    pub recurrence_rule: Option<RecurrenceRule>,
    /// Emitted alongside `dtend` if both are set; keeping them exclusive
    /// is up to the caller.
    pub duration: Option<Duration>,
    pub attendees: Vec<Attendee>,
    pub organizer: Option<Organizer>,
    pub transparency: Transparency,
    pub alarm: Option<VAlarm>,
    pub x_properties: BTreeMap<String, String>,
    /// Emit `TZID`s as `<prefix><IANA name>` rather than the bare name.
    pub use_tzid_prefix: bool,
}

impl VEvent {
    /// Creates an event stamped now, with a fresh UUID as its UID.
    #[must_use]
    pub fn new(summary: impl Into<String>, dtstart: CalendarTime) -> Self {
        let now = Utc::now();
        Self {
            summary: summary.into(),
            description: None,
            dtstamp: now,
            dtstart,
            dtend: None,
            uid: Uuid::new_v4().to_string(),
            created: now,
            recurrence_rule: None,
            duration: None,
            attendees: Vec::new(),
            organizer: None,
            transparency: Transparency::Opaque,
            alarm: None,
            x_properties: BTreeMap::new(),
            use_tzid_prefix: true,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_dtend(mut self, dtend: CalendarTime) -> Self {
        self.dtend = Some(dtend);
        self
    }

    #[must_use]
    pub fn with_dtstamp(mut self, dtstamp: DateTime<Utc>) -> Self {
        self.dtstamp = dtstamp;
        self
    }

    #[must_use]
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }

    #[must_use]
    pub fn with_recurrence_rule(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence_rule = Some(rule);
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn with_attendee(mut self, attendee: Attendee) -> Self {
        self.attendees.push(attendee);
        self
    }

    #[must_use]
    pub fn with_organizer(mut self, organizer: Organizer) -> Self {
        self.organizer = Some(organizer);
        self
    }

    #[must_use]
    pub fn with_transparency(mut self, transparency: Transparency) -> Self {
        self.transparency = transparency;
        self
    }

    #[must_use]
    pub fn with_alarm(mut self, alarm: VAlarm) -> Self {
        self.alarm = Some(alarm);
        self
    }

    #[must_use]
    pub fn with_x_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.x_properties.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_tzid_prefix(mut self, use_prefix: bool) -> Self {
        self.use_tzid_prefix = use_prefix;
        self
    }

    /// Named zones of `dtstart` and `dtend`, in that order.
    #[must_use]
    pub fn zones(&self) -> Vec<Tz> {
        std::iter::once(&self.dtstart)
            .chain(self.dtend.as_ref())
            .filter_map(CalendarTime::zone)
            .collect()
    }

    /// ## Summary
    /// Builds the `VEVENT` component in RFC order, with the alarm nested
    /// last.
    ///
    /// ## Errors
    /// Returns an error if a time is out of range, the recurrence rule
    /// cannot be encoded, or an extension name is not legal.
    #[tracing::instrument(skip(self, tzdb), fields(uid = %self.uid))]
    pub fn to_component(&self, tzdb: &TimezoneDatabase) -> EncodeResult<Component> {
        let prefixed = self.use_tzid_prefix;
        let mut component = Component::event();

        component.add_property(Property::datetime(
            prop_names::DTSTAMP,
            CalendarTime::Utc(self.dtstamp).to_ical(tzdb, prefixed)?,
        ));
        component.add_property(Property::datetime(
            prop_names::DTSTART,
            self.dtstart.to_ical(tzdb, prefixed)?,
        ));
        if let Some(dtend) = &self.dtend {
            component.add_property(Property::datetime(
                prop_names::DTEND,
                dtend.to_ical(tzdb, prefixed)?,
            ));
        }
        if let Some(duration) = self.duration {
            component.add_property(Property::duration(
                prop_names::DURATION,
                duration.to_ical(false),
            ));
        }
        component.add_property(Property::text(prop_names::SUMMARY, &self.summary));
        component.add_property(Property::text(prop_names::UID, &self.uid));
        if let Some(description) = &self.description {
            component.add_property(Property::text(prop_names::DESCRIPTION, description));
        }
        component.add_property(Property::text(
            prop_names::TRANSP,
            self.transparency.as_str(),
        ));
        component.add_property(Property::datetime(
            prop_names::CREATED,
            CalendarTime::Utc(self.created).to_ical(tzdb, prefixed)?,
        ));
        if let Some(rule) = &self.recurrence_rule {
            component.add_property(Property::recur(prop_names::RRULE, rule.to_rrule()?));
        }
        for attendee in &self.attendees {
            component.add_property(attendee.to_property()?);
        }
        if let Some(organizer) = &self.organizer {
            component.add_property(organizer.to_property()?);
        }
        for (name, value) in &self.x_properties {
            component.add_property(Property::extension(name, value)?);
        }
        if let Some(alarm) = &self.alarm {
            component.add_child(alarm.to_component()?);
        }

        tracing::trace!(
            properties = component.properties.len(),
            "Built VEVENT"
        );
        Ok(component)
    }
}
