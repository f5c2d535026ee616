//! Event alarms (RFC 5545 §3.6.6).

use kalends_rfc::error::RfcError;
use kalends_rfc::rfc::ical::core::{Component, Parameter, Property, prop_names};

use crate::duration::Duration;
use crate::error::EncodeResult;
use crate::participant::Attendee;
use crate::time::CalendarTime;

/// When an alarm fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmTrigger {
    /// Offset before the event start.
    Before(Duration),
    /// Offset after the event start.
    After(Duration),
    /// Absolute instant.
    At(CalendarTime),
}

/// What an alarm does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmAction {
    Display {
        description: String,
    },
    Email {
        summary: String,
        description: String,
        attendees: Vec<Attendee>,
    },
}

impl AlarmAction {
    const fn name(&self) -> &'static str {
        match self {
            Self::Display { .. } => "DISPLAY",
            Self::Email { .. } => "EMAIL",
        }
    }
}

/// Repeat policy: `count` further firings, `interval` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmRepeat {
    pub count: u32,
    pub interval: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VAlarm {
    pub trigger: AlarmTrigger,
    pub action: AlarmAction,
    pub repeat: Option<AlarmRepeat>,
}

impl VAlarm {
    #[must_use]
    pub fn display(trigger: AlarmTrigger, description: impl Into<String>) -> Self {
        Self {
            trigger,
            action: AlarmAction::Display {
                description: description.into(),
            },
            repeat: None,
        }
    }

    #[must_use]
    pub fn email(
        trigger: AlarmTrigger,
        summary: impl Into<String>,
        description: impl Into<String>,
        attendees: Vec<Attendee>,
    ) -> Self {
        Self {
            trigger,
            action: AlarmAction::Email {
                summary: summary.into(),
                description: description.into(),
                attendees,
            },
            repeat: None,
        }
    }

    #[must_use]
    pub const fn with_repeat(mut self, repeat: AlarmRepeat) -> Self {
        self.repeat = Some(repeat);
        self
    }

    /// ## Summary
    /// Builds the `VALARM` component: `TRIGGER`, `ACTION`, then the
    /// action's properties, then `DURATION` and `REPEAT` as a pair.
    ///
    /// ## Errors
    /// Returns an error if an absolute trigger is out of range, an attendee
    /// cannot be encoded, or the repeat count exceeds the INTEGER range.
    pub fn to_component(&self) -> EncodeResult<Component> {
        let mut component = Component::alarm();

        component.add_property(match &self.trigger {
            AlarmTrigger::Before(d) => Property::duration(prop_names::TRIGGER, d.to_ical(true)),
            AlarmTrigger::After(d) => Property::duration(prop_names::TRIGGER, d.to_ical(false)),
            AlarmTrigger::At(at) => Property::datetime(prop_names::TRIGGER, at.to_ical_utc()?)
                .with_param(Parameter::value_type("DATE-TIME")),
        });
        component.add_property(Property::text(prop_names::ACTION, self.action.name()));

        match &self.action {
            AlarmAction::Display { description } => {
                component.add_property(Property::text(prop_names::DESCRIPTION, description));
            }
            AlarmAction::Email {
                summary,
                description,
                attendees,
            } => {
                component.add_property(Property::text(prop_names::SUMMARY, summary));
                component.add_property(Property::text(prop_names::DESCRIPTION, description));
                for attendee in attendees {
                    component.add_property(attendee.to_property()?);
                }
            }
        }

        if let Some(repeat) = &self.repeat {
            let count = i32::try_from(repeat.count).map_err(|e| {
                RfcError::ValidationError(format!("REPEAT {}: {e}", repeat.count))
            })?;
            component.add_property(Property::duration(
                prop_names::DURATION,
                repeat.interval.to_ical(false),
            ));
            component.add_property(Property::integer(prop_names::REPEAT, count));
        }

        Ok(component)
    }
}
