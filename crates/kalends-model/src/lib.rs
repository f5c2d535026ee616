//! Typed RFC 5545 calendar model.
//!
//! Values here describe calendars, events, alarms and participants; they are
//! turned into the generic `kalends-rfc` component tree on demand and carry
//! no codec state of their own.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use kalends_model::{CalendarTime, VCalendar, VEvent};
//! use kalends_rfc::rfc::ical::TimezoneDatabase;
//!
//! let start = CalendarTime::Utc(Utc.with_ymd_and_hms(2020, 5, 9, 11, 0, 0).unwrap());
//! let mut calendar = VCalendar::default();
//! calendar.events.push(VEvent::new("Standup", start));
//!
//! let text = calendar.to_ical_string(&TimezoneDatabase::default()).unwrap();
//! assert!(text.contains("SUMMARY:Standup\r\n"));
//! ```

pub mod alarm;
pub mod calendar;
pub mod duration;
pub mod error;
pub mod event;
pub mod participant;
pub mod recurrence;
pub mod time;

pub use alarm::{AlarmAction, AlarmRepeat, AlarmTrigger, VAlarm};
pub use calendar::{Method, VCalendar};
pub use duration::Duration;
pub use error::{EncodeError, EncodeResult, ParseError};
pub use event::{Transparency, VEvent};
pub use participant::{Attendee, CalendarUserType, Organizer, ParticipationStatus, Role};
pub use recurrence::{Frequency, RecurrenceEnd, RecurrenceRule, Weekday};
pub use time::CalendarTime;
