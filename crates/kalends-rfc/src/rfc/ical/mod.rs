//! RFC 5545 content: a component tree, its text form and timezone
//! definitions.
//!
//! [`core`] holds the tree, [`build`] writes it as folded CRLF lines,
//! [`parse`] reads it back and [`tzdb`] turns IANA zones into `VTIMEZONE`
//! components.
//!
//! ```rust
//! use kalends_rfc::rfc::ical::{build, core::*};
//!
//! let mut calendar = ICalendar::new("-//Acme//Planner//EN");
//! let mut vevent = Component::event();
//! vevent.add_property(Property::text("UID", "standup-7"));
//! vevent.add_property(Property::text("LOCATION", "Hall A, Floor 2"));
//! calendar.add(vevent);
//!
//! let text = build::serialize(&calendar);
//! assert!(text.contains("LOCATION:Hall A\\, Floor 2\r\n"));
//! ```

pub mod build;
pub mod core;
pub mod parse;
pub mod tzdb;

pub use build::serialize;
pub use core::{Component, ComponentKind, ICalendar, Parameter, Property};
pub use parse::{ParseError, ParseResult, parse};
pub use tzdb::TimezoneDatabase;
