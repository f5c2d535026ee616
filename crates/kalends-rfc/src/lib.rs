//! iCalendar (RFC 5545) codec: a generic component/property/parameter tree,
//! its text serializer, a content-line parser and a timezone database that
//! renders `VTIMEZONE` definitions from the IANA data shipped with `chrono-tz`.

pub mod error;
pub mod rfc;
