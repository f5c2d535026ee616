use thiserror::Error;

use crate::rfc::ical::parse::ParseError;

/// Errors raised while building or checking iCalendar values.
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("malformed iCalendar: {0}")]
    ParseError(#[from] ParseError),

    #[error("invalid value: {0}")]
    ValidationError(String),

    #[error("no such timezone: {0}")]
    UnknownTimezone(String),

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },

    #[error(transparent)]
    CoreError(#[from] kalends_core::error::CoreError),
}

pub type RfcResult<T> = Result<T, RfcError>;
