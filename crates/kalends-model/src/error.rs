use kalends_rfc::error::RfcError;
use thiserror::Error;

/// Failures turning model values into the component tree.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error(transparent)]
    Rfc(#[from] RfcError),

    #[error("Year {year} is outside the range a DATE-TIME can carry")]
    DateOutOfRange { year: i32 },

    #[error("{part} value {value} does not fit a recurrence rule")]
    RecurrenceValue { part: &'static str, value: i64 },
}

pub type EncodeResult<T> = std::result::Result<T, EncodeError>;

/// Failures recovering a calendar from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid calendar: {0}")]
    InvalidCalendar(String),

    #[error("Missing required property {0}")]
    MissingProperty(&'static str),

    #[error("Unsupported value '{value}' for {property}")]
    UnsupportedValue {
        property: &'static str,
        value: String,
    },
}
