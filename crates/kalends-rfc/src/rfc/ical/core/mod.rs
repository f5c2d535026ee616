//! The generic tree. Components own properties and sub-components,
//! properties own parameters and a value; every list keeps insertion order.

mod component;
mod datetime;
mod duration;
mod parameter;
mod property;
mod rrule;
mod value;

pub use component::{Component, ComponentKind, ICalendar};
pub use datetime::{DateTime, DateTimeForm, UtcOffset};
pub use duration::Duration;
pub use parameter::{Parameter, is_valid_name, names as param_names};
pub use property::{ContentLine, Property, names as prop_names};
pub use rrule::{
    BY_DAY_SIZE, BY_HOUR_SIZE, BY_MINUTE_SIZE, BY_MONTH_DAY_SIZE, BY_MONTH_SIZE,
    BY_SECOND_SIZE, BY_SET_POS_SIZE, BY_WEEK_NO_SIZE, BY_YEAR_DAY_SIZE, ByList, Frequency,
    RECURRENCE_ARRAY_MAX, RRule, RRuleEnd, Weekday, decode_day, encode_day,
};
pub use value::Value;
