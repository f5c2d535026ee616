//! STANDARD / DAYLIGHT sub-components of a `VTIMEZONE` (RFC 5545 §3.6.5).

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::{
    ByList, Component, ComponentKind, DateTime, DateTimeForm, Frequency, Property, RRule,
    UtcOffset, Weekday, encode_day, prop_names,
};

/// Type of timezone observance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservanceKind {
    /// Standard time.
    Standard,
    /// Daylight saving time.
    Daylight,
}

impl ObservanceKind {
    const fn component_kind(self) -> ComponentKind {
        match self {
            Self::Standard => ComponentKind::Standard,
            Self::Daylight => ComponentKind::Daylight,
        }
    }
}

/// One offset regime starting at a local wall-clock instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Observance {
    pub kind: ObservanceKind,
    /// Wall-clock time the observance begins, in the offset before it.
    pub dtstart: NaiveDateTime,
    pub offset_from: UtcOffset,
    pub offset_to: UtcOffset,
    /// Yearly rule, present when the transition recurs in later years.
    pub rrule: Option<RRule>,
    /// Abbreviation, e.g. `CEST`.
    pub name: String,
}

impl Observance {
    /// ## Summary
    /// Renders the observance as a STANDARD or DAYLIGHT component.
    ///
    /// ## Errors
    /// Returns `RfcError::OutOfRange` if the start year does not fit a
    /// DATE-TIME value.
    pub fn to_component(&self) -> RfcResult<Component> {
        let mut component = Component::new(self.kind.component_kind());
        component.add_property(Property::datetime(
            prop_names::DTSTART,
            DateTime::new(self.dtstart, DateTimeForm::Floating)?,
        ));
        component.add_property(Property::utc_offset(
            prop_names::TZOFFSETFROM,
            self.offset_from,
        ));
        component.add_property(Property::utc_offset(prop_names::TZOFFSETTO, self.offset_to));
        if let Some(rule) = &self.rrule {
            component.add_property(Property::recur(prop_names::RRULE, rule.clone()));
        }
        component.add_property(Property::text(prop_names::TZNAME, self.name.clone()));
        Ok(component)
    }
}

/// Position of a date's weekday within its month: 1..=4, or -1 for the last.
pub(super) fn weekday_ordinal(date: NaiveDate) -> i16 {
    let day = date.day();
    if day + 7 > days_in_month(date) {
        -1
    } else {
        i16::try_from((day - 1) / 7 + 1).unwrap_or(1)
    }
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

/// Builds `FREQ=YEARLY;BYDAY=<nth><weekday>;BYMONTH=<month>` for a start date.
///
/// ## Errors
/// Propagates BY-list construction failures.
pub(super) fn yearly_rule(start: NaiveDate) -> RfcResult<RRule> {
    let mut rule = RRule::new(Frequency::Yearly);
    let day = encode_day(
        Weekday::from_chrono(start.weekday()),
        weekday_ordinal(start),
    );
    rule.by_day = ByList::from_values("BYDAY", &[day])?;
    let month = i16::try_from(start.month())
        .ok()
        .ok_or(RfcError::OutOfRange {
            field: "month",
            value: i64::from(start.month()),
        })?;
    rule.by_month = ByList::from_values("BYMONTH", &[month])?;
    Ok(rule)
}
