//! iCalendar RECUR value type (RFC 5545 §3.3.10).
//!
//! The rule is a fixed-shape record: every BY-list is a sorted array of
//! 16-bit integers terminated by [`RECURRENCE_ARRAY_MAX`], sized to the
//! largest list the grammar allows plus the terminator.

use std::fmt;

use super::DateTime;
use crate::error::{RfcError, RfcResult};

/// Terminator marking the end of a BY-list.
pub const RECURRENCE_ARRAY_MAX: i16 = 0x7f7f;

pub const BY_SECOND_SIZE: usize = 62;
pub const BY_MINUTE_SIZE: usize = 61;
pub const BY_HOUR_SIZE: usize = 25;
pub const BY_DAY_SIZE: usize = 364;
pub const BY_MONTH_DAY_SIZE: usize = 32;
pub const BY_YEAR_DAY_SIZE: usize = 367;
pub const BY_WEEK_NO_SIZE: usize = 54;
pub const BY_MONTH_SIZE: usize = 13;
pub const BY_SET_POS_SIZE: usize = 367;

/// Recurrence frequency (RFC 5545 §3.3.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Returns the two-letter abbreviation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Returns the day number used in packed BY-day values (Sunday = 1).
    #[must_use]
    pub const fn number(self) -> i16 {
        match self {
            Self::Sunday => 1,
            Self::Monday => 2,
            Self::Tuesday => 3,
            Self::Wednesday => 4,
            Self::Thursday => 5,
            Self::Friday => 6,
            Self::Saturday => 7,
        }
    }

    /// Inverse of [`Weekday::number`].
    #[must_use]
    pub const fn from_number(n: i16) -> Option<Self> {
        Some(match n {
            1 => Self::Sunday,
            2 => Self::Monday,
            3 => Self::Tuesday,
            4 => Self::Wednesday,
            5 => Self::Thursday,
            6 => Self::Friday,
            7 => Self::Saturday,
            _ => return None,
        })
    }

    /// Converts from chrono's weekday.
    #[must_use]
    pub const fn from_chrono(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Packs a weekday and an ordinal into one BY-day value.
///
/// The magnitude is `day + 8 * |ordinal|` and the sign follows the ordinal,
/// so `-1SU` packs to `-9` and plain `MO` to `2`.
#[must_use]
pub const fn encode_day(weekday: Weekday, ordinal: i16) -> i16 {
    let magnitude = weekday
        .number()
        .saturating_add(ordinal.saturating_abs().saturating_mul(8));
    if ordinal < 0 { -magnitude } else { magnitude }
}

/// Unpacks a BY-day value into its weekday and ordinal (0 = every).
#[must_use]
pub const fn decode_day(value: i16) -> (Option<Weekday>, i16) {
    let magnitude = value.saturating_abs();
    let ordinal = magnitude / 8;
    (
        Weekday::from_number(magnitude % 8),
        if value < 0 { -ordinal } else { ordinal },
    )
}

/// A sentinel-terminated BY-list with room for `N - 1` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByList<const N: usize> {
    slots: [i16; N],
}

impl<const N: usize> ByList<N> {
    /// Creates an empty list (a lone terminator).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            slots: [RECURRENCE_ARRAY_MAX; N],
        }
    }

    /// Builds a list from `values`, sorted ascending and terminated.
    ///
    /// ## Errors
    /// Returns `RfcError::ValidationError` if there are more values than the
    /// list can hold, or if a value collides with the terminator.
    pub fn from_values(part: &'static str, values: &[i16]) -> RfcResult<Self> {
        if values.len() >= N {
            return Err(RfcError::ValidationError(format!(
                "{part} holds {} values, at most {} fit",
                values.len(),
                N - 1
            )));
        }
        if values.contains(&RECURRENCE_ARRAY_MAX) {
            return Err(RfcError::OutOfRange {
                field: part,
                value: i64::from(RECURRENCE_ARRAY_MAX),
            });
        }

        let mut sorted = values.to_vec();
        sorted.sort_unstable();

        let mut list = Self::empty();
        list.slots[..sorted.len()].copy_from_slice(&sorted);
        Ok(list)
    }

    /// Returns the values before the terminator.
    #[must_use]
    pub fn values(&self) -> &[i16] {
        let end = self
            .slots
            .iter()
            .position(|&v| v == RECURRENCE_ARRAY_MAX)
            .unwrap_or(N);
        &self.slots[..end]
    }

    /// Returns the raw terminated storage.
    #[must_use]
    pub const fn slots(&self) -> &[i16; N] {
        &self.slots
    }

    /// Returns whether the list holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

impl<const N: usize> Default for ByList<N> {
    fn default() -> Self {
        Self::empty()
    }
}

/// How a recurrence terminates. At most one bound is ever active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RRuleEnd {
    /// Repeats forever.
    #[default]
    Never,
    /// Ends after this many occurrences.
    Count(u32),
    /// Ends at this instant (inclusive).
    Until(DateTime),
}

/// Recurrence rule (RFC 5545 §3.3.10, §3.8.5.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RRule {
    /// Recurrence frequency.
    pub freq: Frequency,
    /// Recurrence interval (default: 1, not rendered when 1).
    pub interval: u32,
    /// Termination.
    pub end: RRuleEnd,
    /// Week start day.
    pub wkst: Option<Weekday>,
    pub by_second: ByList<BY_SECOND_SIZE>,
    pub by_minute: ByList<BY_MINUTE_SIZE>,
    pub by_hour: ByList<BY_HOUR_SIZE>,
    /// Packed weekday/ordinal values, see [`encode_day`].
    pub by_day: ByList<BY_DAY_SIZE>,
    pub by_month_day: ByList<BY_MONTH_DAY_SIZE>,
    pub by_year_day: ByList<BY_YEAR_DAY_SIZE>,
    pub by_week_no: ByList<BY_WEEK_NO_SIZE>,
    pub by_month: ByList<BY_MONTH_SIZE>,
    pub by_set_pos: ByList<BY_SET_POS_SIZE>,
}

impl RRule {
    /// Creates a rule with the given frequency and every other part at its default.
    #[must_use]
    pub fn new(freq: Frequency) -> Self {
        Self {
            freq,
            interval: 1,
            end: RRuleEnd::Never,
            wkst: None,
            by_second: ByList::empty(),
            by_minute: ByList::empty(),
            by_hour: ByList::empty(),
            by_day: ByList::empty(),
            by_month_day: ByList::empty(),
            by_year_day: ByList::empty(),
            by_week_no: ByList::empty(),
            by_month: ByList::empty(),
            by_set_pos: ByList::empty(),
        }
    }

    /// Sets the interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the termination.
    #[must_use]
    pub fn with_end(mut self, end: RRuleEnd) -> Self {
        self.end = end;
        self
    }

    /// Sets the week start day.
    #[must_use]
    pub fn with_wkst(mut self, wkst: Weekday) -> Self {
        self.wkst = Some(wkst);
        self
    }
}

fn push_list(parts: &mut Vec<String>, name: &str, values: &[i16]) {
    if values.is_empty() {
        return;
    }
    let s: Vec<_> = values.iter().map(ToString::to_string).collect();
    parts.push(format!("{name}={}", s.join(",")));
}

impl fmt::Display for RRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![format!("FREQ={}", self.freq)];

        match &self.end {
            RRuleEnd::Never => {}
            RRuleEnd::Count(count) => parts.push(format!("COUNT={count}")),
            RRuleEnd::Until(until) => parts.push(format!("UNTIL={until}")),
        }

        if self.interval != 1 {
            parts.push(format!("INTERVAL={}", self.interval));
        }

        push_list(&mut parts, "BYSECOND", self.by_second.values());
        push_list(&mut parts, "BYMINUTE", self.by_minute.values());
        push_list(&mut parts, "BYHOUR", self.by_hour.values());

        if !self.by_day.is_empty() {
            let days: Vec<String> = self
                .by_day
                .values()
                .iter()
                .map(|&v| match decode_day(v) {
                    (Some(day), 0) => day.to_string(),
                    (Some(day), ordinal) => format!("{ordinal}{day}"),
                    // Not a packed weekday; emit the number untouched.
                    (None, _) => v.to_string(),
                })
                .collect();
            parts.push(format!("BYDAY={}", days.join(",")));
        }

        push_list(&mut parts, "BYMONTHDAY", self.by_month_day.values());
        push_list(&mut parts, "BYYEARDAY", self.by_year_day.values());
        push_list(&mut parts, "BYWEEKNO", self.by_week_no.values());
        push_list(&mut parts, "BYMONTH", self.by_month.values());
        push_list(&mut parts, "BYSETPOS", self.by_set_pos.values());

        if let Some(wkst) = self.wkst {
            parts.push(format!("WKST={wkst}"));
        }

        write!(f, "{}", parts.join(";"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::DateTimeForm;

    #[test]
    fn rrule_display_basic() {
        let rrule = RRule::new(Frequency::Daily).with_end(RRuleEnd::Count(2));
        assert_eq!(rrule.to_string(), "FREQ=DAILY;COUNT=2");
    }

    #[test]
    fn rrule_display_until() {
        let rrule = RRule::new(Frequency::Daily)
            .with_end(RRuleEnd::Until(DateTime::sample("20200510T000000", DateTimeForm::Utc)));
        assert_eq!(rrule.to_string(), "FREQ=DAILY;UNTIL=20200510T000000Z");
    }

    #[test]
    fn rrule_display_part_order() {
        let mut rrule = RRule::new(Frequency::Monthly)
            .with_end(RRuleEnd::Count(5))
            .with_interval(2)
            .with_wkst(Weekday::Monday);
        rrule.by_set_pos = ByList::from_values("BYSETPOS", &[-1]).unwrap();
        rrule.by_day = ByList::from_values(
            "BYDAY",
            &[encode_day(Weekday::Friday, 0), encode_day(Weekday::Monday, 0)],
        )
        .unwrap();
        rrule.by_hour = ByList::from_values("BYHOUR", &[9]).unwrap();

        assert_eq!(
            rrule.to_string(),
            "FREQ=MONTHLY;COUNT=5;INTERVAL=2;BYHOUR=9;BYDAY=MO,FR;BYSETPOS=-1;WKST=MO"
        );
    }

    #[test]
    fn by_list_sorts_and_terminates() {
        let list = ByList::<BY_HOUR_SIZE>::from_values("BYHOUR", &[6, 2, 4, 0]).unwrap();
        assert_eq!(list.values(), &[0, 2, 4, 6]);
        assert_eq!(list.slots()[4], RECURRENCE_ARRAY_MAX);
    }

    #[test]
    fn empty_by_list_is_a_lone_terminator() {
        let list = ByList::<BY_MONTH_SIZE>::empty();
        assert!(list.is_empty());
        assert_eq!(list.slots()[0], RECURRENCE_ARRAY_MAX);
    }

    #[test]
    fn by_list_rejects_overflow() {
        let values: Vec<i16> = (1..=13).collect();
        assert!(ByList::<BY_MONTH_SIZE>::from_values("BYMONTH", &values).is_err());
        let values: Vec<i16> = (1..=12).collect();
        assert!(ByList::<BY_MONTH_SIZE>::from_values("BYMONTH", &values).is_ok());
    }

    #[test]
    fn by_list_rejects_terminator_value() {
        assert!(
            ByList::<BY_YEAR_DAY_SIZE>::from_values("BYYEARDAY", &[RECURRENCE_ARRAY_MAX]).is_err()
        );
    }

    #[test]
    fn by_day_packing() {
        assert_eq!(encode_day(Weekday::Monday, 0), 2);
        assert_eq!(encode_day(Weekday::Sunday, -1), -9);
        assert_eq!(encode_day(Weekday::Tuesday, 2), 19);
        assert_eq!(decode_day(-9), (Some(Weekday::Sunday), -1));
        assert_eq!(decode_day(19), (Some(Weekday::Tuesday), 2));

        let mut rrule = RRule::new(Frequency::Yearly);
        rrule.by_day = ByList::from_values("BYDAY", &[-9]).unwrap();
        rrule.by_month = ByList::from_values("BYMONTH", &[3]).unwrap();
        assert_eq!(rrule.to_string(), "FREQ=YEARLY;BYDAY=-1SU;BYMONTH=3");
    }
}
