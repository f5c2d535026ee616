//! Recurrence rules and their encoding into the codec's fixed-shape record.

use std::collections::BTreeSet;
use std::num::NonZeroU32;

use chrono::Month;
use kalends_rfc::rfc::ical::core::{ByList, RRule, RRuleEnd, encode_day};

pub use kalends_rfc::rfc::ical::core::{Frequency, Weekday};

use crate::error::{EncodeError, EncodeResult};
use crate::time::CalendarTime;

/// How a recurrence stops. Only one bound can be active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecurrenceEnd {
    #[default]
    Never,
    Count(u32),
    Date(CalendarTime),
}

/// A recurrence rule (RFC 5545 §3.3.10).
///
/// BY-lists are plain sets; their values are passed through without range
/// checks against the frequency. `by_day` holds packed weekday values, see
/// [`RecurrenceRule::day`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub interval: NonZeroU32,
    pub end: RecurrenceEnd,
    pub week_start: Option<Weekday>,
    pub by_second: BTreeSet<i32>,
    pub by_minute: BTreeSet<i32>,
    pub by_hour: BTreeSet<i32>,
    pub by_day: BTreeSet<i32>,
    pub by_month_day: BTreeSet<i32>,
    pub by_year_day: BTreeSet<i32>,
    pub by_week_no: BTreeSet<i32>,
    pub by_month: BTreeSet<Month>,
    pub by_set_pos: BTreeSet<i32>,
}

impl RecurrenceRule {
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: NonZeroU32::MIN,
            end: RecurrenceEnd::Never,
            week_start: None,
            by_second: BTreeSet::new(),
            by_minute: BTreeSet::new(),
            by_hour: BTreeSet::new(),
            by_day: BTreeSet::new(),
            by_month_day: BTreeSet::new(),
            by_year_day: BTreeSet::new(),
            by_week_no: BTreeSet::new(),
            by_month: BTreeSet::new(),
            by_set_pos: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn with_interval(mut self, interval: NonZeroU32) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub const fn with_end(mut self, end: RecurrenceEnd) -> Self {
        self.end = end;
        self
    }

    #[must_use]
    pub const fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = Some(week_start);
        self
    }

    /// Packed BY-day value: `weekday + 8 * ordinal`, negative for ordinals
    /// counted from the end. Ordinal 0 means every such weekday.
    #[must_use]
    pub fn day(weekday: Weekday, ordinal: i16) -> i32 {
        i32::from(encode_day(weekday, ordinal))
    }

    /// ## Summary
    /// Encodes the rule. An `UNTIL` bound is converted to UTC unless it is
    /// floating.
    ///
    /// ## Errors
    /// Returns `EncodeError::RecurrenceValue` for a BY value outside the
    /// 16-bit range, and the codec's error when a list exceeds its capacity.
    #[tracing::instrument(level = "trace", skip(self), fields(freq = %self.frequency))]
    pub fn to_rrule(&self) -> EncodeResult<RRule> {
        let end = match &self.end {
            RecurrenceEnd::Never => RRuleEnd::Never,
            RecurrenceEnd::Count(n) => RRuleEnd::Count(*n),
            RecurrenceEnd::Date(until) => RRuleEnd::Until(until.to_ical_utc()?),
        };

        let mut rule = RRule::new(self.frequency)
            .with_interval(self.interval.get())
            .with_end(end);
        rule.wkst = self.week_start;
        rule.by_second = by_list("BYSECOND", self.by_second.iter().map(|&v| i64::from(v)))?;
        rule.by_minute = by_list("BYMINUTE", self.by_minute.iter().map(|&v| i64::from(v)))?;
        rule.by_hour = by_list("BYHOUR", self.by_hour.iter().map(|&v| i64::from(v)))?;
        rule.by_day = by_list("BYDAY", self.by_day.iter().map(|&v| i64::from(v)))?;
        rule.by_month_day = by_list("BYMONTHDAY", self.by_month_day.iter().map(|&v| i64::from(v)))?;
        rule.by_year_day = by_list("BYYEARDAY", self.by_year_day.iter().map(|&v| i64::from(v)))?;
        rule.by_week_no = by_list("BYWEEKNO", self.by_week_no.iter().map(|&v| i64::from(v)))?;
        rule.by_month = by_list(
            "BYMONTH",
            self.by_month
                .iter()
                .map(|m| i64::from(m.number_from_month())),
        )?;
        rule.by_set_pos = by_list("BYSETPOS", self.by_set_pos.iter().map(|&v| i64::from(v)))?;
        Ok(rule)
    }
}

fn by_list<const N: usize>(
    part: &'static str,
    values: impl Iterator<Item = i64>,
) -> EncodeResult<ByList<N>> {
    let narrowed = values
        .map(|v| {
            i16::try_from(v).ok().ok_or(EncodeError::RecurrenceValue {
                part,
                value: v,
            })
        })
        .collect::<EncodeResult<Vec<_>>>()?;
    Ok(ByList::from_values(part, &narrowed)?)
}
