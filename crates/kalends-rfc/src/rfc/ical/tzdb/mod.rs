//! Timezone identifiers and `VTIMEZONE` definitions backed by the IANA
//! database compiled into `chrono-tz`.
//!
//! A definition covers a span of years. Every offset change inside the
//! span becomes a STANDARD or DAYLIGHT observance. Changes repeating on
//! the same weekday rule in consecutive years share one observance with a
//! yearly RRULE, bounded by UNTIL when the rule stops.

mod observance;

pub use observance::{Observance, ObservanceKind};

use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone};
use chrono_tz::{OffsetComponents, Tz};
use kalends_core::config::TimezoneConfig;
use kalends_core::constants::{DEFAULT_REFERENCE_YEAR, DEFAULT_TZID_PREFIX};
use kalends_core::error::CoreError;

use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::build::serialize_component;
use crate::rfc::ical::core::{
    Component, DateTime, DateTimeForm, Property, RRuleEnd, UtcOffset, prop_names,
};

static SHARED: OnceLock<TimezoneDatabase> = OnceLock::new();

/// Zone names that denote UTC itself.
const UTC_ALIASES: &[&str] = &[
    "UTC",
    "UCT",
    "GMT",
    "Zulu",
    "Universal",
    "Greenwich",
    "Etc/UTC",
    "Etc/UCT",
    "Etc/GMT",
    "Etc/Zulu",
    "Etc/Universal",
    "Etc/Greenwich",
    "Etc/GMT0",
    "Etc/GMT+0",
    "Etc/GMT-0",
    "GMT0",
    "GMT+0",
    "GMT-0",
];

/// Total offset in seconds and its daylight-saving share, at one instant.
type OffsetKey = (i32, i64);

/// A change of offset at an exact UTC instant.
#[derive(Debug, Clone, Copy)]
struct Transition {
    at: NaiveDateTime,
    before: OffsetKey,
    after: OffsetKey,
}

/// Offsets, month, weekday, position in the month and wall time of a
/// transition. Equal keys in consecutive years form one yearly rule.
type RuleKey = (OffsetKey, OffsetKey, u32, chrono::Weekday, i16, NaiveTime);

/// The same transition recurring in consecutive years.
#[derive(Debug, Clone, Copy)]
struct Run {
    key: RuleKey,
    first: Transition,
    last: Transition,
    last_year: i32,
}

/// Source of timezone definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneDatabase {
    prefix: String,
    reference_year: i32,
}

impl Default for TimezoneDatabase {
    fn default() -> Self {
        Self::new(DEFAULT_TZID_PREFIX, DEFAULT_REFERENCE_YEAR)
    }
}

impl TimezoneDatabase {
    #[must_use]
    pub fn new(prefix: impl Into<String>, reference_year: i32) -> Self {
        Self {
            prefix: prefix.into(),
            reference_year,
        }
    }

    /// ## Summary
    /// Builds a database from the `timezone` configuration section.
    ///
    /// ## Errors
    /// Returns a validation error if the reference year is outside 1..=9999.
    pub fn from_config(config: &TimezoneConfig) -> RfcResult<Self> {
        if !(1..=9999).contains(&config.reference_year) {
            return Err(CoreError::ValidationError(format!(
                "timezone.reference_year {} is outside 1..=9999",
                config.reference_year
            ))
            .into());
        }
        Ok(Self::new(config.tzid_prefix.clone(), config.reference_year))
    }

    /// ## Summary
    /// Installs the process-wide database. The first call wins; later calls
    /// return the instance already installed.
    pub fn install(db: Self) -> &'static Self {
        SHARED.get_or_init(|| {
            tracing::debug!(
                prefix = %db.prefix,
                year = db.reference_year,
                "Installing timezone database"
            );
            db
        })
    }

    /// Returns the process-wide database, if one was installed.
    #[must_use]
    pub fn shared() -> Option<&'static Self> {
        SHARED.get()
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub const fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// ## Summary
    /// Looks up a zone by IANA name or by a TZID carrying our prefix.
    ///
    /// ## Errors
    /// Returns `RfcError::UnknownTimezone` if no such zone exists.
    pub fn resolve(&self, name: &str) -> RfcResult<Tz> {
        let bare = name.strip_prefix(self.prefix.as_str()).unwrap_or(name);
        Tz::from_str(bare).map_err(|e| {
            tracing::warn!(tzid = %name, error = %e, "Unknown timezone");
            RfcError::UnknownTimezone(name.to_string())
        })
    }

    /// Whether `tz` is UTC under another name.
    #[must_use]
    pub fn is_utc(tz: Tz) -> bool {
        UTC_ALIASES.contains(&tz.name())
    }

    /// The TZID string for `tz`, optionally namespaced with the prefix.
    #[must_use]
    pub fn tzid(&self, tz: Tz, prefixed: bool) -> String {
        if prefixed {
            format!("{}{}", self.prefix, tz.name())
        } else {
            tz.name().to_string()
        }
    }

    /// ## Summary
    /// Builds the `VTIMEZONE` component for `tz`, covering every year in
    /// `years`, or the reference year when none are given.
    ///
    /// ## Errors
    /// Returns `RfcError::OutOfRange` if a year cannot be represented.
    #[tracing::instrument(skip(self), fields(zone = tz.name()))]
    pub fn definition(
        &self,
        tz: Tz,
        prefixed: bool,
        years: Option<RangeInclusive<i32>>,
    ) -> RfcResult<Component> {
        let (first, last) = years
            .map_or((self.reference_year, self.reference_year), RangeInclusive::into_inner);
        let mut component = Component::timezone();
        component.add_property(Property::text(prop_names::TZID, self.tzid(tz, prefixed)));
        component.add_property(Property::text(prop_names::X_LIC_LOCATION, tz.name()));

        for observance in observances(tz, first, last.max(first))? {
            component.add_child(observance.to_component()?);
        }

        tracing::debug!(
            observances = component.children.len(),
            "Built VTIMEZONE definition"
        );
        Ok(component)
    }

    /// ## Summary
    /// Serialized form of [`Self::definition`].
    ///
    /// ## Errors
    /// Same as [`Self::definition`].
    pub fn definition_string(
        &self,
        tz: Tz,
        prefixed: bool,
        years: Option<RangeInclusive<i32>>,
    ) -> RfcResult<String> {
        Ok(serialize_component(&self.definition(tz, prefixed, years)?))
    }
}

fn year_start(year: i32) -> RfcResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or(RfcError::OutOfRange {
            field: "year",
            value: i64::from(year),
        })
}

fn offset_key(tz: Tz, utc: NaiveDateTime) -> OffsetKey {
    let offset = tz.offset_from_utc_datetime(&utc);
    (
        offset.fix().local_minus_utc(),
        offset.dst_offset().num_seconds(),
    )
}

/// Finds every offset change in `[Jan 1 year, Jan 1 year+1)` UTC.
///
/// Samples once a day and bisects each changed interval to the second.
/// Two changes within the same day collapse into one.
fn transitions(tz: Tz, year: i32) -> RfcResult<Vec<Transition>> {
    let start = year_start(year)?;
    let end = year_start(year + 1)?;
    let one_second = TimeDelta::seconds(1);

    let mut found = Vec::new();
    let mut prev = start;
    let mut prev_key = offset_key(tz, start);

    while prev < end {
        let next = (prev + TimeDelta::days(1)).min(end);
        let next_key = offset_key(tz, next);

        if next_key != prev_key {
            let (mut lo, mut hi) = (prev, next);
            while hi - lo > one_second {
                let mid = lo + (hi - lo) / 2;
                if offset_key(tz, mid) == prev_key {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            if hi < end {
                found.push(Transition {
                    at: hi,
                    before: prev_key,
                    after: offset_key(tz, hi),
                });
            }
        }

        prev = next;
        prev_key = next_key;
    }

    Ok(found)
}

fn local_start(t: &Transition) -> NaiveDateTime {
    t.at + TimeDelta::seconds(i64::from(t.before.0))
}

fn abbreviation(tz: Tz, utc: NaiveDateTime) -> String {
    tz.from_utc_datetime(&utc).format("%Z").to_string()
}

fn rule_key(t: &Transition) -> RuleKey {
    let start = local_start(t);
    (
        t.before,
        t.after,
        start.month(),
        start.weekday(),
        observance::weekday_ordinal(start.date()),
        start.time(),
    )
}

const fn kind_of(key: OffsetKey) -> ObservanceKind {
    if key.1 == 0 {
        ObservanceKind::Standard
    } else {
        ObservanceKind::Daylight
    }
}

/// Groups the transitions of `first..=last` into runs, ordered by start.
fn runs(tz: Tz, first: i32, last: i32) -> RfcResult<Vec<Run>> {
    let mut runs: Vec<Run> = Vec::new();
    for year in first..=last {
        for t in transitions(tz, year)? {
            let key = rule_key(&t);
            match runs
                .iter_mut()
                .find(|r| r.key == key && r.last_year == year - 1)
            {
                Some(run) => {
                    run.last = t;
                    run.last_year = year;
                }
                None => runs.push(Run {
                    key,
                    first: t,
                    last: t,
                    last_year: year,
                }),
            }
        }
    }
    runs.sort_by_key(|r| r.first.at);
    Ok(runs)
}

/// Derives the observances of `tz` for the years `first..=last`.
///
/// A run still matching the year after `last` gets an open-ended RRULE.
/// A run that stops earlier is closed with UNTIL at its last change, and a
/// change seen only once has no RRULE. When `first` has no change at all,
/// a fixed observance from 1970 (or `first`, if earlier) carries its offset.
fn observances(tz: Tz, first: i32, last: i32) -> RfcResult<Vec<Observance>> {
    let runs = runs(tz, first, last)?;
    let mut out = Vec::with_capacity(runs.len() + 1);

    if runs.first().is_none_or(|r| r.first.at.year() > first) {
        let start = year_start(first)?;
        let key = offset_key(tz, start);
        let offset = UtcOffset::from_seconds(key.0);
        out.push(Observance {
            kind: kind_of(key),
            dtstart: year_start(first.min(1970))?,
            offset_from: offset,
            offset_to: offset,
            rrule: None,
            name: abbreviation(tz, start),
        });
    }

    let following = if last < 9999 {
        transitions(tz, last + 1)?
    } else {
        Vec::new()
    };

    for run in runs {
        let dtstart = local_start(&run.first);
        let open = run.last_year == last && following.iter().any(|n| rule_key(n) == run.key);
        let rrule = if open {
            Some(observance::yearly_rule(dtstart.date())?)
        } else if run.last.at > run.first.at {
            let until = DateTime::new(run.last.at, DateTimeForm::Utc)?;
            Some(observance::yearly_rule(dtstart.date())?.with_end(RRuleEnd::Until(until)))
        } else {
            None
        };

        out.push(Observance {
            kind: kind_of(run.key.1),
            dtstart,
            offset_from: UtcOffset::from_seconds(run.key.0.0),
            offset_to: UtcOffset::from_seconds(run.key.1.0),
            rrule,
            name: abbreviation(tz, run.first.at),
        });
    }

    Ok(out)
}

#[cfg(test)]
#[path = "database_tests.rs"]
mod tests;
