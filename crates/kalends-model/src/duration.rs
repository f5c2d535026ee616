//! Unsigned durations. The sign belongs to whatever embeds them.

use kalends_rfc::rfc::ical::core::Duration as IcalDuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Duration {
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Duration {
    #[must_use]
    pub const fn weeks(weeks: u32) -> Self {
        Self {
            weeks,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    #[must_use]
    pub const fn days(days: u32) -> Self {
        Self {
            days,
            ..Self::weeks(0)
        }
    }

    #[must_use]
    pub const fn hours(hours: u32) -> Self {
        Self {
            hours,
            ..Self::weeks(0)
        }
    }

    #[must_use]
    pub const fn minutes(minutes: u32) -> Self {
        Self {
            minutes,
            ..Self::weeks(0)
        }
    }

    #[must_use]
    pub const fn seconds(seconds: u32) -> Self {
        Self {
            seconds,
            ..Self::weeks(0)
        }
    }

    /// Codec form with the given sign.
    #[must_use]
    pub const fn to_ical(self, negative: bool) -> IcalDuration {
        IcalDuration::new(self.weeks, self.days, self.hours, self.minutes, self.seconds)
            .with_sign(negative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_components() {
        let d = Duration {
            weeks: 1,
            days: 1,
            hours: 2,
            minutes: 30,
            seconds: 30,
        };
        assert_eq!(d.to_ical(true).to_string(), "-P1W1DT2H30M30S");
        assert_eq!(d.to_ical(false).to_string(), "P1W1DT2H30M30S");
    }

    #[test]
    fn single_component_constructors() {
        assert_eq!(Duration::minutes(30).to_ical(true).to_string(), "-PT30M");
        assert_eq!(Duration::hours(1).to_ical(false).to_string(), "PT1H");
        assert_eq!(Duration::days(2).to_ical(false).to_string(), "P2D");
        assert_eq!(Duration::default().to_ical(false).to_string(), "P0D");
    }
}
