//! DURATION values (RFC 5545 §3.3.6).

use std::fmt;

/// A signed duration in weeks, days, hours, minutes and seconds.
///
/// There are no month or year designators; their length varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    pub negative: bool,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Duration {
    #[must_use]
    pub const fn new(weeks: u32, days: u32, hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            negative: false,
            weeks,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    #[must_use]
    pub const fn minutes(minutes: u32) -> Self {
        Self::new(0, 0, 0, minutes, 0)
    }

    #[must_use]
    pub const fn with_sign(self, negative: bool) -> Self {
        Self { negative, ..self }
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        (self.weeks | self.days | self.hours | self.minutes | self.seconds) == 0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("P0D");
        }
        if self.negative {
            f.write_str("-")?;
        }

        f.write_str("P")?;
        for (n, unit) in [(self.weeks, 'W'), (self.days, 'D')] {
            if n > 0 {
                write!(f, "{n}{unit}")?;
            }
        }

        let time = [(self.hours, 'H'), (self.minutes, 'M'), (self.seconds, 'S')];
        if time.iter().any(|(n, _)| *n > 0) {
            f.write_str("T")?;
            for (n, unit) in time.into_iter().filter(|(n, _)| *n > 0) {
                write!(f, "{n}{unit}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weeks_only() {
        assert_eq!(Duration::new(2, 0, 0, 0, 0).to_string(), "P2W");
    }

    #[test]
    fn date_and_time_parts() {
        assert_eq!(Duration::new(0, 1, 2, 30, 0).to_string(), "P1DT2H30M");
        assert_eq!(
            Duration::new(1, 1, 2, 30, 30).with_sign(true).to_string(),
            "-P1W1DT2H30M30S"
        );
    }

    #[test]
    fn time_only_and_sign() {
        assert_eq!(Duration::minutes(30).to_string(), "PT30M");
        assert_eq!(Duration::minutes(30).with_sign(true).to_string(), "-PT30M");
        assert_eq!(Duration::new(0, 0, 0, 0, 5).to_string(), "PT5S");
    }

    #[test]
    fn zero_is_zero_days() {
        assert_eq!(Duration::default().to_string(), "P0D");
        assert!(Duration::default().is_zero());
        assert_eq!(Duration::default().with_sign(true).to_string(), "P0D");
    }
}
