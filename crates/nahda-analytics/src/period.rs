use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use nahda_core::timing::{SECONDS_PER_WEEK, seconds_between};

/// A closed time interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The `length` leading up to and including `end`. A start before the
    /// earliest representable instant is clamped to it.
    #[must_use]
    pub fn trailing(end: DateTime<Utc>, length: TimeDelta) -> Self {
        Self {
            start: end
                .checked_sub_signed(length)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            end,
        }
    }

    /// Length in seconds; negative for an inverted period.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        seconds_between(self.start, self.end)
    }

    #[must_use]
    pub fn weeks(&self) -> f64 {
        self.duration_secs() / SECONDS_PER_WEEK
    }

    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn trailing_two_weeks() {
        let end = Utc.with_ymd_and_hms(2026, 7, 15, 0, 0, 0).unwrap();
        let period = Period::trailing(end, TimeDelta::days(14));
        assert!((period.weeks() - 2.0).abs() < 1e-12);
        assert!(period.contains(period.start));
        assert!(period.contains(end));
        assert!(!period.contains(end + TimeDelta::seconds(1)));
    }

    #[test]
    fn trailing_past_the_calendar_clamps() {
        let end = Utc.with_ymd_and_hms(2026, 7, 15, 0, 0, 0).unwrap();
        let period = Period::trailing(end, TimeDelta::days(i64::from(u32::MAX)));
        assert_eq!(period.start, DateTime::<Utc>::MIN_UTC);
        assert!(period.weeks() > 0.0);
    }
}
