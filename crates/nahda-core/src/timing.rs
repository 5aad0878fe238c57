//! Conversions between chrono types and the `f64` seconds used on the wire.

use chrono::{DateTime, Utc};

pub const SECONDS_PER_DAY: f64 = 24.0 * 3600.0;
pub const SECONDS_PER_WEEK: f64 = 7.0 * SECONDS_PER_DAY;

/// Seconds from `start` to `end` with millisecond precision. Negative when
/// `end` precedes `start`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}

/// Clamp a stored duration to a usable non-negative value.
#[must_use]
pub fn sanitize_secs(secs: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 { secs } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;

    #[test]
    fn seconds_between_keeps_milliseconds() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let end = start + TimeDelta::milliseconds(90_500);
        assert!((seconds_between(start, end) - 90.5).abs() < f64::EPSILON);
        assert!((seconds_between(end, start) + 90.5).abs() < f64::EPSILON);
    }

    #[test]
    fn sanitize_secs_zeroes_invalid_values() {
        assert!(sanitize_secs(f64::INFINITY).abs() < f64::EPSILON);
        assert!(sanitize_secs(-1.0).abs() < f64::EPSILON);
        assert!((sanitize_secs(4.0) - 4.0).abs() < f64::EPSILON);
    }
}
