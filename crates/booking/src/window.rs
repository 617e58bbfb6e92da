use crate::error::BookingError;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// The span around a reservation time during which the table is considered
/// taken. Both bounds are inclusive: two bookings exactly one radius apart
/// conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictWindow {
    radius: Duration,
}

impl ConflictWindow {
    pub fn new(radius: Duration) -> Self {
        Self {
            radius: radius.abs(),
        }
    }

    pub fn radius(&self) -> Duration {
        self.radius
    }

    /// `[at - radius, at + radius]`
    pub fn around(&self, at: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (at - self.radius, at + self.radius)
    }

    pub fn overlaps(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        (a - b).abs() <= self.radius
    }
}

impl Default for ConflictWindow {
    fn default() -> Self {
        Self::new(Duration::hours(1))
    }
}

/// Formats accepted for naive (offset-less) timestamps, read as UTC
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parses a requested reservation time
///
/// Accepts RFC 3339 (`2025-06-01T19:00:00+02:00`) as well as the offset-less
/// form browsers send from `datetime-local` inputs (`2025-06-01T19:00`), which
/// is taken to be UTC.
pub fn parse_requested_time(input: &str) -> Result<DateTime<Utc>, BookingError> {
    let input = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| BookingError::BadRequest(format!("Invalid date/time: {input:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_window_bounds() {
        let window = ConflictWindow::default();
        let (start, end) = window.around(at(19, 0));
        assert_eq!(start, at(18, 0));
        assert_eq!(end, at(20, 0));
    }

    #[test]
    fn test_window_overlap_is_inclusive() {
        let window = ConflictWindow::default();
        assert!(window.overlaps(at(19, 0), at(19, 30)));
        assert!(window.overlaps(at(19, 0), at(18, 0)));
        assert!(window.overlaps(at(19, 0), at(20, 0)));
        assert!(!window.overlaps(at(19, 0), at(20, 1)));
        assert!(!window.overlaps(at(19, 0), at(17, 59)));
    }

    #[test]
    fn test_negative_radius_is_normalized() {
        let window = ConflictWindow::new(Duration::minutes(-30));
        assert_eq!(window.radius(), Duration::minutes(30));
    }

    #[test]
    fn test_parse_rfc3339() {
        let parsed = parse_requested_time("2025-06-01T21:00:00+02:00").unwrap();
        assert_eq!(parsed, at(19, 0));

        let parsed = parse_requested_time("2025-06-01T19:00:00Z").unwrap();
        assert_eq!(parsed, at(19, 0));
    }

    #[test]
    fn test_parse_naive_as_utc() {
        assert_eq!(parse_requested_time("2025-06-01T19:00").unwrap(), at(19, 0));
        assert_eq!(
            parse_requested_time("2025-06-01T19:00:00").unwrap(),
            at(19, 0)
        );
        assert_eq!(
            parse_requested_time(" 2025-06-01 19:00:00 ").unwrap(),
            at(19, 0)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "tomorrow", "2025-13-01T19:00", "2025-06-01"] {
            assert!(matches!(
                parse_requested_time(input),
                Err(BookingError::BadRequest(_))
            ));
        }
    }
}
