//! Date parsing helpers

use chrono::{NaiveDate, NaiveDateTime};

/// Parse an ISO-ish date string from front-matter or a query parameter.
///
/// Accepts `YYYY-MM-DD` and `YYYY/MM/DD`, with or without a time component,
/// plus RFC 3339. Returns `None` for anything else.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = parse_date("2024-01-15").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-15 00:00:00");
        assert!(parse_date("2024/01/15").is_some());
    }

    #[test]
    fn test_parse_date_with_time() {
        let dt = parse_date("2024-01-15 10:30:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "10:30");
        assert!(parse_date("2024-01-15T10:30:00").is_some());
    }

    #[test]
    fn test_parse_rfc3339() {
        assert!(parse_date("2024-01-15T10:30:00+02:00").is_some());
    }

    #[test]
    fn test_invalid_dates_are_none() {
        assert!(parse_date("").is_none());
        assert!(parse_date("not-a-date").is_none());
        assert!(parse_date("2024-13-99").is_none());
    }

    #[test]
    fn test_ordering_matches_calendar_order() {
        let early = parse_date("2023-12-01").unwrap();
        let late = parse_date("2024-06-15").unwrap();
        assert!(late > early);
    }
}
