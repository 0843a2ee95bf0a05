//! Utility functions and helpers

use chrono::{DateTime, NaiveDate};

/// Generate a unique record ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Parse a calendar date from a request parameter
///
/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, in which case the
/// date part (in the timestamp's own offset) is used.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_parse_date_plain() {
        assert_eq!(parse_date("2025-03-05"), NaiveDate::from_ymd_opt(2025, 3, 5));
        assert_eq!(parse_date(" 2025-03-05 "), NaiveDate::from_ymd_opt(2025, 3, 5));
    }

    #[test]
    fn test_parse_date_rfc3339() {
        assert_eq!(
            parse_date("2025-03-05T23:30:00+02:00"),
            NaiveDate::from_ymd_opt(2025, 3, 5)
        );
        assert_eq!(
            parse_date("2025-03-05T10:00:00Z"),
            NaiveDate::from_ymd_opt(2025, 3, 5)
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2025-13-01"), None);
    }
}
