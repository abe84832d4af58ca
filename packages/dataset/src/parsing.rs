//! Shared parsing utilities for the source tables.

use chrono::NaiveDate;

/// Date format used by both source tables.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` cell. Surrounding whitespace is ignored.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let d = parse_date("2021-08-15").unwrap();
        assert_eq!(d.to_string(), "2021-08-15");
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert!(parse_date(" 2021-08-15 ").is_some());
    }

    #[test]
    fn rejects_other_formats() {
        assert!(parse_date("15/08/2021").is_none());
        assert!(parse_date("2021-08-15T00:00:00").is_none());
        assert!(parse_date("2021-02-30").is_none());
        assert!(parse_date("").is_none());
    }
}
