//! Date utilities
//!
//! Catalog dates are calendar dates without a time zone. Forms submit them
//! as `YYYY-MM-DD` (the value format of an HTML date input).

use chrono::{Local, NaiveDate};

/// Format accepted from and written back to HTML forms
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in the server's local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a form date (`YYYY-MM-DD`)
pub fn parse_form_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), FORM_DATE_FORMAT).ok()
}

/// `YYYY-MM-DD`, or an empty string when the date is unknown
pub fn format_form_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(FORM_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Medium human-readable form, e.g. `Oct 19, 2026`
pub fn format_medium(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_date_valid() {
        let date = parse_form_date("1920-01-02").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1920, 1, 2).unwrap());
    }

    #[test]
    fn test_parse_form_date_trims() {
        assert!(parse_form_date(" 2001-12-31 ").is_some());
    }

    #[test]
    fn test_parse_form_date_invalid() {
        assert!(parse_form_date("").is_none());
        assert!(parse_form_date("yesterday").is_none());
        assert!(parse_form_date("2001-02-30").is_none());
        assert!(parse_form_date("31/12/2001").is_none());
    }

    #[test]
    fn test_format_form_date() {
        let date = NaiveDate::from_ymd_opt(1965, 7, 9);
        assert_eq!(format_form_date(date), "1965-07-09");
        assert_eq!(format_form_date(None), "");
    }

    #[test]
    fn test_format_medium() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 9).unwrap();
        assert_eq!(format_medium(date), "Oct 9, 2026");
    }
}
