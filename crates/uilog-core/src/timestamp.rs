//! Parsing of UI log timestamps for ordering object snapshots.

use chrono::NaiveDateTime;

/// Layouts accepted after a `,` millisecond separator is rewritten to `.`.
const LAYOUTS: [&str; 14] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%b-%d %H:%M:%S",
    "%Y-%b-%d %H:%M",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Parses a timestamp cell, or `None` when no known layout fits.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim().replace(',', ".");
    LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(&value, layout).ok())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Timelike};

    use super::*;

    #[test]
    fn parses_common_layouts() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 5)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2023-01-05 10:15:00"), Some(expected));
        assert_eq!(parse_timestamp("2023/01/05 10:15"), Some(expected));
        assert_eq!(parse_timestamp("05.01.2023 10:15:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-Jan-05 10:15"), Some(expected));
    }

    #[test]
    fn keeps_milliseconds() {
        let parsed = parse_timestamp("2023-01-05 10:15:00,250").unwrap();
        assert_eq!(parsed.nanosecond(), 250_000_000);
        assert!(parse_timestamp("2023-01-05T10:15:00.000Z").is_some());
    }

    #[test]
    fn rejects_dates_without_time() {
        assert_eq!(parse_timestamp("2023-01-05"), None);
        assert_eq!(parse_timestamp("later"), None);
    }
}
