//! Structural value patterns: e-mail addresses, URLs and timestamps.
//!
//! Each pattern must match the whole trimmed cell.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("valid email regex"));

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:",
        r"https?://(?:www\.)?[a-zA-Z0-9][a-zA-Z0-9-]+[a-zA-Z0-9]\.\S{2,}",
        r"|www\.[a-zA-Z0-9][a-zA-Z0-9-]+[a-zA-Z0-9]\.\S{2,}",
        r"|https?://(?:www\.)?[a-zA-Z0-9]+\.\S{2,}",
        r"|www\.[a-zA-Z0-9]+\.\S{2,}",
        r")$"
    ))
    .expect("valid url regex")
});

static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:",
        r"\d{4}[-./ ]\d{1,2}[-./ ]\d{1,2} \d{2}:\d{2}(?::\d{2})?(?:[-,* ]\d{3,4})?",
        r"|(?:\d{1,2}[-./ ])?\d{1,2}[-./ ]\d{2,4} \d{2}:\d{2}(?::\d{2})?(?:[-,* ]\d{3,4})?",
        r"|\d{4}[-./ ]\w{3}[-./ ]\d{1,2} \d{2}:\d{2}(?::\d{2})?(?:[-,* ]\d{3,4})?",
        r"|\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z",
        r")$"
    ))
    .expect("valid timestamp regex")
});

pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

pub fn is_url(value: &str) -> bool {
    URL.is_match(value.trim())
}

pub fn is_timestamp(value: &str) -> bool {
    TIMESTAMP.is_match(value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls() {
        assert!(is_url("https://www.example.com/path"));
        assert!(is_url("http://example.org"));
        assert!(is_url("www.example.com"));
        assert!(!is_url("example.com"));
        assert!(!is_url("click here"));
    }

    #[test]
    fn emails() {
        assert!(is_email("ann@example.com"));
        assert!(!is_email("ann.example.com"));
        assert!(!is_email("a@b@c.d"));
    }

    #[test]
    fn timestamps() {
        assert!(is_timestamp("2023-01-05 10:15:00"));
        assert!(is_timestamp("2023/1/5 10:15"));
        assert!(is_timestamp("05.01.2023 10:15:00"));
        assert!(is_timestamp("2023-01-05 10:15:00,123"));
        assert!(is_timestamp("2023-Jan-05 10:15"));
        assert!(is_timestamp("2023-01-05T10:15:00.000Z"));
        assert!(!is_timestamp("2023-01-05"));
        assert!(!is_timestamp("yesterday"));
    }
}
