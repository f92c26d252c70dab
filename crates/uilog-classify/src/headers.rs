//! What column headers say about their columns.

use uilog_lexicon::Lexicon;
use uilog_model::{ObjectType, UiLog};

/// Lexicon matches found in one header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Canonical attribute type named by the header (`file name`, `label`).
    pub attribute: Option<String>,
    /// UI object type named by the header.
    pub object_type: Option<ObjectType>,
    /// The header contains the word `user`.
    pub is_user: bool,
    /// The header contains `id` anywhere (`order id`, `paid`).
    pub is_identifier: bool,
}

/// Matches every header against the attribute and UI object tables.
pub fn analyze_headers(log: &UiLog, lexicon: &Lexicon) -> Vec<HeaderInfo> {
    log.headers()
        .iter()
        .map(|header| analyze_header(header, lexicon))
        .collect()
}

pub fn analyze_header(header: &str, lexicon: &Lexicon) -> HeaderInfo {
    let words: Vec<&str> = header.split_whitespace().collect();
    HeaderInfo {
        attribute: lexicon.header_attribute(header).map(str::to_string),
        object_type: lexicon.header_object_type(header),
        is_user: words.contains(&"user"),
        is_identifier: header.contains("id"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_and_identifier_words() {
        let lexicon = Lexicon::builtin().unwrap();
        let info = analyze_header("user id", &lexicon);
        assert!(info.is_user);
        assert!(info.is_identifier);
        assert_eq!(info.attribute, None);

        let info = analyze_header("paid amount", &lexicon);
        assert!(info.is_identifier);

        let info = analyze_header("comment", &lexicon);
        assert!(!info.is_identifier);
    }

    #[test]
    fn attribute_and_object_type() {
        let lexicon = Lexicon::builtin().unwrap();
        let info = analyze_header("button label", &lexicon);
        assert_eq!(info.attribute.as_deref(), Some("label"));
        assert_eq!(info.object_type, Some(ObjectType::new("button")));
    }
}
