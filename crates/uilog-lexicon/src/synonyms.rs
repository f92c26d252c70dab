//! Ordered synonym tables.

use crate::text::{contains_words, fold_whitespace, short_phrases};

/// A canonical name and the phrases that denote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymEntry {
    pub canonical: String,
    pub synonyms: Vec<String>,
}

impl SynonymEntry {
    /// True when `phrase` is the canonical name or one of its synonyms.
    pub fn names(&self, phrase: &str) -> bool {
        self.canonical == phrase || self.synonyms.iter().any(|s| s == phrase)
    }
}

/// Canonical names with their synonyms, in table order.
///
/// Table order is significant: it breaks ties between entries sharing a
/// synonym (`page` denotes both a website and a sheet).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    entries: Vec<SynonymEntry>,
}

impl SynonymTable {
    /// Appends `synonym` to `canonical`, creating the entry on first sight.
    pub fn push(&mut self, canonical: &str, synonym: &str) {
        let synonym = fold_whitespace(synonym);
        match self.entries.iter_mut().find(|e| e.canonical == canonical) {
            Some(entry) => {
                if !entry.synonyms.contains(&synonym) {
                    entry.synonyms.push(synonym);
                }
            }
            None => self.entries.push(SynonymEntry {
                canonical: canonical.to_string(),
                synonyms: vec![synonym],
            }),
        }
    }

    pub fn entries(&self) -> &[SynonymEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_canonical(&self, canonical: &str) -> bool {
        self.entries.iter().any(|e| e.canonical == canonical)
    }

    /// Canonical name whose synonyms include `phrase` exactly (first entry wins).
    pub fn exact(&self, phrase: &str) -> Option<&str> {
        let phrase = fold_whitespace(phrase);
        self.entries
            .iter()
            .find(|e| e.names(&phrase))
            .map(|e| e.canonical.as_str())
    }

    /// Matches a cell value: the value must equal a synonym or be a
    /// contiguous run of whole words inside one. First entry wins.
    pub fn match_value(&self, value: &str) -> Option<&str> {
        let folded = fold_whitespace(value);
        if folded.is_empty() {
            return None;
        }
        let words: Vec<&str> = folded.split(' ').collect();
        self.entries
            .iter()
            .find(|entry| {
                entry.canonical == folded
                    || entry.synonyms.iter().any(|synonym| {
                        let synonym_words: Vec<&str> = synonym.split(' ').collect();
                        contains_words(&synonym_words, &words)
                    })
            })
            .map(|e| e.canonical.as_str())
    }

    /// Matches a normalized header by its words and adjacent word pairs.
    ///
    /// The longest matching phrase wins, then the later position in the
    /// header, then the later table entry.
    pub fn match_header(&self, header: &str) -> Option<&str> {
        let folded = fold_whitespace(header);
        let words: Vec<&str> = folded.split_whitespace().collect();
        let mut best: Option<((usize, usize, usize), &str)> = None;
        for (start, len, phrase) in short_phrases(&words) {
            for (entry_idx, entry) in self.entries.iter().enumerate() {
                if !entry.names(&phrase) {
                    continue;
                }
                let rank = (len, start, entry_idx);
                if best.is_none_or(|(current, _)| rank > current) {
                    best = Some((rank, entry.canonical.as_str()));
                }
            }
        }
        best.map(|(_, canonical)| canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SynonymTable {
        let mut table = SynonymTable::default();
        for (canonical, synonym) in [
            ("website", "page"),
            ("website", "url"),
            ("application", "microsoft edge"),
            ("application", "app"),
            ("sheet", "page"),
            ("sheet", "sheet"),
        ] {
            table.push(canonical, synonym);
        }
        table
    }

    #[test]
    fn value_matching_uses_whole_words() {
        let table = table();
        assert_eq!(table.match_value("Edge"), Some("application"));
        assert_eq!(table.match_value("microsoft edge"), Some("application"));
        assert_eq!(table.match_value("e"), None);
        assert_eq!(table.match_value("page"), Some("website"));
        assert_eq!(table.match_value(""), None);
    }

    #[test]
    fn header_matching_prefers_longest_then_latest() {
        let table = table();
        assert_eq!(table.match_header("page"), Some("sheet"));
        assert_eq!(table.match_header("app url"), Some("website"));
        assert_eq!(table.match_header("microsoft edge sheet"), Some("application"));
        assert_eq!(table.match_header("comment"), None);
    }

    #[test]
    fn push_groups_by_canonical() {
        let table = table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.exact("URL"), Some("website"));
    }
}
