//! Word splitting shared by header normalization, cell formatting and
//! noun-phrase extraction.

/// Splits `text` into lower-case words.
///
/// Boundaries are whitespace, `_`, `.`, `-`, a lower-to-upper case change
/// (`firstName`), the start of a capitalized word not preceded by another
/// capital (`XMLFile` stays whole, `myFile` splits) and a letter followed
/// by a digit.
pub fn split_words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_whitespace() || matches!(ch, '_' | '.' | '-') {
            push_word(&mut words, &mut current);
            continue;
        }
        if i > 0 && is_boundary(chars[i - 1], ch, chars.get(i + 1).copied()) {
            push_word(&mut words, &mut current);
        }
        current.extend(ch.to_lowercase());
    }
    push_word(&mut words, &mut current);
    words
}

fn is_boundary(prev: char, cur: char, next: Option<char>) -> bool {
    if prev.is_lowercase() && cur.is_uppercase() {
        return true;
    }
    if !prev.is_uppercase() && cur.is_uppercase() && next.is_some_and(char::is_lowercase) {
        return true;
    }
    prev.is_alphabetic() && cur.is_ascii_digit()
}

fn push_word(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

/// Joins [`split_words`] with single spaces.
pub fn normalize_phrase(text: &str) -> String {
    split_words(text).join(" ")
}

/// Lower-cases and collapses whitespace without splitting camel case.
pub fn fold_whitespace(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when `needle` occurs in `haystack` as a run of whole words.
pub fn contains_words(haystack: &[&str], needle: &[&str]) -> bool {
    if needle.is_empty() || needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Unigram and bigram phrases of `words` with their start position.
pub fn short_phrases<'a>(words: &'a [&'a str]) -> impl Iterator<Item = (usize, usize, String)> + 'a {
    (1..=2).flat_map(move |len| {
        (0..words.len().saturating_sub(len - 1))
            .map(move |start| (start, len, words[start..start + len].join(" ")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_camel_case_and_separators() {
        assert_eq!(split_words("firstName"), ["first", "name"]);
        assert_eq!(split_words("file_name"), ["file", "name"]);
        assert_eq!(split_words("Page.Title"), ["page", "title"]);
        assert_eq!(split_words("sheet2"), ["sheet", "2"]);
        assert_eq!(split_words("XMLFile"), ["xmlfile"]);
        assert_eq!(split_words("  open   Chrome "), ["open", "chrome"]);
    }

    #[test]
    fn whole_word_containment() {
        let haystack = ["microsoft", "edge"];
        assert!(contains_words(&haystack, &["edge"]));
        assert!(contains_words(&haystack, &["microsoft", "edge"]));
        assert!(!contains_words(&haystack, &["e"]));
        assert!(!contains_words(&haystack, &[]));
    }

    #[test]
    fn phrases_cover_unigrams_then_bigrams() {
        let words = ["page", "name", "x"];
        let phrases: Vec<_> = short_phrases(&words).collect();
        assert_eq!(phrases.len(), 5);
        assert_eq!(phrases[3], (0, 2, "page name".to_string()));
    }
}
