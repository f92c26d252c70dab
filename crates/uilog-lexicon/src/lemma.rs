//! Dictionary-checked noun lemmatization.
//!
//! Irregular plurals are looked up first, then the regular detachment
//! rules are tried in order. A candidate is only accepted when the
//! dictionary knows it; otherwise the word is returned unchanged.

const IRREGULAR: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("children", "child"),
    ("criteria", "criterion"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("indices", "index"),
    ("lives", "life"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("teeth", "tooth"),
    ("wives", "wife"),
    ("women", "woman"),
];

/// `(suffix, replacement)` pairs for nouns.
const DETACHMENTS: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// Returns the base form of `word` according to `is_known`.
pub fn lemmatize(word: &str, is_known: impl Fn(&str) -> bool) -> String {
    let word = word.trim().to_lowercase();
    if word.is_empty() || is_known(&word) {
        return word;
    }
    if let Some((_, base)) = IRREGULAR.iter().find(|(plural, _)| *plural == word)
        && is_known(*base)
    {
        return (*base).to_string();
    }
    // "ss" endings are singular already (address, class)
    if word.ends_with("ss") {
        return word;
    }
    for (suffix, replacement) in DETACHMENTS {
        let Some(stem) = word.strip_suffix(suffix) else {
            continue;
        };
        if stem.is_empty() {
            continue;
        }
        let candidate = format!("{stem}{replacement}");
        if is_known(&candidate) {
            return candidate;
        }
    }
    word
}
