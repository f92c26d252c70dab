//! Lexicon matching for UI log classification.
//!
//! Holds the UI object and attribute synonym tables, the object hierarchy,
//! action labels, the noun lexicon with its lemmatizer, and the structural
//! patterns (e-mail, URL, timestamp) used to recognize column contents.

pub mod error;
pub mod lemma;
pub mod lexicon;
pub mod loaders;
pub mod patterns;
pub mod synonyms;
pub mod text;

pub use error::{LexiconError, Result};
pub use lexicon::Lexicon;
pub use loaders::read_word_list;
pub use patterns::{is_email, is_timestamp, is_url};
pub use synonyms::{SynonymEntry, SynonymTable};
pub use text::{fold_whitespace, normalize_phrase, split_words};
