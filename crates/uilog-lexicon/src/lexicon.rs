//! The lexicon: every reference table the classifier and resolver consult.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::debug;
use uilog_model::{HierarchyLevel, ObjectType};

use crate::error::{LexiconError, Result};
use crate::lemma;
use crate::loaders::{read_rows, read_word_list, required};
use crate::synonyms::{SynonymEntry, SynonymTable};
use crate::text::{fold_whitespace, split_words};

const UI_OBJECTS_CSV: &str = include_str!("../data/ui_objects.csv");
const ATTRIBUTES_CSV: &str = include_str!("../data/attributes.csv");
const ATTRIBUTE_OBJECTS_CSV: &str = include_str!("../data/attribute_objects.csv");
const NAMED_PRODUCTS_CSV: &str = include_str!("../data/named_products.csv");
const ACTION_LABELS_CSV: &str = include_str!("../data/action_labels.csv");
const NOUNS_CSV: &str = include_str!("../data/nouns.csv");

/// Reference tables for UI object types, attribute types, actions and nouns.
#[derive(Debug, Clone)]
pub struct Lexicon {
    ui_objects: SynonymTable,
    levels: BTreeMap<String, HierarchyLevel>,
    attributes: SynonymTable,
    /// `(object type, attribute)` pairs in table order.
    attribute_objects: Vec<(String, String)>,
    named_products: Vec<String>,
    action_labels: BTreeSet<String>,
    nouns: BTreeSet<String>,
}

impl Lexicon {
    /// Parses the tables embedded in this crate.
    pub fn builtin() -> Result<Self> {
        let mut ui_objects = SynonymTable::default();
        let mut levels = BTreeMap::new();
        for row in read_rows("ui_objects.csv", UI_OBJECTS_CSV.as_bytes())? {
            let object_type = required(&row, "type", "ui_objects.csv")?;
            let level = required(&row, "level", "ui_objects.csv")?;
            let synonym = required(&row, "synonym", "ui_objects.csv")?;
            levels.insert(object_type.clone(), parse_level(&object_type, &level)?);
            ui_objects.push(&object_type, &synonym);
        }

        let mut attributes = SynonymTable::default();
        for row in read_rows("attributes.csv", ATTRIBUTES_CSV.as_bytes())? {
            let attribute = required(&row, "attribute", "attributes.csv")?;
            let synonym = required(&row, "synonym", "attributes.csv")?;
            attributes.push(&attribute, &synonym);
        }

        let mut attribute_objects = Vec::new();
        for row in read_rows("attribute_objects.csv", ATTRIBUTE_OBJECTS_CSV.as_bytes())? {
            let object_type = required(&row, "object_type", "attribute_objects.csv")?;
            let attribute = required(&row, "attribute", "attribute_objects.csv")?;
            if !ui_objects.contains_canonical(&object_type) {
                return Err(LexiconError::UnknownReference {
                    kind: "object type",
                    name: object_type,
                });
            }
            if !attributes.contains_canonical(&attribute) {
                return Err(LexiconError::UnknownReference {
                    kind: "attribute",
                    name: attribute,
                });
            }
            attribute_objects.push((object_type, attribute));
        }

        let named_products = word_column(NAMED_PRODUCTS_CSV, "named_products.csv", "name")?;
        let action_labels = word_column(ACTION_LABELS_CSV, "action_labels.csv", "label")?;
        let nouns = word_column(NOUNS_CSV, "nouns.csv", "noun")?;

        let lexicon = Self {
            ui_objects,
            levels,
            attributes,
            attribute_objects,
            named_products,
            action_labels: action_labels.into_iter().collect(),
            nouns: nouns.into_iter().collect(),
        };
        debug!(
            ui_object_types = lexicon.ui_objects.len(),
            attribute_types = lexicon.attributes.len(),
            action_labels = lexicon.action_labels.len(),
            nouns = lexicon.nouns.len(),
            "built-in lexicon loaded"
        );
        Ok(lexicon)
    }

    /// Replaces the action-label list with the words of `path`.
    pub fn with_action_labels_file(mut self, path: &Path) -> Result<Self> {
        self.action_labels = read_word_list(path)?.into_iter().collect();
        debug!(path = %path.display(), count = self.action_labels.len(), "action labels overridden");
        Ok(self)
    }

    /// Replaces the noun lexicon with the words of `path`.
    pub fn with_nouns_file(mut self, path: &Path) -> Result<Self> {
        self.nouns = read_word_list(path)?.into_iter().collect();
        debug!(path = %path.display(), count = self.nouns.len(), "noun lexicon overridden");
        Ok(self)
    }

    pub fn ui_object_entries(&self) -> &[SynonymEntry] {
        self.ui_objects.entries()
    }

    pub fn attribute_entries(&self) -> &[SynonymEntry] {
        self.attributes.entries()
    }

    /// Canonical UI object type of a cell value (exact or whole-word sub-phrase).
    pub fn match_ui_object_value(&self, value: &str) -> Option<ObjectType> {
        self.ui_objects.match_value(value).map(ObjectType::new)
    }

    /// True when `phrase` is exactly one of the UI object synonyms.
    pub fn is_ui_object_phrase(&self, phrase: &str) -> bool {
        self.ui_objects.exact(phrase).is_some()
    }

    /// UI object type named by a column header.
    pub fn header_object_type(&self, header: &str) -> Option<ObjectType> {
        self.ui_objects.match_header(header).map(ObjectType::new)
    }

    /// Canonical attribute type named by a column header.
    pub fn header_attribute(&self, header: &str) -> Option<&str> {
        self.attributes.match_header(header)
    }

    /// Object types that carry `attribute`, in table order.
    pub fn object_types_for_attribute(&self, attribute: &str) -> Vec<ObjectType> {
        self.attribute_objects
            .iter()
            .filter(|(_, attr)| attr == attribute)
            .map(|(object_type, _)| ObjectType::new(object_type))
            .collect()
    }

    /// Attribute types carried by `object_type`, in table order.
    pub fn attributes_of(&self, object_type: &ObjectType) -> Vec<&str> {
        self.attribute_objects
            .iter()
            .filter(|(ty, _)| ty == object_type.as_str())
            .map(|(_, attr)| attr.as_str())
            .collect()
    }

    /// Hierarchy level of a type; unknown types sit at the fourth level.
    pub fn level_of(&self, object_type: &ObjectType) -> HierarchyLevel {
        self.levels
            .get(object_type.as_str())
            .copied()
            .unwrap_or(HierarchyLevel::Fourth)
    }

    /// Canonical types of one level, in table order.
    pub fn types_at(&self, level: HierarchyLevel) -> Vec<ObjectType> {
        self.ui_objects
            .entries()
            .iter()
            .filter(|e| self.levels.get(&e.canonical) == Some(&level))
            .map(|e| ObjectType::new(&e.canonical))
            .collect()
    }

    /// The product name when `value` names a concrete application
    /// (`chrome`, `excel`) rather than a generic type.
    pub fn named_product(&self, value: &str) -> Option<&str> {
        let folded = fold_whitespace(value);
        self.named_products
            .iter()
            .find(|name| **name == folded)
            .map(String::as_str)
    }

    /// True when `phrase` or any of its words is a named product.
    pub fn mentions_named_product(&self, phrase: &str) -> bool {
        let folded = fold_whitespace(phrase);
        if self.named_product(&folded).is_some() {
            return true;
        }
        let words: Vec<&str> = folded.split(' ').collect();
        self.named_products.iter().any(|name| {
            let name_words: Vec<&str> = name.split(' ').collect();
            crate::text::contains_words(&words, &name_words)
        })
    }

    pub fn is_action_label(&self, token: &str) -> bool {
        self.action_labels.contains(&token.trim().to_lowercase())
    }

    pub fn is_noun(&self, word: &str) -> bool {
        self.nouns.contains(word)
    }

    /// Base form of a noun, checked against the noun lexicon.
    pub fn lemmatize(&self, word: &str) -> String {
        lemma::lemmatize(word, |candidate| self.is_noun(candidate))
    }

    /// Lemmatizes each word of `text` after camel-case splitting.
    pub fn lemmatize_phrase(&self, text: &str) -> Vec<String> {
        split_words(text)
            .iter()
            .map(|word| self.lemmatize(word))
            .collect()
    }

    pub fn action_label_count(&self) -> usize {
        self.action_labels.len()
    }

    pub fn noun_count(&self) -> usize {
        self.nouns.len()
    }
}

fn parse_level(object_type: &str, level: &str) -> Result<HierarchyLevel> {
    match level.trim().to_lowercase().as_str() {
        "highest" => Ok(HierarchyLevel::Highest),
        "second" => Ok(HierarchyLevel::Second),
        "third" => Ok(HierarchyLevel::Third),
        "fourth" => Ok(HierarchyLevel::Fourth),
        _ => Err(LexiconError::UnknownLevel {
            object_type: object_type.to_string(),
            level: level.to_string(),
        }),
    }
}

fn word_column(text: &str, source_name: &str, column: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    for row in read_rows(source_name, text.as_bytes())? {
        words.push(required(&row, column, source_name)?.to_lowercase());
    }
    if words.is_empty() {
        return Err(LexiconError::Empty {
            source_name: source_name.to_string(),
        });
    }
    Ok(words)
}
