//! Object-centric output document.
//!
//! Every value is a string so the serialized form is stable. Maps keep
//! insertion order: events in row order, objects in order of first mint.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::object::ObjectType;

pub type StringMap = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventEntry {
    pub activity: String,
    pub timestamp: String,
    #[serde(rename = "main object")]
    pub main_object: String,
    /// `"<main instance>.<column>" -> value`.
    pub vmap: StringMap,
    /// Related UI object instances.
    pub umap: Vec<String>,
    /// Process object instances.
    pub pmap: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiObjectEntry {
    #[serde(rename = "type")]
    pub object_type: String,
    pub cmap: StringMap,
    pub vmap: StringMap,
    /// Parent instance; at most one element.
    #[serde(rename = "part of")]
    pub part_of: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessObjectEntry {
    #[serde(rename = "type")]
    pub object_type: String,
    pub amap: StringMap,
}

/// The three output collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcelDocument {
    pub events: IndexMap<String, EventEntry>,
    #[serde(alias = "ui_object")]
    pub ui_objects: IndexMap<String, UiObjectEntry>,
    pub process_objects: IndexMap<String, ProcessObjectEntry>,
}

impl OcelDocument {
    /// Ids referenced by events that have no entry in the matching collection.
    pub fn dangling_references(&self) -> Vec<String> {
        let mut dangling = Vec::new();
        for event in self.events.values() {
            if event.main_object != ObjectType::UNKNOWN
                && !self.ui_objects.contains_key(&event.main_object)
            {
                dangling.push(event.main_object.clone());
            }
            for id in &event.umap {
                if !self.ui_objects.contains_key(id) {
                    dangling.push(id.clone());
                }
            }
            for id in &event.pmap {
                if !self.process_objects.contains_key(id) {
                    dangling.push(id.clone());
                }
            }
        }
        dangling
    }

    /// Objects that carry no attributes at all.
    pub fn ghost_objects(&self) -> Vec<&str> {
        let ui = self
            .ui_objects
            .iter()
            .filter(|(_, o)| o.cmap.is_empty() && o.vmap.is_empty())
            .map(|(id, _)| id.as_str());
        let process = self
            .process_objects
            .iter()
            .filter(|(_, o)| o.amap.is_empty())
            .map(|(id, _)| id.as_str());
        ui.chain(process).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_spaced_keys() {
        let mut document = OcelDocument::default();
        document.events.insert(
            "event_1".to_string(),
            EventEntry {
                activity: "click".to_string(),
                main_object: "button_1".to_string(),
                ..EventEntry::default()
            },
        );
        document.ui_objects.insert(
            "button_1".to_string(),
            UiObjectEntry {
                object_type: "button".to_string(),
                cmap: StringMap::from([("label".to_string(), "ok".to_string())]),
                ..UiObjectEntry::default()
            },
        );
        let json = serde_json::to_string(&document).unwrap();
        assert!(json.contains("\"main object\":\"button_1\""));
        assert!(json.contains("\"part of\":[]"));
        assert!(document.dangling_references().is_empty());
        assert!(document.ghost_objects().is_empty());
    }

    #[test]
    fn detects_dangling_and_ghosts() {
        let mut document = OcelDocument::default();
        document.events.insert(
            "event_1".to_string(),
            EventEntry {
                main_object: "field_9".to_string(),
                pmap: vec!["invoice_1".to_string()],
                ..EventEntry::default()
            },
        );
        document
            .ui_objects
            .insert("sheet_1".to_string(), UiObjectEntry::default());
        assert_eq!(document.dangling_references(), ["field_9", "invoice_1"]);
        assert_eq!(document.ghost_objects(), ["sheet_1"]);
    }

    #[test]
    fn accepts_singular_ui_object_key() {
        let json = r#"{"events":{},"ui_object":{"website_1":{"type":"website","cmap":{"url":"a"},"vmap":{},"part of":[]}},"process_objects":{}}"#;
        let document: OcelDocument = serde_json::from_str(json).unwrap();
        assert!(document.ui_objects.contains_key("website_1"));
    }
}
