//! Properties that must hold for any well-formed UI log.

use std::collections::BTreeMap;

use proptest::prelude::*;
use uilog_core::transform;
use uilog_lexicon::Lexicon;
use uilog_model::{DefaultsResolver, OcelDocument, Thresholds, UiLog};

const EVENTS: [&str; 7] = [
    "click button",
    "open chrome",
    "type field",
    "select sheet",
    "double click image",
    "open file",
    "login",
];
const LABELS: [&str; 4] = ["", "total", "amount", "customer name"];
const FILES: [&str; 3] = ["", "a.xlsx", "b.xlsx"];
const TOPICS: [&str; 4] = ["", "invoice", "orders", "customer"];

fn ui_log() -> impl Strategy<Value = UiLog> {
    let row = (
        0..EVENTS.len(),
        0..LABELS.len(),
        0..FILES.len(),
        0..TOPICS.len(),
        "[a-z]{0,5}",
    );
    prop::collection::vec(row, 1..14).prop_map(|rows| {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .enumerate()
            .map(|(i, (event, label, file, topic, comment))| {
                vec![
                    EVENTS[event].to_string(),
                    format!("2023-01-01 10:{i:02}:00"),
                    LABELS[label].to_string(),
                    FILES[file].to_string(),
                    TOPICS[topic].to_string(),
                    comment,
                ]
            })
            .collect();
        UiLog::from_rows(
            ["Event", "Timestamp", "Label", "File Name", "Topic", "Comment"],
            rows,
        )
    })
}

fn run(log: UiLog) -> OcelDocument {
    let lexicon = Lexicon::builtin().unwrap();
    transform(log, &lexicon, &Thresholds::default(), &mut DefaultsResolver)
        .unwrap()
        .document
}

proptest! {
    #[test]
    fn output_is_deterministic(log in ui_log()) {
        let first = serde_json::to_string(&run(log.clone())).unwrap();
        let second = serde_json::to_string(&run(log)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn references_resolve_and_objects_have_attributes(log in ui_log()) {
        let rows = log.height();
        let document = run(log);
        prop_assert_eq!(document.events.len(), rows);
        prop_assert!(document.dangling_references().is_empty());
        prop_assert!(document.ghost_objects().is_empty());
        for (id, object) in &document.ui_objects {
            prop_assert!(object.part_of.len() <= 1);
            prop_assert!(!object.part_of.contains(id));
        }
    }

    #[test]
    fn counters_increase_in_order_of_first_occurrence(log in ui_log()) {
        let document = run(log);
        let mut last: BTreeMap<String, usize> = BTreeMap::new();
        for (id, object) in &document.ui_objects {
            let n = id
                .rsplit_once('_')
                .and_then(|(_, n)| n.parse::<usize>().ok())
                .unwrap();
            let previous = last.insert(object.object_type.clone(), n).unwrap_or(0);
            prop_assert_eq!(n, previous + 1);
        }
    }
}
