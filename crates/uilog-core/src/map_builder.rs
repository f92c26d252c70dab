//! Folds resolution results into the output document.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use tracing::warn;
use uilog_classify::ClassifiedLog;
use uilog_model::{
    ColumnRole, EventEntry, InstanceId, OcelDocument, ObjectType, ProcessObjectEntry,
    UiLog, UiObjectEntry,
};

use crate::context::{ResolutionContext, UiOccurrence};
use crate::timestamp::parse_timestamp;

/// Builds `events`, `ui_objects` and `process_objects`.
///
/// A UI object seen in several rows keeps the attribute snapshot of its
/// latest occurrence.
pub fn build_document(
    log: &UiLog,
    classified: &ClassifiedLog,
    ctx: &ResolutionContext,
) -> OcelDocument {
    let timestamps = row_timestamps(log, classified);
    let mut document = OcelDocument::default();

    let value_columns = classified.columns_with(ColumnRole::ValueAttribute);
    let timestamp_column = classified.timestamp_column();
    for (row, resolution) in ctx.rows.iter().enumerate() {
        let main_object = resolution
            .main
            .as_ref()
            .map_or(ObjectType::UNKNOWN, InstanceId::as_str)
            .to_string();
        let vmap = value_columns
            .iter()
            .filter_map(|&col| {
                log.cell(row, col)
                    .map(|value| (format!("{main_object}.{}", log.header(col)), value.to_string()))
            })
            .collect();
        let event = EventEntry {
            activity: log.cell(row, 0).unwrap_or_default().to_string(),
            timestamp: timestamp_column
                .and_then(|col| log.cell(row, col))
                .unwrap_or_default()
                .to_string(),
            main_object,
            vmap,
            umap: resolution.related.iter().map(ToString::to_string).collect(),
            pmap: resolution
                .process_objects
                .iter()
                .map(ToString::to_string)
                .collect(),
        };
        document.events.insert(format!("event_{}", row + 1), event);
    }

    let mut by_instance: IndexMap<&InstanceId, Vec<&UiOccurrence>> = IndexMap::new();
    for occurrence in &ctx.occurrences {
        by_instance
            .entry(&occurrence.instance)
            .or_default()
            .push(occurrence);
    }
    for (instance, occurrences) in by_instance {
        let Some(latest) = latest_occurrence(&occurrences, &timestamps) else {
            continue;
        };
        document.ui_objects.insert(
            instance.to_string(),
            UiObjectEntry {
                object_type: latest.object_type.as_str().to_string(),
                cmap: latest.cmap.clone(),
                vmap: latest.vmap.clone(),
                part_of: latest.part_of.iter().map(ToString::to_string).collect(),
            },
        );
    }

    for (instance, record) in &ctx.process_records {
        document.process_objects.insert(
            instance.to_string(),
            ProcessObjectEntry {
                object_type: record.object_type.clone(),
                amap: record.amap.clone(),
            },
        );
    }

    for cycle in part_of_cycles(&document) {
        warn!(cycle = %cycle.join(" -> "), "part-of cycle between ui objects");
    }
    document
}

fn row_timestamps(log: &UiLog, classified: &ClassifiedLog) -> Vec<Option<NaiveDateTime>> {
    match classified.timestamp_column() {
        Some(col) => (0..log.height())
            .map(|row| log.cell(row, col).and_then(parse_timestamp))
            .collect(),
        None => vec![None; log.height()],
    }
}

/// Latest occurrence by timestamp when every occurrence has one, else by row.
fn latest_occurrence<'a>(
    occurrences: &[&'a UiOccurrence],
    timestamps: &[Option<NaiveDateTime>],
) -> Option<&'a UiOccurrence> {
    let stamp = |o: &UiOccurrence| timestamps.get(o.row).copied().flatten();
    if occurrences.iter().all(|o| stamp(*o).is_some()) {
        occurrences
            .iter()
            .copied()
            .max_by_key(|o| (stamp(*o), o.row))
    } else {
        occurrences.iter().copied().max_by_key(|o| o.row)
    }
}

/// Cycles in the `part of` graph, each listed from the first member reached
/// in document order.
pub fn part_of_cycles(document: &OcelDocument) -> Vec<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = Vec::new();
    let mut finished: Vec<&str> = Vec::new();
    for start in document.ui_objects.keys() {
        let mut path: Vec<&str> = Vec::new();
        let mut current = Some(start.as_str());
        while let Some(id) = current {
            if finished.contains(&id) {
                break;
            }
            if let Some(pos) = path.iter().position(|seen| *seen == id) {
                cycles.push(path[pos..].iter().map(|s| (*s).to_string()).collect());
                break;
            }
            path.push(id);
            current = parent_of(document, id);
        }
        finished.extend(path);
    }
    cycles
}

fn parent_of<'a>(document: &'a OcelDocument, id: &str) -> Option<&'a str> {
    document
        .ui_objects
        .get(id)
        .and_then(|entry| entry.part_of.first())
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(parent: Option<&str>) -> UiObjectEntry {
        UiObjectEntry {
            object_type: "field".to_string(),
            part_of: parent.into_iter().map(str::to_string).collect(),
            ..UiObjectEntry::default()
        }
    }

    #[test]
    fn detects_cycles_once() {
        let mut document = OcelDocument::default();
        document.ui_objects.insert("a".into(), object(Some("b")));
        document.ui_objects.insert("b".into(), object(Some("c")));
        document.ui_objects.insert("c".into(), object(Some("a")));
        document.ui_objects.insert("d".into(), object(Some("a")));
        document.ui_objects.insert("e".into(), object(None));

        let cycles = part_of_cycles(&document);
        assert_eq!(cycles, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn chains_are_not_cycles() {
        let mut document = OcelDocument::default();
        document.ui_objects.insert("field_1".into(), object(Some("sheet_1")));
        document.ui_objects.insert("sheet_1".into(), object(Some("file_1")));
        document.ui_objects.insert("file_1".into(), object(None));
        assert!(part_of_cycles(&document).is_empty());
    }
}
