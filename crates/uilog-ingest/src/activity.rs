//! Event-column discovery and the activity / object-type split.

use tracing::{debug, info, warn};
use uilog_lexicon::Lexicon;
use uilog_model::{AmbiguityResolver, EventColumnQuery, Thresholds, UiLog};

use crate::error::{IngestError, Result};
use crate::profile::{ColumnProfile, column_sample, profile_columns};

/// Header fragments that mark the event column.
const EVENT_HEADER_HINTS: [&str; 3] = ["event", "activit", "action"];

/// Header given to the split-out object type column.
pub const MAIN_OBJECT_TYPE_HEADER: &str = "main ui object type";

/// Header of the activity column after the split.
pub const ACTIVITY_HEADER: &str = "activity";

/// Number of distinct values shown to a resolver per column.
const SAMPLE_LIMIT: usize = 7;

/// How the event column was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventColumnSource {
    Header,
    ActionLabels,
    Resolver,
}

/// The event column and how it was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventColumn {
    /// Index before the column was moved to position 0.
    pub original_index: usize,
    pub source: EventColumnSource,
}

/// Moves the event column to position 0.
///
/// A header naming an event, activity or action wins. Otherwise every
/// low-cardinality column whose values start with an action label is a
/// candidate; a single candidate wins, anything else is escalated.
pub fn find_event_column(
    log: &mut UiLog,
    lexicon: &Lexicon,
    thresholds: &Thresholds,
    resolver: &mut dyn AmbiguityResolver,
) -> Result<EventColumn> {
    if log.width() == 0 {
        return Err(IngestError::NoColumns);
    }

    if let Some(index) = log
        .headers()
        .iter()
        .position(|header| EVENT_HEADER_HINTS.iter().any(|hint| header.contains(hint)))
    {
        log.move_column(index, 0);
        debug!(column = index, header = %log.header(0), "event column found by header");
        return Ok(EventColumn {
            original_index: index,
            source: EventColumnSource::Header,
        });
    }

    let profiles = profile_columns(log);
    let candidates: Vec<usize> = profiles
        .iter()
        .filter(|profile| profile.unique_ratio < thresholds.activity)
        .filter(|profile| column_has_action(log, lexicon, profile))
        .map(|profile| profile.index)
        .collect();

    if let [index] = candidates.as_slice() {
        let index = *index;
        log.move_column(index, 0);
        debug!(column = index, header = %log.header(0), "event column found by action labels");
        return Ok(EventColumn {
            original_index: index,
            source: EventColumnSource::ActionLabels,
        });
    }

    warn!(
        candidates = candidates.len(),
        "event column is ambiguous, asking resolver"
    );
    let query = EventColumnQuery {
        columns: profiles
            .iter()
            .map(|profile| column_sample(log, profile, SAMPLE_LIMIT))
            .collect(),
        candidates,
    };
    let index = resolver.resolve_event_column(&query)?;
    if index >= log.width() {
        return Err(IngestError::EventColumnOutOfRange {
            index,
            width: log.width(),
        });
    }
    log.move_column(index, 0);
    info!(column = index, header = %log.header(0), "event column chosen by resolver");
    Ok(EventColumn {
        original_index: index,
        source: EventColumnSource::Resolver,
    })
}

fn column_has_action(log: &UiLog, lexicon: &Lexicon, profile: &ColumnProfile) -> bool {
    log.values(profile.index).any(|value| {
        value
            .split_whitespace()
            .next()
            .is_some_and(|token| lexicon.is_action_label(token))
    })
}

/// An event string split into its activity and optional object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitEvent {
    pub activity: String,
    pub object_type: Option<String>,
}

/// Splits one event string.
///
/// Two words are activity and object type. With three words the trailing
/// pair is the object type when it is a known UI object phrase
/// (`check box`); otherwise the leading pair is the activity
/// (`double click`). `row` is only used for error reporting.
pub fn split_event(text: &str, lexicon: &Lexicon, row: usize) -> Result<SplitEvent> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Ok(SplitEvent {
            activity: String::new(),
            object_type: None,
        }),
        [activity] => Ok(SplitEvent {
            activity: (*activity).to_string(),
            object_type: None,
        }),
        [activity, object_type] => Ok(SplitEvent {
            activity: (*activity).to_string(),
            object_type: Some((*object_type).to_string()),
        }),
        [first, second, third] => {
            let trailing = format!("{second} {third}");
            if lexicon.is_ui_object_phrase(&trailing) {
                Ok(SplitEvent {
                    activity: (*first).to_string(),
                    object_type: Some(trailing),
                })
            } else {
                Ok(SplitEvent {
                    activity: format!("{first} {second}"),
                    object_type: Some((*third).to_string()),
                })
            }
        }
        _ => Err(IngestError::MalformedEvent {
            row,
            text: text.to_string(),
            tokens: tokens.len(),
        }),
    }
}

/// Replaces column 0 with `activity` and, when any event named an object
/// type, inserts `main ui object type` at position 1.
///
/// Returns whether the object type column was inserted. Fails on the first
/// event text with more than three words.
pub fn split_activity(log: &mut UiLog, lexicon: &Lexicon) -> Result<bool> {
    if log.width() == 0 {
        return Err(IngestError::NoColumns);
    }

    let mut activities = Vec::with_capacity(log.height());
    let mut object_types = Vec::with_capacity(log.height());
    for (row, cell) in log.column(0).iter().enumerate() {
        match cell {
            Some(text) => {
                let split = split_event(text, lexicon, row + 1)?;
                activities.push(Some(split.activity).filter(|a| !a.is_empty()));
                object_types.push(split.object_type);
            }
            None => {
                activities.push(None);
                object_types.push(None);
            }
        }
    }

    *log.column_mut(0) = activities;
    log.set_header(0, ACTIVITY_HEADER);

    let has_object_types = object_types.iter().any(Option::is_some);
    if has_object_types {
        log.insert_column(1, MAIN_OBJECT_TYPE_HEADER, object_types);
    }
    debug!(object_type_column = has_object_types, "event text split");
    Ok(has_object_types)
}

#[cfg(test)]
mod tests {
    use uilog_model::{DefaultsResolver, FailingResolver};

    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::builtin().unwrap()
    }

    #[test]
    fn test_header_hint_moves_column() {
        let mut log = UiLog::from_rows(
            ["timestamp", "user action"],
            vec![vec!["t1", "click button"]],
        );
        let found = find_event_column(
            &mut log,
            &lexicon(),
            &Thresholds::default(),
            &mut FailingResolver,
        )
        .unwrap();
        assert_eq!(found.original_index, 1);
        assert_eq!(found.source, EventColumnSource::Header);
        assert_eq!(log.header(0), "user action");
    }

    #[test]
    fn test_single_action_column_found_by_values() {
        let rows: Vec<Vec<String>> = (0..10)
            .map(|i| vec![format!("2023-01-01 10:00:{i:02}"), "click button".to_string()])
            .collect();
        let mut log = UiLog::from_rows(["time", "what"], rows);
        let found = find_event_column(
            &mut log,
            &lexicon(),
            &Thresholds::default(),
            &mut FailingResolver,
        )
        .unwrap();
        assert_eq!(found.source, EventColumnSource::ActionLabels);
        assert_eq!(log.header(0), "what");
    }

    #[test]
    fn test_no_candidate_escalates() {
        let mut log = UiLog::from_rows(["a", "b"], vec![vec!["x", "y"]]);
        let err = find_event_column(
            &mut log,
            &lexicon(),
            &Thresholds::default(),
            &mut FailingResolver,
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::Resolve(_)));

        let found = find_event_column(
            &mut log,
            &lexicon(),
            &Thresholds::default(),
            &mut DefaultsResolver,
        )
        .unwrap();
        assert_eq!(found.source, EventColumnSource::Resolver);
        assert_eq!(found.original_index, 0);
    }

    #[test]
    fn test_split_event_grammar() {
        let lexicon = lexicon();
        assert_eq!(
            split_event("click", &lexicon, 1).unwrap(),
            SplitEvent {
                activity: "click".into(),
                object_type: None
            }
        );
        assert_eq!(
            split_event("open chrome", &lexicon, 1).unwrap().object_type,
            Some("chrome".into())
        );
        let check = split_event("click check box", &lexicon, 1).unwrap();
        assert_eq!(check.activity, "click");
        assert_eq!(check.object_type.as_deref(), Some("check box"));
        let double = split_event("double click button", &lexicon, 1).unwrap();
        assert_eq!(double.activity, "double click");
        assert_eq!(double.object_type.as_deref(), Some("button"));
    }

    #[test]
    fn test_more_than_three_words_is_fatal() {
        let mut log = UiLog::from_rows(
            ["event"],
            vec![vec!["click button"], vec!["click the big button"]],
        );
        let err = split_activity(&mut log, &lexicon()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::MalformedEvent {
                row: 2,
                tokens: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_split_activity_inserts_object_column() {
        let mut log = UiLog::from_rows(
            ["event", "url"],
            vec![vec!["open chrome", ""], vec!["click", "example.com"]],
        );
        assert!(split_activity(&mut log, &lexicon()).unwrap());
        assert_eq!(log.headers(), ["activity", MAIN_OBJECT_TYPE_HEADER, "url"]);
        assert_eq!(log.cell(0, 1), Some("chrome"));
        assert_eq!(log.cell(1, 1), None);
        assert_eq!(log.cell(1, 0), Some("click"));
    }

    #[test]
    fn test_activity_only_column_is_not_split() {
        let mut log = UiLog::from_rows(["event"], vec![vec!["click"], vec!["scroll"]]);
        assert!(!split_activity(&mut log, &lexicon()).unwrap());
        assert_eq!(log.headers(), ["activity"]);
    }
}
