//! End-to-end ingestion tests: CSV on disk to a prepared log.

use std::io::Write;

use tempfile::Builder;
use uilog_ingest::{
    EventColumnSource, IngestError, MAIN_OBJECT_TYPE_HEADER, load_ui_log, prepare_log,
};
use uilog_lexicon::Lexicon;
use uilog_model::{FailingResolver, Thresholds};

fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn prepares_log_with_case_column_and_event_text() {
    let file = write_csv(
        "CaseID,Timestamp,Event,PageTitle,Empty\n\
         1,2023-01-01 10:00:00,open chrome,,\n\
         1,2023-01-01 10:00:05,click link,Home,\n",
    );
    let log = load_ui_log(file.path()).unwrap();
    let lexicon = Lexicon::builtin().unwrap();
    let prepared = prepare_log(
        log,
        &lexicon,
        &Thresholds::default(),
        &mut FailingResolver,
    )
    .unwrap();

    assert!(prepared.report.case_column_dropped);
    assert_eq!(prepared.report.empty_columns, 1);
    assert_eq!(prepared.event_column.source, EventColumnSource::Header);
    assert!(prepared.has_object_type_column);
    assert_eq!(
        prepared.log.headers(),
        ["activity", MAIN_OBJECT_TYPE_HEADER, "timestamp", "page title"]
    );
    assert_eq!(prepared.log.cell(1, 1), Some("link"));
    assert_eq!(prepared.log.cell(1, 3), Some("home"));
}

#[test]
fn malformed_event_aborts_preparation() {
    let file = write_csv("event\nclick the submit button now\n");
    let log = load_ui_log(file.path()).unwrap();
    let lexicon = Lexicon::builtin().unwrap();
    let err = prepare_log(
        log,
        &lexicon,
        &Thresholds::default(),
        &mut FailingResolver,
    )
    .unwrap_err();
    assert!(matches!(err, IngestError::MalformedEvent { tokens: 5, .. }));
}
