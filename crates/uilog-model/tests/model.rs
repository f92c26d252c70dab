//! Integration tests for shared model types.

use uilog_model::{ColumnRole, Thresholds, UiLog};

#[test]
fn thresholds_load_from_partial_toml() {
    let thresholds: Thresholds = toml::from_str("context_attribute = 0.4\ncompleteness = 0.9\n")
        .expect("parse thresholds");
    assert!((thresholds.context_attribute - 0.4).abs() < f64::EPSILON);
    assert!((thresholds.completeness - 0.9).abs() < f64::EPSILON);
    assert!((thresholds.ui_object - 0.15).abs() < f64::EPSILON);
    assert!((thresholds.value_attribute() - 0.6).abs() < 1e-9);
}

#[test]
fn thresholds_reject_unknown_keys() {
    let parsed: Result<Thresholds, _> = toml::from_str("ui_obj = 0.2\n");
    assert!(parsed.is_err());
}

#[test]
fn roles_serialize_kebab_case() {
    let json = serde_json::to_string(&ColumnRole::MainObjectType).unwrap();
    assert_eq!(json, "\"main-object-type\"");
}

#[test]
fn table_columns_stay_aligned_after_edits() {
    let mut log = UiLog::from_rows(
        ["case", "event", "user"],
        vec![vec!["1", "click button", "ann"], vec!["1", "open file", ""]],
    );
    log.retain_columns(|idx| idx != 0);
    log.insert_column(1, "main ui object type", vec![Some("button".to_string())]);
    assert_eq!(log.headers(), ["event", "main ui object type", "user"]);
    assert_eq!(log.cell(1, 1), None);
    assert_eq!(log.cell(0, 2), Some("ann"));
    assert_eq!(log.values(0).count(), 2);
}
