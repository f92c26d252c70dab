//! Table clean-up applied before classification.

use std::sync::LazyLock;

use regex::Regex;
use tracing::info;
use uilog_lexicon::{fold_whitespace, normalize_phrase};
use uilog_model::UiLog;

/// Letters with at most one underscore, nothing else.
static PLAIN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]*_?[A-Za-z]*$").expect("valid plain word regex"));

/// What preprocessing removed or rewrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreprocessReport {
    pub case_column_dropped: bool,
    pub empty_columns: usize,
    pub empty_rows: usize,
    pub duplicate_columns: usize,
    pub reformatted_cells: usize,
}

/// Runs every preprocessing step in order.
pub fn preprocess(log: &mut UiLog) -> PreprocessReport {
    let case_column_dropped = drop_case_column(log);
    let (empty_columns, empty_rows) = drop_empty(log);
    let duplicate_columns = drop_duplicate_columns(log);
    let reformatted_cells = unify_cell_format(log);
    normalize_headers(log);

    PreprocessReport {
        case_column_dropped,
        empty_columns,
        empty_rows,
        duplicate_columns,
        reformatted_cells,
    }
}

/// Drops the first column when its header names a case identifier.
pub fn drop_case_column(log: &mut UiLog) -> bool {
    if log.width() == 0 || !log.header(0).to_lowercase().contains("case") {
        return false;
    }
    log.remove_column(0);
    info!("case column removed");
    true
}

/// Drops columns, then rows, without a single value. Returns both counts.
pub fn drop_empty(log: &mut UiLog) -> (usize, usize) {
    let empty_columns: Vec<bool> = (0..log.width())
        .map(|col| log.column(col).iter().all(Option::is_none))
        .collect();
    let column_count = empty_columns.iter().filter(|empty| **empty).count();
    log.retain_columns(|col| !empty_columns[col]);

    let empty_rows: Vec<bool> = (0..log.height()).map(|row| log.row_is_empty(row)).collect();
    let row_count = empty_rows.iter().filter(|empty| **empty).count();
    log.retain_rows(|row| !empty_rows[row]);

    if column_count > 0 {
        info!(count = column_count, "empty columns removed");
    }
    if row_count > 0 {
        info!(count = row_count, "empty rows removed");
    }
    (column_count, row_count)
}

/// Drops every column whose values equal those of an earlier column.
pub fn drop_duplicate_columns(log: &mut UiLog) -> usize {
    let mut duplicate = vec![false; log.width()];
    for col in 1..log.width() {
        let is_duplicate =
            (0..col).any(|earlier| !duplicate[earlier] && log.column(earlier) == log.column(col));
        duplicate[col] = is_duplicate;
    }
    let count = duplicate.iter().filter(|dup| **dup).count();
    log.retain_columns(|col| !duplicate[col]);
    if count > 0 {
        info!(count, "duplicate columns removed");
    }
    count
}

/// Splits single-word cells at camel-case and underscore boundaries and
/// lower-cases them (`firstName` becomes `first name`).
pub fn unify_cell_format(log: &mut UiLog) -> usize {
    let mut changed = 0;
    for col in 0..log.width() {
        for cell in log.column_mut(col).iter_mut().flatten() {
            if !PLAIN_WORD.is_match(cell) {
                continue;
            }
            let unified = normalize_phrase(cell);
            if !unified.is_empty() && unified != *cell {
                *cell = unified;
                changed += 1;
            }
        }
    }
    changed
}

/// Rewrites headers as lower-case words split at `.`, `_`, camel-case and
/// letter-to-digit boundaries.
pub fn normalize_headers(log: &mut UiLog) {
    for col in 0..log.width() {
        let normalized = normalize_phrase(log.header(col));
        let header = if normalized.is_empty() {
            fold_whitespace(log.header(col))
        } else {
            normalized
        };
        log.set_header(col, header);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_column_only_when_first() {
        let mut log = UiLog::from_rows(["CaseID", "event"], vec![vec!["1", "click"]]);
        assert!(drop_case_column(&mut log));
        assert_eq!(log.headers(), ["event"]);

        let mut log = UiLog::from_rows(["event", "case"], vec![vec!["click", "1"]]);
        assert!(!drop_case_column(&mut log));
        assert_eq!(log.width(), 2);
    }

    #[test]
    fn test_drop_empty_columns_and_rows() {
        let mut log = UiLog::from_rows(
            ["a", "b", "c"],
            vec![vec!["1", "", "x"], vec!["", "", ""], vec!["2", "", "y"]],
        );
        assert_eq!(drop_empty(&mut log), (1, 1));
        assert_eq!(log.headers(), ["a", "c"]);
        assert_eq!(log.height(), 2);
        assert_eq!(log.cell(1, 1), Some("y"));
    }

    #[test]
    fn test_duplicate_columns_keep_first() {
        let mut log = UiLog::from_rows(
            ["a", "b", "c"],
            vec![vec!["1", "1", "2"], vec!["3", "3", "3"]],
        );
        assert_eq!(drop_duplicate_columns(&mut log), 1);
        assert_eq!(log.headers(), ["a", "c"]);
    }

    #[test]
    fn test_unify_cell_format() {
        let mut log = UiLog::from_rows(
            ["event", "label"],
            vec![
                vec!["Click", "firstName"],
                vec!["open chrome", "last_name"],
                vec!["Type", "Order 42"],
            ],
        );
        assert_eq!(unify_cell_format(&mut log), 4);
        assert_eq!(log.cell(0, 0), Some("click"));
        assert_eq!(log.cell(0, 1), Some("first name"));
        assert_eq!(log.cell(1, 0), Some("open chrome"));
        assert_eq!(log.cell(1, 1), Some("last name"));
        assert_eq!(log.cell(2, 1), Some("Order 42"));
    }

    #[test]
    fn test_normalize_headers() {
        let mut log = UiLog::from_rows(
            ["Page.Title", "userName", "Field2", "  "],
            Vec::<Vec<&str>>::new(),
        );
        normalize_headers(&mut log);
        assert_eq!(log.headers(), ["page title", "user name", "field 2", ""]);
    }

    #[test]
    fn test_preprocess_runs_all_steps() {
        let mut log = UiLog::from_rows(
            ["case", "Event", "Empty", "Copy"],
            vec![vec!["1", "clickButton", "", "clickButton"]],
        );
        let report = preprocess(&mut log);
        assert!(report.case_column_dropped);
        assert_eq!(report.empty_columns, 1);
        assert_eq!(report.duplicate_columns, 1);
        assert_eq!(log.headers(), ["event"]);
        assert_eq!(log.cell(0, 0), Some("click button"));
    }
}
