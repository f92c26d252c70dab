//! Per-column statistics.

use std::collections::BTreeSet;

use uilog_model::{ColumnSample, UiLog};

/// Uniqueness and completeness of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub index: usize,
    pub header: String,
    pub rows: usize,
    pub non_missing: usize,
    pub distinct: usize,
    /// Distinct non-missing values over non-missing values (0 when empty).
    pub unique_ratio: f64,
    /// Non-missing values over rows.
    pub completeness: f64,
}

impl ColumnProfile {
    pub fn is_constant(&self) -> bool {
        self.distinct <= 1
    }
}

/// Profiles every column of `log`.
pub fn profile_columns(log: &UiLog) -> Vec<ColumnProfile> {
    (0..log.width()).map(|col| profile_column(log, col)).collect()
}

pub fn profile_column(log: &UiLog, col: usize) -> ColumnProfile {
    let rows = log.height();
    let mut non_missing = 0usize;
    let mut unique_values: BTreeSet<&str> = BTreeSet::new();
    for value in log.values(col) {
        non_missing += 1;
        unique_values.insert(value);
    }

    let unique_ratio = if non_missing > 0 {
        unique_values.len() as f64 / non_missing as f64
    } else {
        0.0
    };
    let completeness = if rows > 0 {
        non_missing as f64 / rows as f64
    } else {
        0.0
    };

    ColumnProfile {
        index: col,
        header: log.header(col).to_string(),
        rows,
        non_missing,
        distinct: unique_values.len(),
        unique_ratio,
        completeness,
    }
}

/// Up to `limit` distinct non-missing values, in row order.
pub fn sample_values(log: &UiLog, col: usize, limit: usize) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut samples = Vec::new();
    for value in log.values(col) {
        if samples.len() >= limit {
            break;
        }
        if seen.insert(value) {
            samples.push(value.to_string());
        }
    }
    samples
}

/// What an ambiguity resolver gets to see about a column.
pub fn column_sample(log: &UiLog, profile: &ColumnProfile, limit: usize) -> ColumnSample {
    ColumnSample {
        index: profile.index,
        header: profile.header.clone(),
        values: sample_values(log, profile.index, limit),
        unique_ratio: profile.unique_ratio,
    }
}
