//! CSV loading into a [`UiLog`].

use std::path::Path;

use polars::prelude::*;
use tracing::{debug, warn};
use uilog_model::UiLog;
use uilog_model::table::normalize_cell;

use crate::error::{IngestError, Result};

/// Loads a UI log from a `.csv` file.
///
/// Every column is read as text; empty cells and `nan`/`None` markers
/// become missing values.
pub fn load_ui_log(path: &Path) -> Result<UiLog> {
    check_extension(path)?;
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    validate_dataframe_shape(&df, path)?;
    let log = dataframe_to_ui_log(&df)?;
    debug!(
        path = %path.display(),
        rows = log.height(),
        columns = log.width(),
        "UI log loaded"
    );
    Ok(log)
}

/// Rejects anything but a `.csv` extension (case-insensitive).
pub fn check_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_lowercase();
    if extension == "csv" {
        Ok(())
    } else {
        Err(IngestError::UnsupportedFileType {
            path: path.to_path_buf(),
            extension,
        })
    }
}

fn validate_dataframe_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    if df.width() > 500 {
        warn!(
            path = %path.display(),
            columns = df.width(),
            "UI log has more than 500 columns"
        );
    }

    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
            });
        }
    }

    Ok(())
}

/// Copies a DataFrame into column-major text storage.
pub fn dataframe_to_ui_log(df: &DataFrame) -> Result<UiLog> {
    let mut headers = Vec::with_capacity(df.width());
    let mut columns = Vec::with_capacity(df.width());

    for col in df.get_columns() {
        headers.push(col.name().trim_matches('\u{feff}').trim().to_string());
        let str_col = col.cast(&DataType::String)?;
        let values: Vec<Option<String>> = str_col
            .str()?
            .iter()
            .map(|value| value.and_then(normalize_cell))
            .collect();
        columns.push(values);
    }

    Ok(UiLog::from_columns(headers, columns))
}
