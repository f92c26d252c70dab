//! In-memory UI log table.
//!
//! The table is column-major: classification works column by column and the
//! resolver reads rows by index. Missing cells are `None`.

/// Returns true for cell text that counts as a missing value.
pub fn is_missing(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || matches!(trimmed, "nan" | "NaN" | "None")
}

/// Converts raw cell text into a cell, mapping missing markers to `None`.
pub fn normalize_cell(value: &str) -> Option<String> {
    if is_missing(value) {
        None
    } else {
        Some(value.trim().to_string())
    }
}

/// A header row plus column-major cell storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiLog {
    headers: Vec<String>,
    columns: Vec<Vec<Option<String>>>,
    rows: usize,
}

impl UiLog {
    /// Builds a table from columns; shorter columns are padded with missing cells.
    pub fn from_columns(headers: Vec<String>, mut columns: Vec<Vec<Option<String>>>) -> Self {
        columns.resize_with(headers.len(), Vec::new);
        columns.truncate(headers.len());
        let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
        for column in &mut columns {
            column.resize(rows, None);
        }
        Self {
            headers,
            columns,
            rows,
        }
    }

    /// Builds a table from raw row text, applying [`normalize_cell`].
    pub fn from_rows<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        let mut count = 0;
        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                let cell = cells.next().and_then(|c| normalize_cell(c.as_ref()));
                column.push(cell);
            }
            count += 1;
        }
        Self {
            headers,
            columns,
            rows: count,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn header(&self, col: usize) -> &str {
        &self.headers[col]
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn height(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.headers.is_empty()
    }

    pub fn column(&self, col: usize) -> &[Option<String>] {
        &self.columns[col]
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.columns
            .get(col)
            .and_then(|c| c.get(row))
            .and_then(Option::as_deref)
    }

    /// Index of the first column whose header equals `name`.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Iterates non-missing values of a column.
    pub fn values(&self, col: usize) -> impl Iterator<Item = &str> {
        self.columns[col].iter().filter_map(Option::as_deref)
    }

    pub fn set_header(&mut self, col: usize, header: impl Into<String>) {
        self.headers[col] = header.into();
    }

    pub fn column_mut(&mut self, col: usize) -> &mut Vec<Option<String>> {
        &mut self.columns[col]
    }

    /// Moves column `from` to position `to`, shifting the others.
    pub fn move_column(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        let header = self.headers.remove(from);
        let column = self.columns.remove(from);
        self.headers.insert(to, header);
        self.columns.insert(to, column);
    }

    pub fn insert_column(
        &mut self,
        at: usize,
        header: impl Into<String>,
        mut values: Vec<Option<String>>,
    ) {
        values.resize(self.rows, None);
        self.headers.insert(at, header.into());
        self.columns.insert(at, values);
    }

    pub fn remove_column(&mut self, col: usize) -> (String, Vec<Option<String>>) {
        (self.headers.remove(col), self.columns.remove(col))
    }

    /// Keeps the columns whose index satisfies `keep`.
    pub fn retain_columns(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let mut idx = 0;
        let mut headers = std::mem::take(&mut self.headers).into_iter();
        let mut kept_headers = Vec::new();
        let mut kept_columns = Vec::new();
        for column in std::mem::take(&mut self.columns) {
            let header = headers.next().unwrap_or_default();
            if keep(idx) {
                kept_headers.push(header);
                kept_columns.push(column);
            }
            idx += 1;
        }
        self.headers = kept_headers;
        self.columns = kept_columns;
    }

    /// Keeps the rows whose index satisfies `keep`.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let mask: Vec<bool> = (0..self.rows).map(&mut keep).collect();
        for column in &mut self.columns {
            let mut row = 0;
            column.retain(|_| {
                let kept = mask[row];
                row += 1;
                kept
            });
        }
        self.rows = mask.iter().filter(|kept| **kept).count();
    }

    /// True when the row has no value in any column.
    pub fn row_is_empty(&self, row: usize) -> bool {
        self.columns.iter().all(|c| c[row].is_none())
    }
}
