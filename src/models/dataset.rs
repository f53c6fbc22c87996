use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// A lead list as read from a CSV export: a header row and string cells.
///
/// Columns are looked up by header name and any of them may be absent.
/// Every row has exactly `headers.len()` cells; short rows are padded with
/// empty strings when pushed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Name or identifier for this dataset (usually the file stem)
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Create an empty dataset with the given header row.
    pub fn new<S: Into<String>>(name: impl Into<String>, headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a record, padding or truncating it to the header width.
    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        let width = self.headers.len();
        let mut row: Vec<String> = cells.into_iter().take(width).map(Into::into).collect();
        row.resize(width, String::new());
        self.rows.push(row);
    }

    /// Number of records (excluding the header).
    pub fn num_records(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    /// Index of the first column with this header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Fail with [`ReportError::MissingColumn`] unless the column exists.
    pub fn require_column(&self, name: &str) -> Result<usize, ReportError> {
        self.column_index(name)
            .ok_or_else(|| ReportError::MissingColumn(name.to_string()))
    }

    /// Raw cell values of a column, in record order.
    ///
    /// A row too short to reach the column reads as an empty cell.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map_or("", String::as_str))
                .collect(),
        )
    }

    /// Cell values of a column coerced to numbers.
    ///
    /// Unparseable cells become `None` instead of failing.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let cells = self.column(name)?;
        let values: Vec<Option<f64>> = cells.iter().map(|c| coerce_numeric(c)).collect();
        let malformed = cells
            .iter()
            .zip(&values)
            .filter(|(cell, value)| value.is_none() && !cell.trim().is_empty())
            .count();
        if malformed > 0 {
            tracing::debug!(column = name, malformed, "coerced non-numeric cells to missing");
        }
        Some(values)
    }

    /// Non-missing numeric values of a column, in record order.
    pub fn numeric_values(&self, name: &str) -> Option<Vec<f64>> {
        self.numeric_column(name)
            .map(|col| col.into_iter().flatten().collect())
    }

    /// The first `n` records.
    pub fn preview(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

/// Parse a cell as a finite number; anything else is missing.
///
/// # Examples
///
/// ```
/// use seller_report::models::coerce_numeric;
///
/// assert_eq!(coerce_numeric(" 2.5 "), Some(2.5));
/// assert_eq!(coerce_numeric("n/a"), None);
/// assert_eq!(coerce_numeric(""), None);
/// ```
pub fn coerce_numeric(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
