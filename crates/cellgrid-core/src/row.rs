//! Row records: one grid row as a flat column-name → value mapping

use crate::value::CellValue;
use ahash::AHashMap;

/// One grid row during expression evaluation.
///
/// Column lookup is by key presence, not truthiness: a column holding
/// null/0/false is a valid column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: AHashMap<String, CellValue>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column's value
    pub fn insert<K: Into<String>, V: Into<CellValue>>(&mut self, column: K, value: V) {
        self.cells.insert(column.into(), value.into());
    }

    /// Get a column's value, `None` when the column is absent
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Whether the column exists in this row
    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no columns
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over (column, value) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Column names sorted for deterministic iteration
    pub fn sorted_columns(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cells.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}
