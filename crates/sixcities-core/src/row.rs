use std::sync::Arc;

/// One parsed TSV line keyed by the header of its file.
///
/// The header is shared between all rows of a file. Cells are aligned with it:
/// missing trailing cells read as empty strings and extra cells are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    line: u64,
    header: Arc<[String]>,
    cells: Vec<String>,
}

impl RawRow {
    pub fn new(line: u64, header: Arc<[String]>, mut cells: Vec<String>) -> Self {
        cells.resize(header.len(), String::new());
        Self {
            line,
            header,
            cells,
        }
    }

    /// Build a standalone row from `(column, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let (header, cells): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .unzip();
        Self::new(0, header.into(), cells)
    }

    /// 1-based line of the source file, `0` when the row was built in memory.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Cell for `column`, or `None` when the header has no such column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.header
            .iter()
            .position(|name| name == column)
            .and_then(|idx| self.cells.get(idx))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter().map(String::as_str))
    }
}
