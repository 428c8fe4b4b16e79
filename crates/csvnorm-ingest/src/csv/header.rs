//! Header row handling.

/// Column names taken from the first input row, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvHeaders {
    pub columns: Vec<String>,
}

impl CsvHeaders {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn from_record(record: &csv::StringRecord) -> Self {
        Self::new(record.iter().map(str::to_string).collect())
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Index of a column by exact name. When a name repeats, the last
    /// occurrence wins.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().rposition(|c| c == column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }
}
