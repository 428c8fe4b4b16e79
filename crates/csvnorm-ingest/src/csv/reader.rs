//! Streaming CSV reader producing header-keyed records.

use std::io::Read;
use std::sync::Arc;

use csv::StringRecord;
use tracing::trace;

use crate::decode::{DecodingReader, MalformedInputPolicy};
use crate::error::{IngestError, Result};

use super::header::CsvHeaders;

/// One input row, addressable by header name.
#[derive(Debug, Clone)]
pub struct Record {
    headers: Arc<CsvHeaders>,
    values: StringRecord,
    line: u64,
}

impl Record {
    pub fn new(headers: Arc<CsvHeaders>, values: StringRecord, line: u64) -> Self {
        Self {
            headers,
            values,
            line,
        }
    }

    /// Line on which the record starts (the header is line 1).
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Value of `field`, or `None` when the header lacks the column or the
    /// row is too short to reach it.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.headers
            .position(field)
            .and_then(|index| self.values.get(index))
    }

    /// Value of `field`, failing when it is absent.
    pub fn require(&self, field: &str) -> Result<&str> {
        self.get(field).ok_or_else(|| IngestError::MissingField {
            field: field.to_string(),
            line: self.line,
        })
    }

    /// Field name/value pairs in header order. Cells beyond the header are
    /// not included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

/// Reads records from a byte stream, one at a time.
///
/// The first row is the header. Rows may have more or fewer cells than the
/// header; missing cells surface as absent fields on the [`Record`].
pub struct RecordReader<R> {
    reader: csv::Reader<DecodingReader<R>>,
    headers: Arc<CsvHeaders>,
}

impl<R: Read> RecordReader<R> {
    pub fn new(input: R, policy: MalformedInputPolicy) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(DecodingReader::new(input, policy));
        let headers = CsvHeaders::from_record(reader.headers()?);
        trace!(columns = headers.len(), "read header row");
        Ok(Self {
            reader,
            headers: Arc::new(headers),
        })
    }

    pub fn headers(&self) -> &CsvHeaders {
        &self.headers
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut values = StringRecord::new();
        match self.reader.read_record(&mut values) {
            Ok(true) => {
                let line = values.position().map_or(0, csv::Position::line);
                Some(Ok(Record::new(Arc::clone(&self.headers), values, line)))
            }
            Ok(false) => None,
            Err(error) => Some(Err(error.into())),
        }
    }
}
