//! Error types for input decoding and CSV framing.

use thiserror::Error;

use crate::decode::MalformedInput;

/// Errors that abort reading the input stream.
///
/// Unlike row validation failures these are not recoverable: once the byte
/// stream or its framing is broken there is no next record to move on to.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Stream Errors ===
    /// Reading from the underlying input failed.
    #[error("failed to read input: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    /// Invalid UTF-8 under the strict decoding policy.
    #[error(transparent)]
    Malformed(#[from] MalformedInput),

    // === CSV Framing Errors ===
    /// The CSV reader could not frame a record.
    #[error("failed to parse CSV: {message}")]
    Csv { line: Option<u64>, message: String },

    // === Record Errors ===
    /// A consumed column is absent from the header or from a short row.
    #[error("required field '{field}' missing on line {line}")]
    MissingField { field: String, line: u64 },
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(csv::Position::line);
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => {
                let malformed = source
                    .get_ref()
                    .and_then(|inner| inner.downcast_ref::<MalformedInput>())
                    .copied();
                match malformed {
                    Some(malformed) => Self::Malformed(malformed),
                    None => Self::Read { source },
                }
            }
            _ => Self::Csv { line, message },
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::MissingField {
            field: "ZIP".to_string(),
            line: 3,
        };
        assert_eq!(err.to_string(), "required field 'ZIP' missing on line 3");

        let err = IngestError::Csv {
            line: Some(7),
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "failed to parse CSV: boom");
    }

    #[test]
    fn test_malformed_input_survives_csv_wrapping() {
        let io = std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            MalformedInput { offset: 12 },
        );
        let err: IngestError = csv::Error::from(io).into();
        assert!(matches!(err, IngestError::Malformed(MalformedInput { offset: 12 })));
    }
}
