//! Row normalization pipeline.
//!
//! Records are pulled from the input one at a time and checked field by
//! field in a fixed order: `Timestamp`, `ZIP`, `FooDuration`, `BarDuration`.
//! The first failing field ends the record: its message is written to the
//! error stream, nothing is written to the output, and the next record is
//! read. Records that pass every check are emitted in full.

use std::io::{self, Read, Write};

use thiserror::Error;
use tracing::{debug, debug_span, info, trace};

use csvnorm_ingest::{IngestError, MalformedInputPolicy, Record, RecordReader};
use csvnorm_model::record::{
    ADDRESS, BAR_DURATION, FOO_DURATION, FULL_NAME, NOTES, TIMESTAMP, ZIP,
};
use csvnorm_model::{NormalizedRecord, OUTPUT_HEADER, ValidationError};
use csvnorm_transform::{
    ZoneConversion, format_seconds, normalize_zip, parse_compact_duration, parse_timestamp,
    sum_durations, upper_case_name,
};

use crate::logging::redact_value;

/// Knobs for a pipeline run. The defaults are what the binary uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// What to do with invalid UTF-8 in the input.
    pub input_policy: MalformedInputPolicy,
    /// Zone the input timestamps are read in, and zone they are written in.
    pub zones: ZoneConversion,
}

/// Failures that stop the whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("failed to write output: {0}")]
    Write(#[from] csv::Error),

    #[error("failed to report invalid record: {0}")]
    Report(#[source] io::Error),

    #[error("failed to flush output: {0}")]
    Flush(#[source] io::Error),
}

/// Counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub records_read: usize,
    pub records_written: usize,
    pub records_skipped: usize,
}

/// Terminal state of a single record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Emitted(NormalizedRecord),
    Skipped(ValidationError),
}

/// Why a record could not be built.
enum RowFailure {
    Invalid(ValidationError),
    Fatal(IngestError),
}

impl From<ValidationError> for RowFailure {
    fn from(error: ValidationError) -> Self {
        Self::Invalid(error)
    }
}

impl From<IngestError> for RowFailure {
    fn from(error: IngestError) -> Self {
        Self::Fatal(error)
    }
}

/// Normalize one record.
///
/// A validation failure yields [`RecordOutcome::Skipped`] with the first
/// failing field's error; later fields are not looked at. A consumed column
/// missing from the record is an [`IngestError`].
pub fn normalize_record(
    record: &Record,
    zones: &ZoneConversion,
) -> Result<RecordOutcome, IngestError> {
    match build_record(record, zones) {
        Ok(normalized) => Ok(RecordOutcome::Emitted(normalized)),
        Err(RowFailure::Invalid(error)) => Ok(RecordOutcome::Skipped(error)),
        Err(RowFailure::Fatal(error)) => Err(error),
    }
}

fn build_record(record: &Record, zones: &ZoneConversion) -> Result<NormalizedRecord, RowFailure> {
    let timestamp = parse_timestamp(record.require(TIMESTAMP)?)?;
    let zip = normalize_zip(record.require(ZIP)?)?;
    let foo_seconds = parse_compact_duration(record.require(FOO_DURATION)?)?;
    let bar_seconds = parse_compact_duration(record.require(BAR_DURATION)?)?;

    Ok(NormalizedRecord {
        timestamp: zones.to_timestamp(&timestamp),
        address: record.require(ADDRESS)?.to_string(),
        zip,
        full_name: upper_case_name(record.require(FULL_NAME)?),
        foo_duration: format_seconds(foo_seconds),
        bar_duration: format_seconds(bar_seconds),
        total_duration: format_seconds(sum_durations(foo_seconds, bar_seconds)),
        notes: record.require(NOTES)?.to_string(),
    })
}

/// Normalize a whole CSV stream.
///
/// The output header is written before any input is read, so it is present
/// even when the input is empty or every record is skipped. One line per
/// skipped record goes to `errors`, in input order.
pub fn normalize_stream<R, W, E>(
    input: R,
    output: W,
    mut errors: E,
    options: &PipelineOptions,
) -> Result<PipelineSummary, PipelineError>
where
    R: Read,
    W: Write,
    E: Write,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(output);
    writer.write_record(OUTPUT_HEADER)?;

    let records = RecordReader::new(input, options.input_policy)?;
    let mut summary = PipelineSummary::default();

    for record in records {
        let record = record?;
        summary.records_read += 1;
        let span = debug_span!("record", line = record.line());
        let _guard = span.enter();

        match normalize_record(&record, &options.zones)? {
            RecordOutcome::Emitted(normalized) => {
                trace!(
                    full_name = redact_value(&normalized.full_name),
                    timestamp = %normalized.timestamp,
                    total_duration = %normalized.total_duration,
                    "emitting record"
                );
                writer.serialize(&normalized)?;
                summary.records_written += 1;
            }
            RecordOutcome::Skipped(error) => {
                debug!(
                    kind = ?error.kind(),
                    value = redact_value(error.value()),
                    "skipping invalid record"
                );
                writeln!(errors, "{error}").map_err(PipelineError::Report)?;
                summary.records_skipped += 1;
            }
        }
    }

    writer.flush().map_err(PipelineError::Flush)?;
    errors.flush().map_err(PipelineError::Report)?;

    info!(
        read = summary.records_read,
        written = summary.records_written,
        skipped = summary.records_skipped,
        "normalization complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Timestamp,Address,ZIP,FullName,FooDuration,BarDuration,TotalDuration,Notes";

    fn first_record(csv: &str) -> Record {
        RecordReader::new(csv.as_bytes(), MalformedInputPolicy::Replace)
            .expect("reader")
            .next()
            .expect("record")
            .expect("ok")
    }

    #[test]
    fn test_valid_record_is_emitted() {
        let record = first_record(&format!(
            "{HEADER}\n4/1/11 11:00:00 AM,123 Main St,2345,jane Doe,1:23:32.123,1:32:33.123,x,hi\n"
        ));
        let outcome = normalize_record(&record, &ZoneConversion::default()).expect("fields");
        let RecordOutcome::Emitted(normalized) = outcome else {
            panic!("expected emitted record, got {outcome:?}");
        };
        assert_eq!(normalized.timestamp, "2011-04-01T14:00:00-04:00");
        assert_eq!(normalized.address, "123 Main St");
        assert_eq!(normalized.zip, "02345");
        assert_eq!(normalized.full_name, "JANE DOE");
        assert_eq!(normalized.foo_duration, "5012.123");
        assert_eq!(normalized.bar_duration, "5553.123");
        assert_eq!(normalized.total_duration, "10565.246");
        assert_eq!(normalized.notes, "hi");
    }

    #[test]
    fn test_first_failure_wins() {
        let record = first_record(&format!(
            "{HEADER}\n4/1/11 11:00:00 AM,addr,94a21,name,1:a:32.123,bad,x,\n"
        ));
        let outcome = normalize_record(&record, &ZoneConversion::default()).expect("fields");
        let RecordOutcome::Skipped(error) = outcome else {
            panic!("expected skipped record, got {outcome:?}");
        };
        assert_eq!(error.kind(), csvnorm_model::ValidationErrorKind::InvalidZip);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let record = first_record("Timestamp,ZIP\n4/1/11 11:00:00 AM,94121\n");
        let err = normalize_record(&record, &ZoneConversion::default()).unwrap_err();
        assert!(matches!(err, IngestError::MissingField { ref field, .. } if field == "FooDuration"));
    }

    #[test]
    fn test_unchecked_columns_are_not_read_for_skipped_rows() {
        // Address, FullName and Notes are absent, but the bad timestamp
        // ends the record first.
        let record = first_record("Timestamp\nnot a timestamp\n");
        let outcome = normalize_record(&record, &ZoneConversion::default()).expect("fields");
        assert!(matches!(outcome, RecordOutcome::Skipped(_)));
    }

    #[test]
    fn test_stream_writes_header_and_errors() {
        let input = format!(
            "{HEADER}\n4/1/11 11:00:00 AM,a,1,b,0:00:01.000,0:00:02.000,,n\nnope,a,1,b,0:00:01,0:00:02,,n\n"
        );
        let mut output = Vec::new();
        let mut errors = Vec::new();
        let summary = normalize_stream(
            input.as_bytes(),
            &mut output,
            &mut errors,
            &PipelineOptions::default(),
        )
        .expect("stream");

        assert_eq!(
            summary,
            PipelineSummary {
                records_read: 2,
                records_written: 1,
                records_skipped: 1,
            }
        );
        let output = String::from_utf8(output).expect("utf8");
        assert_eq!(
            output,
            format!("{HEADER}\r\n2011-04-01T14:00:00-04:00,a,00001,B,1.000,2.000,3.000,n\r\n")
        );
        assert_eq!(String::from_utf8(errors).expect("utf8"), "Invalid timestamp: nope\n");
    }
}
