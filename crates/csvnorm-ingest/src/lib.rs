//! Input handling for the CSV normalizer.
//!
//! # Features
//!
//! - **Decoding**: Streaming UTF-8 decoding with an explicit
//!   [`MalformedInputPolicy`] (replace or fail)
//! - **Framing**: Header-keyed [`Record`]s read one at a time from any
//!   [`std::io::Read`]
//!
//! # Example
//!
//! ```no_run
//! use csvnorm_ingest::{MalformedInputPolicy, RecordReader};
//!
//! let stdin = std::io::stdin().lock();
//! let mut records = RecordReader::new(stdin, MalformedInputPolicy::Replace)?;
//! for record in &mut records {
//!     let record = record?;
//!     println!("{:?}", record.get("ZIP"));
//! }
//! # Ok::<(), csvnorm_ingest::IngestError>(())
//! ```

mod csv;
mod decode;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === Decoding ===
pub use decode::{DecodingReader, MalformedInput, MalformedInputPolicy};

// === CSV Reading ===
pub use self::csv::{CsvHeaders, Record, RecordReader};
