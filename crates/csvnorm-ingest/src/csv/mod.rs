//! CSV record framing.

mod header;
mod reader;

pub use header::CsvHeaders;
pub use reader::{Record, RecordReader};
