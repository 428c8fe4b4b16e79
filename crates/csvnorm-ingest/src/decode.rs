//! Input decoding with an explicit policy for malformed UTF-8.
//!
//! The CSV framer only accepts valid UTF-8, so raw input is passed through a
//! [`DecodingReader`] first. What happens to invalid byte sequences is chosen
//! by the caller through [`MalformedInputPolicy`] instead of being a property
//! of the process environment.

use std::io::{self, Read};

use encoding_rs::{CoderResult, Decoder, DecoderResult, UTF_8};
use thiserror::Error;
use tracing::debug;

/// Size of the raw and decoded chunk buffers.
const CHUNK_SIZE: usize = 8 * 1024;

/// How invalid UTF-8 in the input is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedInputPolicy {
    /// Replace each maximal invalid subsequence with U+FFFD and keep going.
    #[default]
    Replace,
    /// Stop reading at the first invalid sequence.
    Strict,
}

/// Invalid UTF-8 found under [`MalformedInputPolicy::Strict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("malformed UTF-8 in input at byte offset {offset}")]
pub struct MalformedInput {
    /// Offset of the first byte of the invalid sequence.
    pub offset: u64,
}

/// Streaming UTF-8 decoder over any byte source.
///
/// Yields valid UTF-8 bytes. A leading UTF-8 byte order mark is dropped.
pub struct DecodingReader<R> {
    inner: R,
    decoder: Decoder,
    policy: MalformedInputPolicy,
    input: Box<[u8]>,
    input_start: usize,
    input_end: usize,
    output: Box<[u8]>,
    output_start: usize,
    output_end: usize,
    consumed: u64,
    pending: Option<MalformedInput>,
    eof: bool,
    finished: bool,
}

impl<R: Read> DecodingReader<R> {
    pub fn new(inner: R, policy: MalformedInputPolicy) -> Self {
        Self {
            inner,
            decoder: UTF_8.new_decoder_with_bom_removal(),
            policy,
            input: vec![0; CHUNK_SIZE].into_boxed_slice(),
            input_start: 0,
            input_end: 0,
            output: vec![0; CHUNK_SIZE].into_boxed_slice(),
            output_start: 0,
            output_end: 0,
            consumed: 0,
            pending: None,
            eof: false,
            finished: false,
        }
    }

    fn refill_input(&mut self) -> io::Result<()> {
        loop {
            match self.inner.read(&mut self.input) {
                Ok(read) => {
                    self.input_start = 0;
                    self.input_end = read;
                    self.eof = read == 0;
                    return Ok(());
                }
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(error),
            }
        }
    }

    /// Decode until at least one output byte is available or input ends.
    fn fill_output(&mut self) -> io::Result<()> {
        self.output_start = 0;
        self.output_end = 0;
        if let Some(malformed) = self.pending.take() {
            return Err(io::Error::new(io::ErrorKind::InvalidData, malformed));
        }
        while self.output_end == 0 && !self.finished {
            if self.input_start == self.input_end && !self.eof {
                self.refill_input()?;
            }
            let src = &self.input[self.input_start..self.input_end];
            let last = self.eof;
            let (input_empty, read, written) = match self.policy {
                MalformedInputPolicy::Replace => {
                    let (result, read, written, replaced) =
                        self.decoder.decode_to_utf8(src, &mut self.output, last);
                    if replaced {
                        debug!(
                            offset = self.consumed,
                            "replaced malformed UTF-8 in input chunk"
                        );
                    }
                    (result == CoderResult::InputEmpty, read, written)
                }
                MalformedInputPolicy::Strict => {
                    let (result, read, written) =
                        self.decoder
                            .decode_to_utf8_without_replacement(src, &mut self.output, last);
                    match result {
                        DecoderResult::InputEmpty => (true, read, written),
                        DecoderResult::OutputFull => (false, read, written),
                        DecoderResult::Malformed(bad, extra) => {
                            let offset = (self.consumed + read as u64)
                                .saturating_sub(u64::from(bad) + u64::from(extra));
                            // Hand out what decoded cleanly before failing.
                            self.pending = Some(MalformedInput { offset });
                            self.output_end = written;
                            self.finished = true;
                            return Ok(());
                        }
                    }
                }
            };
            self.input_start += read;
            self.consumed += read as u64;
            self.output_end = written;
            if last && input_empty {
                self.finished = true;
            }
        }
        Ok(())
    }
}

impl<R: Read> Read for DecodingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.output_start == self.output_end {
            self.fill_output()?;
        }
        if self.output_start == self.output_end
            && let Some(malformed) = self.pending.take()
        {
            return Err(io::Error::new(io::ErrorKind::InvalidData, malformed));
        }
        let available = &self.output[self.output_start..self.output_end];
        let count = available.len().min(buf.len());
        buf[..count].copy_from_slice(&available[..count]);
        self.output_start += count;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8], policy: MalformedInputPolicy) -> io::Result<String> {
        let mut decoded = String::new();
        DecodingReader::new(bytes, policy).read_to_string(&mut decoded)?;
        Ok(decoded)
    }

    #[test]
    fn test_valid_input_passes_through() {
        let text = "Timestamp,Notes\n4/1/11 11:00:00 AM,I am the very model of a modern major general\n";
        assert_eq!(decode(text.as_bytes(), MalformedInputPolicy::Replace).unwrap(), text);
        assert_eq!(decode(text.as_bytes(), MalformedInputPolicy::Strict).unwrap(), text);
    }

    #[test]
    fn test_invalid_bytes_are_replaced() {
        let decoded = decode(b"9412\xff,ok\n", MalformedInputPolicy::Replace).unwrap();
        assert_eq!(decoded, "9412\u{fffd},ok\n");
    }

    #[test]
    fn test_truncated_sequence_at_end_is_replaced() {
        let decoded = decode(b"notes \xe2\x82", MalformedInputPolicy::Replace).unwrap();
        assert_eq!(decoded, "notes \u{fffd}");
    }

    #[test]
    fn test_strict_policy_reports_offset() {
        let err = decode(b"abc\xffdef", MalformedInputPolicy::Strict).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let malformed = err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<MalformedInput>())
            .copied();
        assert_eq!(malformed, Some(MalformedInput { offset: 3 }));
    }

    #[test]
    fn test_bom_is_removed() {
        let decoded = decode(b"\xef\xbb\xbfTimestamp\n", MalformedInputPolicy::Replace).unwrap();
        assert_eq!(decoded, "Timestamp\n");
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        let mut bytes = vec![b'a'; CHUNK_SIZE - 1];
        bytes.extend_from_slice("é".as_bytes());
        bytes.extend_from_slice(b"z");
        let decoded = decode(&bytes, MalformedInputPolicy::Strict).unwrap();
        assert!(decoded.ends_with("éz"));
        assert_eq!(decoded.len(), bytes.len());
    }
}
