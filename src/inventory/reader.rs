//! Streaming reader for `objects.inv` payloads.
//!
//! An inventory starts with a handful of plain-text header lines followed by a
//! zlib stream. [`InventoryReader`] hands out the header lines one at a time and
//! then switches to [`CompressedLines`], which inflates the body in fixed-size
//! chunks and yields one decoded line per `\n`.

use crate::error::{Result, RtfmError};
use flate2::{Decompress, FlushDecompress, Status};

/// Number of compressed bytes fed to the inflater per step.
pub const CHUNK_SIZE: usize = 16 * 1024;

/// Cursor over a raw inventory buffer.
///
/// Readers are cheap; to start over, build a new one from the same bytes.
#[derive(Debug)]
pub struct InventoryReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> InventoryReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Read one uncompressed line, including its trailing `\n` if present.
    ///
    /// Returns `Ok(None)` once the buffer is exhausted.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let rest = &self.buffer[self.position..];
        if rest.is_empty() {
            return Ok(None);
        }

        let end = rest
            .iter()
            .position(|&b| b == b'\n')
            .map_or(rest.len(), |pos| pos + 1);
        self.position += end;

        let line = std::str::from_utf8(&rest[..end])
            .map_err(|e| RtfmError::Decode(format!("header line is not UTF-8: {}", e)))?;
        Ok(Some(line.to_string()))
    }

    /// Skip one uncompressed line.
    pub fn skip_line(&mut self) -> Result<()> {
        self.read_line().map(drop)
    }

    /// Number of raw bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Switch to decoding the zlib body that follows the header lines.
    pub fn compressed_lines(self) -> CompressedLines<'a> {
        CompressedLines::new(&self.buffer[self.position..])
    }
}

/// Lazy iterator over the decompressed lines of an inventory body.
///
/// Lines are yielded without their terminator. A trailing fragment that is not
/// terminated by `\n` is dropped.
pub struct CompressedLines<'a> {
    input: &'a [u8],
    consumed: usize,
    inflater: Decompress,
    scratch: Vec<u8>,
    pending: Vec<u8>,
    finished: bool,
    failed: bool,
}

impl std::fmt::Debug for CompressedLines<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressedLines")
            .field("consumed", &self.consumed)
            .field("remaining", &(self.input.len() - self.consumed))
            .field("pending", &self.pending.len())
            .field("finished", &self.finished)
            .finish()
    }
}

impl<'a> CompressedLines<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            consumed: 0,
            inflater: Decompress::new(true),
            scratch: vec![0; CHUNK_SIZE],
            pending: Vec::new(),
            finished: false,
            failed: false,
        }
    }

    /// Inflate the next chunk of input into `pending`.
    fn fill(&mut self) -> Result<()> {
        let end = (self.consumed + CHUNK_SIZE).min(self.input.len());
        let chunk = &self.input[self.consumed..end];
        let flush = if chunk.is_empty() {
            FlushDecompress::Finish
        } else {
            FlushDecompress::None
        };

        let before_in = self.inflater.total_in();
        let before_out = self.inflater.total_out();
        let status = self
            .inflater
            .decompress(chunk, &mut self.scratch, flush)
            .map_err(|e| RtfmError::Decode(e.to_string()))?;

        // Both deltas are bounded by CHUNK_SIZE.
        let read = usize::try_from(self.inflater.total_in() - before_in).unwrap_or(chunk.len());
        let written =
            usize::try_from(self.inflater.total_out() - before_out).unwrap_or(self.scratch.len());
        self.consumed += read;
        self.pending.extend_from_slice(&self.scratch[..written]);

        match status {
            Status::StreamEnd => self.finished = true,
            Status::Ok | Status::BufError if read == 0 && written == 0 => {
                return Err(RtfmError::Decode(
                    "compressed stream ended unexpectedly".to_string(),
                ));
            }
            Status::Ok | Status::BufError => {}
        }

        Ok(())
    }

    fn take_line(&mut self) -> Option<Result<String>> {
        let pos = self.pending.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
        line.pop();
        Some(
            String::from_utf8(line)
                .map_err(|e| RtfmError::Decode(format!("inventory line is not UTF-8: {}", e))),
        )
    }
}

impl Iterator for CompressedLines<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            if let Some(line) = self.take_line() {
                return Some(line);
            }

            if self.finished {
                if !self.pending.is_empty() {
                    tracing::trace!(
                        "Dropping {} trailing bytes without a line terminator",
                        self.pending.len()
                    );
                    self.pending.clear();
                }
                return None;
            }

            if let Err(e) = self.fill() {
                self.failed = true;
                return Some(Err(e));
            }
        }
    }
}
