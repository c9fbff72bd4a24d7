//! `std::io` adapters that drive the transform over a wrapped stream.

use std::io::{self, Read, Write};

use crate::transform::Safe64Transform;
use crate::Safe64Error;

/// Scratch size for reads from the wrapped reader.
const READ_CHUNK: usize = 4096;

fn into_io(err: Safe64Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

/// A writer that encodes every byte written through it, emitting
/// safe-alphabet characters (as ASCII bytes) to the wrapped writer.
///
/// The unaligned tail of the written data stays buffered until
/// [`finish`](Safe64Writer::finish), which emits the final partial block.
/// Dropping the writer without calling `finish` loses at most the 2
/// pending bytes.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use safe64::Safe64Writer;
///
/// let mut writer = Safe64Writer::new(Vec::new());
/// writer.write_all(b"hello world").unwrap();
/// let encoded = writer.finish().unwrap();
/// assert_eq!(encoded, b"aGVsbG8gd29ybGQ");
/// ```
pub struct Safe64Writer<W: Write> {
    inner: W,
    transform: Safe64Transform,
    scratch: Vec<u8>,
}

impl<W: Write> Safe64Writer<W> {
    /// Wraps `inner`, encoding everything subsequently written.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            transform: Safe64Transform::encoder(),
            scratch: Vec::new(),
        }
    }

    /// Encodes and writes the final partial block, flushes the wrapped
    /// writer, and returns it.
    pub fn finish(mut self) -> io::Result<W> {
        let tail = self
            .transform
            .transform_final_block(&[])
            .map_err(into_io)?;
        self.inner.write_all(&tail)?;
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> Write for Safe64Writer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let needed = self.transform.output_capacity(buf.len());
        if self.scratch.len() < needed {
            self.scratch.resize(needed, 0);
        }
        let written = self
            .transform
            .transform_block(buf, &mut self.scratch[..needed])
            .map_err(into_io)?;
        self.inner.write_all(&self.scratch[..written])?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // The unaligned tail stays pending until finish().
        self.inner.flush()
    }
}

/// A reader that decodes safe-alphabet characters pulled from the wrapped
/// reader, serving plain bytes.
///
/// The transform is finalized exactly once, when the wrapped reader
/// reaches end-of-stream. Invalid characters and truncated streams
/// surface as [`io::ErrorKind::InvalidData`].
///
/// # Example
///
/// ```
/// use std::io::{Cursor, Read};
/// use safe64::Safe64Reader;
///
/// let mut reader = Safe64Reader::new(Cursor::new(b"aGVsbG8gd29ybGQ".to_vec()));
/// let mut decoded = Vec::new();
/// reader.read_to_end(&mut decoded).unwrap();
/// assert_eq!(decoded, b"hello world");
/// ```
pub struct Safe64Reader<R: Read> {
    inner: R,
    transform: Safe64Transform,
    decoded: Vec<u8>,
    pos: usize,
    eof: bool,
}

impl<R: Read> Safe64Reader<R> {
    /// Wraps `inner`, decoding everything subsequently read.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            transform: Safe64Transform::decoder(),
            decoded: Vec::new(),
            pos: 0,
            eof: false,
        }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Refills the internal buffer with at least one decoded byte, or
    /// finalizes on end-of-stream.
    fn fill(&mut self) -> io::Result<()> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            let n = self.inner.read(&mut chunk)?;
            if n == 0 {
                self.eof = true;
                self.decoded = self
                    .transform
                    .transform_final_block(&[])
                    .map_err(into_io)?;
                self.pos = 0;
                return Ok(());
            }
            let needed = self.transform.output_capacity(n);
            self.decoded.resize(needed, 0);
            let written = self
                .transform
                .transform_block(&chunk[..n], &mut self.decoded[..needed])
                .map_err(into_io)?;
            self.decoded.truncate(written);
            self.pos = 0;
            if written > 0 {
                return Ok(());
            }
            // Everything went into the carry; pull more input.
        }
    }
}

impl<R: Read> Read for Safe64Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.pos >= self.decoded.len() {
            if self.eof {
                return Ok(0);
            }
            self.fill()?;
            if self.pos >= self.decoded.len() {
                return Ok(0);
            }
        }
        let n = (self.decoded.len() - self.pos).min(buf.len());
        buf[..n].copy_from_slice(&self.decoded[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
