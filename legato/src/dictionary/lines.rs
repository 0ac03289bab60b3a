//! Byte-oriented line reading shared by the two parsers.

use std::io::{BufRead, BufReader, Read};

use crate::errors::Result;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads LF- or CRLF-terminated byte lines, consuming a UTF-8 BOM at the
/// start of the stream.
///
/// The reader is buffered internally, so callers should not wrap it in a
/// buffered reader themselves.
pub(crate) struct Lines<R> {
    reader: BufReader<R>,
    buf: Vec<u8>,
    first: bool,
    num: usize,
}

impl<R: Read> Lines<R> {
    pub(crate) fn new(rdr: R) -> Self {
        Self {
            reader: BufReader::new(rdr),
            buf: Vec::new(),
            first: true,
            num: 0,
        }
    }

    /// Returns the next `(line number, line)` without its terminator, or
    /// `None` at end of input.
    pub(crate) fn next_line(&mut self) -> Result<Option<(usize, &[u8])>> {
        self.buf.clear();
        let n = self.reader.read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }
        self.num += 1;
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        let mut line: &[u8] = &self.buf;
        if std::mem::take(&mut self.first) {
            line = line.strip_prefix(BOM).unwrap_or(line);
        }
        Ok(Some((self.num, line)))
    }
}
