//! Space-counting cursor over a borrowed syslog line.

use crate::error::{Error, Result};

const SPACE: u8 = b' ';

/// A read-only cursor over one input line.
///
/// The cursor never copies the buffer; words are returned as sub-slices.
#[derive(Debug)]
pub(crate) struct ScanCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ScanCursor<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Advance past exactly `n` spaces, leaving the cursor right after the last one.
    ///
    /// On failure the cursor is left at the end of the buffer.
    pub(crate) fn skip(&mut self, n: usize) -> Result<()> {
        let mut skipped = 0;
        while self.pos < self.buf.len() {
            let byte = self.buf[self.pos];
            self.pos += 1;
            if byte == SPACE {
                skipped += 1;
                if skipped == n {
                    return Ok(());
                }
            }
        }
        Err(Error::UnexpectedEndOfInput)
    }

    /// Return the bytes up to the next space and move past that space.
    pub(crate) fn next_word(&mut self) -> Result<&'a [u8]> {
        let start = self.pos;
        self.skip(1)?;
        Ok(&self.buf[start..self.pos - 1])
    }

    /// Everything after the cursor. May be empty.
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}
