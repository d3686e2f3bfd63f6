use super::{error::DecodeError, source::ByteSource};
use bytes::{Buf, Bytes, BytesMut};
use std::fmt;

/// Incremental buffer with a single forward cursor over a [`ByteSource`].
///
/// Chunks are pulled on demand and appended to a growable buffer; consumed bytes are trimmed
/// from the front. The buffer never shrinks its allocation, which matters for long-running
/// sessions over endless sources.
pub struct BufferedCursor<'s> {
    source: Box<dyn ByteSource + 's>,
    buffer: BytesMut,
    exhausted: bool,
    position: usize,
}

impl<'s> BufferedCursor<'s> {
    pub const DEFAULT_CAPACITY: usize = 1024;

    pub fn new(source: impl ByteSource + 's) -> Self {
        Self::with_capacity(source, Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(source: impl ByteSource + 's, capacity: usize) -> Self {
        Self {
            source: Box::new(source),
            buffer: BytesMut::with_capacity(capacity),
            exhausted: false,
            position: 0,
        }
    }

    /// Returns up to `n` bytes without advancing the cursor.
    ///
    /// Fewer than `n` bytes are returned only if the source ran dry.
    pub fn peek(&mut self, n: usize) -> Result<Bytes, DecodeError> {
        self.fill(n)?;
        let n = n.min(self.buffer.len());
        Ok(Bytes::copy_from_slice(&self.buffer[..n]))
    }

    /// Returns up to `n` bytes and advances the cursor past them.
    pub fn read(&mut self, n: usize) -> Result<Bytes, DecodeError> {
        self.fill(n)?;
        let n = n.min(self.buffer.len());
        Ok(self.take(n))
    }

    /// Consumes bytes up to and including the first `delimiter`.
    ///
    /// Returns the bytes preceding the delimiter and whether it was found. When the source runs
    /// dry first, every remaining byte is consumed and returned.
    pub fn read_until(&mut self, delimiter: u8) -> Result<(Bytes, bool), DecodeError> {
        self.read_until_within(delimiter, usize::MAX)
    }

    /// Same as [`Self::read_until`], but never consumes more than `limit` bytes, delimiter
    /// included.
    pub fn read_until_within(
        &mut self,
        delimiter: u8,
        limit: usize,
    ) -> Result<(Bytes, bool), DecodeError> {
        let mut scanned = 0;
        let found = loop {
            let window = self.buffer.len().min(limit);
            if let Some(i) = self.buffer[scanned..window]
                .iter()
                .position(|&b| b == delimiter)
            {
                break Some(scanned + i);
            }
            scanned = window;
            // one byte at a time so that nothing past the delimiter is pulled
            if scanned >= limit || !self.pull(1)? {
                break None;
            }
        };

        Ok(match found {
            Some(i) => {
                let data = self.take(i);
                self.buffer.advance(1);
                self.position += 1;
                (data, true)
            }
            None => {
                let n = self.buffer.len().min(limit);
                (self.take(n), false)
            }
        })
    }

    /// True iff the source is exhausted and nothing is left in the buffer.
    pub fn is_at_end(&self) -> bool {
        self.buffer.is_empty() && (self.exhausted || self.source.is_at_end())
    }

    /// Like [`Self::is_at_end`], but pulls up to one byte first, so sources that only learn
    /// about exhaustion by reading report it reliably.
    pub fn probe_end(&mut self) -> Result<bool, DecodeError> {
        self.fill(1)?;
        Ok(self.buffer.is_empty())
    }

    /// Total number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes pulled from the source but not yet consumed.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    fn fill(&mut self, n: usize) -> Result<(), DecodeError> {
        while self.buffer.len() < n {
            if !self.pull(n - self.buffer.len())? {
                break;
            }
        }
        Ok(())
    }

    fn pull(&mut self, hint: usize) -> Result<bool, DecodeError> {
        if self.exhausted {
            return Ok(false);
        }
        match self.source.read(hint)? {
            Some(chunk) if !chunk.is_empty() => {
                self.buffer.extend_from_slice(&chunk);
                Ok(true)
            }
            _ => {
                self.exhausted = true;
                Ok(false)
            }
        }
    }

    fn take(&mut self, n: usize) -> Bytes {
        self.position += n;
        self.buffer.split_to(n).freeze()
    }
}

impl fmt::Debug for BufferedCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedCursor")
            .field("buffered", &self.buffer.len())
            .field("exhausted", &self.exhausted)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}
