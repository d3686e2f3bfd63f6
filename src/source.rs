use super::error::DecodeError;
use auto_impl::auto_impl;
use bytes::Bytes;
use std::io::{self, Read};

/// Pull-based supplier of raw byte chunks.
///
/// Position is owned by the source. The cursor asks for `hint` bytes, but the hint is advisory:
/// a source may hand back fewer (or more) bytes per call. `None` signals that no more data will
/// ever be available.
#[auto_impl(&mut, Box)]
pub trait ByteSource {
    fn read(&mut self, hint: usize) -> Result<Option<Bytes>, DecodeError>;

    fn is_at_end(&self) -> bool;
}

/// Finite in-memory byte sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SliceSource {
    data: Bytes,
}

impl SliceSource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.data.len()
    }
}

impl ByteSource for SliceSource {
    fn read(&mut self, hint: usize) -> Result<Option<Bytes>, DecodeError> {
        if self.data.is_empty() {
            return Ok(None);
        }
        let n = hint.clamp(1, self.data.len());
        Ok(Some(self.data.split_to(n)))
    }

    fn is_at_end(&self) -> bool {
        self.data.is_empty()
    }
}

/// Adapts any [`std::io::Read`] (files, sockets, pipes) into a [`ByteSource`].
///
/// End of data is only known once the reader returns 0, so `is_at_end` stays false until a pull
/// has observed it.
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
    chunk_size: usize,
    eof: bool,
}

impl<R: Read> ReadSource<R> {
    pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, Self::DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk_size: chunk_size.max(1),
            eof: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn read(&mut self, hint: usize) -> Result<Option<Bytes>, DecodeError> {
        if self.eof {
            return Ok(None);
        }
        let mut buf = vec![0; hint.clamp(1, self.chunk_size)];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(None);
                }
                Ok(n) => {
                    buf.truncate(n);
                    return Ok(Some(Bytes::from(buf)));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.eof
    }
}

/// Type-erased source driven by a read closure.
///
/// The source is considered exhausted once the closure returns `None` or an empty chunk.
pub struct FnSource<F> {
    read: F,
    done: bool,
}

impl<F> FnSource<F>
where
    F: FnMut(usize) -> Result<Option<Bytes>, DecodeError>,
{
    pub fn new(read: F) -> Self {
        Self { read, done: false }
    }
}

impl<F> ByteSource for FnSource<F>
where
    F: FnMut(usize) -> Result<Option<Bytes>, DecodeError>,
{
    fn read(&mut self, hint: usize) -> Result<Option<Bytes>, DecodeError> {
        if self.done {
            return Ok(None);
        }
        match (self.read)(hint)? {
            Some(chunk) if !chunk.is_empty() => Ok(Some(chunk)),
            _ => {
                self.done = true;
                Ok(None)
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn slice_source_respects_hint() {
        let mut source = SliceSource::new(hex!("0001020304").to_vec());
        assert!(!source.is_at_end());
        assert_eq!(source.read(2).unwrap().unwrap(), &hex!("0001")[..]);
        assert_eq!(source.read(10).unwrap().unwrap(), &hex!("020304")[..]);
        assert!(source.is_at_end());
        assert!(source.read(1).unwrap().is_none());
    }

    #[test]
    fn read_source_learns_end_by_reading() {
        let data = hex!("AABBCC");
        let mut source = ReadSource::with_chunk_size(&data[..], 2);
        assert_eq!(source.read(100).unwrap().unwrap(), &hex!("AABB")[..]);
        assert_eq!(source.read(100).unwrap().unwrap(), &hex!("CC")[..]);
        assert!(!source.is_at_end());
        assert!(source.read(100).unwrap().is_none());
        assert!(source.is_at_end());
    }

    #[test]
    fn read_source_surfaces_io_errors() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
            }
        }

        let mut source = ReadSource::new(Broken);
        assert!(matches!(
            source.read(4),
            Err(DecodeError::Source(e)) if e.kind() == io::ErrorKind::ConnectionReset
        ));
    }

    #[test]
    fn fn_source_stops_on_empty_chunk() {
        let mut chunks = vec![Bytes::new(), Bytes::from_static(b"ab")];
        let mut source = FnSource::new(move |_| Ok(chunks.pop()));
        assert_eq!(source.read(1).unwrap().unwrap(), &b"ab"[..]);
        assert!(source.read(1).unwrap().is_none());
        assert!(source.is_at_end());
        assert!(source.read(1).unwrap().is_none());
    }
}
