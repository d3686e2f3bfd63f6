use super::{
    container::{Decoder, SharedCursor},
    context::{Context, ContextKey},
    cursor::BufferedCursor,
    encoder::Encoder,
    error::{DecodeError, EncodeError},
    source::{ByteSource, SliceSource},
    Decodable, Encodable,
};
use bytes::Bytes;
use std::{any::type_name, cell::RefCell, rc::Rc, sync::Arc};

/// Decodes values from bytes or from any [`ByteSource`].
#[derive(Clone, Debug)]
pub struct BinaryDecoder {
    context: Arc<Context>,
    capacity: usize,
}

impl Default for BinaryDecoder {
    fn default() -> Self {
        Self {
            context: Arc::default(),
            capacity: BufferedCursor::DEFAULT_CAPACITY,
        }
    }
}

impl BinaryDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial capacity of the cursor buffer.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Adds an entry to the context shared with every decode routine.
    pub fn with_context<T>(mut self, key: impl Into<ContextKey>, value: T) -> Self
    where
        T: std::any::Any + Send + Sync,
    {
        self.context = Arc::new(Context::clone(&self.context).with(key, value));
        self
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn decode<T: Decodable>(&self, input: impl Into<Bytes>) -> Result<T, T::Error> {
        self.decode_from_source(SliceSource::new(input))
    }

    /// Decodes "array of T": elements back to back until the input is exhausted.
    ///
    /// Same as `decode::<Vec<T>>`, spelled out for call sites where the element type is the
    /// interesting part.
    pub fn decode_sequence<T: Decodable>(
        &self,
        input: impl Into<Bytes>,
    ) -> Result<Vec<T>, T::Error> {
        self.decode(input)
    }

    pub fn decode_from_source<'s, T: Decodable>(
        &self,
        source: impl ByteSource + 's,
    ) -> Result<T, T::Error> {
        self.session(source).decode()
    }

    /// Opens a session for decoding several top-level values off one source, as when reading
    /// consecutive messages from a socket.
    pub fn session<'s>(&self, source: impl ByteSource + 's) -> Session<'s> {
        Session {
            cursor: Rc::new(RefCell::new(BufferedCursor::with_capacity(
                source,
                self.capacity,
            ))),
            context: Arc::clone(&self.context),
            failed: false,
        }
    }
}

/// One cursor over one source, decoded value by value.
///
/// Bytes consumed by a failed decode are gone, so a session refuses to decode anything after
/// a failure.
#[derive(Debug)]
pub struct Session<'s> {
    cursor: SharedCursor<'s>,
    context: Arc<Context>,
    failed: bool,
}

impl<'s> Session<'s> {
    pub fn decode<T: Decodable>(&mut self) -> Result<T, T::Error> {
        if self.failed {
            return Err(DecodeError::corrupted("cursor reused after a failed decode").into());
        }
        let start = self.position();
        tracing::trace!(ty = type_name::<T>(), start, "decoding");
        let decoder = Decoder::new(Rc::clone(&self.cursor), Arc::clone(&self.context), None);
        let res = T::decode(&decoder);
        if res.is_err() {
            self.failed = true;
            tracing::debug!(ty = type_name::<T>(), start, "decode failed");
        } else {
            tracing::trace!(
                ty = type_name::<T>(),
                consumed = self.position() - start,
                "decoded"
            );
        }
        res
    }

    /// Whether the source is exhausted. May pull one byte.
    pub fn is_at_end(&self) -> Result<bool, DecodeError> {
        self.cursor.borrow_mut().probe_end()
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.cursor.borrow().position()
    }
}

/// Encodes values into a byte vector.
#[derive(Clone, Copy, Debug)]
pub struct BinaryEncoder {
    capacity: usize,
}

impl Default for BinaryEncoder {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
        }
    }
}

impl BinaryEncoder {
    /// Initial size of the output buffer.
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::default()
    }

    /// Initial capacity of the output buffer.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn encode<T: Encodable + ?Sized>(&self, value: &T) -> Result<Vec<u8>, EncodeError> {
        let mut out = Encoder::with_capacity(self.capacity);
        value.encode(&mut out)?;
        tracing::trace!(ty = type_name::<T>(), len = out.len(), "encoded");
        Ok(out.output())
    }
}

/// Decodes a `T` from `input` with an empty context.
pub fn decode<T: Decodable>(input: impl Into<Bytes>) -> Result<T, T::Error> {
    BinaryDecoder::new().decode(input)
}

pub fn encode<T: Encodable + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    BinaryEncoder::new().encode(value)
}
