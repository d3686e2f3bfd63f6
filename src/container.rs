use super::{
    context::Context, cursor::BufferedCursor, error::DecodeError, primitive::Primitive,
    source::ByteSource, text::TextEncoding, Decodable,
};
use bytes::Bytes;
use std::{
    any::type_name,
    cell::{Cell, RefCell},
    rc::Rc,
    sync::Arc,
};

/// Cursor shared by every container view of one decode level.
///
/// Containers are views, not snapshots: reading through any of them advances the one shared
/// position.
pub(crate) type SharedCursor<'s> = Rc<RefCell<BufferedCursor<'s>>>;

/// Remaining quota of one container, readable by the values decoded through it.
pub(crate) type Quota = Rc<Cell<Option<usize>>>;

/// Handle given to [`Decodable::decode`], producing containers over the value's bytes.
#[derive(Debug)]
pub struct Decoder<'s> {
    cursor: SharedCursor<'s>,
    context: Arc<Context>,
    /// Quota of the container this value is decoded from, `None` at the top level.
    parent: Option<Quota>,
}

impl<'s> Decoder<'s> {
    pub(crate) fn new(
        cursor: SharedCursor<'s>,
        context: Arc<Context>,
        parent: Option<Quota>,
    ) -> Self {
        Self {
            cursor,
            context,
            parent,
        }
    }

    /// What the value may still read: the parent's quota as of now, plus whatever was already
    /// pulled from the parent into this decoder's cursor without being consumed.
    fn limit(&self) -> Option<usize> {
        let remaining = self.parent.as_ref()?.get()?;
        Some(remaining + self.cursor.borrow().buffered())
    }

    /// Returns a container allowed to read at most `max_length` bytes, further capped by what
    /// the enclosing container has left at the time of the call. `None` means no bound of its
    /// own.
    pub fn container(&self, max_length: Option<usize>) -> DecodingContainer<'s> {
        DecodingContainer {
            cursor: Rc::clone(&self.cursor),
            context: Arc::clone(&self.context),
            remaining: Rc::new(Cell::new(min_quota(self.limit(), max_length))),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Whether the underlying cursor has run out of data. May pull one byte from the source.
    pub fn probe_end(&self) -> Result<bool, DecodeError> {
        self.cursor.borrow_mut().probe_end()
    }
}

fn min_quota(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Optionally length-bounded view over a shared cursor.
///
/// Bytes read through a container's own operations are deducted from its own quota only.
/// Other containers over the same cursor keep their own, independent bookkeeping.
#[derive(Debug)]
pub struct DecodingContainer<'s> {
    cursor: SharedCursor<'s>,
    context: Arc<Context>,
    remaining: Quota,
}

impl<'s> DecodingContainer<'s> {
    /// Remaining quota, `None` if unbounded.
    pub fn remaining(&self) -> Option<usize> {
        self.remaining.get()
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// A bounded container is at its end once its quota is used up, even if the cursor still
    /// holds bytes of an outer scope. An unbounded one ends with the cursor.
    pub fn is_at_end(&self) -> bool {
        match self.remaining.get() {
            Some(remaining) => remaining == 0,
            None => self.cursor.borrow().is_at_end(),
        }
    }

    /// Decodes a fixed-width number from its little-endian representation.
    pub fn decode_integer<P: Primitive>(&mut self) -> Result<P, DecodeError> {
        let bytes = self.pull(P::WIDTH)?;
        if bytes.len() < P::WIDTH {
            return Err(DecodeError::corrupted(format!(
                "not enough data to decode {}: needed {}, received {}",
                P::NAME,
                P::WIDTH,
                bytes.len()
            )));
        }
        Ok(P::from_le_slice(&bytes))
    }

    /// Decodes text up to (not including) `terminator`, consuming the terminator too.
    ///
    /// A bounded container never scans past its quota.
    pub fn decode_string(
        &mut self,
        encoding: TextEncoding,
        terminator: u8,
    ) -> Result<String, DecodeError> {
        let limit = self.remaining().unwrap_or(usize::MAX);
        let (data, found) = self
            .cursor
            .borrow_mut()
            .read_until_within(terminator, limit)?;
        self.deduct(data.len() + usize::from(found));
        if !found {
            return Err(DecodeError::corrupted(format!(
                "unable to find terminator {terminator:#04x} for string"
            )));
        }
        decode_text(&data, encoding)
    }

    /// Decodes every remaining byte of this container as text.
    pub fn decode_string_to_end(&mut self, encoding: TextEncoding) -> Result<String, DecodeError> {
        let data = self.decode_remainder()?;
        decode_text(&data, encoding)
    }

    /// Decodes exactly `length` bytes.
    pub fn decode_bytes(&mut self, length: usize) -> Result<Bytes, DecodeError> {
        let data = self.pull(length)?;
        if data.len() != length {
            return Err(DecodeError::short_read(length, data.len()));
        }
        Ok(data)
    }

    /// Decodes whatever is left: the rest of the quota, or the rest of the cursor if
    /// unbounded. Never fails for lack of data.
    pub fn decode_remainder(&mut self) -> Result<Bytes, DecodeError> {
        self.pull(self.remaining().unwrap_or(usize::MAX))
    }

    /// Returns the next `length` bytes without consuming them.
    pub fn peek(&self, length: usize) -> Result<Bytes, DecodeError> {
        let max = self.remaining().map_or(length, |remaining| remaining.min(length));
        let data = self.cursor.borrow_mut().peek(max)?;
        if data.len() != length {
            return Err(DecodeError::short_read(length, data.len()));
        }
        Ok(data)
    }

    /// Decodes a nested value.
    ///
    /// The value reads through a fresh cursor whose source is this container, so every byte it
    /// consumes is charged to this container's quota, however deep the nesting goes.
    pub fn decode<T: Decodable>(&mut self) -> Result<T, T::Error> {
        tracing::trace!(
            ty = type_name::<T>(),
            remaining = ?self.remaining(),
            "decoding nested value"
        );
        let quota = Rc::clone(&self.remaining);
        let context = Arc::clone(&self.context);
        // the bridge pulls exactly what the nested cursor asks for, so nothing is stranded in
        // its buffer when the nested decode returns
        let cursor = BufferedCursor::with_capacity(ContainerSource { container: self }, 0);
        let decoder = Decoder::new(Rc::new(RefCell::new(cursor)), context, Some(quota));
        T::decode(&decoder)
    }

    /// Returns an independent container over the same cursor, bounded by `max_length` and by
    /// this container's remaining quota.
    ///
    /// Reads through the nested container advance the shared cursor but leave this container's
    /// quota untouched.
    pub fn nested_container(&self, max_length: Option<usize>) -> DecodingContainer<'s> {
        DecodingContainer {
            cursor: Rc::clone(&self.cursor),
            context: Arc::clone(&self.context),
            remaining: Rc::new(Cell::new(min_quota(self.remaining(), max_length))),
        }
    }

    /// Reads up to `length` bytes, capped by the quota, and charges them to the quota.
    fn pull(&mut self, length: usize) -> Result<Bytes, DecodeError> {
        let max = self.remaining().map_or(length, |remaining| remaining.min(length));
        let data = self.cursor.borrow_mut().read(max)?;
        self.deduct(data.len());
        Ok(data)
    }

    fn deduct(&mut self, n: usize) {
        if let Some(remaining) = self.remaining.get() {
            self.remaining.set(Some(remaining.saturating_sub(n)));
        }
    }
}

fn decode_text(data: &[u8], encoding: TextEncoding) -> Result<String, DecodeError> {
    encoding.decode(data).ok_or_else(|| {
        DecodeError::corrupted(format!(
            "unable to create string from data with {encoding} encoding"
        ))
    })
}

/// Exposes a container's own bounded pull as a [`ByteSource`].
struct ContainerSource<'c, 's> {
    container: &'c mut DecodingContainer<'s>,
}

impl ByteSource for ContainerSource<'_, '_> {
    fn read(&mut self, hint: usize) -> Result<Option<Bytes>, DecodeError> {
        let data = self.container.pull(hint)?;
        Ok((!data.is_empty()).then_some(data))
    }

    fn is_at_end(&self) -> bool {
        self.container.is_at_end()
    }
}
