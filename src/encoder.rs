use super::{error::EncodeError, primitive::Primitive, text::TextEncoding, Encodable};

/// Append-only sink handed to [`Encodable::encode`].
///
/// There is no quota on this side: output length is only known once a value has been written,
/// so formats that need a length prefix compute it and encode it ahead of the payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn container(&mut self) -> EncodingContainer<'_> {
        EncodingContainer { encoder: self }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn view_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn output(self) -> Vec<u8> {
        self.buf
    }
}

/// Sequential writer over an [`Encoder`].
#[derive(Debug)]
pub struct EncodingContainer<'e> {
    encoder: &'e mut Encoder,
}

impl EncodingContainer<'_> {
    /// Appends `value` in little-endian order.
    pub fn encode_integer<P: Primitive>(&mut self, value: P) {
        value.put_le(&mut self.encoder.buf)
    }

    /// Appends `value` under `encoding`, followed by `terminator` if given.
    pub fn encode_string(
        &mut self,
        value: &str,
        encoding: TextEncoding,
        terminator: Option<u8>,
    ) -> Result<(), EncodeError> {
        let data = encoding.encode(value).ok_or_else(|| {
            tracing::debug!(value, %encoding, "string not representable");
            EncodeError::IncompatibleStringEncoding(format!(
                "the string {value:?} could not be encoded using {encoding}"
            ))
        })?;
        self.encoder.buf.extend_from_slice(&data);
        if let Some(terminator) = terminator {
            self.encoder.buf.push(terminator);
        }
        Ok(())
    }

    /// Appends raw bytes verbatim.
    pub fn encode_bytes(&mut self, bytes: impl AsRef<[u8]>) {
        self.encoder.buf.extend_from_slice(bytes.as_ref())
    }

    /// Writes a nested value into the same sink.
    pub fn encode<T: Encodable + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        value.encode(self.encoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn integers_are_little_endian() {
        let mut encoder = Encoder::new();
        let mut container = encoder.container();
        container.encode_integer(0x7856_3412_u32);
        container.encode_integer(-1_i8);
        assert_eq!(encoder.output(), hex!("12345678FF"));
    }

    #[test]
    fn strings_and_terminators() {
        let mut encoder = Encoder::new();
        let mut container = encoder.container();
        container
            .encode_string("GIF", TextEncoding::Ascii, None)
            .unwrap();
        container
            .encode_string("hi", TextEncoding::Utf8, Some(0))
            .unwrap();
        container.encode_bytes([0xAA, 0xBB]);
        assert_eq!(encoder.view_bytes(), b"GIFhi\0\xAA\xBB");
    }

    #[test]
    fn unrepresentable_string() {
        let mut encoder = Encoder::new();
        let err = encoder
            .container()
            .encode_string("\u{1F600}", TextEncoding::Latin1, Some(0))
            .unwrap_err();
        assert!(matches!(err, EncodeError::IncompatibleStringEncoding(_)));
        assert!(encoder.is_empty());
    }
}
