use derive_more::Display;

/// Text encodings understood by string decode and encode operations.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// 7-bit ASCII.
    #[display("ascii")]
    Ascii,
    #[display("utf-8")]
    Utf8,
    /// ISO 8859-1.
    #[display("iso-8859-1")]
    Latin1,
    #[display("utf-16le")]
    Utf16Le,
    #[display("utf-16be")]
    Utf16Be,
}

impl TextEncoding {
    /// Returns `None` if `bytes` are not valid under this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Ascii => bytes
                .is_ascii()
                .then(|| bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            Self::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            Self::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
        }
    }

    /// Returns `None` if `value` has characters this encoding cannot represent.
    pub fn encode(self, value: &str) -> Option<Vec<u8>> {
        match self {
            Self::Ascii => value.is_ascii().then(|| value.as_bytes().to_vec()),
            Self::Utf8 => Some(value.as_bytes().to_vec()),
            Self::Latin1 => value.chars().map(|c| u8::try_from(c).ok()).collect(),
            Self::Utf16Le => Some(value.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Self::Utf16Be => Some(value.encode_utf16().flat_map(u16::to_be_bytes).collect()),
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units = bytes.chunks_exact(2).map(|c| unit([c[0], c[1]]));
    char::decode_utf16(units).collect::<Result<_, _>>().ok()
}
