//! The 13-byte GIF header: signature, version tag, logical screen size, packed flags,
//! background color index and pixel aspect ratio.

use binary_codable::*;
use bitflags::bitflags;
use hex_literal::hex;

/// Header of a 46x37 GIF89a with a four-entry global color table, followed by the start of
/// that table.
const UNDER_CONSTRUCTION: [u8; 19] = hex!("474946383961 2E00 2500 F1 00 00 FFFFFF000000");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Version {
    Gif87a,
    Gif89a,
}

impl Decodable for Version {
    type Error = DecodeError;

    fn decode(decoder: &Decoder<'_>) -> Result<Self, Self::Error> {
        let mut container = decoder.container(None);
        match container.decode_string_to_end(TextEncoding::Ascii)?.as_str() {
            "87a" => Ok(Self::Gif87a),
            "89a" => Ok(Self::Gif89a),
            other => Err(DecodeError::corrupted(format!("unknown GIF version {other:?}"))),
        }
    }
}

impl Encodable for Version {
    fn encode(&self, out: &mut Encoder) -> Result<(), EncodeError> {
        let tag = match self {
            Self::Gif87a => "87a",
            Self::Gif89a => "89a",
        };
        out.container().encode_string(tag, TextEncoding::Ascii, None)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Packed: u8 {
        const GLOBAL_COLOR_TABLE_SIZE_MASK = 0b0000_0111;
        const COLOR_TABLE_SORT = 0b0000_1000;
        const COLOR_RESOLUTION_MASK = 0b0111_0000;
        const GLOBAL_COLOR_TABLE = 0b1000_0000;
    }
}

impl RawValue for Packed {
    type Raw = u8;

    fn to_raw(&self) -> u8 {
        self.bits()
    }

    fn from_raw(raw: u8) -> Option<Self> {
        Self::from_bits(raw)
    }
}

impl_raw_value_codable!(Packed);

#[derive(Clone, Debug, PartialEq)]
struct GifHeader {
    version: Version,
    screen_width: u16,
    screen_height: u16,
    global_color_table_entries: usize,
    color_table_sorted: bool,
    color_resolution: u8,
    has_global_color_table: bool,
    background_color_index: u8,
    aspect_ratio: u8,
}

impl Decodable for GifHeader {
    type Error = DecodeError;

    fn decode(decoder: &Decoder<'_>) -> Result<Self, Self::Error> {
        let mut container = decoder.container(Some(13));

        if container.decode_bytes(3)? != b"GIF"[..] {
            return Err(DecodeError::corrupted("missing GIF header"));
        }

        let version = container.nested_container(Some(3)).decode()?;
        let screen_width = container.decode_integer()?;
        let screen_height = container.decode_integer()?;

        let packed = container.decode::<Packed>()?;
        let table_size = (packed & Packed::GLOBAL_COLOR_TABLE_SIZE_MASK).bits();

        Ok(Self {
            version,
            screen_width,
            screen_height,
            global_color_table_entries: 1 << (usize::from(table_size) + 1),
            color_table_sorted: packed.contains(Packed::COLOR_TABLE_SORT),
            color_resolution: ((packed & Packed::COLOR_RESOLUTION_MASK).bits() >> 4) + 1,
            has_global_color_table: packed.contains(Packed::GLOBAL_COLOR_TABLE),
            background_color_index: container.decode_integer()?,
            aspect_ratio: container.decode_integer()?,
        })
    }
}

impl Encodable for GifHeader {
    fn encode(&self, out: &mut Encoder) -> Result<(), EncodeError> {
        let mut container = out.container();

        container.encode_string("GIF", TextEncoding::Ascii, None)?;
        container.encode(&self.version)?;
        container.encode_integer(self.screen_width);
        container.encode_integer(self.screen_height);

        let table_size = (self.global_color_table_entries >> 1) as u8 - 1;
        let mut packed = Packed::from_bits_retain(table_size);
        packed.set(Packed::COLOR_TABLE_SORT, self.color_table_sorted);
        packed |= Packed::from_bits_retain((self.color_resolution - 1) << 4);
        packed.set(Packed::GLOBAL_COLOR_TABLE, self.has_global_color_table);
        container.encode(&packed)?;

        container.encode_integer(self.background_color_index);
        container.encode_integer(self.aspect_ratio);
        Ok(())
    }
}

fn under_construction() -> GifHeader {
    GifHeader {
        version: Version::Gif89a,
        screen_width: 46,
        screen_height: 37,
        global_color_table_entries: 4,
        color_table_sorted: false,
        color_resolution: 8,
        has_global_color_table: true,
        background_color_index: 0,
        aspect_ratio: 0,
    }
}

#[test]
fn decoding() {
    let header = decode::<GifHeader>(UNDER_CONSTRUCTION.to_vec()).unwrap();
    assert_eq!(header, under_construction());
}

#[test]
fn encoding() {
    let out = encode(&under_construction()).unwrap();
    assert_eq!(out, UNDER_CONSTRUCTION[..13]);
}

#[test]
fn header_then_color_table() {
    let source = SliceSource::new(UNDER_CONSTRUCTION.to_vec());
    let mut session = BinaryDecoder::new().session(source);
    assert_eq!(session.decode::<GifHeader>().unwrap(), under_construction());
    assert_eq!(session.position(), 13);
    assert_eq!(session.decode::<[u8; 3]>().unwrap(), [0xFF; 3]);
}

#[test]
fn wrong_signature() {
    let mut data = UNDER_CONSTRUCTION;
    data[0] = b'J';
    let err = decode::<GifHeader>(data.to_vec()).unwrap_err();
    assert_eq!(err.description(), Some("missing GIF header"));
}

#[test]
fn unknown_version() {
    let mut data = UNDER_CONSTRUCTION;
    data[5] = b'b';
    let err = decode::<GifHeader>(data.to_vec()).unwrap_err();
    assert!(err.description().unwrap().contains("\"89b\""));
}

#[test]
fn truncated_header() {
    let err = decode::<GifHeader>(UNDER_CONSTRUCTION[..9].to_vec()).unwrap_err();
    assert!(err.description().unwrap().contains("u16"));
}
