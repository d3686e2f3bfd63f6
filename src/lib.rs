//! Symmetric binary serialization built around length-bounded containers.
//!
//! The crate does not define a wire format. Types describe their own layout by implementing
//! [`Decodable`] and [`Encodable`] against the container primitives: little-endian integers,
//! terminated or trailing strings, exact byte runs, and nested values.
//!
//! Decoding reads incrementally from a [`ByteSource`], so input can come from memory, files or
//! sockets. Every nested [`DecodingContainer::decode`] reads through its parent container, which
//! keeps each length-prefixed scope inside its budget without any global bookkeeping.

mod binary;
mod container;
mod context;
mod cursor;
mod encoder;
mod error;
mod imp;
mod primitive;
pub mod raw;
mod source;
mod text;

pub use self::{
    binary::{decode, encode, BinaryDecoder, BinaryEncoder, Session},
    container::{Decoder, DecodingContainer},
    context::{Context, ContextKey},
    cursor::BufferedCursor,
    encoder::{Encoder, EncodingContainer},
    error::{DecodeError, EncodeError},
    primitive::Primitive,
    raw::RawValue,
    source::{ByteSource, FnSource, ReadSource, SliceSource},
    text::TextEncoding,
};
#[doc(hidden)]
pub use anyhow;
use auto_impl::auto_impl;
#[cfg(feature = "derive")]
pub use binary_codable_derive::*;

#[auto_impl(&, Box, Arc)]
pub trait Encodable {
    fn encode(&self, out: &mut Encoder) -> Result<(), EncodeError>;
}

pub trait Decodable: Sized {
    type Error: From<DecodeError>;

    fn decode(decoder: &Decoder<'_>) -> Result<Self, Self::Error>;
}

/// A type that converts both ways.
pub trait Codable: Encodable + Decodable {}

impl<T: Encodable + Decodable> Codable for T {}
