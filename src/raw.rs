//! Default codec for named-case and flag-set types whose wire form is a plain integer.

use super::{
    container::Decoder,
    encoder::Encoder,
    error::{DecodeError, EncodeError},
    primitive::Primitive,
};
use std::any::type_name;

/// A type backed by a fixed-width integer.
pub trait RawValue: Sized {
    type Raw: Primitive;

    fn to_raw(&self) -> Self::Raw;

    /// `None` if no case matches `raw`.
    fn from_raw(raw: Self::Raw) -> Option<Self>;
}

/// Decodes the underlying integer and maps it to `T`.
pub fn decode_raw<T: RawValue>(decoder: &Decoder<'_>) -> Result<T, DecodeError> {
    let raw = decoder
        .container(Some(<T::Raw as Primitive>::WIDTH))
        .decode_integer::<T::Raw>()?;
    T::from_raw(raw).ok_or_else(|| {
        DecodeError::corrupted(format!(
            "cannot initialize {} from invalid {} value {raw:?}",
            type_name::<T>(),
            <T::Raw as Primitive>::NAME,
        ))
    })
}

/// Encodes the underlying integer unchanged.
pub fn encode_raw<T: RawValue>(value: &T, out: &mut Encoder) -> Result<(), EncodeError> {
    out.container().encode_integer(value.to_raw());
    Ok(())
}

/// Implements [`Encodable`](crate::Encodable) and [`Decodable`](crate::Decodable) for types
/// implementing [`RawValue`].
#[macro_export]
macro_rules! impl_raw_value_codable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Decodable for $ty {
                type Error = $crate::DecodeError;

                fn decode(decoder: &$crate::Decoder<'_>) -> Result<Self, Self::Error> {
                    $crate::raw::decode_raw(decoder)
                }
            }

            impl $crate::Encodable for $ty {
                fn encode(&self, out: &mut $crate::Encoder) -> Result<(), $crate::EncodeError> {
                    $crate::raw::encode_raw(self, out)
                }
            }
        )+
    };
}
