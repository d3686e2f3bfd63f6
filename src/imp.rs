use super::{
    container::Decoder,
    encoder::Encoder,
    error::{DecodeError, EncodeError},
    primitive::Primitive,
    Decodable, Encodable,
};
use arrayvec::ArrayVec;

macro_rules! impl_codable_for_primitive {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Decodable for $ty {
                type Error = DecodeError;

                fn decode(decoder: &Decoder<'_>) -> Result<Self, Self::Error> {
                    decoder
                        .container(Some(<$ty as Primitive>::WIDTH))
                        .decode_integer()
                }
            }

            impl Encodable for $ty {
                fn encode(&self, out: &mut Encoder) -> Result<(), EncodeError> {
                    out.container().encode_integer(*self);
                    Ok(())
                }
            }
        )+
    };
}

impl_codable_for_primitive!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl<const LEN: usize> Decodable for [u8; LEN] {
    type Error = DecodeError;

    fn decode(decoder: &Decoder<'_>) -> Result<Self, Self::Error> {
        let mut v = [0; LEN];
        v.copy_from_slice(&decoder.container(Some(LEN)).decode_bytes(LEN)?);
        Ok(v)
    }
}

impl<const LEN: usize> Encodable for [u8; LEN] {
    fn encode(&self, out: &mut Encoder) -> Result<(), EncodeError> {
        out.container().encode_bytes(self);
        Ok(())
    }
}

/// Sequence decode: one element after another until the source runs dry.
impl<T> Decodable for Vec<T>
where
    T: Decodable,
{
    type Error = T::Error;

    fn decode(decoder: &Decoder<'_>) -> Result<Self, Self::Error> {
        let mut v = Vec::new();
        while !decoder.probe_end()? {
            let mut container = decoder.container(None);
            v.push(container.decode::<T>()?);
        }
        tracing::trace!(len = v.len(), "decoded sequence");
        Ok(v)
    }
}

impl<T> Encodable for [T]
where
    T: Encodable,
{
    fn encode(&self, out: &mut Encoder) -> Result<(), EncodeError> {
        let mut container = out.container();
        for item in self {
            container.encode(item)?;
        }
        Ok(())
    }
}

impl<T> Encodable for Vec<T>
where
    T: Encodable,
{
    fn encode(&self, out: &mut Encoder) -> Result<(), EncodeError> {
        self.as_slice().encode(out)
    }
}

/// Sequence decode into fixed capacity; more than `LEN` elements is corrupted data.
impl<T, const LEN: usize> Decodable for ArrayVec<T, LEN>
where
    T: Decodable,
{
    type Error = T::Error;

    fn decode(decoder: &Decoder<'_>) -> Result<Self, Self::Error> {
        let mut v = Self::new();
        while !decoder.probe_end()? {
            let item = decoder.container(None).decode::<T>()?;
            v.try_push(item).map_err(|_| {
                DecodeError::corrupted(format!("sequence longer than capacity {LEN}"))
            })?;
        }
        Ok(v)
    }
}

impl<T, const LEN: usize> Encodable for ArrayVec<T, LEN>
where
    T: Encodable,
{
    fn encode(&self, out: &mut Encoder) -> Result<(), EncodeError> {
        self.as_slice().encode(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, encode};
    use hex_literal::hex;

    #[test]
    fn primitives() {
        assert_eq!(decode::<u32>(hex!("12345678").to_vec()).unwrap(), 0x7856_3412);
        assert_eq!(encode(&0x7856_3412_u32).unwrap(), hex!("12345678"));
        assert_eq!(decode::<i16>(hex!("FEFF").to_vec()).unwrap(), -2);
        assert_eq!(decode::<f32>(encode(&0.5_f32).unwrap()).unwrap(), 0.5);
    }

    #[test]
    fn primitive_sequence() {
        let v = decode::<Vec<u16>>(hex!("010002000300").to_vec()).unwrap();
        assert_eq!(v, [1, 2, 3]);
        assert_eq!(encode(&v).unwrap(), hex!("010002000300"));
    }

    #[test]
    fn sequence_with_partial_element() {
        let err = decode::<Vec<u16>>(hex!("010002").to_vec()).unwrap_err();
        assert!(err.description().unwrap().contains("u16"));
    }

    #[test]
    fn empty_sequence() {
        assert!(decode::<Vec<u64>>(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn fixed_bytes() {
        let v = decode::<[u8; 3]>(b"GIF89a".to_vec()).unwrap();
        assert_eq!(&v, b"GIF");
        assert!(decode::<[u8; 4]>(b"GIF".to_vec()).is_err());
        assert_eq!(encode(&v).unwrap(), b"GIF");
    }

    #[test]
    fn array_vec_capacity() {
        let v = decode::<ArrayVec<u8, 2>>(hex!("0102").to_vec()).unwrap();
        assert_eq!(v.as_slice(), [1, 2]);
        assert_eq!(encode(&v).unwrap(), hex!("0102"));
        assert!(decode::<ArrayVec<u8, 2>>(hex!("010203").to_vec()).is_err());
    }
}
