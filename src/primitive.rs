use std::fmt::Debug;

mod private {
    pub trait Sealed {}
}

/// Fixed-width numeric types with an explicit little-endian byte layout.
pub trait Primitive: Copy + Debug + PartialEq + private::Sealed {
    /// Width in bytes.
    const WIDTH: usize;
    const NAME: &'static str;

    /// Unpacks from exactly [`Self::WIDTH`] little-endian bytes.
    ///
    /// # Panics
    ///
    /// If `bytes.len() != Self::WIDTH`.
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Appends the little-endian representation to `out`.
    fn put_le(self, out: &mut Vec<u8>);
}

macro_rules! impl_primitive {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl private::Sealed for $ty {}

            impl Primitive for $ty {
                const WIDTH: usize = ::core::mem::size_of::<$ty>();
                const NAME: &'static str = stringify!($ty);

                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0; ::core::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }

                fn put_le(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes())
                }
            }
        )+
    };
}

impl_primitive!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);
