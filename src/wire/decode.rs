//! Compile-time resolved decoding.

use super::{Cursor, Layout, ScalarKind, Value};
use crate::DecodeError;

/// Trait for types with a fixed little-endian wire layout.
///
/// Implementations exist for every scalar, for fixed arrays of any
/// `Decode` type, and for every record declared with `wire_record!`.
pub trait Decode: Sized {
    /// Exact number of bytes one value occupies on the wire.
    const WIRE_SIZE: usize;

    /// Read one value, advancing the cursor by exactly [`Self::WIRE_SIZE`].
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError>;

    /// Static description of this type's wire shape.
    fn layout() -> Layout;

    /// Convert into the generic value tree produced by [`Layout::decode`].
    fn to_value(&self) -> Value;

    /// Decode from the start of `data`; trailing bytes are ignored.
    fn decode_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        Self::decode(&mut Cursor::new(data))
    }
}

macro_rules! impl_scalar_decode {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Decode for $ty {
                const WIRE_SIZE: usize = std::mem::size_of::<$ty>();

                fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
                    Ok(<$ty>::from_le_bytes(cursor.read_array()?))
                }

                fn layout() -> Layout {
                    Layout::Scalar(ScalarKind::$kind)
                }

                fn to_value(&self) -> Value {
                    Value::$kind(*self)
                }
            }
        )*
    };
}

impl_scalar_decode! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    const WIRE_SIZE: usize = N * T::WIRE_SIZE;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        let items = (0..N).map(|_| T::decode(cursor)).collect::<Result<Vec<T>, _>>()?;
        items
            .try_into()
            .map_err(|items: Vec<T>| DecodeError::out_of_range("sequence length", items.len() as i64))
    }

    fn layout() -> Layout {
        Layout::Sequence { len: N, element: Box::new(T::layout()) }
    }

    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(Decode::to_value).collect())
    }
}

/// Declare a wire record: a plain struct whose fields are decoded in
/// declaration order, with its [`Decode`] impl, layout and value conversion.
macro_rules! wire_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $crate::wire::Decode for $name {
            const WIRE_SIZE: usize = 0 $(+ <$ty as $crate::wire::Decode>::WIRE_SIZE)*;

            fn decode(
                cursor: &mut $crate::wire::Cursor<'_>,
            ) -> ::std::result::Result<Self, $crate::DecodeError> {
                Ok(Self {
                    $($field: <$ty as $crate::wire::Decode>::decode(cursor)?,)*
                })
            }

            fn layout() -> $crate::wire::Layout {
                $crate::wire::Layout::Record {
                    name: stringify!($name),
                    fields: vec![
                        $((stringify!($field), <$ty as $crate::wire::Decode>::layout()),)*
                    ],
                }
            }

            fn to_value(&self) -> $crate::wire::Value {
                $crate::wire::Value::Record(vec![
                    $((stringify!($field), $crate::wire::Decode::to_value(&self.$field)),)*
                ])
            }
        }
    };
}

pub(crate) use wire_record;

#[cfg(test)]
mod tests {
    use super::*;

    wire_record! {
        /// Small record used to exercise the macro.
        pub struct Sample {
            pub id: u8,
            pub pair: [i16; 2],
            pub ratio: f32,
        }
    }

    fn sample_bytes() -> Vec<u8> {
        let mut data = vec![7u8];
        data.extend_from_slice(&(-2i16).to_le_bytes());
        data.extend_from_slice(&300i16.to_le_bytes());
        data.extend_from_slice(&0.5f32.to_le_bytes());
        data
    }

    #[test]
    fn record_fields_decode_in_declaration_order() {
        let sample = Sample::decode_bytes(&sample_bytes());
        assert_eq!(sample, Ok(Sample { id: 7, pair: [-2, 300], ratio: 0.5 }));
    }

    #[test]
    fn wire_size_sums_field_widths() {
        assert_eq!(Sample::WIRE_SIZE, 9);
        assert_eq!(<[Sample; 3]>::WIRE_SIZE, 27);
        assert_eq!(Sample::layout().wire_size(), Sample::WIRE_SIZE);
    }

    #[test]
    fn cursor_lands_after_the_record() {
        let mut data = sample_bytes();
        data.push(0xFF);
        let mut cursor = Cursor::new(&data);
        assert!(Sample::decode(&mut cursor).is_ok());
        assert_eq!(cursor.offset(), Sample::WIRE_SIZE);
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn short_array_is_truncated_not_partial() {
        let data = [1u8, 0, 2, 0, 3];
        let decoded = <[u16; 3]>::decode_bytes(&data);
        assert_eq!(decoded, Err(DecodeError::Truncated { offset: 4, needed: 2, remaining: 1 }));
    }

    #[test]
    fn to_value_matches_layout_decode() -> Result<(), DecodeError> {
        let data = sample_bytes();
        let typed = Sample::decode_bytes(&data)?.to_value();
        let dynamic = Sample::layout().decode(&mut Cursor::new(&data))?;
        assert_eq!(typed, dynamic);
        Ok(())
    }
}
