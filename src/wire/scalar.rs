//! Primitive wire types and the runtime value tree.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use super::Cursor;
use crate::DecodeError;

/// Supported scalar wire types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Single byte character, read as an unsigned byte
    Char,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl ScalarKind {
    /// Returns the size in bytes of this scalar on the wire.
    pub const fn size(&self) -> usize {
        match self {
            ScalarKind::Char | ScalarKind::I8 | ScalarKind::U8 => 1,
            ScalarKind::I16 | ScalarKind::U16 => 2,
            ScalarKind::I32 | ScalarKind::U32 | ScalarKind::F32 => 4,
            ScalarKind::I64 | ScalarKind::U64 | ScalarKind::F64 => 8,
        }
    }

    /// Read one scalar of this kind and advance the cursor by [`Self::size`].
    pub fn decode(&self, cursor: &mut Cursor<'_>) -> Result<Value, DecodeError> {
        Ok(match self {
            ScalarKind::Char | ScalarKind::U8 => Value::U8(u8::from_le_bytes(cursor.read_array()?)),
            ScalarKind::I8 => Value::I8(i8::from_le_bytes(cursor.read_array()?)),
            ScalarKind::I16 => Value::I16(i16::from_le_bytes(cursor.read_array()?)),
            ScalarKind::U16 => Value::U16(u16::from_le_bytes(cursor.read_array()?)),
            ScalarKind::I32 => Value::I32(i32::from_le_bytes(cursor.read_array()?)),
            ScalarKind::U32 => Value::U32(u32::from_le_bytes(cursor.read_array()?)),
            ScalarKind::I64 => Value::I64(i64::from_le_bytes(cursor.read_array()?)),
            ScalarKind::U64 => Value::U64(u64::from_le_bytes(cursor.read_array()?)),
            ScalarKind::F32 => Value::F32(f32::from_le_bytes(cursor.read_array()?)),
            ScalarKind::F64 => Value::F64(f64::from_le_bytes(cursor.read_array()?)),
        })
    }
}

/// Decode a single scalar at `offset`, returning the value and bytes consumed.
pub fn decode_scalar(
    data: &[u8],
    offset: usize,
    kind: ScalarKind,
) -> Result<(Value, usize), DecodeError> {
    if offset > data.len() {
        return Err(DecodeError::Truncated { offset, needed: kind.size(), remaining: 0 });
    }
    let mut cursor = Cursor::at(data, offset);
    let value = kind.decode(&mut cursor)?;
    Ok((value, cursor.offset() - offset))
}

/// Runtime value that can hold any decoded field.
///
/// Records keep their declared field order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Text(String),
    /// Bytes of a text field, up to its first null, that are not valid UTF-8.
    InvalidText(Vec<u8>),
    Sequence(Vec<Value>),
    Record(Vec<(&'static str, Value)>),
}

impl Value {
    /// Look up a named field of a record value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => {
                fields.iter().find(|(field, _)| *field == name).map(|(_, value)| value)
            }
            _ => None,
        }
    }

    /// Numeric view of a scalar value.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::I8(v) => Some(v.into()),
            Value::U8(v) => Some(v.into()),
            Value::I16(v) => Some(v.into()),
            Value::U16(v) => Some(v.into()),
            Value::I32(v) => Some(v.into()),
            Value::U32(v) => Some(v.into()),
            Value::I64(v) => Some(v as f64),
            Value::U64(v) => Some(v as f64),
            Value::F32(v) => Some(v.into()),
            Value::F64(v) => Some(v),
            _ => None,
        }
    }

    /// String view of a text field, `None` for any other value.
    ///
    /// A field that failed UTF-8 validation reports [`DecodeError::InvalidText`].
    pub fn as_text(&self) -> Option<Result<&str, DecodeError>> {
        match self {
            Value::Text(text) => Some(Ok(text)),
            Value::InvalidText(bytes) => {
                Some(std::str::from_utf8(bytes).map_err(|source| DecodeError::InvalidText { source }))
            }
            _ => None,
        }
    }

    /// Whether this value or anything nested in it is an invalid text field.
    pub fn has_invalid_text(&self) -> bool {
        match self {
            Value::InvalidText(_) => true,
            Value::Sequence(items) => items.iter().any(Value::has_invalid_text),
            Value::Record(fields) => fields.iter().any(|(_, value)| value.has_invalid_text()),
            _ => false,
        }
    }

    /// Element count for sequences, `None` otherwise.
    pub fn sequence_len(&self) -> Option<usize> {
        match self {
            Value::Sequence(items) => Some(items.len()),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::I8(v) => serializer.serialize_i8(*v),
            Value::U8(v) => serializer.serialize_u8(*v),
            Value::I16(v) => serializer.serialize_i16(*v),
            Value::U16(v) => serializer.serialize_u16(*v),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::U32(v) => serializer.serialize_u32(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::F32(v) => serializer.serialize_f32(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::Text(text) => serializer.serialize_str(text),
            Value::InvalidText(bytes) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("invalid_utf8", bytes)?;
                map.end()
            }
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}
