//! Fixed-size character buffers.
//!
//! Names and event codes arrive as raw UTF-8 bytes, one byte per slot, padded
//! with nulls. Text ends at the first null; whatever follows it (the game and
//! some tools pad with spaces after the terminator) is ignored. Multi-byte
//! code points are reassembled from consecutive slots by decoding the whole
//! run at once.

use std::borrow::Cow;
use std::fmt;

use crate::DecodeError;
use crate::wire::{Cursor, Decode, Layout, Value};

fn until_null(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    &bytes[..end]
}

/// Strict decode of a null-padded buffer.
pub fn decode_text(bytes: &[u8]) -> Result<&str, DecodeError> {
    std::str::from_utf8(until_null(bytes)).map_err(|source| DecodeError::InvalidText { source })
}

/// Lossy decode of a null-padded buffer, replacing invalid sequences.
pub fn decode_text_lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(until_null(bytes))
}

/// Value tree form of a text field.
///
/// Valid text becomes [`Value::Text`]; anything else keeps its bytes as
/// [`Value::InvalidText`] so the failure stays attached to that one field.
pub fn text_value(bytes: &[u8]) -> Value {
    match decode_text(bytes) {
        Ok(text) => Value::Text(text.to_string()),
        Err(_) => Value::InvalidText(until_null(bytes).to_vec()),
    }
}

/// Raw fixed-size text field.
///
/// Bytes are kept as received so that a bad name only fails when it is read,
/// never the packet that carries it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedText<const N: usize>([u8; N]);

impl<const N: usize> FixedText<N> {
    pub const fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// Encode `text` into the buffer, null padding. Longer text is cut at the
    /// last character boundary within `N` bytes.
    pub fn from_text(text: &str) -> Self {
        let mut bytes = [0u8; N];
        let mut len = text.len().min(N);
        while !text.is_char_boundary(len) {
            len -= 1;
        }
        bytes[..len].copy_from_slice(&text.as_bytes()[..len]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// The text up to the first null, or [`DecodeError::InvalidText`].
    pub fn text(&self) -> Result<&str, DecodeError> {
        decode_text(&self.0)
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        decode_text_lossy(&self.0)
    }
}

impl<const N: usize> fmt::Debug for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

impl<const N: usize> fmt::Display for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl<const N: usize> Decode for FixedText<N> {
    const WIRE_SIZE: usize = N;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self(cursor.read_array()?))
    }

    fn layout() -> Layout {
        Layout::Text { len: N }
    }

    fn to_value(&self) -> Value {
        text_value(&self.0)
    }
}
