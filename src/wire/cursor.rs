//! Forward-only read position over one datagram.

use crate::DecodeError;

/// Byte offset into a single datagram.
///
/// A cursor is created per decode and threaded by `&mut` through every nested
/// field. It only ever moves forward, by exactly the width of what was read.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Start reading at the first byte of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Start reading at `offset`. An offset past the end leaves nothing to read.
    pub fn at(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset: offset.min(data.len()) }
    }

    /// Current absolute offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left between the offset and the end of the datagram.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Fail unless at least `needed` bytes remain, without moving.
    pub fn ensure(&self, needed: usize) -> Result<(), DecodeError> {
        if needed > self.remaining() {
            return Err(DecodeError::Truncated {
                offset: self.offset,
                needed,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        self.ensure(len)?;
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Copy the next `N` bytes into an array and advance past them.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Advance past `len` bytes that carry no fields.
    pub fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.take(len).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_advances_by_exact_width() {
        let data = [1u8, 2, 3, 4, 5];
        let mut cursor = Cursor::new(&data);

        assert_eq!(cursor.take(2).ok(), Some(&data[..2]));
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.read_array::<3>().ok(), Some([3, 4, 5]));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn short_read_reports_position_and_does_not_move() {
        let data = [0u8; 3];
        let mut cursor = Cursor::at(&data, 1);

        let err = cursor.read_array::<4>().err();
        assert_eq!(err, Some(DecodeError::Truncated { offset: 1, needed: 4, remaining: 2 }));
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn offset_past_end_is_clamped() {
        let data = [0u8; 2];
        let cursor = Cursor::at(&data, 10);
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.ensure(1).is_err());
        assert!(cursor.ensure(0).is_ok());
    }
}
