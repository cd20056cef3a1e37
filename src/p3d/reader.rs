//! Bounds-checked forward-only reader over an in-memory buffer.

use super::primitive::Primitive;
use crate::util::{Error, Result};

/// Read cursor over a borrowed byte slice.
///
/// Every read either consumes exactly the bytes it needs or fails with
/// [`Error::TruncatedInput`] leaving the offset untouched. There is no
/// seeking: lengths always precede the data they size.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Check if every byte has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Take the next `len` bytes as a borrowed slice.
    pub fn read_slice(&mut self, len: usize, field: &str) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::truncated(field, self.pos));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Read `len` bytes into an owned buffer.
    ///
    /// The length is checked before anything is allocated.
    pub fn read_bytes(&mut self, len: usize, field: &str) -> Result<Vec<u8>> {
        self.read_slice(len, field).map(<[u8]>::to_vec)
    }

    /// Read one fixed-width value.
    #[inline]
    pub fn read<T: Primitive>(&mut self, field: &str) -> Result<T> {
        self.read_slice(T::SIZE, field).map(T::decode_le)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self, field: &str) -> Result<u8> {
        self.read(field)
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self, field: &str) -> Result<u32> {
        self.read(field)
    }

    /// Read a little-endian f32.
    #[inline]
    pub fn read_f32(&mut self, field: &str) -> Result<f32> {
        self.read(field)
    }

    /// Read a fixed-size byte array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self, field: &str) -> Result<[u8; N]> {
        self.read(field)
    }

    /// Read `count` f32 values, zero-filling whatever the buffer cannot supply.
    ///
    /// Used for tag payloads that are decoded leniently. Returns the values
    /// and the number actually read.
    pub fn read_f32s_lenient(&mut self, count: usize) -> (Vec<f32>, usize) {
        let available = (self.remaining() / f32::SIZE).min(count);
        let mut values = vec![0.0f32; count];
        for value in values.iter_mut().take(available) {
            let bytes = &self.data[self.pos..self.pos + f32::SIZE];
            *value = f32::decode_le(bytes);
            self.pos += f32::SIZE;
        }
        (values, available)
    }

    /// Fill `out` from the buffer, leaving unread trailing bytes unchanged.
    ///
    /// Returns the number of bytes copied.
    pub fn read_into_lenient(&mut self, out: &mut [u8]) -> usize {
        let n = self.remaining().min(out.len());
        out[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        n
    }

    /// Capacity to reserve for `count` records of at least `min_size` bytes.
    ///
    /// A corrupt count cannot exceed what the remaining bytes could possibly
    /// hold, so this never over-allocates on hostile input.
    #[inline]
    pub fn bounded_capacity(&self, count: usize, min_size: usize) -> usize {
        count.min(self.remaining() / min_size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0x3F, 0x07];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_u32("a").unwrap(), 1);
        assert_eq!(cursor.read_f32("b").unwrap(), 1.0);
        assert_eq!(cursor.read_u8("c").unwrap(), 7);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_truncated_read_does_not_advance() {
        let data = [0x01, 0x02, 0x03];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_u8("first").unwrap(), 1);

        let err = cursor.read_u32("value").unwrap_err();
        match err {
            Error::TruncatedInput { path, offset } => {
                assert_eq!(path, "value");
                assert_eq!(offset, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.remaining(), 2);
    }

    #[test]
    fn test_read_bytes_huge_length() {
        let data = [0u8; 8];
        let mut cursor = Cursor::new(&data);
        assert!(cursor.read_bytes(usize::MAX, "data").is_err());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_read_array() {
        let mut cursor = Cursor::new(b"MLOD\x01");
        let sig: [u8; 4] = cursor.read_array("signature").unwrap();
        assert_eq!(&sig, b"MLOD");
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_read_f32s_lenient_short() {
        let mut data = Vec::new();
        data.extend_from_slice(&2.5f32.to_le_bytes());
        data.extend_from_slice(&[0xAA, 0xBB]);

        let mut cursor = Cursor::new(&data);
        let (values, read) = cursor.read_f32s_lenient(3);
        assert_eq!(values, vec![2.5, 0.0, 0.0]);
        assert_eq!(read, 1);
    }

    #[test]
    fn test_read_into_lenient() {
        let mut cursor = Cursor::new(b"abc");
        let mut out = [0u8; 5];
        assert_eq!(cursor.read_into_lenient(&mut out), 3);
        assert_eq!(&out, b"abc\0\0");
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_bounded_capacity() {
        let data = [0u8; 32];
        let cursor = Cursor::new(&data);
        assert_eq!(cursor.bounded_capacity(1_000_000, 16), 2);
        assert_eq!(cursor.bounded_capacity(1, 16), 1);
        assert_eq!(cursor.bounded_capacity(5, 0), 5);
    }
}
