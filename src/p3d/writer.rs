//! Append-only output buffer.

use super::primitive::Primitive;

/// Byte sink that grows as records are written.
///
/// Writes cannot fail; encoding is a pure transformation to bytes.
#[derive(Debug, Clone, Default)]
pub struct Sink {
    buf: Vec<u8>,
}

impl Sink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sink with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append one fixed-width value.
    #[inline]
    pub fn write<T: Primitive>(&mut self, value: &T) {
        value.encode_le(&mut self.buf);
    }

    /// Write a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.write(&value);
    }

    /// Write a little-endian u32.
    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.write(&value);
    }

    /// Write a little-endian f32.
    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.write(&value);
    }

    /// Append raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Borrow the bytes written so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the sink and return the encoded bytes.
    #[inline]
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}
