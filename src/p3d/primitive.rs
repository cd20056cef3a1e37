//! Fixed-width little-endian scalar fields.
//!
//! The format is byte-packed: every field is read and written at its exact
//! width with no alignment or padding.

use byteorder::{ByteOrder, LittleEndian};

/// A fixed-width value with an explicit little-endian encoding.
pub trait Primitive: Sized {
    /// Encoded width in bytes.
    const SIZE: usize;

    /// Decode from exactly `SIZE` bytes.
    fn decode_le(bytes: &[u8]) -> Self;

    /// Append the encoded bytes.
    fn encode_le(&self, out: &mut Vec<u8>);
}

impl Primitive for u8 {
    const SIZE: usize = 1;

    #[inline]
    fn decode_le(bytes: &[u8]) -> Self {
        bytes[0]
    }

    #[inline]
    fn encode_le(&self, out: &mut Vec<u8>) {
        out.push(*self);
    }
}

impl Primitive for u32 {
    const SIZE: usize = 4;

    #[inline]
    fn decode_le(bytes: &[u8]) -> Self {
        LittleEndian::read_u32(bytes)
    }

    #[inline]
    fn encode_le(&self, out: &mut Vec<u8>) {
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, *self);
        out.extend_from_slice(&buf);
    }
}

/// Bit-exact: NaN payloads and signed zeros survive a round trip.
impl Primitive for f32 {
    const SIZE: usize = 4;

    #[inline]
    fn decode_le(bytes: &[u8]) -> Self {
        LittleEndian::read_f32(bytes)
    }

    #[inline]
    fn encode_le(&self, out: &mut Vec<u8>) {
        let mut buf = [0u8; 4];
        LittleEndian::write_f32(&mut buf, *self);
        out.extend_from_slice(&buf);
    }
}

impl<const N: usize> Primitive for [u8; N] {
    const SIZE: usize = N;

    #[inline]
    fn decode_le(bytes: &[u8]) -> Self {
        let mut out = [0u8; N];
        out.copy_from_slice(&bytes[..N]);
        out
    }

    #[inline]
    fn encode_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }
}
