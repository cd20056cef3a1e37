//! NUL-terminated strings.

use std::borrow::Cow;
use std::fmt;

use super::reader::Cursor;
use super::record::Record;
use super::writer::Sink;
use crate::util::{Error, Result};

/// A NUL-terminated byte string, stored without its terminator.
///
/// Bytes are kept verbatim (no UTF-8 requirement) so any name found in a
/// file re-encodes identically. The content must not contain a NUL byte:
/// one would end the string early on the next decode. Decode never
/// produces such a string; building one by hand is the caller's error.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ZString(Vec<u8>);

impl ZString {
    /// Create from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw bytes, without the terminator.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes, without the terminator.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode as UTF-8, replacing invalid sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Compare against a text value byte-for-byte.
    #[inline]
    pub fn eq_str(&self, s: &str) -> bool {
        self.0 == s.as_bytes()
    }
}

impl Record for ZString {
    const NAME: &'static str = "String";

    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        let start = cursor.position();
        let mut bytes = Vec::new();
        loop {
            match cursor.read_u8("") {
                Ok(0) => return Ok(Self(bytes)),
                Ok(b) => bytes.push(b),
                // Report where the string started, not where the buffer ran out.
                Err(_) => return Err(Error::truncated("", start)),
            }
        }
    }

    fn write(&self, sink: &mut Sink) {
        sink.write_bytes(&self.0);
        sink.write_u8(0);
    }
}

impl From<&str> for ZString {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<String> for ZString {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl PartialEq<str> for ZString {
    fn eq(&self, other: &str) -> bool {
        self.eq_str(other)
    }
}

impl PartialEq<&str> for ZString {
    fn eq(&self, other: &&str) -> bool {
        self.eq_str(other)
    }
}

impl fmt::Display for ZString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl fmt::Debug for ZString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}
