//! Tag records and the typed payloads of `#Property#` and `#Mass#` tags.
//!
//! A tag is a named, length-prefixed opaque chunk. Two tag names carry
//! payloads with a known layout; those are reinterpreted on demand from the
//! tag's bytes and never serialized on their own.

use std::borrow::Cow;

use super::format::{
    PROPERTY_FIELD_SIZE, PROPERTY_PAYLOAD_SIZE, TAG_END_OF_FILE, TAG_MASS, TAG_PROPERTY,
};
use super::reader::Cursor;
use super::record::Record;
use super::string::ZString;
use super::writer::Sink;
use crate::util::Result;

/// A generic tag from a LOD's tag stream.
///
/// The encoded `data_length` is always `data.len()`, so the length prefix
/// and payload cannot disagree. `active` is the raw flag byte as stored;
/// any non-zero value means active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub active: u8,
    pub name: ZString,
    pub data: Vec<u8>,
}

impl Tag {
    /// Create an active tag.
    pub fn new(name: impl Into<ZString>, data: Vec<u8>) -> Self {
        Self {
            active: 1,
            name: name.into(),
            data,
        }
    }

    /// The sentinel tag terminating a tag stream.
    pub fn end_of_file() -> Self {
        Self::new(TAG_END_OF_FILE, Vec::new())
    }

    /// Payload length as written to the file.
    ///
    /// Payloads over `u32::MAX` bytes cannot be represented.
    #[inline]
    pub fn data_length(&self) -> u32 {
        self.data.len() as u32
    }

    /// Check the active flag.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active != 0
    }

    /// Check if this tag ends the tag stream.
    #[inline]
    pub fn is_end_of_file(&self) -> bool {
        self.name.eq_str(TAG_END_OF_FILE)
    }

    #[inline]
    pub fn is_property(&self) -> bool {
        self.name.eq_str(TAG_PROPERTY)
    }

    #[inline]
    pub fn is_mass(&self) -> bool {
        self.name.eq_str(TAG_MASS)
    }

    /// Interpret as a property tag, if named `#Property#`.
    pub fn as_property(&self) -> Option<PropertyTag> {
        self.is_property().then(|| PropertyTag::from_tag(self))
    }

    /// Interpret as a mass tag sized for `num_points`, if named `#Mass#`.
    pub fn as_mass(&self, num_points: usize) -> Option<MassTag> {
        self.is_mass().then(|| MassTag::from_tag(self, num_points))
    }
}

impl Record for Tag {
    const NAME: &'static str = "Tag";

    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        let active = cursor.read_u8("active")?;
        let name = ZString::read(cursor).map_err(|e| e.within("name"))?;
        let data_length = cursor.read_u32("data_length")?;
        let data = cursor.read_bytes(data_length as usize, "data")?;
        Ok(Self { active, name, data })
    }

    fn write(&self, sink: &mut Sink) {
        sink.write_u8(self.active);
        self.name.write(sink);
        sink.write_u32(self.data_length());
        sink.write_bytes(&self.data);
    }
}

/// A key/value property: two fixed 64-byte fields.
///
/// The fields are raw bytes, not NUL-delimited strings; all 128 bytes are
/// kept. Use [`PropertyTag::key_str`] / [`PropertyTag::value_str`] for the
/// text up to the first NUL.
#[derive(Clone, PartialEq, Eq)]
pub struct PropertyTag {
    pub key: [u8; PROPERTY_FIELD_SIZE],
    pub value: [u8; PROPERTY_FIELD_SIZE],
}

impl PropertyTag {
    /// Build a property from text, NUL-padded to field width.
    ///
    /// Text longer than 64 bytes is cut at 64 bytes.
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: pad_field(key.as_bytes()),
            value: pad_field(value.as_bytes()),
        }
    }

    /// Reinterpret a tag's payload.
    ///
    /// Bytes missing from a short payload stay zero; bytes past 128 are
    /// ignored. Neither case is an error.
    pub fn from_tag(tag: &Tag) -> Self {
        let mut cursor = Cursor::new(&tag.data);
        let mut key = [0u8; PROPERTY_FIELD_SIZE];
        let mut value = [0u8; PROPERTY_FIELD_SIZE];
        let read = cursor.read_into_lenient(&mut key) + cursor.read_into_lenient(&mut value);
        if read < PROPERTY_PAYLOAD_SIZE {
            tracing::warn!(
                "#Property# payload is {} bytes, expected {}; zero-filling",
                tag.data.len(),
                PROPERTY_PAYLOAD_SIZE
            );
        }
        Self { key, value }
    }

    /// Build the backing tag carrying this property.
    pub fn to_tag(&self) -> Tag {
        let mut data = Vec::with_capacity(PROPERTY_PAYLOAD_SIZE);
        data.extend_from_slice(&self.key);
        data.extend_from_slice(&self.value);
        Tag::new(TAG_PROPERTY, data)
    }

    /// Key text up to the first NUL.
    pub fn key_str(&self) -> Cow<'_, str> {
        field_str(&self.key)
    }

    /// Value text up to the first NUL.
    pub fn value_str(&self) -> Cow<'_, str> {
        field_str(&self.value)
    }
}

impl std::fmt::Debug for PropertyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyTag")
            .field("key", &self.key_str())
            .field("value", &self.value_str())
            .finish()
    }
}

fn pad_field(text: &[u8]) -> [u8; PROPERTY_FIELD_SIZE] {
    let mut field = [0u8; PROPERTY_FIELD_SIZE];
    let n = text.len().min(PROPERTY_FIELD_SIZE);
    field[..n].copy_from_slice(&text[..n]);
    field
}

fn field_str(field: &[u8]) -> Cow<'_, str> {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end])
}

/// Per-point mass values.
///
/// The payload has no count of its own; it is sized by the owning LOD's
/// point count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MassTag {
    pub mass: Vec<f32>,
}

impl MassTag {
    /// Reinterpret a tag's payload as `num_points` floats.
    ///
    /// A short payload leaves the missing values at zero; floats past
    /// `num_points` are ignored.
    pub fn from_tag(tag: &Tag, num_points: usize) -> Self {
        let mut cursor = Cursor::new(&tag.data);
        let (mass, read) = cursor.read_f32s_lenient(num_points);
        if read < num_points {
            tracing::warn!(
                "#Mass# payload holds {} of {} point masses; zero-filling",
                read,
                num_points
            );
        }
        Self { mass }
    }

    /// Build the backing tag carrying these masses.
    pub fn to_tag(&self) -> Tag {
        let mut sink = Sink::with_capacity(self.mass.len() * 4);
        for m in &self.mass {
            sink.write_f32(*m);
        }
        Tag::new(TAG_MASS, sink.into_inner())
    }

    /// Sum of all point masses.
    pub fn total(&self) -> f32 {
        self.mass.iter().sum()
    }
}
