//! The record trait implemented by every MLOD structure.

use super::reader::Cursor;
use super::writer::Sink;
use crate::util::Result;

/// A structure with a fixed field-by-field binary layout.
///
/// `write` mirrors `read` exactly: same fields, same order, no padding.
pub trait Record: Sized {
    /// Type name used as the root of error field paths.
    const NAME: &'static str;

    /// Decode one record, advancing the cursor past it.
    ///
    /// Error paths are relative to this record (`vertices[2].u`).
    fn read(cursor: &mut Cursor<'_>) -> Result<Self>;

    /// Append the encoded record.
    fn write(&self, sink: &mut Sink);

    /// Decode one record from the start of `bytes`.
    ///
    /// Trailing bytes are left unread. Error paths are rooted at
    /// [`Record::NAME`] (`Face.vertices[2].u`).
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);
        Self::read(&mut cursor).map_err(|e| e.within(Self::NAME))
    }

    /// Encode this record on its own.
    fn to_bytes(&self) -> Vec<u8> {
        let mut sink = Sink::new();
        self.write(&mut sink);
        sink.into_inner()
    }
}

/// Read `count` records, qualifying errors with `field[index]`.
pub(crate) fn read_array<T: Record>(
    cursor: &mut Cursor<'_>,
    count: usize,
    min_size: usize,
    field: &str,
) -> Result<Vec<T>> {
    let mut items = Vec::with_capacity(cursor.bounded_capacity(count, min_size));
    for i in 0..count {
        let item = T::read(cursor).map_err(|e| e.within(format!("{field}[{i}]")))?;
        items.push(item);
    }
    Ok(items)
}

/// Write every record of a slice in order.
pub(crate) fn write_array<T: Record>(sink: &mut Sink, items: &[T]) {
    for item in items {
        item.write(sink);
    }
}
