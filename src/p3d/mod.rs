//! MLOD P3D binary format.
//!
//! Everything is little-endian and byte-packed. Strings are NUL-terminated;
//! every other variable-length part is preceded by its count or length,
//! except the tag stream, which runs until its `#EndOfFile#` tag.
//!
//! ## File Structure
//!
//! ```text
//! +------------------+
//! | Signature "MLOD" |  4 bytes
//! +------------------+
//! | Version          |  u32
//! +------------------+
//! | LOD count        |  u32
//! +------------------+
//! | LOD 0            |  see [`lod`]
//! | ...              |
//! | LOD n-1          |
//! +------------------+
//! ```

mod document;
mod format;
mod geometry;
mod lod;
mod primitive;
mod reader;
mod record;
mod string;
mod tag;
mod writer;

pub use document::*;
pub use format::*;
pub use geometry::*;
pub use lod::*;
pub use primitive::*;
pub use reader::*;
pub use record::Record;
pub use string::*;
pub use tag::*;
pub use writer::*;
