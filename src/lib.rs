//! # MLOD
//!
//! Reader and writer for the MLOD P3D model format: the editable 3D model
//! interchange format of the Real Virtuality engine.
//!
//! Decoding builds a [`Document`] from a byte buffer; encoding turns it back
//! into bytes. A decode followed by an encode reproduces the input exactly.
//!
//! ## Modules
//!
//! - [`util`] - Errors and math re-exports
//! - [`p3d`] - Format records, reader and writer
//!
//! ## Example
//!
//! ```no_run
//! let bytes = std::fs::read("model.p3d")?;
//! let document = mlod::decode(&bytes)?;
//!
//! for lod in &document.lods {
//!     println!("{} points, {} faces", lod.num_points(), lod.num_faces());
//! }
//!
//! assert_eq!(mlod::encode(&document), bytes);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod util;
pub mod p3d;

// Re-export commonly used types
pub use util::{Error, Result};
pub use p3d::{decode, encode, Document, Header, Lod, Record};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result, Vec3};
    pub use crate::p3d::{
        decode, encode, Document, Face, Header, Lod, MassTag, Point, PropertyTag, Record, Tag,
        VertexDescriptor, ZString,
    };
}
