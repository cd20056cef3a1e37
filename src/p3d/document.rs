//! Document header and the top-level decode/encode entry points.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use super::format::{signature_str, Signature, MIN_LOD_SIZE, MLOD_SIGNATURE};
use super::lod::Lod;
use super::reader::Cursor;
use super::record::{read_array, write_array, Record};
use super::writer::Sink;
use crate::util::{Error, Result};

/// MLOD file version written by current tools.
pub const MLOD_VERSION: u32 = 0x101;

/// File header: signature, version and the number of LODs that follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub signature: Signature,
    pub version: u32,
    pub lod_count: u32,
}

impl Record for Header {
    const NAME: &'static str = "Header";

    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            signature: cursor.read_array("signature")?,
            version: cursor.read_u32("version")?,
            lod_count: cursor.read_u32("lod_count")?,
        })
    }

    fn write(&self, sink: &mut Sink) {
        sink.write(&self.signature);
        sink.write_u32(self.version);
        sink.write_u32(self.lod_count);
    }
}

/// A complete model: header fields plus every LOD in file order.
///
/// The LOD count is `lods.len()`; it is written into the header on encode.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub signature: Signature,
    pub version: u32,
    pub lods: Vec<Lod>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            signature: *MLOD_SIGNATURE,
            version: MLOD_VERSION,
            lods: Vec::new(),
        }
    }
}

impl Document {
    /// Create an empty document with the given LODs.
    pub fn new(lods: Vec<Lod>) -> Self {
        Self {
            lods,
            ..Self::default()
        }
    }

    /// Header as it will be encoded.
    ///
    /// More than `u32::MAX` LODs cannot be represented.
    pub fn header(&self) -> Header {
        Header {
            signature: self.signature,
            version: self.version,
            lod_count: self.lods.len() as u32,
        }
    }

    /// File signature for display.
    pub fn signature_str(&self) -> String {
        signature_str(&self.signature)
    }

    /// Decode a whole document from a byte buffer.
    ///
    /// The first failing field aborts the decode; no partial document is
    /// returned. Bytes after the last LOD are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }

    /// Encode the document. Encoding is deterministic and cannot fail.
    pub fn encode(&self) -> Vec<u8> {
        self.to_bytes()
    }

    /// Open and decode a file, memory-mapping it for the duration of the decode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;

        if file.metadata()?.len() == 0 {
            return Self::decode(&[]);
        }

        // Safety: the map is read-only and dropped before returning; the
        // decoded document owns copies of everything it keeps.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::MmapFailed(e.to_string()))?;
        tracing::debug!("mapped {} ({} bytes)", path.display(), mmap.len());
        Self::decode(&mmap)
    }

    /// Encode and write to a file, replacing it.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.encode())?;
        Ok(())
    }
}

impl Record for Document {
    const NAME: &'static str = "Document";

    #[tracing::instrument(skip_all)]
    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        let header = Header::read(cursor).map_err(|e| e.within("header"))?;
        tracing::debug!(
            "header {} version={:#x} lods={}",
            signature_str(&header.signature),
            header.version,
            header.lod_count
        );

        let lods: Vec<Lod> = read_array(cursor, header.lod_count as usize, MIN_LOD_SIZE, "lods")?;
        for (i, lod) in lods.iter().enumerate() {
            tracing::debug!(
                "lod[{}] {} res={} points={} normals={} faces={} tags={}",
                i,
                lod.signature_str(),
                lod.resolution,
                lod.num_points(),
                lod.num_face_normals(),
                lod.num_faces(),
                lod.tags.len()
            );
        }

        if !cursor.is_at_end() {
            tracing::warn!("{} trailing bytes after last LOD ignored", cursor.remaining());
        }

        Ok(Self {
            signature: header.signature,
            version: header.version,
            lods,
        })
    }

    #[tracing::instrument(skip_all)]
    fn write(&self, sink: &mut Sink) {
        self.header().write(sink);
        write_array(sink, &self.lods);
        tracing::debug!("encoded {} lods, {} bytes", self.lods.len(), sink.len());
    }
}

/// Decode a document from a byte buffer.
pub fn decode(bytes: &[u8]) -> Result<Document> {
    Document::decode(bytes)
}

/// Encode a document to bytes.
pub fn encode(document: &Document) -> Vec<u8> {
    document.encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::p3d::format::HEADER_SIZE;

    #[test]
    fn test_header_layout() {
        let header = Header {
            signature: *MLOD_SIGNATURE,
            version: MLOD_VERSION,
            lod_count: 2,
        };
        let bytes = header.to_bytes();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(&bytes[..4], b"MLOD");
        assert_eq!(&bytes[4..8], &0x101u32.to_le_bytes());
        assert_eq!(&bytes[8..], &2u32.to_le_bytes());
        assert_eq!(Header::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn test_header_tracks_lods() {
        let doc = Document::new(vec![Lod::default(), Lod::default()]);
        assert_eq!(doc.header().lod_count, 2);
        assert_eq!(doc.signature_str(), "MLOD");
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::default();
        let bytes = encode(&doc);
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(decode(&bytes).unwrap(), doc);
    }

    #[test]
    fn test_missing_lod() {
        let mut bytes = encode(&Document::new(vec![Lod::default()]));
        bytes[8..12].copy_from_slice(&2u32.to_le_bytes());
        let err = decode(&bytes).unwrap_err();
        assert_eq!(err.path(), Some("Document.lods[1].signature"));
    }

    #[test]
    fn test_header_error_path() {
        let err = decode(b"MLOD\x01\x01").unwrap_err();
        assert_eq!(err.path(), Some("Document.header.version"));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let doc = Document::new(vec![Lod::default()]);
        let mut bytes = encode(&doc);
        bytes.extend_from_slice(b"junk");
        assert_eq!(decode(&bytes).unwrap(), doc);
    }

    #[test]
    fn test_open_missing_file() {
        let err = Document::open("definitely/not/here.p3d").unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }
}
