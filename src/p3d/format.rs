//! MLOD format constants.

/// Length of every 4-byte signature field.
pub const SIGNATURE_SIZE: usize = 4;

/// A 4-byte record marker.
pub type Signature = [u8; SIGNATURE_SIZE];

/// File signature of an editable (MLOD) P3D model.
pub const MLOD_SIGNATURE: &Signature = b"MLOD";

/// LOD record signature used by current tools.
pub const P3DM_SIGNATURE: &Signature = b"P3DM";

/// Marker preceding the tag stream of a LOD.
pub const TAGG_SIGNATURE: &Signature = b"TAGG";

/// Tag name terminating a LOD's tag stream.
pub const TAG_END_OF_FILE: &str = "#EndOfFile#";

/// Tag name carrying a key/value property.
pub const TAG_PROPERTY: &str = "#Property#";

/// Tag name carrying per-point mass values.
pub const TAG_MASS: &str = "#Mass#";

/// Vertex descriptors per face, independent of the face type.
pub const FACE_VERTEX_COUNT: usize = 4;

/// Width of the key and of the value field in a `#Property#` payload.
pub const PROPERTY_FIELD_SIZE: usize = 64;

/// Total size of a `#Property#` payload.
pub const PROPERTY_PAYLOAD_SIZE: usize = 2 * PROPERTY_FIELD_SIZE;

/// Size of the document header: signature, version, LOD count.
pub const HEADER_SIZE: usize = SIGNATURE_SIZE + 4 + 4;

/// Size of an encoded vector (3 x f32).
pub const VEC3_SIZE: usize = 12;

/// Size of an encoded point: position + flags.
pub const POINT_SIZE: usize = VEC3_SIZE + 4;

/// Size of an encoded vertex descriptor: two indices + UV.
pub const VERTEX_DESCRIPTOR_SIZE: usize = 16;

/// Smallest possible encoded face: type, vertices, flags, two empty strings.
pub const MIN_FACE_SIZE: usize = 4 + FACE_VERTEX_COUNT * VERTEX_DESCRIPTOR_SIZE + 4 + 2;

/// Smallest possible encoded tag: active, empty name, zero length.
pub const MIN_TAG_SIZE: usize = 1 + 1 + 4;

/// Smallest possible encoded LOD: header fields, tag marker, one empty tag, resolution.
pub const MIN_LOD_SIZE: usize = SIGNATURE_SIZE + 6 * 4 + SIGNATURE_SIZE + MIN_TAG_SIZE + 4;

/// Render a signature for display, replacing non-printable bytes with `.`.
pub fn signature_str(signature: &Signature) -> String {
    signature
        .iter()
        .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
        .collect()
}
