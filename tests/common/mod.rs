//! Shared builders for synthetic MLOD documents.

#![allow(dead_code)]

use mlod::prelude::*;

/// Offset of the `#EndOfFile#` tag's active byte in [`minimal_document_bytes`].
pub const MINIMAL_END_TAG_ACTIVE_OFFSET: usize = 12 + 28 + 4;

/// The smallest valid document, assembled byte by byte.
///
/// One LOD with no geometry, only the `#EndOfFile#` tag, resolution 1.0.
pub fn minimal_document_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MLOD");
    bytes.extend_from_slice(&0x101u32.to_le_bytes());
    bytes.extend_from_slice(&1u32.to_le_bytes());

    bytes.extend_from_slice(b"P3DM");
    bytes.extend_from_slice(&0x1Cu32.to_le_bytes()); // minor
    bytes.extend_from_slice(&0x100u32.to_le_bytes()); // major
    bytes.extend_from_slice(&0u32.to_le_bytes()); // num_points
    bytes.extend_from_slice(&0u32.to_le_bytes()); // num_face_normals
    bytes.extend_from_slice(&0u32.to_le_bytes()); // num_faces
    bytes.extend_from_slice(&0u32.to_le_bytes()); // flags

    bytes.extend_from_slice(b"TAGG");
    bytes.push(1);
    bytes.extend_from_slice(b"#EndOfFile#\0");
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.extend_from_slice(&1.0f32.to_le_bytes());
    bytes
}

fn quad(base: u32, texture: &str) -> Face {
    Face {
        face_type: 4,
        vertices: [
            VertexDescriptor::new(base, 0, 0.0, 0.0),
            VertexDescriptor::new(base + 1, 0, 1.0, 0.0),
            VertexDescriptor::new(base + 2, 0, 1.0, 1.0),
            VertexDescriptor::new(base + 3, 0, 0.0, 1.0),
        ],
        face_flags: 0,
        texture_name: ZString::from(texture),
        material_name: ZString::from("data\\default.rvmat"),
    }
}

fn triangle() -> Face {
    Face {
        face_type: 3,
        vertices: [
            VertexDescriptor::new(0, 1, 0.0, 0.0),
            VertexDescriptor::new(1, 1, 1.0, 0.0),
            VertexDescriptor::new(2, 1, 0.5, 1.0),
            VertexDescriptor::default(),
        ],
        face_flags: 0x2000_0000,
        texture_name: ZString::default(),
        material_name: ZString::default(),
    }
}

/// A visual LOD: geometry, a property, a named selection and point masses.
pub fn visual_lod() -> Lod {
    let points: Vec<Point> = [
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (1.0, 1.0, 0.0),
        (0.0, 1.0, 0.0),
    ]
    .iter()
    .map(|&(x, y, z)| Point::new(Vec3::new(x, y, z), 0))
    .collect();

    let mut lod = Lod {
        points,
        normals: vec![Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0)],
        faces: vec![quad(0, "data\\wall_co.paa"), triangle()],
        resolution: 1.0,
        ..Lod::default()
    };
    lod.push_tag(PropertyTag::new("class", "house").to_tag());
    lod.push_tag(Tag {
        active: 0,
        name: ZString::from("door"),
        data: vec![1, 0, 1, 0, 0, 0, 0, 0],
    });
    lod.push_tag(MassTag { mass: vec![10.0, 10.0, 5.0, 5.0] }.to_tag());
    lod
}

/// A geometry LOD with odd values: non-UTF-8 names, NaN, huge flags.
pub fn unusual_lod() -> Lod {
    let mut lod = Lod {
        flags: 0xFFFF_FFFF,
        points: vec![
            Point::new(Vec3::new(f32::NAN, -0.0, f32::INFINITY), 0xDEAD_BEEF),
            Point::new(Vec3::new(1e-38, f32::MIN, f32::MAX), 0),
            Point::new(Vec3::ZERO, 0),
        ],
        normals: Vec::new(),
        faces: vec![Face {
            face_type: 0,
            texture_name: ZString::new(vec![0xE9, b'x', 0xFF]),
            ..Face::default()
        }],
        resolution: 1e13,
        ..Lod::default()
    };
    lod.push_tag(PropertyTag::new("autocenter", "0").to_tag());
    lod.push_tag(PropertyTag::new("lodnoshadow", "1").to_tag());
    // Short payloads decode leniently but must still round-trip verbatim.
    lod.push_tag(Tag::new("#Mass#", vec![0, 0, 0x80, 0x3F]));
    lod.push_tag(Tag::new("#Property#", b"short".to_vec()));
    lod
}

/// A document with several LODs of different shapes.
pub fn sample_document() -> Document {
    Document::new(vec![visual_lod(), unusual_lod(), Lod::default()])
}
