//! Geometry records: points, vertex descriptors and faces.
//!
//! Values are preserved exactly as stored. Indices are not checked against
//! the owning LOD's arrays and `face_type` is not interpreted.

use super::format::FACE_VERTEX_COUNT;
use super::reader::Cursor;
use super::record::Record;
use super::string::ZString;
use super::writer::Sink;
use crate::util::{Result, Vec3};

impl Record for Vec3 {
    const NAME: &'static str = "Vector3";

    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        let x = cursor.read_f32("x")?;
        let y = cursor.read_f32("y")?;
        let z = cursor.read_f32("z")?;
        Ok(Vec3::new(x, y, z))
    }

    fn write(&self, sink: &mut Sink) {
        sink.write_f32(self.x);
        sink.write_f32(self.y);
        sink.write_f32(self.z);
    }
}

/// A mesh point: position plus selection/visibility flag bits.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub position: Vec3,
    pub flags: u32,
}

impl Point {
    pub fn new(position: Vec3, flags: u32) -> Self {
        Self { position, flags }
    }
}

impl Record for Point {
    const NAME: &'static str = "Point";

    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        let position = Vec3::read(cursor).map_err(|e| e.within("position"))?;
        let flags = cursor.read_u32("flags")?;
        Ok(Self { position, flags })
    }

    fn write(&self, sink: &mut Sink) {
        self.position.write(sink);
        sink.write_u32(self.flags);
    }
}

/// One corner of a face.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VertexDescriptor {
    /// Index into the LOD's points.
    pub point_index: u32,
    /// Index into the LOD's normals.
    pub normal_index: u32,
    pub u: f32,
    pub v: f32,
}

impl VertexDescriptor {
    pub fn new(point_index: u32, normal_index: u32, u: f32, v: f32) -> Self {
        Self {
            point_index,
            normal_index,
            u,
            v,
        }
    }
}

impl Record for VertexDescriptor {
    const NAME: &'static str = "VertexDescriptor";

    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            point_index: cursor.read_u32("point_index")?,
            normal_index: cursor.read_u32("normal_index")?,
            u: cursor.read_f32("u")?,
            v: cursor.read_f32("v")?,
        })
    }

    fn write(&self, sink: &mut Sink) {
        sink.write_u32(self.point_index);
        sink.write_u32(self.normal_index);
        sink.write_f32(self.u);
        sink.write_f32(self.v);
    }
}

/// A polygon.
///
/// Always stores four vertex descriptors. Triangles carry an unused fourth
/// corner; which corners matter is up to `face_type`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Face {
    pub face_type: u32,
    pub vertices: [VertexDescriptor; FACE_VERTEX_COUNT],
    pub face_flags: u32,
    pub texture_name: ZString,
    pub material_name: ZString,
}

impl Record for Face {
    const NAME: &'static str = "Face";

    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        let face_type = cursor.read_u32("face_type")?;

        let mut vertices = [VertexDescriptor::default(); FACE_VERTEX_COUNT];
        for (i, vertex) in vertices.iter_mut().enumerate() {
            *vertex =
                VertexDescriptor::read(cursor).map_err(|e| e.within(format!("vertices[{i}]")))?;
        }

        let face_flags = cursor.read_u32("face_flags")?;
        let texture_name = ZString::read(cursor).map_err(|e| e.within("texture_name"))?;
        let material_name = ZString::read(cursor).map_err(|e| e.within("material_name"))?;

        Ok(Self {
            face_type,
            vertices,
            face_flags,
            texture_name,
            material_name,
        })
    }

    fn write(&self, sink: &mut Sink) {
        sink.write_u32(self.face_type);
        for vertex in &self.vertices {
            vertex.write(sink);
        }
        sink.write_u32(self.face_flags);
        self.texture_name.write(sink);
        self.material_name.write(sink);
    }
}
