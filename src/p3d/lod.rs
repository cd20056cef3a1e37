//! LOD records.
//!
//! ## Layout
//!
//! ```text
//! signature:4  minor:u32  major:u32
//! num_points:u32  num_face_normals:u32  num_faces:u32  flags:u32
//! Point * num_points
//! Vec3  * num_face_normals
//! Face  * num_faces
//! tag_signature:4
//! Tag ... up to and including "#EndOfFile#"
//! resolution:f32
//! ```

use super::format::{
    signature_str, Signature, MIN_FACE_SIZE, P3DM_SIGNATURE, POINT_SIZE, TAGG_SIGNATURE, VEC3_SIZE,
};
use super::geometry::{Face, Point};
use super::reader::Cursor;
use super::record::{read_array, write_array, Record};
use super::tag::{MassTag, PropertyTag, Tag};
use super::writer::Sink;
use crate::util::{Result, Vec3};

/// One level-of-detail mesh.
///
/// Counts are not stored separately: `num_points` and friends are the
/// array lengths, and are what gets written. Arrays over `u32::MAX`
/// elements cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub struct Lod {
    pub signature: Signature,
    pub minor_version: u32,
    pub major_version: u32,
    pub flags: u32,
    pub points: Vec<Point>,
    pub normals: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub tag_signature: Signature,
    /// Raw tag stream, ending with the `#EndOfFile#` tag.
    pub tags: Vec<Tag>,
    pub resolution: f32,
}

impl Default for Lod {
    fn default() -> Self {
        Self {
            signature: *P3DM_SIGNATURE,
            minor_version: 0x1C,
            major_version: 0x100,
            flags: 0,
            points: Vec::new(),
            normals: Vec::new(),
            faces: Vec::new(),
            tag_signature: *TAGG_SIGNATURE,
            tags: vec![Tag::end_of_file()],
            resolution: 1.0,
        }
    }
}

impl Lod {
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn num_face_normals(&self) -> usize {
        self.normals.len()
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// LOD signature for display.
    pub fn signature_str(&self) -> String {
        signature_str(&self.signature)
    }

    /// Every `#Property#` tag, reinterpreted, in stream order.
    pub fn property_tags(&self) -> impl Iterator<Item = PropertyTag> + '_ {
        self.tags.iter().filter_map(Tag::as_property)
    }

    /// Point masses from the last `#Mass#` tag, sized by this LOD's point count.
    pub fn mass(&self) -> Option<MassTag> {
        let num_points = self.num_points();
        self.tags.iter().rev().find_map(|tag| tag.as_mass(num_points))
    }

    /// First tag with the given name.
    pub fn find_tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.name.eq_str(name))
    }

    /// Insert a tag just before the `#EndOfFile#` sentinel.
    ///
    /// Appends when the stream has no sentinel.
    pub fn push_tag(&mut self, tag: Tag) {
        match self.tags.iter().rposition(Tag::is_end_of_file) {
            Some(end) => self.tags.insert(end, tag),
            None => self.tags.push(tag),
        }
    }

    /// Read tags until the `#EndOfFile#` sentinel, which is kept.
    ///
    /// The stream has no count; an unterminated stream runs out of bytes and
    /// fails as truncated input.
    fn read_tags(cursor: &mut Cursor<'_>) -> Result<Vec<Tag>> {
        let mut tags = Vec::new();
        loop {
            let index = tags.len();
            let tag = Tag::read(cursor).map_err(|e| e.within(format!("tags[{index}]")))?;
            tracing::trace!(
                "tag[{}] {:?} active={} length={}",
                index,
                tag.name,
                tag.active,
                tag.data_length()
            );
            let done = tag.is_end_of_file();
            tags.push(tag);
            if done {
                return Ok(tags);
            }
        }
    }
}

impl Record for Lod {
    const NAME: &'static str = "Lod";

    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        let signature = cursor.read_array("signature")?;
        let minor_version = cursor.read_u32("minor_version")?;
        let major_version = cursor.read_u32("major_version")?;
        let num_points = cursor.read_u32("num_points")? as usize;
        let num_face_normals = cursor.read_u32("num_face_normals")? as usize;
        let num_faces = cursor.read_u32("num_faces")? as usize;
        let flags = cursor.read_u32("flags")?;

        let points = read_array(cursor, num_points, POINT_SIZE, "points")?;
        let normals = read_array(cursor, num_face_normals, VEC3_SIZE, "normals")?;
        let faces = read_array(cursor, num_faces, MIN_FACE_SIZE, "faces")?;

        let tag_signature = cursor.read_array("tag_signature")?;
        let tags = Self::read_tags(cursor)?;
        let resolution = cursor.read_f32("resolution")?;

        Ok(Self {
            signature,
            minor_version,
            major_version,
            flags,
            points,
            normals,
            faces,
            tag_signature,
            tags,
            resolution,
        })
    }

    fn write(&self, sink: &mut Sink) {
        sink.write(&self.signature);
        sink.write_u32(self.minor_version);
        sink.write_u32(self.major_version);
        sink.write_u32(self.num_points() as u32);
        sink.write_u32(self.num_face_normals() as u32);
        sink.write_u32(self.num_faces() as u32);
        sink.write_u32(self.flags);

        write_array(sink, &self.points);
        write_array(sink, &self.normals);
        write_array(sink, &self.faces);

        sink.write(&self.tag_signature);
        write_array(sink, &self.tags);
        sink.write_f32(self.resolution);
    }
}
