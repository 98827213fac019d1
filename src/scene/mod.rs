//! The read-only view of an already parsed scene that the importer consumes.
//!
//! Parsing model files is up to the implementor. Materials are referred to by their position in
//! the scene's material list, which doubles as their identity: two entries with equal content are
//! still two materials.

use fbxbake_files::ChannelId;
use glam::{Mat4, Vec2, Vec3, Vec4};

pub mod memory;
pub mod traversal;


pub trait SceneSource {
    type Node: SourceNode<Mesh = Self::Mesh>;
    type Mesh: SourceMesh;
    type Material: SourceMaterial;

    /// Top level nodes, usually just the scene root.
    fn roots(&self) -> impl Iterator<Item = &Self::Node>;

    fn material(&self, index: usize) -> Option<&Self::Material>;
}

pub trait SourceNode {
    type Mesh: SourceMesh;

    fn name(&self) -> Option<&str>;
    fn node_to_parent(&self) -> Mat4;
    /// `None` when the node has no geometry transform.
    fn geometry_to_node(&self) -> Option<Mat4>;
    fn children(&self) -> impl Iterator<Item = &Self>;
    fn mesh(&self) -> Option<&Self::Mesh>;
    /// Material slots of this node as indices into the scene material list, `None` for empty slots.
    fn materials(&self) -> &[Option<usize>];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// First corner of the face.
    pub index_begin: u32,
    pub num_indices: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkinWeight {
    pub bone: u32,
    pub weight: f32,
}

/// Per-corner mesh streams. A corner is one occurrence of a vertex in a face.
pub trait SourceMesh {
    fn corner_count(&self) -> usize;

    fn position(&self, corner: usize) -> Vec3;
    fn normal(&self, corner: usize) -> Option<Vec3>;
    fn uv(&self, set: usize, corner: usize) -> Option<Vec2>;
    fn color(&self, corner: usize) -> Option<Vec4>;
    fn tangent(&self, corner: usize) -> Option<Vec3>;
    fn bitangent(&self, corner: usize) -> Option<Vec3>;
    /// Skin influences of the vertex behind `corner`, most significant first.
    fn skin_weights(&self, corner: usize) -> &[SkinWeight];

    fn faces(&self) -> &[Face];
    /// Material slot of a face, `None` if the mesh does not map faces to slots.
    fn face_material(&self, face: usize) -> Option<usize>;

    /// Replaces `out` with corner triplets and returns the number of triangles.
    fn triangulate_face(&self, face: Face, out: &mut Vec<u32>) -> usize {
        crate::mesh::triangulate::fan_triangulate(face, out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapValue {
    /// 1 to 4 for real valued maps, anything else marks an integer map.
    pub components: usize,
    pub value: Vec4,
    pub int: i64,
}

impl MapValue {
    pub fn real(value: f32) -> Self {
        MapValue {
            components: 1,
            value: Vec4::new(value, 0.0, 0.0, 0.0),
            int: value as i64,
        }
    }

    pub fn vec2(value: Vec2) -> Self {
        MapValue {
            components: 2,
            value: value.extend(0.0).extend(0.0),
            int: 0,
        }
    }

    pub fn vec3(value: Vec3) -> Self {
        MapValue {
            components: 3,
            value: value.extend(0.0),
            int: 0,
        }
    }

    pub fn vec4(value: Vec4) -> Self {
        MapValue {
            components: 4,
            value,
            int: 0,
        }
    }

    pub fn int(value: i64) -> Self {
        MapValue {
            components: 0,
            value: Vec4::splat(value as f32),
            int: value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTexture {
    pub filename: String,
    pub relative_filename: String,
    pub absolute_filename: String,
}

impl SourceTexture {
    pub fn new(filename: impl Into<String>) -> Self {
        SourceTexture {
            filename: filename.into(),
            ..Default::default()
        }
    }

    /// The first non-empty of the three paths, without its directory.
    pub fn file_name(&self) -> Option<&str> {
        let path = [&self.filename, &self.relative_filename, &self.absolute_filename]
            .into_iter()
            .find(|path| !path.is_empty())?;

        path.rsplit(['/', '\\']).next().filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMap {
    pub value: Option<MapValue>,
    pub texture: Option<SourceTexture>,
    pub texture_enabled: bool,
}

pub trait SourceMaterial {
    fn is_pbr(&self) -> bool;
    /// The map behind a value channel, see [`ChannelId::VALUE_CHANNELS`].
    fn map(&self, channel: ChannelId) -> Option<&SourceMap>;
}
