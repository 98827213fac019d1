//! A scene held entirely in memory, for front ends that build their scene up front and for tests.

use std::collections::HashMap;

use fbxbake_files::ChannelId;
use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::scene::{
    Face, MapValue, SceneSource, SkinWeight, SourceMap, SourceMaterial, SourceMesh, SourceNode, SourceTexture,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    pub roots: Vec<MemoryNode>,
    pub materials: Vec<MemoryMaterial>,
}

impl MemoryScene {
    pub fn new(root: MemoryNode) -> Self {
        MemoryScene {
            roots: vec![root],
            materials: vec![],
        }
    }

    pub fn with_material(mut self, material: MemoryMaterial) -> Self {
        self.materials.push(material);
        self
    }
}

impl SceneSource for MemoryScene {
    type Node = MemoryNode;
    type Mesh = MemoryMesh;
    type Material = MemoryMaterial;

    fn roots(&self) -> impl Iterator<Item = &MemoryNode> {
        self.roots.iter()
    }

    fn material(&self, index: usize) -> Option<&MemoryMaterial> {
        self.materials.get(index)
    }
}

#[derive(Debug, Clone)]
pub struct MemoryNode {
    pub name: Option<String>,
    pub node_to_parent: Mat4,
    pub geometry_to_node: Option<Mat4>,
    pub children: Vec<MemoryNode>,
    pub mesh: Option<MemoryMesh>,
    pub materials: Vec<Option<usize>>,
}

impl MemoryNode {
    pub fn new(name: impl Into<String>) -> Self {
        MemoryNode {
            name: Some(name.into()),
            ..MemoryNode::unnamed()
        }
    }

    pub fn unnamed() -> Self {
        MemoryNode {
            name: None,
            node_to_parent: Mat4::IDENTITY,
            geometry_to_node: None,
            children: vec![],
            mesh: None,
            materials: vec![],
        }
    }

    pub fn with_child(mut self, child: MemoryNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_mesh(mut self, mesh: MemoryMesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_materials(mut self, materials: Vec<Option<usize>>) -> Self {
        self.materials = materials;
        self
    }

    pub fn with_transform(mut self, node_to_parent: Mat4) -> Self {
        self.node_to_parent = node_to_parent;
        self
    }
}

impl SourceNode for MemoryNode {
    type Mesh = MemoryMesh;

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn node_to_parent(&self) -> Mat4 {
        self.node_to_parent
    }

    fn geometry_to_node(&self) -> Option<Mat4> {
        self.geometry_to_node
    }

    fn children(&self) -> impl Iterator<Item = &MemoryNode> {
        self.children.iter()
    }

    fn mesh(&self) -> Option<&MemoryMesh> {
        self.mesh.as_ref()
    }

    fn materials(&self) -> &[Option<usize>] {
        &self.materials
    }
}

/// Corner streams, an empty stream is reported as absent.
#[derive(Debug, Clone, Default)]
pub struct MemoryMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uv_sets: Vec<Vec<Vec2>>,
    pub colors: Vec<Vec4>,
    pub tangents: Vec<Vec3>,
    pub bitangents: Vec<Vec3>,
    pub skin: Vec<Vec<SkinWeight>>,
    pub faces: Vec<Face>,
    pub face_materials: Vec<usize>,
}

impl MemoryMesh {
    /// Faces take their corners from `positions` in order, `face_sizes` corners at a time.
    pub fn new(positions: Vec<Vec3>, face_sizes: &[u32]) -> Self {
        let mut faces = Vec::with_capacity(face_sizes.len());
        let mut index_begin = 0;
        for &num_indices in face_sizes {
            faces.push(Face {
                index_begin,
                num_indices,
            });
            index_begin += num_indices;
        }

        MemoryMesh {
            positions,
            faces,
            ..Default::default()
        }
    }
}

impl SourceMesh for MemoryMesh {
    fn corner_count(&self) -> usize {
        self.positions.len()
    }

    fn position(&self, corner: usize) -> Vec3 {
        self.positions[corner]
    }

    fn normal(&self, corner: usize) -> Option<Vec3> {
        self.normals.get(corner).copied()
    }

    fn uv(&self, set: usize, corner: usize) -> Option<Vec2> {
        self.uv_sets.get(set)?.get(corner).copied()
    }

    fn color(&self, corner: usize) -> Option<Vec4> {
        self.colors.get(corner).copied()
    }

    fn tangent(&self, corner: usize) -> Option<Vec3> {
        self.tangents.get(corner).copied()
    }

    fn bitangent(&self, corner: usize) -> Option<Vec3> {
        self.bitangents.get(corner).copied()
    }

    fn skin_weights(&self, corner: usize) -> &[SkinWeight] {
        self.skin.get(corner).map(Vec::as_slice).unwrap_or_default()
    }

    fn faces(&self) -> &[Face] {
        &self.faces
    }

    fn face_material(&self, face: usize) -> Option<usize> {
        self.face_materials.get(face).copied()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryMaterial {
    pub is_pbr: bool,
    pub maps: HashMap<ChannelId, SourceMap>,
}

impl MemoryMaterial {
    pub fn new(is_pbr: bool) -> Self {
        MemoryMaterial {
            is_pbr,
            maps: HashMap::new(),
        }
    }

    pub fn with_value(mut self, channel: ChannelId, value: MapValue) -> Self {
        self.maps.entry(channel).or_default().value = Some(value);
        self
    }

    pub fn with_texture(mut self, channel: ChannelId, texture: SourceTexture, enabled: bool) -> Self {
        let map = self.maps.entry(channel).or_default();
        map.texture = Some(texture);
        map.texture_enabled = enabled;
        self
    }
}

impl SourceMaterial for MemoryMaterial {
    fn is_pbr(&self) -> bool {
        self.is_pbr
    }

    fn map(&self, channel: ChannelId) -> Option<&SourceMap> {
        self.maps.get(&channel)
    }
}
