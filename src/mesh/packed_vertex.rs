use bytemuck::{Pod, Zeroable};
use fbxbake_files::VertexAttributes;
use fbxbake_files::common::types::{MAX_BONE_INFLUENCES, MAX_UV_SETS};
use glam::{UVec4, Vec2, Vec3, Vec4};

use crate::scene::SourceMesh;

/// Every attribute of one corner in a single plain block. Two corners are the same vertex iff
/// their blocks are bit-identical.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PackedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [[f32; 2]; MAX_UV_SETS],
    pub color: [f32; 4],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
    pub bone_indices: [u32; MAX_BONE_INFLUENCES],
    pub bone_weights: [f32; MAX_BONE_INFLUENCES],
}

/// `PackedVertex` as plain words, for hashing and comparing its bits.
pub type VertexKey = [u32; 32];

impl PackedVertex {
    /// Samples `corner`, filling in the defaults for every stream the mesh lacks.
    pub fn from_corner<M: SourceMesh>(mesh: &M, corner: usize) -> Self {
        let normal = mesh
            .normal(corner)
            .and_then(Vec3::try_normalize)
            .unwrap_or(Vec3::Y);

        let mut tex_coords = [[0.0; 2]; MAX_UV_SETS];
        for (set, tex_coord) in tex_coords.iter_mut().enumerate() {
            *tex_coord = mesh.uv(set, corner).unwrap_or(Vec2::ZERO).to_array();
        }

        let mut bone_indices = [0u32; MAX_BONE_INFLUENCES];
        let mut bone_weights = [0f32; MAX_BONE_INFLUENCES];
        for (slot, influence) in mesh
            .skin_weights(corner)
            .iter()
            .take(MAX_BONE_INFLUENCES)
            .enumerate()
        {
            bone_indices[slot] = influence.bone;
            bone_weights[slot] = influence.weight;
        }

        let weight_sum: f32 = bone_weights.iter().sum();
        if weight_sum > 0.0 {
            for weight in &mut bone_weights {
                *weight /= weight_sum;
            }
        }

        PackedVertex {
            position: mesh.position(corner).to_array(),
            normal: normal.to_array(),
            tex_coords,
            color: mesh.color(corner).unwrap_or(Vec4::ONE).to_array(),
            tangent: mesh.tangent(corner).unwrap_or(Vec3::ZERO).to_array(),
            bitangent: mesh.bitangent(corner).unwrap_or(Vec3::ZERO).to_array(),
            bone_indices,
            bone_weights,
        }
    }

    pub fn key(&self) -> VertexKey {
        bytemuck::cast(*self)
    }

    /// Appends one element to every array of `vertices`.
    pub fn append_to(&self, vertices: &mut VertexAttributes) {
        vertices.positions.push(Vec3::from_array(self.position));
        vertices.normals.push(Vec3::from_array(self.normal));
        for (set, tex_coord) in vertices.tex_coords.iter_mut().zip(self.tex_coords) {
            set.push(Vec2::from_array(tex_coord));
        }
        vertices.colors.push(Vec4::from_array(self.color));
        vertices.tangents.push(Vec3::from_array(self.tangent));
        vertices.bitangents.push(Vec3::from_array(self.bitangent));
        vertices.bone_indices.push(UVec4::from_array(self.bone_indices));
        vertices.bone_weights.push(Vec4::from_array(self.bone_weights));
    }
}
