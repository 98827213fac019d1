use std::io::Read;

use glam::{Mat4, UVec4, Vec2, Vec3, Vec4};
use itertools::Itertools;
use log::{debug, info, warn};

use crate::AssetFileError;
use crate::bundle::types::{AssetBundle, FileHeader, FormatVersion, MAGIC, SubMeshRecord};
use crate::common::reader::{MAX_PREALLOCATION, Parseable, read_count};
use crate::material::types::{ChannelId, Material, MaterialProperty, MaterialValue, ValueKind};
use crate::model::types::{ModelResult, NodeHandle, SubMesh, VertexAttributes};

pub struct AssetReader {}

impl AssetReader {
    /// Reads a complete bundle. Nothing is returned unless the whole stream parsed.
    pub fn parse_bundle<R: Read>(rdr: &mut R) -> Result<AssetBundle, AssetFileError> {
        let header = FileHeader::parse(rdr)?;
        if header.magic != MAGIC {
            return Err(AssetFileError::InvalidMagicValue { magic: header.magic });
        }

        let version = FormatVersion::try_from(header.version).map_err(|_| AssetFileError::UnsupportedVersion {
            version: header.version,
        })?;

        let materials = AssetReader::read_materials(rdr)?;
        let model = AssetReader::read_model(rdr, version)?;

        info!(
            "Read {:?} bundle with {} materials and {} nodes",
            version,
            materials.len(),
            model.node_count()
        );

        Ok(AssetBundle::loaded(materials, model, version))
    }

    fn read_materials<R: Read>(rdr: &mut R) -> Result<Vec<Material>, AssetFileError> {
        let count = read_count(rdr)?;
        let mut materials = Vec::with_capacity(count.min(MAX_PREALLOCATION));
        for _ in 0..count {
            materials.push(AssetReader::read_material(rdr)?);
        }

        Ok(materials)
    }

    fn read_material<R: Read>(rdr: &mut R) -> Result<Material, AssetFileError> {
        let is_pbr = bool::parse(rdr)?;
        let count = read_count(rdr)?;
        let mut properties = Vec::with_capacity(count.min(MAX_PREALLOCATION));
        for _ in 0..count {
            properties.push(AssetReader::read_property(rdr)?);
        }

        Ok(Material { properties, is_pbr })
    }

    fn read_property<R: Read>(rdr: &mut R) -> Result<MaterialProperty, AssetFileError> {
        let channel = u16::parse(rdr)?;
        let channel = ChannelId::try_from(channel).map_err(|_| AssetFileError::UnknownChannel { channel })?;

        let kind = u8::parse(rdr)?;
        let kind = ValueKind::try_from(kind).map_err(|_| AssetFileError::UnknownValueKind { kind })?;

        Ok(MaterialProperty::new(channel, AssetReader::read_value(rdr, kind)?))
    }

    fn read_value<R: Read>(rdr: &mut R, kind: ValueKind) -> Result<MaterialValue, AssetFileError> {
        Ok(match kind {
            ValueKind::None => MaterialValue::None,
            ValueKind::Real => MaterialValue::Scalar(f32::parse(rdr)?),
            ValueKind::Vec2 => MaterialValue::Vec2(Vec2::parse(rdr)?),
            ValueKind::Vec3 => MaterialValue::Vec3(Vec3::parse(rdr)?),
            ValueKind::Vec4 => MaterialValue::Vec4(Vec4::parse(rdr)?),
            ValueKind::Int => MaterialValue::Integer(i64::parse(rdr)?),
            ValueKind::Bool => MaterialValue::Boolean(bool::parse(rdr)?),
            ValueKind::String => MaterialValue::Text(String::parse(rdr)?),
        })
    }

    fn read_model<R: Read>(rdr: &mut R, version: FormatVersion) -> Result<ModelResult, AssetFileError> {
        let count = read_count(rdr)?;
        let mut model = ModelResult::new();
        // stream index -> handle
        let mut handles: Vec<NodeHandle> = Vec::with_capacity(count.min(MAX_PREALLOCATION));

        for _ in 0..count {
            let name = String::parse(rdr)?;
            let parent_index = i32::parse(rdr)?;
            let parent = match usize::try_from(parent_index) {
                Err(_) => None,
                Ok(index) => {
                    let parent = handles.get(index).copied();
                    if parent.is_none() {
                        warn!(
                            "Node {:?} references parent {} which has not been read yet, treating it as parentless",
                            name, index
                        );
                    }
                    parent
                }
            };

            let node_to_parent = Mat4::parse(rdr)?;
            let geometry_to_node = Mat4::parse(rdr)?;
            let vertices = AssetReader::read_vertex_attributes(rdr)?;
            let indices = Vec::<u32>::parse(rdr)?;

            let (sub_meshes, material_indices) = match version {
                FormatVersion::V1 => AssetReader::read_legacy_materials(rdr, indices.len())?,
                FormatVersion::V2 => AssetReader::read_sub_meshes(rdr)?,
            };

            if !vertices.is_consistent() {
                warn!("Node {:?} has vertex arrays of differing lengths: {:?}", name, vertices);
            }

            if let Some(sub_mesh) = sub_meshes.iter().find(|s| s.index_range().end > indices.len()) {
                warn!(
                    "Node {:?} has a submesh {:?} exceeding its {} indices",
                    name,
                    sub_mesh,
                    indices.len()
                );
            }

            let handle = model.create_node(name, parent);
            let node = model.node_mut(handle);
            node.node_to_parent = node_to_parent;
            node.geometry_to_node = geometry_to_node;
            node.vertices = vertices;
            node.indices = indices;
            node.sub_meshes = sub_meshes;
            node.material_indices = material_indices;

            debug!("Read node {:?}", node);
            handles.push(handle);
        }

        Ok(model)
    }

    fn read_vertex_attributes<R: Read>(rdr: &mut R) -> Result<VertexAttributes, AssetFileError> {
        Ok(VertexAttributes {
            positions: Vec::<Vec3>::parse(rdr)?,
            normals: Vec::<Vec3>::parse(rdr)?,
            tex_coords: [
                Vec::<Vec2>::parse(rdr)?,
                Vec::<Vec2>::parse(rdr)?,
                Vec::<Vec2>::parse(rdr)?,
                Vec::<Vec2>::parse(rdr)?,
            ],
            colors: Vec::<Vec4>::parse(rdr)?,
            tangents: Vec::<Vec3>::parse(rdr)?,
            bitangents: Vec::<Vec3>::parse(rdr)?,
            bone_indices: Vec::<UVec4>::parse(rdr)?,
            bone_weights: Vec::<Vec4>::parse(rdr)?,
        })
    }

    /// Version 1 only stores the node's material indices. A mesh becomes one submesh over the
    /// whole index buffer, drawn with the first of them.
    fn read_legacy_materials<R: Read>(
        rdr: &mut R,
        index_count: usize,
    ) -> Result<(Vec<SubMesh>, Vec<usize>), AssetFileError> {
        let material_indices = Vec::<u64>::parse(rdr)?
            .into_iter()
            .map(to_index)
            .collect::<Result<Vec<_>, _>>()?;

        if index_count == 0 {
            return Ok((vec![], material_indices));
        }

        let sub_mesh = SubMesh {
            index_offset: 0,
            index_count,
            material_index: material_indices.first().copied().unwrap_or(0),
        };

        Ok((vec![sub_mesh], material_indices))
    }

    fn read_sub_meshes<R: Read>(rdr: &mut R) -> Result<(Vec<SubMesh>, Vec<usize>), AssetFileError> {
        let mut sub_meshes = vec![];
        for record in Vec::<SubMeshRecord>::parse(rdr)? {
            sub_meshes.push(SubMesh {
                index_offset: to_index(record.offset)?,
                index_count: to_index(record.count)?,
                material_index: to_index(record.material_index)?,
            });
        }

        let material_indices = sub_meshes.iter().map(|s| s.material_index).unique().collect();

        Ok((sub_meshes, material_indices))
    }
}

fn to_index(value: u64) -> Result<usize, AssetFileError> {
    usize::try_from(value).map_err(|_| AssetFileError::FormatError {
        reason: "Index exceeds the addressable range",
    })
}
