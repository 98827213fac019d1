use std::collections::HashMap;
use std::io::Write;

use log::info;

use crate::AssetFileError;
use crate::bundle::types::{AssetBundle, FileHeader, FormatVersion, MAGIC};
use crate::common::writer::{Writeable, write_count};
use crate::material::types::{Material, MaterialProperty, MaterialValue};
use crate::model::types::{ModelNode, ModelResult, NodeHandle, VertexAttributes};

pub struct AssetWriter {}

impl AssetWriter {
    /// Writes `bundle` in [`FormatVersion::CURRENT`], whatever version it was loaded from.
    pub fn write_bundle<W: Write>(wtr: &mut W, bundle: &AssetBundle) -> Result<(), AssetFileError> {
        let header = FileHeader {
            magic: MAGIC,
            version: FormatVersion::CURRENT.into(),
        };
        header.write(wtr)?;

        AssetWriter::write_materials(wtr, &bundle.materials)?;
        let node_count = AssetWriter::write_model(wtr, &bundle.model)?;

        info!(
            "Wrote {:?} bundle with {} materials and {} nodes",
            FormatVersion::CURRENT,
            bundle.materials.len(),
            node_count
        );
        Ok(())
    }

    fn write_materials<W: Write>(wtr: &mut W, materials: &[Material]) -> Result<(), AssetFileError> {
        write_count(wtr, materials.len())?;
        for material in materials {
            material.is_pbr.write(wtr)?;
            write_count(wtr, material.properties.len())?;
            for property in &material.properties {
                AssetWriter::write_property(wtr, property)?;
            }
        }

        Ok(())
    }

    fn write_property<W: Write>(wtr: &mut W, property: &MaterialProperty) -> Result<(), AssetFileError> {
        u16::from(property.channel).write(wtr)?;
        u8::from(property.value.kind()).write(wtr)?;

        match &property.value {
            MaterialValue::None => Ok(()),
            MaterialValue::Scalar(value) => value.write(wtr),
            MaterialValue::Integer(value) => value.write(wtr),
            MaterialValue::Boolean(value) => value.write(wtr),
            MaterialValue::Vec2(value) => value.write(wtr),
            MaterialValue::Vec3(value) => value.write(wtr),
            MaterialValue::Vec4(value) => value.write(wtr),
            MaterialValue::Text(value) => value.write(wtr),
        }
    }

    /// Flattens the tree in DFS pre-order, so every parent precedes its children in the stream.
    /// Nodes unreachable from the root are not written.
    fn write_model<W: Write>(wtr: &mut W, model: &ModelResult) -> Result<usize, AssetFileError> {
        let order = model.dfs_order();

        let mut flat_indices: HashMap<NodeHandle, i32> = HashMap::with_capacity(order.len());
        for (index, handle) in order.iter().enumerate() {
            let index = i32::try_from(index).map_err(|_| AssetFileError::FormatError {
                reason: "Too many nodes to address with a 32 bit parent index",
            })?;
            flat_indices.insert(*handle, index);
        }

        write_count(wtr, order.len())?;
        for handle in &order {
            let node = model.node(*handle);
            let parent_index = node
                .parent()
                .and_then(|parent| flat_indices.get(&parent).copied())
                .unwrap_or(-1);

            AssetWriter::write_node(wtr, node, parent_index)?;
        }

        Ok(order.len())
    }

    fn write_node<W: Write>(wtr: &mut W, node: &ModelNode, parent_index: i32) -> Result<(), AssetFileError> {
        node.name().write(wtr)?;
        parent_index.write(wtr)?;
        node.node_to_parent.write(wtr)?;
        node.geometry_to_node.write(wtr)?;
        AssetWriter::write_vertex_attributes(wtr, &node.vertices)?;
        node.indices.write(wtr)?;

        // submeshes are not stored, the reader derives one from the first material index
        let material_indices: Vec<u64> = node.material_indices.iter().map(|&index| index as u64).collect();
        material_indices.write(wtr)
    }

    fn write_vertex_attributes<W: Write>(wtr: &mut W, vertices: &VertexAttributes) -> Result<(), AssetFileError> {
        vertices.positions.write(wtr)?;
        vertices.normals.write(wtr)?;
        for set in &vertices.tex_coords {
            set.write(wtr)?;
        }
        vertices.colors.write(wtr)?;
        vertices.tangents.write(wtr)?;
        vertices.bitangents.write(wtr)?;
        vertices.bone_indices.write(wtr)?;
        vertices.bone_weights.write(wtr)
    }
}
