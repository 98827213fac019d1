use std::collections::BTreeMap;

use fbxbake_files::{ModelNode, ModelResult, NodeHandle, SubMesh};
use log::{debug, trace, warn};

use crate::ImportError;
use crate::importer::MaterialLookup;
use crate::mesh::dedup::VertexDeduplicator;
use crate::mesh::packed_vertex::PackedVertex;
use crate::scene::traversal::{NodeListener, NodeVisitContext};
use crate::scene::{SceneSource, SourceMesh, SourceNode};

const UNNAMED_NODE: &str = "Unnamed";

/// Mirrors the scene hierarchy into a [`ModelResult`], converting every attached mesh into
/// indexed vertex data partitioned by material.
pub struct MeshHierarchyBuilder {
    model: ModelResult,
    node_stack: Vec<NodeHandle>,
    materials: MaterialLookup,
    triangle_corners: Vec<u32>,
}

impl MeshHierarchyBuilder {
    pub fn new(materials: MaterialLookup) -> Self {
        MeshHierarchyBuilder {
            model: ModelResult::new(),
            node_stack: vec![],
            materials,
            triangle_corners: vec![],
        }
    }

    pub fn model(&self) -> &ModelResult {
        &self.model
    }

    pub fn into_model(self) -> ModelResult {
        self.model
    }

    /// Dedups the mesh corners into `out`'s vertex arrays and appends one index run per
    /// material, keeping whatever `out` already holds.
    fn append_indexed_mesh<N: SourceNode>(
        &mut self,
        node: &N,
        mesh: &N::Mesh,
        handle: NodeHandle,
    ) -> Result<(), ImportError> {
        let corner_count = mesh.corner_count();
        if corner_count == 0 {
            return Ok(());
        }

        let corners: Vec<PackedVertex> = (0..corner_count)
            .map(|corner| PackedVertex::from_corner(mesh, corner))
            .collect();

        let indexed = VertexDeduplicator::generate_indices(&corners).map_err(|err| ImportError::Conversion {
            message: format!("vertex deduplication failed: {}", err),
        })?;

        if indexed.vertices.is_empty() {
            return Err(ImportError::Conversion {
                message: "vertex deduplication failed: unknown error".to_string(),
            });
        }

        let out = self.model.node_mut(handle);
        let base_vertex = out.vertices.vertex_count();
        if u32::try_from(base_vertex + indexed.vertices.len()).is_err() {
            return Err(ImportError::Conversion {
                message: "vertex count exceeds the 32 bit index range".to_string(),
            });
        }
        let base_vertex = base_vertex as u32;

        out.vertices.reserve(indexed.vertices.len());
        for vertex in &indexed.vertices {
            vertex.append_to(&mut out.vertices);
        }

        let mut batches: BTreeMap<usize, Vec<u32>> = BTreeMap::new();
        let mut redirected_faces = 0usize;
        let mut skipped_triangles = 0usize;

        for (face_index, &face) in mesh.faces().iter().enumerate() {
            if face.num_indices < 3 {
                continue;
            }

            let material_index =
                resolve_material_index(node, mesh, face_index, &self.materials, &mut redirected_faces);
            let batch = batches.entry(material_index).or_default();

            let triangle_count = mesh.triangulate_face(face, &mut self.triangle_corners);
            for triangle in self.triangle_corners.chunks_exact(3).take(triangle_count) {
                let remapped: Option<Vec<u32>> = triangle
                    .iter()
                    .map(|&corner| indexed.remap.get(corner as usize).map(|&vertex| base_vertex + vertex))
                    .collect();

                match remapped {
                    Some(vertices) => batch.extend(vertices),
                    None => skipped_triangles += 1,
                }
            }
        }

        if redirected_faces > 0 {
            warn!(
                "Node {:?}: {} faces use a material slot beyond the node's {} materials, using slot 0",
                out.name(),
                redirected_faces,
                node.materials().len()
            );
        }

        if skipped_triangles > 0 {
            warn!(
                "Node {:?}: skipped {} triangles referencing corners beyond {}",
                out.name(),
                skipped_triangles,
                corner_count
            );
        }

        flatten_batches(out, batches);

        debug!(
            "Node {:?}: {} corners -> {} vertices, {} indices in {} submeshes",
            out.name(),
            corner_count,
            indexed.vertices.len(),
            out.indices.len(),
            out.sub_meshes.len()
        );

        Ok(())
    }
}

/// The global material index of a face. Every malformed step falls back to index 0.
fn resolve_material_index<N: SourceNode>(
    node: &N,
    mesh: &N::Mesh,
    face_index: usize,
    materials: &MaterialLookup,
    redirected_faces: &mut usize,
) -> usize {
    let slots = node.materials();
    if slots.is_empty() {
        return 0;
    }

    let mut slot = mesh.face_material(face_index).unwrap_or(0);
    if slot >= slots.len() {
        *redirected_faces += 1;
        slot = 0;
    }

    slots[slot]
        .and_then(|scene_material| materials.resolve(scene_material))
        .unwrap_or(0)
}

/// Appends the batches in ascending material order, one submesh per non-empty batch.
fn flatten_batches(out: &mut ModelNode, batches: BTreeMap<usize, Vec<u32>>) {
    let mut index_offset = out.indices.len();
    for (material_index, batch) in batches {
        if batch.is_empty() {
            continue;
        }

        out.sub_meshes.push(SubMesh {
            index_offset,
            index_count: batch.len(),
            material_index,
        });
        index_offset += batch.len();
        out.indices.extend(batch);
    }
}

impl<S: SceneSource> NodeListener<S> for MeshHierarchyBuilder {
    fn on_node_begin(
        &mut self,
        _scene: &S,
        node: &S::Node,
        context: &NodeVisitContext<'_, S::Node>,
    ) -> Result<(), ImportError> {
        let parent = self.node_stack.last().copied();
        let name = node.name().unwrap_or(UNNAMED_NODE);
        let handle = self.model.create_node(name, parent);

        let material_indices = node
            .materials()
            .iter()
            .filter_map(|slot| slot.and_then(|scene_material| self.materials.resolve(scene_material)))
            .collect();

        let out = self.model.node_mut(handle);
        out.node_to_parent = context.node_to_parent;
        out.geometry_to_node = context.geometry_to_node;
        out.material_indices = material_indices;

        if let Some(mesh) = node.mesh() {
            self.append_indexed_mesh(node, mesh, handle)?;
        }

        trace!("Entering node {:?}", name);
        self.node_stack.push(handle);
        Ok(())
    }

    fn on_node_end(&mut self, _scene: &S, _node: &S::Node) -> Result<(), ImportError> {
        self.node_stack
            .pop()
            .map(|_| ())
            .ok_or(ImportError::NodeStackUnderflow)
    }
}
