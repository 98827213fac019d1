use std::fmt::{Debug, Formatter};

use glam::{Mat4, UVec4, Vec2, Vec3, Vec4};
use log::{trace, warn};

use crate::common::types::MAX_UV_SETS;

/// Structure-of-arrays vertex storage. Every populated array has the same length; an empty array
/// stands for "every vertex has the default" (normal +Y, opaque white color, zero otherwise).
#[derive(Clone, Default, PartialEq)]
pub struct VertexAttributes {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tex_coords: [Vec<Vec2>; MAX_UV_SETS],
    pub colors: Vec<Vec4>,
    pub tangents: Vec<Vec3>,
    pub bitangents: Vec<Vec3>,
    pub bone_indices: Vec<UVec4>,
    /// Normalized to sum 1 when any weight is present, all zero otherwise.
    pub bone_weights: Vec<Vec4>,
}

impl Debug for VertexAttributes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ positions: [{}], ", self.positions.len())?;
        write!(f, "normals: [{}], ", self.normals.len())?;
        write!(
            f,
            "tex_coords: [{}, {}, {}, {}], ",
            self.tex_coords[0].len(),
            self.tex_coords[1].len(),
            self.tex_coords[2].len(),
            self.tex_coords[3].len()
        )?;
        write!(f, "colors: [{}], ", self.colors.len())?;
        write!(f, "tangents: [{}], ", self.tangents.len())?;
        write!(f, "bitangents: [{}], ", self.bitangents.len())?;
        write!(f, "bone_indices: [{}], ", self.bone_indices.len())?;
        write!(f, "bone_weights: [{}] }}", self.bone_weights.len())
    }
}

impl VertexAttributes {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.positions.reserve(additional);
        self.normals.reserve(additional);
        for set in &mut self.tex_coords {
            set.reserve(additional);
        }
        self.colors.reserve(additional);
        self.tangents.reserve(additional);
        self.bitangents.reserve(additional);
        self.bone_indices.reserve(additional);
        self.bone_weights.reserve(additional);
    }

    /// Whether every populated array matches the position count.
    pub fn is_consistent(&self) -> bool {
        let count = self.vertex_count();
        let lengths = [
            self.normals.len(),
            self.tex_coords[0].len(),
            self.tex_coords[1].len(),
            self.tex_coords[2].len(),
            self.tex_coords[3].len(),
            self.colors.len(),
            self.tangents.len(),
            self.bitangents.len(),
            self.bone_indices.len(),
            self.bone_weights.len(),
        ];

        lengths.iter().all(|&len| len == 0 || len == count)
    }
}

/// A contiguous run of a node's index buffer drawn with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubMesh {
    pub index_offset: usize,
    pub index_count: usize,
    pub material_index: usize,
}

impl SubMesh {
    pub fn index_range(&self) -> std::ops::Range<usize> {
        self.index_offset..self.index_offset + self.index_count
    }
}

/// Index of a node inside the [`ModelResult`] that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(usize);

impl NodeHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone)]
pub struct ModelNode {
    id: u32,
    name: String,
    handle: NodeHandle,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,

    pub node_to_parent: Mat4,
    pub geometry_to_node: Mat4,

    pub vertices: VertexAttributes,
    pub indices: Vec<u32>,
    /// Sorted by ascending material index, together covering `indices` exactly once.
    pub sub_meshes: Vec<SubMesh>,
    /// Global material indices of the materials attached to this node.
    pub material_indices: Vec<usize>,
}

impl Debug for ModelNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ id: {}, name: {:?}, ", self.id, self.name)?;
        write!(f, "parent: {:?}, children: {:?}, ", self.parent, self.children)?;
        write!(f, "vertices: {:?}, ", self.vertices)?;
        write!(f, "indices: [{}], ", self.indices.len())?;
        write!(f, "sub_meshes: {:?} }}", self.sub_meshes)
    }
}

impl ModelNode {
    fn new(id: u32, name: String, handle: NodeHandle) -> Self {
        ModelNode {
            id,
            name,
            handle,
            parent: None,
            children: vec![],
            node_to_parent: Mat4::IDENTITY,
            geometry_to_node: Mat4::IDENTITY,
            vertices: VertexAttributes::default(),
            indices: vec![],
            sub_meshes: vec![],
            material_indices: vec![],
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    pub fn has_mesh(&self) -> bool {
        !self.indices.is_empty()
    }
}

/// Owns every node of one converted or loaded model. Nodes are only ever appended; parents and
/// children refer to each other through [`NodeHandle`]s into this storage.
#[derive(Debug, Clone)]
pub struct ModelResult {
    nodes: Vec<ModelNode>,
    root: Option<NodeHandle>,
    next_id: u32,
}

impl Default for ModelResult {
    fn default() -> Self {
        ModelResult::new()
    }
}

impl ModelResult {
    pub fn new() -> Self {
        ModelResult {
            nodes: vec![],
            root: None,
            next_id: 1,
        }
    }

    pub fn root(&self) -> Option<NodeHandle> {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[ModelNode] {
        &self.nodes
    }

    /// # Panics
    /// If `handle` was not created by this `ModelResult`.
    pub fn node(&self, handle: NodeHandle) -> &ModelNode {
        &self.nodes[handle.0]
    }

    /// # Panics
    /// If `handle` was not created by this `ModelResult`.
    pub fn node_mut(&mut self, handle: NodeHandle) -> &mut ModelNode {
        &mut self.nodes[handle.0]
    }

    pub fn root_node(&self) -> Option<&ModelNode> {
        self.root.map(|handle| self.node(handle))
    }

    /// Appends a node with the next id. Without a parent, the node becomes the root unless one
    /// already exists.
    pub fn create_node(&mut self, name: impl Into<String>, parent: Option<NodeHandle>) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len());
        let id = self.next_id;
        self.next_id += 1;

        let mut node = ModelNode::new(id, name.into(), handle);
        trace!("Creating node {} {:?} under {:?}", id, node.name, parent);

        match parent {
            Some(parent) => {
                node.parent = Some(parent);
                self.nodes[parent.0].children.push(handle);
            }
            None if self.root.is_none() => self.root = Some(handle),
            None => warn!(
                "Node {:?} has no parent but the root already exists, it will be unreachable",
                node.name
            ),
        }

        self.nodes.push(node);
        handle
    }

    /// Pre-order handles starting at the root, children in insertion order.
    pub fn dfs_order(&self) -> Vec<NodeHandle> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let Some(root) = self.root else {
            return order;
        };

        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            order.push(handle);
            // reversed, so the first child is popped first
            stack.extend(self.nodes[handle.0].children.iter().rev());
        }

        order
    }

    pub fn for_each_dfs<F: FnMut(&ModelNode)>(&self, mut visit: F) {
        for handle in self.dfs_order() {
            visit(self.node(handle));
        }
    }

    /// The chain from the root down to and including `handle`.
    pub fn child_chain(&self, handle: NodeHandle) -> Vec<NodeHandle> {
        let mut chain = vec![handle];
        let mut current = self.node(handle).parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.node(parent).parent;
        }
        chain.reverse();
        chain
    }

    /// Node-to-world transform, the product of every `node_to_parent` along the chain.
    pub fn world_transform(&self, handle: NodeHandle) -> Mat4 {
        self.child_chain(handle)
            .into_iter()
            .fold(Mat4::IDENTITY, |acc, link| acc * self.node(link).node_to_parent)
    }
}
