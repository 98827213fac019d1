use std::collections::HashMap;
use std::collections::hash_map::Entry;

use thiserror::Error;

use crate::mesh::packed_vertex::{PackedVertex, VertexKey};

#[derive(Error, Debug)]
pub enum DedupError {
    #[error("{unique} unique vertices exceed the 32 bit index range")]
    TooManyVertices { unique: usize },
}

/// Unique vertices in first-occurrence order, plus one entry per input corner pointing at its
/// unique vertex.
#[derive(Debug, Default)]
pub struct IndexedVertices {
    pub vertices: Vec<PackedVertex>,
    pub remap: Vec<u32>,
}

pub enum VertexDeduplicator {}

impl VertexDeduplicator {
    /// Merges corners whose packed records are bit-identical. Deterministic for a given input.
    pub fn generate_indices(corners: &[PackedVertex]) -> Result<IndexedVertices, DedupError> {
        let mut lookup: HashMap<VertexKey, u32> = HashMap::with_capacity(corners.len());
        let mut indexed = IndexedVertices {
            vertices: Vec::with_capacity(corners.len()),
            remap: Vec::with_capacity(corners.len()),
        };

        for corner in corners {
            let index = match lookup.entry(corner.key()) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    let unique = indexed.vertices.len();
                    let index = u32::try_from(unique).map_err(|_| DedupError::TooManyVertices { unique })?;
                    indexed.vertices.push(*corner);
                    *entry.insert(index)
                }
            };
            indexed.remap.push(index);
        }

        Ok(indexed)
    }
}
