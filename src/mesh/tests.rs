use glam::{Vec2, Vec3, Vec4};

use crate::mesh::dedup::VertexDeduplicator;
use crate::mesh::packed_vertex::PackedVertex;
use crate::mesh::triangulate::fan_triangulate;
use crate::scene::memory::MemoryMesh;
use crate::scene::{Face, SkinWeight};

#[test]
fn fan_covers_polygons() {
    let mut out = vec![99];

    assert_eq!(fan_triangulate(Face { index_begin: 4, num_indices: 3 }, &mut out), 1);
    assert_eq!(out, vec![4, 5, 6]);

    assert_eq!(fan_triangulate(Face { index_begin: 0, num_indices: 5 }, &mut out), 3);
    assert_eq!(out, vec![0, 1, 2, 0, 2, 3, 0, 3, 4]);

    assert_eq!(fan_triangulate(Face { index_begin: 0, num_indices: 2 }, &mut out), 0);
    assert!(out.is_empty());
}

#[test]
fn missing_streams_use_defaults() {
    let mesh = MemoryMesh::new(vec![Vec3::new(1.0, 2.0, 3.0)], &[1]);
    let vertex = PackedVertex::from_corner(&mesh, 0);

    assert_eq!(vertex.position, [1.0, 2.0, 3.0]);
    assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
    assert_eq!(vertex.color, [1.0; 4]);
    assert_eq!(vertex.tex_coords, [[0.0; 2]; 4]);
    assert_eq!(vertex.tangent, [0.0; 3]);
    assert_eq!(vertex.bone_weights, [0.0; 4]);
    assert_eq!(vertex.bone_indices, [0; 4]);
}

#[test]
fn normals_are_normalized() {
    let mut mesh = MemoryMesh::new(vec![Vec3::ZERO; 2], &[2]);
    mesh.normals = vec![Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO];

    assert_eq!(PackedVertex::from_corner(&mesh, 0).normal, [0.0, 0.0, 1.0]);
    // a degenerate normal cannot be normalized
    assert_eq!(PackedVertex::from_corner(&mesh, 1).normal, [0.0, 1.0, 0.0]);
}

#[test]
fn skin_weights_are_renormalized() {
    let mut mesh = MemoryMesh::new(vec![Vec3::ZERO; 2], &[2]);
    let weight = |bone, weight| SkinWeight { bone, weight };
    mesh.skin = vec![
        vec![weight(3, 1.0), weight(7, 1.0), weight(1, 1.0), weight(2, 1.0), weight(9, 4.0)],
        vec![weight(5, 0.0)],
    ];

    let skinned = PackedVertex::from_corner(&mesh, 0);
    assert_eq!(skinned.bone_indices, [3, 7, 1, 2]);
    assert_eq!(skinned.bone_weights, [0.25; 4]);

    let weightless = PackedVertex::from_corner(&mesh, 1);
    assert_eq!(weightless.bone_indices, [5, 0, 0, 0]);
    assert_eq!(weightless.bone_weights, [0.0; 4]);
}

#[test]
fn extra_uv_sets_are_sampled() {
    let mut mesh = MemoryMesh::new(vec![Vec3::ZERO], &[1]);
    mesh.uv_sets = vec![vec![Vec2::new(0.5, 0.5)], vec![], vec![Vec2::ONE]];
    mesh.colors = vec![Vec4::new(0.1, 0.2, 0.3, 0.4)];

    let vertex = PackedVertex::from_corner(&mesh, 0);
    assert_eq!(vertex.tex_coords, [[0.5, 0.5], [0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);
    assert_eq!(vertex.color, [0.1, 0.2, 0.3, 0.4]);
}

#[test]
fn dedup_keeps_first_occurrence_order() -> Result<(), anyhow::Error> {
    let positions = vec![Vec3::X, Vec3::Y, Vec3::X, Vec3::Z, Vec3::Y, Vec3::X];
    let mesh = MemoryMesh::new(positions.clone(), &[3, 3]);
    let corners: Vec<PackedVertex> = (0..positions.len())
        .map(|corner| PackedVertex::from_corner(&mesh, corner))
        .collect();

    let indexed = VertexDeduplicator::generate_indices(&corners)?;
    assert_eq!(indexed.vertices.len(), 3);
    assert_eq!(indexed.remap, vec![0, 1, 0, 2, 1, 0]);
    assert_eq!(indexed.vertices[2].position, [0.0, 0.0, 1.0]);

    for (corner, &vertex) in indexed.remap.iter().enumerate() {
        assert!((vertex as usize) < indexed.vertices.len());
        assert_eq!(indexed.vertices[vertex as usize], corners[corner]);
    }

    Ok(())
}

#[test]
fn dedup_distinguishes_any_attribute() -> Result<(), anyhow::Error> {
    let mut mesh = MemoryMesh::new(vec![Vec3::ONE; 2], &[2]);
    mesh.uv_sets = vec![vec![Vec2::ZERO; 2], vec![], vec![], vec![Vec2::ZERO, Vec2::new(0.0, 1e-7)]];

    let corners = [PackedVertex::from_corner(&mesh, 0), PackedVertex::from_corner(&mesh, 1)];
    let indexed = VertexDeduplicator::generate_indices(&corners)?;
    assert_eq!(indexed.vertices.len(), 2);

    let indexed = VertexDeduplicator::generate_indices(&[])?;
    assert!(indexed.vertices.is_empty());
    assert!(indexed.remap.is_empty());

    Ok(())
}
