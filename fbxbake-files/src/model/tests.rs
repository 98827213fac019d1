use glam::{Mat4, Vec3};

use crate::model::types::{ModelResult, VertexAttributes};

#[test]
fn first_parentless_node_becomes_root() {
    let mut model = ModelResult::new();
    assert!(model.root().is_none());

    let root = model.create_node("root", None);
    let child = model.create_node("child", Some(root));
    let stray = model.create_node("stray", None);

    assert_eq!(model.root(), Some(root));
    assert_eq!(model.node(child).parent(), Some(root));
    assert_eq!(model.node(root).children(), &[child]);
    assert_eq!(model.node(stray).parent(), None);
    assert_eq!(model.node_count(), 3);
}

#[test]
fn ids_are_assigned_from_one() {
    let mut model = ModelResult::new();
    let a = model.create_node("a", None);
    let b = model.create_node("b", Some(a));
    let c = model.create_node("c", Some(b));

    let ids: Vec<u32> = [a, b, c].iter().map(|&h| model.node(h).id()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn dfs_is_preorder_in_insertion_order() {
    let mut model = ModelResult::new();
    let root = model.create_node("root", None);
    let a = model.create_node("a", Some(root));
    let b = model.create_node("b", Some(root));
    model.create_node("a1", Some(a));
    model.create_node("a2", Some(a));
    model.create_node("b1", Some(b));

    let mut names = vec![];
    model.for_each_dfs(|node| names.push(node.name().to_string()));
    assert_eq!(names, vec!["root", "a", "a1", "a2", "b", "b1"]);
}

#[test]
fn deep_chains_do_not_recurse() {
    let mut model = ModelResult::new();
    let mut parent = model.create_node("0", None);
    for depth in 1..100_000 {
        parent = model.create_node(depth.to_string(), Some(parent));
    }

    let mut visited = 0usize;
    model.for_each_dfs(|_| visited += 1);
    assert_eq!(visited, 100_000);
}

#[test]
fn world_transform_follows_the_chain() {
    let mut model = ModelResult::new();
    let root = model.create_node("root", None);
    let arm = model.create_node("arm", Some(root));
    let hand = model.create_node("hand", Some(arm));

    model.node_mut(root).node_to_parent = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
    model.node_mut(arm).node_to_parent = Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0));
    model.node_mut(hand).node_to_parent = Mat4::from_scale(Vec3::splat(2.0));

    assert_eq!(model.child_chain(hand), vec![root, arm, hand]);

    let world = model.world_transform(hand);
    let point = world.transform_point3(Vec3::new(0.0, 0.0, 1.0));
    assert!(point.abs_diff_eq(Vec3::new(1.0, 2.0, 2.0), 1e-6));
}

#[test]
fn vertex_attributes_consistency() {
    let mut vertices = VertexAttributes::default();
    assert!(vertices.is_empty());
    assert!(vertices.is_consistent());

    vertices.positions = vec![Vec3::ZERO, Vec3::X];
    vertices.normals = vec![Vec3::Y, Vec3::Y];
    assert_eq!(vertices.vertex_count(), 2);
    assert!(vertices.is_consistent());

    vertices.tangents = vec![Vec3::X];
    assert!(!vertices.is_consistent());
}
