use std::io::Cursor;

use glam::{Mat4, UVec4, Vec2, Vec3, Vec4};

use crate::AssetFileError;
use crate::bundle::reader::AssetReader;
use crate::bundle::types::{AssetBundle, FormatVersion, MAGIC, SubMeshRecord};
use crate::bundle::writer::AssetWriter;
use crate::common::writer::Writeable;
use crate::material::types::{ChannelId, Material, MaterialProperty, MaterialValue};
use crate::model::types::{ModelResult, SubMesh};

fn sample_bundle() -> AssetBundle {
    let mut model = ModelResult::new();
    let root = model.create_node("Scene", None);
    let mesh = model.create_node("Quad", Some(root));
    model.create_node("Empty", Some(root));

    model.node_mut(root).node_to_parent = Mat4::from_translation(Vec3::new(0.0, 1.0, 2.0));
    let node = model.node_mut(mesh);
    node.geometry_to_node = Mat4::from_scale(Vec3::splat(0.5));
    node.vertices.positions = vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y];
    node.vertices.normals = vec![Vec3::Z; 4];
    node.vertices.tex_coords[0] = vec![Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
    node.vertices.colors = vec![Vec4::ONE; 4];
    node.vertices.bone_indices = vec![UVec4::new(0, 1, 0, 0); 4];
    node.vertices.bone_weights = vec![Vec4::new(0.25, 0.75, 0.0, 0.0); 4];
    node.indices = vec![0, 1, 2, 0, 2, 3];
    node.sub_meshes = vec![
        SubMesh {
            index_offset: 0,
            index_count: 3,
            material_index: 0,
        },
        SubMesh {
            index_offset: 3,
            index_count: 3,
            material_index: 1,
        },
    ];
    node.material_indices = vec![0, 1];

    let materials = vec![
        Material {
            properties: vec![
                MaterialProperty::new(ChannelId::BaseColor, MaterialValue::Vec3(Vec3::new(0.8, 0.1, 0.1))),
                MaterialProperty::new(ChannelId::BaseColorMap, MaterialValue::Text("brick.png".into())),
            ],
            is_pbr: true,
        },
        Material {
            properties: vec![
                MaterialProperty::new(ChannelId::DiffuseFactor, MaterialValue::Scalar(0.5)),
                MaterialProperty::new(ChannelId::SpecularExponent, MaterialValue::Integer(-12)),
                MaterialProperty::new(ChannelId::Opacity, MaterialValue::Boolean(true)),
                MaterialProperty::new(ChannelId::EmissionColor, MaterialValue::Vec4(Vec4::new(1.0, 2.0, 3.0, 4.0))),
                MaterialProperty::new(ChannelId::Bump, MaterialValue::Vec2(Vec2::new(0.1, 0.2))),
                MaterialProperty::new(ChannelId::ReflectionFactor, MaterialValue::None),
            ],
            is_pbr: false,
        },
    ];

    AssetBundle::new(materials, model)
}

fn write_to_vec(bundle: &AssetBundle) -> Result<Vec<u8>, AssetFileError> {
    let mut buf = vec![];
    AssetWriter::write_bundle(&mut buf, bundle)?;
    Ok(buf)
}

/// Header, no materials, then a single root node carrying a triangle in the legacy layout.
fn legacy_stream(legacy_material_indices: Vec<u64>, indices: Vec<u32>) -> Result<Vec<u8>, AssetFileError> {
    let mut buf = vec![];
    MAGIC.write(&mut buf)?;
    1u32.write(&mut buf)?;
    0u64.write(&mut buf)?;

    1u64.write(&mut buf)?;
    "Legacy".write(&mut buf)?;
    (-1i32).write(&mut buf)?;
    Mat4::IDENTITY.write(&mut buf)?;
    Mat4::IDENTITY.write(&mut buf)?;
    vec![Vec3::ZERO, Vec3::X, Vec3::Y].write(&mut buf)?;
    // normals, four uv sets, colors, tangents, bitangents, bone indices, bone weights
    for _ in 0..10 {
        0u64.write(&mut buf)?;
    }
    indices.write(&mut buf)?;
    legacy_material_indices.write(&mut buf)?;
    Ok(buf)
}

#[test]
fn bundle_round_trip() -> Result<(), anyhow::Error> {
    let bundle = sample_bundle();
    let buf = write_to_vec(&bundle)?;
    let loaded = AssetReader::parse_bundle(&mut Cursor::new(buf))?;

    assert_eq!(loaded.format_version(), Some(FormatVersion::V1));
    assert_eq!(loaded.materials, bundle.materials);
    assert_eq!(loaded.model.node_count(), 3);

    let expected: Vec<_> = bundle.model.dfs_order();
    let actual: Vec<_> = loaded.model.dfs_order();
    assert_eq!(expected.len(), actual.len());

    for (e, a) in expected.into_iter().zip(actual) {
        let expected = bundle.model.node(e);
        let actual = loaded.model.node(a);
        assert_eq!(expected.name(), actual.name());
        assert_eq!(
            expected.parent().map(|p| bundle.model.node(p).name().to_string()),
            actual.parent().map(|p| loaded.model.node(p).name().to_string())
        );
        assert_eq!(expected.node_to_parent, actual.node_to_parent);
        assert_eq!(expected.geometry_to_node, actual.geometry_to_node);
        assert_eq!(expected.vertices, actual.vertices);
        assert_eq!(expected.indices, actual.indices);
        assert_eq!(expected.material_indices, actual.material_indices);
    }

    // the written layout keeps no submeshes, the mesh comes back as one run
    let quad = loaded
        .model
        .nodes()
        .iter()
        .find(|node| node.name() == "Quad")
        .expect("quad node survives");
    assert_eq!(
        quad.sub_meshes,
        vec![SubMesh {
            index_offset: 0,
            index_count: 6,
            material_index: 0,
        }]
    );

    Ok(())
}

#[test]
fn material_indices_survive_a_round_trip() -> Result<(), anyhow::Error> {
    let mut model = ModelResult::new();
    let root = model.create_node("Root", None);
    model.node_mut(root).material_indices = vec![4, 2];

    let buf = write_to_vec(&AssetBundle::new(vec![], model))?;
    assert_eq!(&buf[4..8], &1u32.to_le_bytes());

    let loaded = AssetReader::parse_bundle(&mut Cursor::new(buf))?;
    let root = loaded.model.root_node().expect("bundle has a root");
    assert_eq!(root.material_indices, vec![4, 2]);
    assert!(root.sub_meshes.is_empty());

    Ok(())
}

#[test]
fn pbr_material_keeps_both_properties() -> Result<(), anyhow::Error> {
    let bundle = sample_bundle();
    let loaded = AssetReader::parse_bundle(&mut Cursor::new(write_to_vec(&bundle)?))?;

    let material = &loaded.materials[0];
    assert!(material.is_pbr);
    assert_eq!(material.properties.len(), 2);
    assert_eq!(material.properties[0].channel, ChannelId::BaseColor);
    assert_eq!(material.properties[0].value, MaterialValue::Vec3(Vec3::new(0.8, 0.1, 0.1)));
    assert_eq!(material.properties[1].channel, ChannelId::BaseColorMap);
    assert_eq!(material.properties[1].value.as_text(), Some("brick.png"));

    Ok(())
}

#[test]
fn rejects_bad_magic() -> Result<(), anyhow::Error> {
    let mut buf = write_to_vec(&sample_bundle())?;
    buf[..4].copy_from_slice(b"FBXA");

    match AssetReader::parse_bundle(&mut Cursor::new(buf)) {
        Err(AssetFileError::InvalidMagicValue { magic }) => assert_eq!(&magic, b"FBXA"),
        other => panic!("expected InvalidMagicValue, got {:?}", other.map(|_| ())),
    }

    Ok(())
}

#[test]
fn rejects_unknown_version() -> Result<(), anyhow::Error> {
    let mut buf = write_to_vec(&sample_bundle())?;
    buf[4..8].copy_from_slice(&3u32.to_le_bytes());

    let err = AssetReader::parse_bundle(&mut Cursor::new(buf)).expect_err("version 3 must be rejected");
    assert!(matches!(err, AssetFileError::UnsupportedVersion { version: 3 }));
    assert!(err.is_format_error());

    Ok(())
}

#[test]
fn truncated_stream_is_an_io_error() -> Result<(), anyhow::Error> {
    let buf = write_to_vec(&sample_bundle())?;

    for cut in [5, buf.len() / 2, buf.len() - 1] {
        let err = AssetReader::parse_bundle(&mut Cursor::new(&buf[..cut])).expect_err("truncated stream must fail");
        assert!(err.is_truncated(), "cut at {}: {:?}", cut, err);
        assert!(!err.is_format_error());
    }

    Ok(())
}

#[test]
fn legacy_version_synthesizes_one_sub_mesh() -> Result<(), anyhow::Error> {
    let buf = legacy_stream(vec![3, 5], vec![0, 1, 2])?;
    let loaded = AssetReader::parse_bundle(&mut Cursor::new(buf))?;

    assert_eq!(loaded.format_version(), Some(FormatVersion::V1));
    let root = loaded.model.root_node().expect("legacy stream has a root");
    assert_eq!(root.name(), "Legacy");
    assert_eq!(root.vertices.vertex_count(), 3);
    assert_eq!(root.material_indices, vec![3, 5]);
    assert_eq!(
        root.sub_meshes,
        vec![SubMesh {
            index_offset: 0,
            index_count: 3,
            material_index: 3,
        }]
    );

    Ok(())
}

#[test]
fn legacy_version_defaults_material_and_skips_empty_meshes() -> Result<(), anyhow::Error> {
    let loaded = AssetReader::parse_bundle(&mut Cursor::new(legacy_stream(vec![], vec![0, 1, 2])?))?;
    let root = loaded.model.root_node().expect("legacy stream has a root");
    assert_eq!(root.sub_meshes.len(), 1);
    assert_eq!(root.sub_meshes[0].material_index, 0);

    let loaded = AssetReader::parse_bundle(&mut Cursor::new(legacy_stream(vec![7], vec![])?))?;
    let root = loaded.model.root_node().expect("legacy stream has a root");
    assert!(root.sub_meshes.is_empty());

    Ok(())
}

#[test]
fn rewriting_legacy_keeps_the_sub_mesh() -> Result<(), anyhow::Error> {
    let legacy = AssetReader::parse_bundle(&mut Cursor::new(legacy_stream(vec![2], vec![0, 1, 2])?))?;
    let rewritten = AssetReader::parse_bundle(&mut Cursor::new(write_to_vec(&legacy)?))?;

    assert_eq!(rewritten.format_version(), Some(FormatVersion::V1));
    let root = rewritten.model.root_node().expect("rewritten stream has a root");
    assert_eq!(root.sub_meshes[0].material_index, 2);
    assert_eq!(root.material_indices, vec![2]);

    Ok(())
}

/// Header, no materials, then one node without vertex data whose trailing fields are left to
/// the caller.
fn single_node_stream(version: u32, parent_index: i32, indices: Vec<u32>) -> Result<Vec<u8>, AssetFileError> {
    let mut buf = vec![];
    MAGIC.write(&mut buf)?;
    version.write(&mut buf)?;
    0u64.write(&mut buf)?;

    1u64.write(&mut buf)?;
    "Single".write(&mut buf)?;
    parent_index.write(&mut buf)?;
    Mat4::IDENTITY.write(&mut buf)?;
    Mat4::IDENTITY.write(&mut buf)?;
    // positions, normals, four uv sets, colors, tangents, bitangents, bone indices, bone weights
    for _ in 0..11 {
        0u64.write(&mut buf)?;
    }
    indices.write(&mut buf)?;
    Ok(buf)
}

#[test]
fn unread_parent_becomes_parentless() -> Result<(), anyhow::Error> {
    let mut buf = single_node_stream(2, 7, vec![])?;
    0u64.write(&mut buf)?;

    let loaded = AssetReader::parse_bundle(&mut Cursor::new(buf))?;
    assert_eq!(loaded.model.node_count(), 1);
    let node = loaded.model.root_node().expect("the node becomes the root");
    assert_eq!(node.name(), "Single");
    assert!(node.parent().is_none());

    Ok(())
}

#[test]
fn explicit_sub_meshes_are_read() -> Result<(), anyhow::Error> {
    let mut buf = single_node_stream(2, -1, vec![0, 1, 2, 0, 2, 3, 0, 1, 3])?;
    let sub_meshes = vec![
        SubMesh {
            index_offset: 0,
            index_count: 3,
            material_index: 1,
        },
        SubMesh {
            index_offset: 3,
            index_count: 3,
            material_index: 0,
        },
        SubMesh {
            index_offset: 6,
            index_count: 3,
            material_index: 1,
        },
    ];
    let records: Vec<SubMeshRecord> = sub_meshes.iter().map(SubMeshRecord::from).collect();
    records.write(&mut buf)?;

    let loaded = AssetReader::parse_bundle(&mut Cursor::new(buf))?;
    assert_eq!(loaded.format_version(), Some(FormatVersion::V2));
    let node = loaded.model.root_node().expect("stream has a root");
    assert_eq!(node.sub_meshes, sub_meshes);
    // first-seen order, also across non-adjacent repeats
    assert_eq!(node.material_indices, vec![1, 0]);

    Ok(())
}

#[test]
fn rejects_unknown_channel() -> Result<(), anyhow::Error> {
    let mut buf = vec![];
    MAGIC.write(&mut buf)?;
    2u32.write(&mut buf)?;
    1u64.write(&mut buf)?;
    false.write(&mut buf)?;
    1u64.write(&mut buf)?;
    500u16.write(&mut buf)?;
    0u8.write(&mut buf)?;
    0u64.write(&mut buf)?;

    let err = AssetReader::parse_bundle(&mut Cursor::new(buf)).expect_err("channel 500 does not exist");
    assert!(matches!(err, AssetFileError::UnknownChannel { channel: 500 }));

    Ok(())
}

#[test]
fn empty_bundle_round_trip() -> Result<(), anyhow::Error> {
    let loaded = AssetReader::parse_bundle(&mut Cursor::new(write_to_vec(&AssetBundle::default())?))?;
    assert!(loaded.materials.is_empty());
    assert!(loaded.model.root().is_none());

    Ok(())
}
