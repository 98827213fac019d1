use std::io::Write;

use fbxbake_files::{AssetBundle, AssetFileError, ModelNode};
use glam::{Mat3, Mat4};
use log::debug;

/// Dumps every mesh-bearing node into `w` as Wavefront OBJ, in world space.
/// Submeshes become `usemtl material_<n>` runs, no .mtl file is written.
pub fn dump_to_wavefront_obj<W: Write>(w: &mut W, bundle: &AssetBundle) -> Result<(), AssetFileError> {
    let model = &bundle.model;
    let mut bases = ElementBases::default();

    for handle in model.dfs_order() {
        let node = model.node(handle);
        if !node.has_mesh() {
            continue;
        }

        let transform = model.world_transform(handle) * node.geometry_to_node;
        write_node(w, node, transform, &mut bases)?;
    }

    debug!("Dumped {} vertices as obj", bases.position);
    Ok(())
}

/// Count of `v`, `vt` and `vn` lines written so far. Obj numbers each of them separately,
/// globally and 1-based.
#[derive(Debug, Default)]
struct ElementBases {
    position: usize,
    tex_coord: usize,
    normal: usize,
}

fn write_node<W: Write>(
    w: &mut W,
    node: &ModelNode,
    transform: Mat4,
    bases: &mut ElementBases,
) -> Result<(), AssetFileError> {
    let vertices = &node.vertices;
    let has_normals = vertices.normals.len() == vertices.vertex_count();
    let has_uvs = vertices.tex_coords[0].len() == vertices.vertex_count();
    let (v, vt, vn) = (bases.position + 1, bases.tex_coord + 1, bases.normal + 1);

    writeln!(w, "o {}", node.name())?;
    for pos in &vertices.positions {
        let pos = transform.transform_point3(*pos);
        writeln!(w, "v {} {} {}", pos.x, pos.y, pos.z)?;
    }

    if has_normals {
        let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();
        for normal in &vertices.normals {
            let normal = (normal_matrix * *normal).normalize_or_zero();
            writeln!(w, "vn {} {} {}", normal.x, normal.y, normal.z)?;
        }
    }

    if has_uvs {
        for uv in &vertices.tex_coords[0] {
            writeln!(w, "vt {} {}", uv.x, uv.y)?;
        }
    }

    for sub_mesh in &node.sub_meshes {
        let Some(indices) = node.indices.get(sub_mesh.index_range()) else {
            continue;
        };

        writeln!(w, "usemtl material_{}", sub_mesh.material_index)?;
        for triangle in indices.chunks_exact(3) {
            write!(w, "f")?;
            for &index in triangle {
                let i = index as usize;
                match (has_uvs, has_normals) {
                    (true, true) => write!(w, " {}/{}/{}", v + i, vt + i, vn + i)?,
                    (true, false) => write!(w, " {}/{}", v + i, vt + i)?,
                    (false, true) => write!(w, " {}//{}", v + i, vn + i)?,
                    (false, false) => write!(w, " {}", v + i)?,
                }
            }
            writeln!(w)?;
        }
    }

    bases.position += vertices.vertex_count();
    if has_uvs {
        bases.tex_coord += vertices.vertex_count();
    }
    if has_normals {
        bases.normal += vertices.vertex_count();
    }

    Ok(())
}
