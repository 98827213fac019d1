use crate::scene::Face;

/// Fans the face out from its first corner. Faces with fewer than 3 corners yield no triangles.
pub fn fan_triangulate(face: Face, out: &mut Vec<u32>) -> usize {
    out.clear();
    if face.num_indices < 3 {
        return 0;
    }

    let first = face.index_begin;
    for i in 1..face.num_indices - 1 {
        out.extend_from_slice(&[first, first + i, first + i + 1]);
    }

    (face.num_indices - 2) as usize
}
