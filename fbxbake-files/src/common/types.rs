//! Fixed-size value types shared by every part of a bundle.
//!
//! Vectors and matrices are glam's `f32` types. A `Mat4` is stored and serialized column-major
//! and is otherwise treated as an opaque 64 byte blob.

pub use glam::{Mat4, UVec4, Vec2, Vec3, Vec4};

/// Number of texture coordinate sets every vertex carries.
pub const MAX_UV_SETS: usize = 4;

/// Number of bone influences every vertex carries.
pub const MAX_BONE_INFLUENCES: usize = 4;
