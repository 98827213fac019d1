use fbxbake_files_derive::{Parse, Writeable};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::material::types::Material;
use crate::model::types::{ModelResult, SubMesh};

pub const MAGIC: [u8; 4] = *b"FBXB";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum FormatVersion {
    /// Nodes carry a list of material indices, every mesh is drawn with the first one.
    V1 = 1,
    /// Nodes carry explicit submesh records.
    V2 = 2,
}

impl FormatVersion {
    /// The only version the writer produces. Version 2 is read-only.
    pub const CURRENT: FormatVersion = FormatVersion::V1;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Parse, Writeable)]
pub(crate) struct FileHeader {
    pub magic: [u8; 4],
    pub version: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Parse, Writeable)]
pub(crate) struct SubMeshRecord {
    pub offset: u64,
    pub count: u64,
    pub material_index: u64,
}

impl From<&SubMesh> for SubMeshRecord {
    fn from(value: &SubMesh) -> Self {
        SubMeshRecord {
            offset: value.index_offset as u64,
            count: value.index_count as u64,
            material_index: value.material_index as u64,
        }
    }
}

/// Everything one conversion produces, or one load returns.
#[derive(Debug, Clone, Default)]
pub struct AssetBundle {
    pub materials: Vec<Material>,
    pub model: ModelResult,
    format_version: Option<FormatVersion>,
}

impl AssetBundle {
    pub fn new(materials: Vec<Material>, model: ModelResult) -> Self {
        AssetBundle {
            materials,
            model,
            format_version: None,
        }
    }

    pub(crate) fn loaded(materials: Vec<Material>, model: ModelResult, version: FormatVersion) -> Self {
        AssetBundle {
            materials,
            model,
            format_version: Some(version),
        }
    }

    /// The on-disk version this bundle was read from, `None` if it was built in memory.
    pub fn format_version(&self) -> Option<FormatVersion> {
        self.format_version
    }

    pub fn clear(&mut self) {
        self.materials.clear();
        self.model = ModelResult::new();
        self.format_version = None;
    }
}
