use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use fbxbake_files::AssetBundle;
use log::info;

use crate::ImportError;
use crate::importer::material_collector::MaterialCollector;
use crate::importer::mesh_hierarchy_builder::MeshHierarchyBuilder;
use crate::scene::SceneSource;
use crate::scene::traversal::traverse;

pub mod material_collector;
pub mod mesh_hierarchy_builder;


/// Maps a scene material (by its index in the scene's material list) to its index in the
/// collected material list. Written by the [`MaterialCollector`], read by the
/// [`MeshHierarchyBuilder`] while both observe the same traversal.
#[derive(Debug, Clone, Default)]
pub struct MaterialLookup(Rc<RefCell<HashMap<usize, usize>>>);

impl MaterialLookup {
    pub fn resolve(&self, scene_material: usize) -> Option<usize> {
        self.0.borrow().get(&scene_material).copied()
    }

    pub(crate) fn insert(&self, scene_material: usize, index: usize) {
        self.0.borrow_mut().insert(scene_material, index);
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// Collects the materials and builds the node hierarchy of `scene` in a single traversal.
pub fn import_scene<S: SceneSource>(scene: &S) -> Result<AssetBundle, ImportError> {
    let lookup = MaterialLookup::default();
    let mut collector = MaterialCollector::new(lookup.clone());
    let mut builder = MeshHierarchyBuilder::new(lookup);

    // the collector has to see a node's materials before the builder resolves them
    traverse(scene, &mut [&mut collector, &mut builder])?;

    let bundle = AssetBundle::new(collector.into_materials(), builder.into_model());
    info!(
        "Imported scene with {} materials and {} nodes",
        bundle.materials.len(),
        bundle.model.node_count()
    );

    Ok(bundle)
}
