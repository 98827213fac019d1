use fbxbake_files::{ChannelId, Material, MaterialProperty, MaterialValue};
use log::{debug, warn};

use crate::ImportError;
use crate::importer::MaterialLookup;
use crate::scene::traversal::{NodeListener, NodeVisitContext};
use crate::scene::{MapValue, SceneSource, SourceMap, SourceMaterial, SourceNode};

/// Converts every distinct scene material attached to any node, in the order they are first
/// encountered.
pub struct MaterialCollector {
    materials: Vec<Material>,
    lookup: MaterialLookup,
}

impl MaterialCollector {
    pub fn new(lookup: MaterialLookup) -> Self {
        MaterialCollector {
            materials: vec![],
            lookup,
        }
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn into_materials(self) -> Vec<Material> {
        self.materials
    }

    pub fn clear(&mut self) {
        self.materials.clear();
        self.lookup.clear();
    }
}

impl<S: SceneSource> NodeListener<S> for MaterialCollector {
    fn on_node_begin(
        &mut self,
        scene: &S,
        node: &S::Node,
        _context: &NodeVisitContext<'_, S::Node>,
    ) -> Result<(), ImportError> {
        for &scene_material in node.materials().iter().flatten() {
            if self.lookup.resolve(scene_material).is_some() {
                continue;
            }

            let Some(source) = scene.material(scene_material) else {
                warn!(
                    "Node {:?} references material {} which the scene does not have",
                    node.name(),
                    scene_material
                );
                continue;
            };

            let material = extract_material(source);
            debug!(
                "Collected material {} with {} properties",
                self.materials.len(),
                material.properties.len()
            );

            self.lookup.insert(scene_material, self.materials.len());
            self.materials.push(material);
        }

        Ok(())
    }

    fn on_node_end(&mut self, _scene: &S, _node: &S::Node) -> Result<(), ImportError> {
        Ok(())
    }
}

/// One property per usable value, one more per enabled texture, channel by channel.
pub fn extract_material<M: SourceMaterial>(source: &M) -> Material {
    let mut properties = vec![];
    for channel in ChannelId::VALUE_CHANNELS {
        if let Some(map) = source.map(channel) {
            append_map(map, channel, &mut properties);
        }
    }

    Material {
        properties,
        is_pbr: source.is_pbr(),
    }
}

fn append_map(map: &SourceMap, channel: ChannelId, properties: &mut Vec<MaterialProperty>) {
    if let Some(value) = &map.value {
        properties.push(MaterialProperty::new(channel, material_value(value)));
    }

    if !map.texture_enabled {
        return;
    }

    let file_name = map.texture.as_ref().and_then(|texture| texture.file_name());
    if let (Some(file_name), Some(texture_channel)) = (file_name, channel.texture_channel()) {
        properties.push(MaterialProperty::new(
            texture_channel,
            MaterialValue::Text(file_name.to_string()),
        ));
    }
}

fn material_value(value: &MapValue) -> MaterialValue {
    match value.components {
        1 => MaterialValue::Scalar(value.value.x),
        2 => MaterialValue::Vec2(value.value.truncate().truncate()),
        3 => MaterialValue::Vec3(value.value.truncate()),
        4 => MaterialValue::Vec4(value.value),
        _ => MaterialValue::Integer(value.int),
    }
}
