use glam::{Vec2, Vec3, Vec4};
use num_enum::{IntoPrimitive, TryFromPrimitive};

pub use crate::material::channels::ChannelId;

/// On-disk tag preceding every material value payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ValueKind {
    None = 0,
    Real = 1,
    Vec2 = 2,
    Vec3 = 3,
    Vec4 = 4,
    Int = 5,
    Bool = 6,
    String = 7,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MaterialValue {
    #[default]
    None,
    Scalar(f32),
    Integer(i64),
    Boolean(bool),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    /// Texture references hold a bare file name, never a path.
    Text(String),
}

impl MaterialValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            MaterialValue::None => ValueKind::None,
            MaterialValue::Scalar(_) => ValueKind::Real,
            MaterialValue::Integer(_) => ValueKind::Int,
            MaterialValue::Boolean(_) => ValueKind::Bool,
            MaterialValue::Vec2(_) => ValueKind::Vec2,
            MaterialValue::Vec3(_) => ValueKind::Vec3,
            MaterialValue::Vec4(_) => ValueKind::Vec4,
            MaterialValue::Text(_) => ValueKind::String,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MaterialValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialProperty {
    pub channel: ChannelId,
    pub value: MaterialValue,
}

impl MaterialProperty {
    pub fn new(channel: ChannelId, value: MaterialValue) -> Self {
        MaterialProperty { channel, value }
    }
}

/// Properties keep their extraction order. A channel may legally appear more than once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Material {
    pub properties: Vec<MaterialProperty>,
    pub is_pbr: bool,
}

impl Material {
    /// The first property stored for `channel`.
    pub fn property(&self, channel: ChannelId) -> Option<&MaterialValue> {
        self.properties
            .iter()
            .find(|property| property.channel == channel)
            .map(|property| &property.value)
    }

    /// File names of every texture this material references, in property order.
    pub fn texture_names(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|property| property.channel.is_texture())
            .filter_map(|property| property.value.as_text())
    }
}
