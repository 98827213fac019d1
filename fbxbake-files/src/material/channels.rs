use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Every material slot the format knows about. The ordinals are written to disk as `u16`, so
/// this list is closed: never reorder, only append.
///
/// Channels come in pairs. The even ordinal holds a factor or color value, the odd ordinal right
/// after it holds a texture reference for the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum ChannelId {
    // Legacy (Phong/Lambert) channels
    DiffuseFactor = 0,
    DiffuseFactorMap = 1,
    DiffuseColor = 2,
    DiffuseColorMap = 3,
    SpecularFactor = 4,
    SpecularFactorMap = 5,
    SpecularColor = 6,
    SpecularColorMap = 7,
    SpecularExponent = 8,
    SpecularExponentMap = 9,
    ReflectionFactor = 10,
    ReflectionFactorMap = 11,
    ReflectionColor = 12,
    ReflectionColorMap = 13,
    TransparencyFactor = 14,
    TransparencyFactorMap = 15,
    TransparencyColor = 16,
    TransparencyColorMap = 17,
    EmissionFactor = 18,
    EmissionFactorMap = 19,
    EmissionColor = 20,
    EmissionColorMap = 21,
    AmbientFactor = 22,
    AmbientFactorMap = 23,
    AmbientColor = 24,
    AmbientColorMap = 25,
    NormalMap = 26,
    NormalMapMap = 27,
    Bump = 28,
    BumpMap = 29,
    BumpFactor = 30,
    BumpFactorMap = 31,
    DisplacementFactor = 32,
    DisplacementFactorMap = 33,
    Displacement = 34,
    DisplacementMap = 35,
    VectorDisplacementFactor = 36,
    VectorDisplacementFactorMap = 37,
    VectorDisplacement = 38,
    VectorDisplacementMap = 39,

    // Physically based channels
    BaseFactor = 40,
    BaseFactorMap = 41,
    BaseColor = 42,
    BaseColorMap = 43,
    Roughness = 44,
    RoughnessMap = 45,
    Metalness = 46,
    MetalnessMap = 47,
    DiffuseRoughness = 48,
    DiffuseRoughnessMap = 49,
    SpecularFactorPbr = 50,
    SpecularFactorPbrMap = 51,
    SpecularColorPbr = 52,
    SpecularColorPbrMap = 53,
    SpecularIor = 54,
    SpecularIorMap = 55,
    SpecularAnisotropy = 56,
    SpecularAnisotropyMap = 57,
    SpecularRotation = 58,
    SpecularRotationMap = 59,
    TransmissionFactor = 60,
    TransmissionFactorMap = 61,
    TransmissionColor = 62,
    TransmissionColorMap = 63,
    TransmissionDepth = 64,
    TransmissionDepthMap = 65,
    TransmissionScatter = 66,
    TransmissionScatterMap = 67,
    TransmissionScatterAnisotropy = 68,
    TransmissionScatterAnisotropyMap = 69,
    TransmissionDispersion = 70,
    TransmissionDispersionMap = 71,
    TransmissionRoughness = 72,
    TransmissionRoughnessMap = 73,
    TransmissionExtraRoughness = 74,
    TransmissionExtraRoughnessMap = 75,
    TransmissionPriority = 76,
    TransmissionPriorityMap = 77,
    TransmissionEnableInAov = 78,
    TransmissionEnableInAovMap = 79,
    SubsurfaceFactor = 80,
    SubsurfaceFactorMap = 81,
    SubsurfaceColor = 82,
    SubsurfaceColorMap = 83,
    SubsurfaceRadius = 84,
    SubsurfaceRadiusMap = 85,
    SubsurfaceScale = 86,
    SubsurfaceScaleMap = 87,
    SubsurfaceAnisotropy = 88,
    SubsurfaceAnisotropyMap = 89,
    SubsurfaceTintColor = 90,
    SubsurfaceTintColorMap = 91,
    SubsurfaceType = 92,
    SubsurfaceTypeMap = 93,
    SheenFactor = 94,
    SheenFactorMap = 95,
    SheenColor = 96,
    SheenColorMap = 97,
    SheenRoughness = 98,
    SheenRoughnessMap = 99,
    CoatFactor = 100,
    CoatFactorMap = 101,
    CoatColor = 102,
    CoatColorMap = 103,
    CoatRoughness = 104,
    CoatRoughnessMap = 105,
    CoatIor = 106,
    CoatIorMap = 107,
    CoatAnisotropy = 108,
    CoatAnisotropyMap = 109,
    CoatRotation = 110,
    CoatRotationMap = 111,
    CoatNormal = 112,
    CoatNormalMap = 113,
    CoatAffectBaseColor = 114,
    CoatAffectBaseColorMap = 115,
    CoatAffectBaseRoughness = 116,
    CoatAffectBaseRoughnessMap = 117,
    ThinFilmFactor = 118,
    ThinFilmFactorMap = 119,
    ThinFilmThickness = 120,
    ThinFilmThicknessMap = 121,
    ThinFilmIor = 122,
    ThinFilmIorMap = 123,
    EmissionFactorPbr = 124,
    EmissionFactorPbrMap = 125,
    EmissionColorPbr = 126,
    EmissionColorPbrMap = 127,
    Opacity = 128,
    OpacityMap = 129,
    IndirectDiffuse = 130,
    IndirectDiffuseMap = 131,
    IndirectSpecular = 132,
    IndirectSpecularMap = 133,
    NormalMapPbr = 134,
    NormalMapPbrMap = 135,
    TangentMap = 136,
    TangentMapMap = 137,
    DisplacementMapPbr = 138,
    DisplacementMapPbrMap = 139,
    MatteFactor = 140,
    MatteFactorMap = 141,
    MatteColor = 142,
    MatteColorMap = 143,
    AmbientOcclusion = 144,
    AmbientOcclusionMap = 145,
    Glossiness = 146,
    GlossinessMap = 147,
    CoatGlossiness = 148,
    CoatGlossinessMap = 149,
    TransmissionGlossiness = 150,
    TransmissionGlossinessMap = 151,
}

impl ChannelId {
    /// The value channels in the order the importer extracts them.
    pub const VALUE_CHANNELS: [ChannelId; 76] = [
        ChannelId::DiffuseFactor,
        ChannelId::DiffuseColor,
        ChannelId::SpecularFactor,
        ChannelId::SpecularColor,
        ChannelId::SpecularExponent,
        ChannelId::ReflectionFactor,
        ChannelId::ReflectionColor,
        ChannelId::TransparencyFactor,
        ChannelId::TransparencyColor,
        ChannelId::EmissionFactor,
        ChannelId::EmissionColor,
        ChannelId::AmbientFactor,
        ChannelId::AmbientColor,
        ChannelId::NormalMap,
        ChannelId::Bump,
        ChannelId::BumpFactor,
        ChannelId::DisplacementFactor,
        ChannelId::Displacement,
        ChannelId::VectorDisplacementFactor,
        ChannelId::VectorDisplacement,
        ChannelId::BaseFactor,
        ChannelId::BaseColor,
        ChannelId::Roughness,
        ChannelId::Metalness,
        ChannelId::DiffuseRoughness,
        ChannelId::SpecularFactorPbr,
        ChannelId::SpecularColorPbr,
        ChannelId::SpecularIor,
        ChannelId::SpecularAnisotropy,
        ChannelId::SpecularRotation,
        ChannelId::TransmissionFactor,
        ChannelId::TransmissionColor,
        ChannelId::TransmissionDepth,
        ChannelId::TransmissionScatter,
        ChannelId::TransmissionScatterAnisotropy,
        ChannelId::TransmissionDispersion,
        ChannelId::TransmissionRoughness,
        ChannelId::TransmissionExtraRoughness,
        ChannelId::TransmissionPriority,
        ChannelId::TransmissionEnableInAov,
        ChannelId::SubsurfaceFactor,
        ChannelId::SubsurfaceColor,
        ChannelId::SubsurfaceRadius,
        ChannelId::SubsurfaceScale,
        ChannelId::SubsurfaceAnisotropy,
        ChannelId::SubsurfaceTintColor,
        ChannelId::SubsurfaceType,
        ChannelId::SheenFactor,
        ChannelId::SheenColor,
        ChannelId::SheenRoughness,
        ChannelId::CoatFactor,
        ChannelId::CoatColor,
        ChannelId::CoatRoughness,
        ChannelId::CoatIor,
        ChannelId::CoatAnisotropy,
        ChannelId::CoatRotation,
        ChannelId::CoatNormal,
        ChannelId::CoatAffectBaseColor,
        ChannelId::CoatAffectBaseRoughness,
        ChannelId::ThinFilmFactor,
        ChannelId::ThinFilmThickness,
        ChannelId::ThinFilmIor,
        ChannelId::EmissionFactorPbr,
        ChannelId::EmissionColorPbr,
        ChannelId::Opacity,
        ChannelId::IndirectDiffuse,
        ChannelId::IndirectSpecular,
        ChannelId::NormalMapPbr,
        ChannelId::TangentMap,
        ChannelId::DisplacementMapPbr,
        ChannelId::MatteFactor,
        ChannelId::MatteColor,
        ChannelId::AmbientOcclusion,
        ChannelId::Glossiness,
        ChannelId::CoatGlossiness,
        ChannelId::TransmissionGlossiness,
    ];

    pub fn is_texture(self) -> bool {
        u16::from(self) & 1 == 1
    }

    /// The texture channel paired with a value channel, `None` if `self` already is one.
    pub fn texture_channel(self) -> Option<ChannelId> {
        if self.is_texture() {
            return None;
        }

        ChannelId::try_from(u16::from(self) + 1).ok()
    }

    /// The value channel paired with a texture channel, `None` if `self` already is one.
    pub fn value_channel(self) -> Option<ChannelId> {
        if !self.is_texture() {
            return None;
        }

        ChannelId::try_from(u16::from(self) - 1).ok()
    }

    /// Whether the channel belongs to the physically based block rather than the legacy one.
    pub fn is_pbr(self) -> bool {
        u16::from(self) >= u16::from(ChannelId::BaseFactor)
    }
}
