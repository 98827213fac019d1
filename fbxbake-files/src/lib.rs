use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetFileError {
    #[error("The file's magic value {magic:?} does not match the expected \"FBXB\"")]
    InvalidMagicValue { magic: [u8; 4] },

    #[error("Unsupported format version {version}, expected 1 or 2")]
    UnsupportedVersion { version: u32 },

    #[error("The file is violating the expected format, because: {reason}")]
    FormatError { reason: &'static str },

    #[error("Unknown material channel id {channel}")]
    UnknownChannel { channel: u16 },

    #[error("Unknown material value kind {kind}")]
    UnknownValueKind { kind: u8 },

    /// Any failing read or write, including a stream that ends before a field is complete.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    UTF8ConversationError(#[from] std::string::FromUtf8Error),
}

impl AssetFileError {
    /// Whether the stream was readable but did not contain a valid bundle.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, AssetFileError::IOError(_))
    }

    /// Whether the stream ended before the bundle was complete.
    pub fn is_truncated(&self) -> bool {
        matches!(self, AssetFileError::IOError(inner) if inner.kind() == std::io::ErrorKind::UnexpectedEof)
    }
}

pub mod bundle;
pub mod common;
pub mod material;
pub mod model;

pub use bundle::reader::AssetReader;
pub use bundle::types::{AssetBundle, FormatVersion};
pub use bundle::writer::AssetWriter;
pub use material::types::{ChannelId, Material, MaterialProperty, MaterialValue, ValueKind};
pub use model::types::{ModelNode, ModelResult, NodeHandle, SubMesh, VertexAttributes};
