use fbxbake_files::AssetFileError;
use thiserror::Error;

pub mod importer;
pub mod io;
pub mod mesh;
pub mod scene;

pub use importer::import_scene;
pub use io::{load_from_file, write_to_file};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Mesh conversion failed: {message}")]
    Conversion { message: String },

    /// A node ended without having begun, the scene traversal did not nest its events.
    #[error("Node stack underflow, node begin and end events are not balanced")]
    NodeStackUnderflow,

    #[error(transparent)]
    File(#[from] AssetFileError),
}
