use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use fbxbake_files::{AssetBundle, AssetFileError, AssetReader, AssetWriter};
use log::info;

pub mod obj;


pub fn load_from_file(path: impl AsRef<Path>) -> Result<AssetBundle, AssetFileError> {
    let path = path.as_ref();
    let mut rdr = BufReader::new(File::open(path)?);
    let bundle = AssetReader::parse_bundle(&mut rdr)?;
    info!("Loaded {}", path.display());
    Ok(bundle)
}

/// Writes `bundle` in the current format version, replacing whatever `path` held before.
pub fn write_to_file(path: impl AsRef<Path>, bundle: &AssetBundle) -> Result<(), AssetFileError> {
    let path = path.as_ref();
    let mut w = BufWriter::new(File::create(path)?);
    AssetWriter::write_bundle(&mut w, bundle)?;
    w.flush()?;
    info!("Wrote {}", path.display());
    Ok(())
}
