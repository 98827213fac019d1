use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fbxbake")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspects, rewrites and exports FBXB asset bundles")]
pub struct CliArgs {
    /// Relative paths are resolved against this directory.
    #[arg(long, env = "FBXBAKE_ASSET_DIR", default_value_t = default_asset_dir())]
    pub asset_dir: String,

    #[command(subcommand)]
    pub command: Command,
}

pub fn default_asset_dir() -> String {
    ".".to_string()
}

impl CliArgs {
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new(&self.asset_dir).join(path)
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prints the materials and the node tree of a bundle.
    Inspect { file: PathBuf },
    /// Re-writes a bundle of any readable version in the written version.
    Rewrite { input: PathBuf, output: PathBuf },
    /// Exports every mesh of a bundle as Wavefront OBJ.
    DumpObj { input: PathBuf, output: PathBuf },
}
