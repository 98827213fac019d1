use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use fbxbake::io::obj::dump_to_wavefront_obj;
use fbxbake::{load_from_file, write_to_file};
use fbxbake_files::{AssetBundle, FormatVersion};
use itertools::Itertools;

use crate::settings::{CliArgs, Command};

mod settings;

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let args = CliArgs::parse();
    log::trace!("Starting with args: {:?}", args);

    match &args.command {
        Command::Inspect { file } => inspect(&args.resolve(file)),
        Command::Rewrite { input, output } => rewrite(&args.resolve(input), &args.resolve(output)),
        Command::DumpObj { input, output } => dump_obj(&args.resolve(input), &args.resolve(output)),
    }
}

fn load(path: &Path) -> Result<AssetBundle, anyhow::Error> {
    load_from_file(path).with_context(|| format!("Failed to load bundle {}", path.display()))
}

fn inspect(path: &Path) -> Result<(), anyhow::Error> {
    let bundle = load(path)?;
    let version = bundle.format_version().map(u32::from).unwrap_or_default();
    println!("{}: version {}", path.display(), version);

    println!("{} materials", bundle.materials.len());
    for (index, material) in bundle.materials.iter().enumerate() {
        let kind = if material.is_pbr { "pbr" } else { "classic" };
        println!("  [{}] {}, {} properties", index, kind, material.properties.len());
    }

    let model = &bundle.model;
    println!("{} nodes", model.node_count());
    for handle in model.dfs_order() {
        let node = model.node(handle);
        let depth = model.child_chain(handle).len() - 1;
        let translation = model.world_transform(handle).w_axis.truncate();
        println!(
            "{}#{} {:?} at ({}, {}, {}): {} vertices, {} indices, {} submeshes, materials [{}]",
            "  ".repeat(depth + 1),
            node.id(),
            node.name(),
            translation.x,
            translation.y,
            translation.z,
            node.vertices.vertex_count(),
            node.indices.len(),
            node.sub_meshes.len(),
            node.material_indices.iter().join(", ")
        );
    }

    Ok(())
}

fn rewrite(input: &Path, output: &Path) -> Result<(), anyhow::Error> {
    let bundle = load(input)?;
    if bundle.format_version() == Some(FormatVersion::CURRENT) {
        log::info!("{} already is version {}", input.display(), u32::from(FormatVersion::CURRENT));
    }

    write_to_file(output, &bundle).with_context(|| format!("Failed to write bundle {}", output.display()))
}

fn dump_obj(input: &Path, output: &Path) -> Result<(), anyhow::Error> {
    let bundle = load(input)?;
    let mut w = BufWriter::new(File::create(output).with_context(|| format!("Failed to create {}", output.display()))?);
    dump_to_wavefront_obj(&mut w, &bundle)?;
    w.flush()?;
    Ok(())
}
