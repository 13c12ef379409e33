use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use panoscope_core::grid::{build_grid, PanoramaGeometry};
use panoscope_core::io::image_io::{save_rgba, tile_file_name};
use panoscope_core::io::{DirectorySource, PanoramaSource};
use rayon::prelude::*;

use super::load_config;
use crate::progress::BarReporter;

#[derive(Args)]
pub struct TilesArgs {
    /// Panorama directory containing catalog.toml
    pub dir: PathBuf,

    /// Panorama to slice
    #[arg(long)]
    pub id: u32,

    /// Output directory for the tile PNGs
    #[arg(short, long)]
    pub output: PathBuf,

    /// Viewer config used to compute the tile grid
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Slice a panorama and write every tile of the extended grid.
pub fn run(args: &TilesArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let source = DirectorySource::new(&args.dir);
    let asset = source
        .load(args.id)
        .with_context(|| format!("Failed to load panorama {}", args.id))?;

    let geometry = PanoramaGeometry::from_config(asset.width, asset.height, &config)?;
    let reporter = BarReporter::new()?;
    let store = build_grid(&asset.image, geometry, &reporter)?;
    reporter.finish("Sliced");

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    store
        .iter()
        .collect::<Vec<_>>()
        .par_iter()
        .try_for_each(|tile| -> Result<()> {
            let path = args.output.join(tile_file_name(tile));
            save_rgba(&tile.pixels, &path)
                .with_context(|| format!("Failed to write {}", path.display()))
        })?;

    println!(
        "\n{} tiles ({} seam) written to {}",
        store.len(),
        geometry.edge_cols * geometry.rows,
        args.output.display()
    );
    Ok(())
}
