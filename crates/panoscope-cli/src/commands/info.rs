use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use panoscope_core::consts::{CAPTION_HARD_LIMIT, CAPTION_SOFT_LIMIT};
use panoscope_core::grid::PanoramaGeometry;
use panoscope_core::io::{DirectorySource, PanoramaSource};
use panoscope_core::poi::wrap_text;

use super::load_config;
use crate::summary;

#[derive(Args)]
pub struct InfoArgs {
    /// Panorama directory containing catalog.toml
    pub dir: PathBuf,

    /// Show one panorama's geometry and points instead of the catalog
    #[arg(long)]
    pub id: Option<u32>,

    /// Viewer config used to compute the tile grid
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let source = DirectorySource::new(&args.dir);

    let Some(id) = args.id else {
        let catalog = source
            .catalog()
            .with_context(|| format!("Failed to read catalog in {}", args.dir.display()))?;
        println!("Catalog:     {}", args.dir.display());
        println!("Panoramas:   {}", catalog.len());
        for entry in &catalog {
            println!("  {:>4}  {}", entry.id, entry.name);
        }
        return Ok(());
    };

    let config = load_config(args.config.as_deref())?;
    let (manifest, _) = source.manifest(id)?;
    let geometry = PanoramaGeometry::from_config(manifest.width, manifest.height, &config)?;
    summary::print_geometry(&manifest.name, &geometry, &config);

    println!("Points:      {}", manifest.points.len());
    for point in &manifest.points {
        println!(
            "  {:>4}  ({}, {})  {}x{}{}",
            point.id,
            point.offset_x,
            point.offset_y,
            point.width,
            point.height,
            if point.image.is_some() { "  [picture]" } else { "" }
        );
        for line in wrap_text(&point.description, CAPTION_SOFT_LIMIT, CAPTION_HARD_LIMIT) {
            println!("        {line}");
        }
        for line in wrap_text(&point.caption, CAPTION_SOFT_LIMIT, CAPTION_HARD_LIMIT) {
            println!("        > {line}");
        }
    }

    Ok(())
}
