pub mod config;
pub mod info;
pub mod replay;
pub mod tiles;

use std::path::Path;

use anyhow::{Context, Result};
use panoscope_core::config::ViewerConfig;

/// Read a viewer config from TOML, or fall back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    let Some(path) = path else {
        return Ok(ViewerConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: ViewerConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
