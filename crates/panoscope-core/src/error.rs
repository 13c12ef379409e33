use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid manifest: {0}")]
    Manifest(#[from] toml::de::Error),

    #[error("Panorama {id} is not in the catalog")]
    InvalidSelection { id: u32 },

    #[error("Incomplete metadata: {0}")]
    IncompleteMetadata(String),

    #[error("Invalid panorama dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid viewer config: {0}")]
    InvalidConfig(String),

    #[error("No panorama is ready")]
    NotReady,
}

pub type Result<T> = std::result::Result<T, PanoError>;
