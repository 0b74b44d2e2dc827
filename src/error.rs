use thiserror::Error;

use crate::id_generator::ItemId;

/// Errors surfaced by the canvas core to the host application
#[derive(Error, Debug)]
pub enum CanvasError {
    /// Pixel buffer does not match the declared dimensions
    #[error("invalid raster: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidRaster {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    /// The uploaded bytes could not be decoded as an image
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
    /// An item with this id is already part of the scene
    #[error("item {0} is already in the scene")]
    DuplicateItem(ItemId),
    /// Configuration values are out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
