// Every variant states *where* things went wrong.
use std::path::PathBuf;

use crate::types::Point;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The square around `center` does not fit inside the image.
    #[error("region of radius {brush} around {center} leaves the {width}x{height} image")]
    OutOfBounds { center: Point, brush: u32, width: usize, height: usize },

    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("could not read image '{}': {source}", path.display())]
    Load { path: PathBuf, source: image::ImageError },

    #[error("could not save image to '{}': {source}", path.display())]
    Save { path: PathBuf, source: image::ImageError },

    #[error("window init error: {0}")]
    WindowInit(String),

    #[error("window update error: {0}")]
    WindowUpdate(String),
}
