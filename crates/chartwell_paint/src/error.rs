//! Paint error types

use std::path::PathBuf;

use thiserror::Error;

/// Paint-related errors
#[derive(Error, Debug)]
pub enum PaintError {
    /// The image file could not be read or decoded
    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Pixel buffer does not match the declared dimensions
    #[error("invalid image data: expected {expected} bytes, got {actual}")]
    InvalidImage { expected: usize, actual: usize },

    /// A color string could not be parsed
    #[error("invalid color: {0}")]
    InvalidColor(String),
}

/// Result type for paint operations
pub type Result<T> = std::result::Result<T, PaintError>;
