//! Decoded raster images

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::PaintError;
use crate::primitives::Size;

/// Decoded RGBA image, cheap to clone.
#[derive(Clone)]
pub struct ImageData {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl ImageData {
    /// Wrap an RGBA buffer (4 bytes per pixel).
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, PaintError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(PaintError::InvalidImage {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// Load and decode an image file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PaintError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| PaintError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        tracing::debug!("Loaded image {} ({}x{})", path.display(), width, height);
        Self::from_rgba(width, height, rgba.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl PartialEq for ImageData {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && (Arc::ptr_eq(&self.pixels, &other.pixels) || self.pixels == other.pixels)
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
