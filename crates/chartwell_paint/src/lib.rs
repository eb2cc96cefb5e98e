//! Chartwell Paint API
//!
//! The 2D drawing collaborator used by `chartwell_charts`.
//!
//! # Features
//!
//! - Geometry (points, sizes, rectangles, circles)
//! - Path drawing (lines, arcs)
//! - Fills and strokes with colors, gradients and dash patterns
//! - Text rendering and text measurement
//! - Decoded images for backgrounds and markers
//! - A recording canvas ([`PaintContext`]) usable as an offscreen layer

pub mod color;
pub mod context;
pub mod error;
pub mod gradient;
pub mod raster;
pub mod path;
pub mod primitives;
pub mod text;

pub use color::Color;
pub use context::{
    DrawContext, FillStyle, LineCap, LineJoin, PaintCommand, PaintContext, StrokeStyle,
    Transform2D,
};
pub use error::{PaintError, Result};
pub use gradient::{Gradient, GradientStop};
pub use raster::ImageData;
pub use path::{Path, PathBuilder, PathCommand, Point};
pub use primitives::*;
pub use text::TextStyle;
