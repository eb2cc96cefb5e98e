//! Chart error types

use thiserror::Error;

use crate::series::SeriesId;

/// Errors raised at the chart API boundary
#[derive(Error, Debug)]
pub enum ChartError {
    /// x and y sequences of a series differ in length
    #[error("x/y length mismatch: {x} x values, {y} y values")]
    LengthMismatch { x: usize, y: usize },

    /// No built-in palette with this name
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// The series is not part of this chart
    #[error("unknown series: {0:?}")]
    UnknownSeries(SeriesId),

    /// A numeric setting outside its accepted bounds
    #[error("{name} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Index range outside the series
    #[error("slice {start}..{end} out of bounds for series of length {len}")]
    SliceOutOfBounds { start: usize, end: usize, len: usize },

    /// Any other rejected argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be parsed (includes unknown keys)
    #[error("invalid chart configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Paint(#[from] chartwell_paint::PaintError),
}

/// Result type for chart operations
pub type Result<T> = std::result::Result<T, ChartError>;
