//! chartwell_charts
//!
//! Line charts drawn through the `chartwell_paint` API.
//!
//! Data flows one way each frame: series -> ranges -> tics -> margin
//! layout -> coordinate mapping -> drawing. Hit regions recorded while
//! drawing markers answer pointer queries until the next frame.

mod plot;
mod segments;

pub mod axis;
pub mod background;
pub mod config;
pub mod error;
pub mod format;
pub mod grid;
pub mod interaction;
pub mod layout;
pub mod legend;
pub mod line_chart;
pub mod mapping;
pub mod object;
pub mod palette;
pub mod range;
pub mod series;
pub mod style;
pub mod tics;
pub mod title;

pub use error::{ChartError, Result};
pub use plot::to_axis;
pub use segments::finite_runs;

/// Common imports for chart users.
pub mod prelude {
    pub use crate::axis::{Axis, TicMark};
    pub use crate::background::{Background, BackgroundFill};
    pub use crate::config::ChartConfig;
    pub use crate::error::{ChartError, Result};
    pub use crate::format::TicFormat;
    pub use crate::grid::Grid;
    pub use crate::hit_test::{HitShape, HitTester};
    pub use crate::interaction::{HoverState, PointHit, PointSelection};
    pub use crate::layout::{reserve_margins, PlotLayout};
    pub use crate::legend::{Legend, LegendPosition};
    pub use crate::line_chart::{FrameInfo, LineChart};
    pub use crate::mapping::CoordinateMapper;
    pub use crate::object::{ChartObject, Drawable, RedrawHandle};
    pub use crate::palette::Palette;
    pub use crate::range::{compute_range, compute_ranges, AxisKind, Extension, Range, RangeSpec};
    pub use crate::series::{FillTo, Series, SeriesColor, SeriesId, SeriesStore};
    pub use crate::style::{LineStyle, PointStyle};
    pub use crate::tics::compute_tics;
    pub use chartwell_paint::{Color, DrawContext, PaintContext, Rect};
}
