//! Data series and the ordered store that owns them.

use std::sync::atomic::{AtomicU64, Ordering};

use chartwell_paint::Color;
use rustc_hash::FxHashSet;

use crate::error::{ChartError, Result};
use crate::object::{ChartObject, RedrawHandle};
use crate::palette::Palette;
use crate::range::Range;
use crate::style::{LineStyle, PointStyle};

pub const MIN_POINT_SIZE: f32 = 1.0;
pub const MAX_POINT_SIZE: f32 = 50.0;

static NEXT_SERIES_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a series, independent of its name and position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesId(u64);

impl SeriesId {
    fn next() -> Self {
        Self(NEXT_SERIES_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SeriesColor {
    /// Resolved from the chart palette by the series' position at draw time.
    #[default]
    Auto,
    Fixed(Color),
}

/// What the area under a series is filled down (or up) to.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum FillTo {
    #[default]
    None,
    Constant(f64),
    /// Area between this series and another one.
    Series(SeriesId),
}

/// A named sequence of `(x, y)` points plus its styling.
///
/// Points are kept in insertion order. `x` and `y` always have the same
/// length.
#[derive(Debug)]
pub struct Series {
    id: SeriesId,
    name: String,
    x: Vec<f64>,
    y: Vec<f64>,
    object: ChartObject,
    line_style: LineStyle,
    line_width: f32,
    point_style: PointStyle,
    point_size: f32,
    color: SeriesColor,
    fill_to: FillTo,
    fill_opacity: f32,
    show_in_legend: bool,
    highlighted: FxHashSet<usize>,
    x_range: Option<Range>,
    y_range: Option<Range>,
}

impl Series {
    pub fn new(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(ChartError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        let mut series = Self {
            id: SeriesId::next(),
            name: name.into(),
            x,
            y,
            ..Self::empty_template()
        };
        series.recompute_ranges();
        Ok(series)
    }

    pub fn from_points(name: impl Into<String>, points: &[(f64, f64)]) -> Self {
        let (x, y): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
        let mut series = Self {
            id: SeriesId::next(),
            name: name.into(),
            x,
            y,
            ..Self::empty_template()
        };
        series.recompute_ranges();
        series
    }

    fn empty_template() -> Self {
        Self {
            id: SeriesId(0),
            name: String::new(),
            x: Vec::new(),
            y: Vec::new(),
            object: ChartObject::new(),
            line_style: LineStyle::Solid,
            line_width: 2.0,
            point_style: PointStyle::Circle,
            point_size: 2.0,
            color: SeriesColor::Auto,
            fill_to: FillTo::None,
            fill_opacity: 0.3,
            show_in_legend: true,
            highlighted: FxHashSet::default(),
            x_range: None,
            y_range: None,
        }
    }

    /// New series with fresh identity and this series' styling.
    fn derive(&self, name: String, x: Vec<f64>, y: Vec<f64>) -> Self {
        let mut series = Self {
            id: SeriesId::next(),
            name,
            x,
            y,
            line_style: self.line_style,
            line_width: self.line_width,
            point_style: self.point_style.clone(),
            point_size: self.point_size,
            color: self.color,
            fill_to: self.fill_to,
            fill_opacity: self.fill_opacity,
            show_in_legend: self.show_in_legend,
            ..Self::empty_template()
        };
        series.object.set_visible(self.is_visible());
        series.recompute_ranges();
        series
    }

    pub fn id(&self) -> SeriesId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.changed();
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn point(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.x.get(index)?, *self.y.get(index)?))
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    pub fn add_point(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
        self.data_changed();
    }

    pub fn add_points(&mut self, points: &[(f64, f64)]) {
        self.x.reserve(points.len());
        self.y.reserve(points.len());
        for &(x, y) in points {
            self.x.push(x);
            self.y.push(y);
        }
        self.data_changed();
    }

    /// Replace all points. Lengths must match; on error the series is unchanged.
    pub fn set_points(&mut self, x: Vec<f64>, y: Vec<f64>) -> Result<()> {
        if x.len() != y.len() {
            return Err(ChartError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        self.x = x;
        self.y = y;
        self.data_changed();
        Ok(())
    }

    /// This series' points followed by `other`'s.
    pub fn concat(&self, other: &Series, name: impl Into<String>) -> Series {
        let mut x = Vec::with_capacity(self.len() + other.len());
        x.extend_from_slice(&self.x);
        x.extend_from_slice(&other.x);
        let mut y = Vec::with_capacity(self.len() + other.len());
        y.extend_from_slice(&self.y);
        y.extend_from_slice(&other.y);
        self.derive(name.into(), x, y)
    }

    /// Distance along x between consecutive copies in [`repeat`](Self::repeat):
    /// the x span plus the mean spacing between points. A single point
    /// repeats every unit.
    pub fn period(&self) -> f64 {
        match self.x_data_range() {
            Some(r) if self.len() > 1 => {
                let span = r.span();
                span + span / (self.len() - 1) as f64
            }
            _ => 1.0,
        }
    }

    /// `n` copies of the data, each shifted along x by one more period.
    pub fn repeat(&self, n: usize) -> Series {
        let period = self.period();
        let mut x = Vec::with_capacity(self.len() * n);
        let mut y = Vec::with_capacity(self.len() * n);
        for k in 0..n {
            let shift = k as f64 * period;
            x.extend(self.x.iter().map(|v| v + shift));
            y.extend_from_slice(&self.y);
        }
        self.derive(format!("{} x{}", self.name, n), x, y)
    }

    /// Sub-series over the index range `range`.
    pub fn slice(&self, range: std::ops::Range<usize>) -> Result<Series> {
        if range.start > range.end || range.end > self.len() {
            return Err(ChartError::SliceOutOfBounds {
                start: range.start,
                end: range.end,
                len: self.len(),
            });
        }
        Ok(self.derive(
            self.name.clone(),
            self.x[range.clone()].to_vec(),
            self.y[range].to_vec(),
        ))
    }

    /// Cached x range, `None` for an empty series.
    pub fn x_range(&self) -> Option<Range> {
        self.x_range
    }

    /// Cached y range, `None` for an empty series.
    pub fn y_range(&self) -> Option<Range> {
        self.y_range
    }

    pub fn ranges(&self) -> Option<(Range, Range)> {
        Some((self.x_range?, self.y_range?))
    }

    fn x_data_range(&self) -> Option<Range> {
        min_max(&self.x)
    }

    fn recompute_ranges(&mut self) {
        self.x_range = min_max(&self.x).map(Range::widen_degenerate);
        self.y_range = min_max(&self.y).map(Range::widen_degenerate);
    }

    pub fn is_visible(&self) -> bool {
        self.object.is_visible()
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.object.set_visible(visible);
    }

    pub fn object(&self) -> &ChartObject {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut ChartObject {
        &mut self.object
    }

    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    pub fn set_line_style(&mut self, style: LineStyle) {
        self.line_style = style;
        self.changed();
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn set_line_width(&mut self, width: f32) -> Result<()> {
        if width.is_nan() || width < 0.0 {
            return Err(ChartError::InvalidArgument(format!(
                "line width must be non-negative, got {width}"
            )));
        }
        self.line_width = width;
        self.changed();
        Ok(())
    }

    pub fn point_style(&self) -> &PointStyle {
        &self.point_style
    }

    pub fn set_point_style(&mut self, style: PointStyle) {
        self.point_style = style;
        self.changed();
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn set_point_size(&mut self, size: f32) -> Result<()> {
        if !(MIN_POINT_SIZE..=MAX_POINT_SIZE).contains(&size) {
            return Err(ChartError::OutOfRange {
                name: "point size",
                value: size as f64,
                min: MIN_POINT_SIZE as f64,
                max: MAX_POINT_SIZE as f64,
            });
        }
        self.point_size = size;
        self.changed();
        Ok(())
    }

    pub fn color(&self) -> SeriesColor {
        self.color
    }

    pub fn set_color(&mut self, color: SeriesColor) {
        self.color = color;
        self.changed();
    }

    /// Explicit color, or `palette[index mod len]` for [`SeriesColor::Auto`].
    pub fn effective_color(&self, index: usize, palette: &Palette) -> Color {
        match self.color {
            SeriesColor::Fixed(c) => c,
            SeriesColor::Auto => palette.color_at(index),
        }
    }

    pub fn fill_to(&self) -> FillTo {
        self.fill_to
    }

    pub fn set_fill_to(&mut self, fill_to: FillTo) {
        self.fill_to = fill_to;
        self.changed();
    }

    pub fn fill_opacity(&self) -> f32 {
        self.fill_opacity
    }

    /// Clamped to `0.0..=1.0`.
    pub fn set_fill_opacity(&mut self, opacity: f32) {
        self.fill_opacity = opacity.clamp(0.0, 1.0);
        self.changed();
    }

    pub fn show_in_legend(&self) -> bool {
        self.show_in_legend
    }

    pub fn set_show_in_legend(&mut self, show: bool) {
        self.show_in_legend = show;
        self.changed();
    }

    /// Indices of points currently under the pointer.
    pub fn highlighted(&self) -> &FxHashSet<usize> {
        &self.highlighted
    }

    /// Replace the highlighted set. Returns `true` if it changed.
    ///
    /// Does not request a redraw; the caller decides once for all series.
    pub(crate) fn set_highlighted(&mut self, highlighted: FxHashSet<usize>) -> bool {
        if self.highlighted == highlighted {
            return false;
        }
        self.highlighted = highlighted;
        true
    }

    fn data_changed(&mut self) {
        self.recompute_ranges();
        self.highlighted.retain(|&i| i < self.x.len());
        self.changed();
    }

    fn changed(&mut self) {
        self.object.mark_changed();
    }
}

/// Finite min/max of `values`, ignoring NaN and infinities.
fn min_max(values: &[f64]) -> Option<Range> {
    let mut it = values.iter().copied().filter(|v| v.is_finite());
    let first = it.next()?;
    let (min, max) = it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some(Range { min, max })
}

/// Ordered collection of series. Order determines auto colors.
#[derive(Default)]
pub struct SeriesStore {
    series: Vec<Series>,
    redraw: Option<RedrawHandle>,
}

impl std::fmt::Debug for SeriesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesStore")
            .field("series", &self.series)
            .finish_non_exhaustive()
    }
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the redraw handle on the store and every series in it.
    pub fn set_redraw_handle(&mut self, redraw: Option<RedrawHandle>) {
        for s in &mut self.series {
            s.object.set_redraw_handle(redraw.clone());
        }
        self.redraw = redraw;
    }

    pub fn add(&mut self, mut series: Series) -> SeriesId {
        let id = series.id;
        series.object.set_redraw_handle(self.redraw.clone());
        tracing::debug!(name = %series.name, points = series.len(), "adding series");
        self.series.push(series);
        self.request_redraw();
        id
    }

    pub fn remove(&mut self, id: SeriesId) -> Result<Series> {
        let index = self.index_of(id).ok_or(ChartError::UnknownSeries(id))?;
        let mut series = self.series.remove(index);
        series.object.set_redraw_handle(None);
        self.request_redraw();
        Ok(series)
    }

    pub fn clear(&mut self) {
        self.series.clear();
        self.request_redraw();
    }

    pub fn get(&self, id: SeriesId) -> Option<&Series> {
        self.series.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: SeriesId) -> Option<&mut Series> {
        self.series.iter_mut().find(|s| s.id == id)
    }

    pub fn index_of(&self, id: SeriesId) -> Option<usize> {
        self.series.iter().position(|s| s.id == id)
    }

    /// Series whose name equals `name`. Names need not be unique.
    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Series> + 'a {
        self.series.iter().filter(move |s| s.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Series> {
        self.series.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Series> {
        self.series.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Effective color of every series, in store order.
    pub fn colors(&self, palette: &Palette) -> Vec<Color> {
        self.series
            .iter()
            .enumerate()
            .map(|(i, s)| s.effective_color(i, palette))
            .collect()
    }

    fn request_redraw(&self) {
        if let Some(redraw) = &self.redraw {
            redraw();
        }
    }
}

impl<'a> IntoIterator for &'a SeriesStore {
    type Item = &'a Series;
    type IntoIter = std::slice::Iter<'a, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = Series::new("s", vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert!(matches!(err, ChartError::LengthMismatch { x: 2, y: 1 }));

        let mut s = Series::from_points("s", &[(0.0, 0.0)]);
        assert!(s.set_points(vec![1.0], vec![]).is_err());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn ranges_follow_data_and_are_order_independent() {
        let mut s = Series::from_points("s", &[(3.0, -1.0), (1.0, 4.0), (2.0, 0.5)]);
        assert_eq!(s.x_range(), Some(Range::new(1.0, 3.0)));
        assert_eq!(s.y_range(), Some(Range::new(-1.0, 4.0)));
        assert_eq!(s.x(), &[3.0, 1.0, 2.0]);

        s.add_point(10.0, 0.0);
        assert_eq!(s.x_range(), Some(Range::new(1.0, 10.0)));
    }

    #[test]
    fn single_point_range_is_widened() {
        let s = Series::from_points("s", &[(2.0, 5.0)]);
        let (x, y) = s.ranges().unwrap();
        assert!((x.min - 1.9).abs() < 1e-12 && (x.max - 2.1).abs() < 1e-12);
        assert!((y.min - 4.9).abs() < 1e-12 && (y.max - 5.1).abs() < 1e-12);
    }

    #[test]
    fn empty_series_has_no_range() {
        let s = Series::from_points("s", &[]);
        assert!(s.ranges().is_none());
    }

    #[test]
    fn concat_appends_and_gets_new_identity() {
        let a = Series::from_points("a", &[(0.0, 1.0), (1.0, 2.0)]);
        let b = Series::from_points("b", &[(5.0, 0.0)]);
        let c = a.concat(&b, "ab");
        assert_eq!(c.x(), &[0.0, 1.0, 5.0]);
        assert_eq!(c.y(), &[1.0, 2.0, 0.0]);
        assert_ne!(c.id(), a.id());
        assert_eq!(c.name(), "ab");
    }

    #[test]
    fn repeat_shifts_by_period() {
        let s = Series::from_points("s", &[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);
        assert_eq!(s.period(), 3.0);
        let r = s.repeat(2);
        assert_eq!(r.x(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(r.y(), &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
        assert!(s.repeat(0).is_empty());
    }

    #[test]
    fn slice_bounds_are_checked() {
        let s = Series::from_points("s", &[(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
        let sub = s.slice(1..3).unwrap();
        assert_eq!(sub.x(), &[1.0, 2.0]);
        assert_eq!(sub.y_range(), Some(Range::new(1.0, 4.0)));
        assert!(matches!(
            s.slice(2..4),
            Err(ChartError::SliceOutOfBounds { .. })
        ));
    }

    #[test]
    fn point_size_bounds() {
        let mut s = Series::from_points("s", &[]);
        assert!(s.set_point_size(0.5).is_err());
        assert!(s.set_point_size(51.0).is_err());
        s.set_point_size(50.0).unwrap();
        assert_eq!(s.point_size(), 50.0);
    }

    #[test]
    fn auto_color_depends_on_position() {
        let palette = Palette::simple();
        let mut store = SeriesStore::new();
        let a = store.add(Series::from_points("a", &[]));
        let mut fixed = Series::from_points("b", &[]);
        fixed.set_color(SeriesColor::Fixed(Color::BLACK));
        store.add(fixed);
        store.add(Series::from_points("c", &[]));

        let colors = store.colors(&palette);
        assert_eq!(colors[0], palette.color_at(0));
        assert_eq!(colors[1], Color::BLACK);
        assert_eq!(colors[2], palette.color_at(2));

        // Removing the first series shifts the auto color of the others.
        store.remove(a).unwrap();
        assert_eq!(store.colors(&palette)[1], palette.color_at(1));
    }

    #[test]
    fn store_keeps_insertion_order_and_duplicate_names() {
        let mut store = SeriesStore::new();
        let a = store.add(Series::from_points("dup", &[]));
        let b = store.add(Series::from_points("dup", &[]));
        assert_eq!(store.index_of(a), Some(0));
        assert_eq!(store.index_of(b), Some(1));
        assert_eq!(store.find_by_name("dup").count(), 2);
        assert!(matches!(store.remove(a), Ok(_)));
        assert!(matches!(store.remove(a), Err(ChartError::UnknownSeries(_))));
    }

    #[test]
    fn highlight_change_is_reported() {
        let mut s = Series::from_points("s", &[(0.0, 0.0), (1.0, 1.0)]);
        let set: FxHashSet<usize> = [1].into_iter().collect();
        assert!(s.set_highlighted(set.clone()));
        assert!(!s.set_highlighted(set));
        s.set_points(vec![0.0], vec![0.0]).unwrap();
        assert!(s.highlighted().is_empty());
    }
}
