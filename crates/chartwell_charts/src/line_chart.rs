use std::fmt;

use chartwell_paint::{DrawContext, Rect};

use crate::axis::{Axis, TicMark};
use crate::background::Background;
use crate::error::Result;
use crate::grid::{Grid, GridFrame};
use crate::hit_test::HitTester;
use crate::interaction::{HoverState, PointClickListener, PointHit};
use crate::layout::{reserve_margins, PlotLayout};
use crate::legend::{Legend, LegendEntry};
use crate::mapping::CoordinateMapper;
use crate::object::{Drawable, RedrawHandle};
use crate::palette::Palette;
use crate::plot::{draw_series, PlotFrame};
use crate::range::{compute_ranges, Extension, Range, RangeSettings, RangeSpec};
use crate::series::{Series, SeriesId, SeriesStore};
use crate::tics::compute_tics;
use crate::title::Title;

/// Geometry computed by the most recent draw.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameInfo {
    pub x_range: Range,
    pub y_range: Range,
    pub x_tics: Vec<f64>,
    pub y_tics: Vec<f64>,
    pub layout: PlotLayout,
    /// Tics the axes actually drew, after thinning.
    pub x_marks: Vec<TicMark>,
    pub y_marks: Vec<TicMark>,
}

impl FrameInfo {
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.x_range, self.y_range, self.layout.plot)
    }
}

/// A line chart: background, title, two axes, grid, series and legend.
///
/// Owns its series. Hit regions from the last [`draw`](Self::draw) are used
/// by the pointer handlers until the next draw.
pub struct LineChart {
    pub background: Background,
    pub title: Title,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub grid: Grid,
    pub legend: Legend,

    series: SeriesStore,
    palette: Palette,
    x_range: RangeSpec,
    y_range: RangeSpec,
    x_extension: Extension,
    y_extension: Extension,
    padding: f32,

    hit_tester: HitTester<PointHit>,
    hover: HoverState,
    listeners: Vec<PointClickListener>,
    redraw: Option<RedrawHandle>,
    frame: Option<FrameInfo>,
}

impl LineChart {
    pub fn new() -> Self {
        Self {
            background: Background::new(),
            title: Title::default(),
            x_axis: Axis::x(),
            y_axis: Axis::y(),
            grid: Grid::new(),
            legend: Legend::new(),
            series: SeriesStore::new(),
            palette: Palette::default(),
            x_range: RangeSpec::Auto,
            y_range: RangeSpec::Auto,
            x_extension: Extension::default(),
            y_extension: Extension::default(),
            padding: 16.0,
            hit_tester: HitTester::new(),
            hover: HoverState::Idle,
            listeners: Vec::new(),
            redraw: None,
            frame: None,
        }
    }

    /// Install the callback used to ask the host for a new frame.
    ///
    /// Every chart object and series shares it, so property changes anywhere
    /// in the chart trigger a redraw.
    pub fn set_redraw_handle(&mut self, redraw: RedrawHandle) {
        let handle = Some(redraw);
        self.background.object_mut().set_redraw_handle(handle.clone());
        self.title.object_mut().set_redraw_handle(handle.clone());
        self.x_axis.object_mut().set_redraw_handle(handle.clone());
        self.y_axis.object_mut().set_redraw_handle(handle.clone());
        self.grid.object_mut().set_redraw_handle(handle.clone());
        self.legend.object_mut().set_redraw_handle(handle.clone());
        self.series.set_redraw_handle(handle.clone());
        self.redraw = handle;
    }

    pub fn request_redraw(&self) {
        if let Some(redraw) = &self.redraw {
            redraw();
        }
    }

    pub fn set_title(&mut self, text: impl Into<String>) {
        self.title.set_text(text);
    }

    pub fn add_series(&mut self, series: Series) -> SeriesId {
        self.series.add(series)
    }

    pub fn remove_series(&mut self, id: SeriesId) -> Result<Series> {
        self.series.remove(id)
    }

    pub fn series(&self, id: SeriesId) -> Option<&Series> {
        self.series.get(id)
    }

    /// Changes made through the returned reference request a redraw.
    pub fn series_mut(&mut self, id: SeriesId) -> Option<&mut Series> {
        self.series.get_mut(id)
    }

    pub fn series_store(&self) -> &SeriesStore {
        &self.series
    }

    pub(crate) fn series_store_mut(&mut self) -> &mut SeriesStore {
        &mut self.series
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
        self.request_redraw();
    }

    pub fn x_range(&self) -> RangeSpec {
        self.x_range
    }

    /// A fixed range is used as given, without extension or log transform.
    /// On a log axis it is therefore in log10 units.
    pub fn set_x_range(&mut self, range: RangeSpec) {
        self.x_range = range;
        self.request_redraw();
    }

    pub fn y_range(&self) -> RangeSpec {
        self.y_range
    }

    /// A fixed range is used as given, without extension or log transform.
    /// On a log axis it is therefore in log10 units.
    pub fn set_y_range(&mut self, range: RangeSpec) {
        self.y_range = range;
        self.request_redraw();
    }

    pub fn set_x_extension(&mut self, extension: Extension) {
        self.x_extension = extension;
        self.request_redraw();
    }

    pub fn set_y_extension(&mut self, extension: Extension) {
        self.y_extension = extension;
        self.request_redraw();
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn set_padding(&mut self, padding: f32) {
        self.padding = padding.max(0.0);
        self.request_redraw();
    }

    pub fn hit_tester(&self) -> &HitTester<PointHit> {
        &self.hit_tester
    }

    pub fn hover_state(&self) -> &HoverState {
        &self.hover
    }

    pub(crate) fn set_hover_state(&mut self, hover: HoverState) {
        self.hover = hover;
    }

    pub(crate) fn listeners_mut(&mut self) -> &mut Vec<PointClickListener> {
        &mut self.listeners
    }

    pub(crate) fn store_and_listeners(&mut self) -> (&SeriesStore, &mut Vec<PointClickListener>) {
        (&self.series, &mut self.listeners)
    }

    /// Geometry of the last draw, `None` before the first one.
    pub fn frame(&self) -> Option<&FrameInfo> {
        self.frame.as_ref()
    }

    fn x_settings(&self) -> RangeSettings {
        RangeSettings {
            spec: self.x_range,
            extension: self.x_extension,
            logscale: self.x_axis.is_logscale(),
        }
    }

    fn y_settings(&self) -> RangeSettings {
        RangeSettings {
            spec: self.y_range,
            extension: self.y_extension,
            logscale: self.y_axis.is_logscale(),
        }
    }

    fn legend_entries(&self) -> Vec<LegendEntry> {
        self.series
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_visible() && s.show_in_legend())
            .map(|(i, s)| LegendEntry {
                name: s.name().to_string(),
                color: s.effective_color(i, &self.palette),
                line_style: s.line_style(),
                line_width: s.line_width(),
                point_style: s.point_style().clone(),
                point_size: s.point_size(),
            })
            .collect()
    }

    /// Draw the whole chart into `rect`.
    ///
    /// Order: background, title, ranges, tics, margin layout, axes, grid,
    /// series, legend. Hit regions are rebuilt from scratch.
    pub fn draw(&mut self, ctx: &mut dyn DrawContext, rect: Rect) {
        self.hit_tester.reset();
        if rect.is_empty() {
            tracing::debug!("skipping draw into empty rect");
            return;
        }

        self.background.draw(ctx, rect, &());
        self.title.draw(ctx, rect, &());

        let title_h = self.title.reserved_height(&*ctx, rect);
        let p = self.padding;
        let area = Rect::new(
            rect.x + p,
            rect.y + title_h + 2.0 * p,
            (rect.width - 2.0 * p).max(0.0),
            (rect.height - title_h - 3.0 * p).max(0.0),
        );

        let (x_range, y_range) = {
            let all: Vec<&Series> = self.series.iter().collect();
            compute_ranges(&all, self.x_settings(), self.y_settings())
        };
        let x_log = self.x_axis.is_logscale();
        let y_log = self.y_axis.is_logscale();
        let x_tics = compute_tics(x_range, x_log);
        let y_tics = compute_tics(y_range, y_log);

        let layout = reserve_margins(area, &self.x_axis, &self.y_axis, &x_tics, &y_tics, &*ctx);
        let mut frame = FrameInfo {
            x_range,
            y_range,
            x_tics,
            y_tics,
            layout,
            x_marks: Vec::new(),
            y_marks: Vec::new(),
        };
        if layout.plot.is_empty() {
            tracing::debug!(
                width = rect.width,
                height = rect.height,
                "no room left for the plot area"
            );
            self.frame = Some(frame);
            return;
        }

        let mapper = CoordinateMapper::new(x_range, y_range, layout.plot);
        frame.x_marks = self.x_axis.draw_axis(ctx, &layout, &frame.x_tics, &mapper);
        frame.y_marks = self.y_axis.draw_axis(ctx, &layout, &frame.y_tics, &mapper);

        self.grid.draw(
            ctx,
            layout.plot,
            &GridFrame {
                x_marks: &frame.x_marks,
                y_marks: &frame.y_marks,
                x_tic_size: self.x_axis.tic_size(),
                y_tic_size: self.y_axis.tic_size(),
            },
        );

        draw_series(
            ctx,
            &self.series,
            &self.palette,
            &PlotFrame {
                mapper: &mapper,
                x_log,
                y_log,
            },
            &mut self.hit_tester,
        );

        let entries = self.legend_entries();
        self.legend.draw(ctx, layout.plot, entries.as_slice());

        tracing::debug!(
            series = self.series.len(),
            hit_regions = self.hit_tester.len(),
            x_min = x_range.min,
            x_max = x_range.max,
            y_min = y_range.min,
            y_max = y_range.max,
            "drew line chart"
        );
        self.frame = Some(frame);
    }
}

impl Default for LineChart {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LineChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineChart")
            .field("title", &self.title.text())
            .field("series", &self.series.len())
            .field("palette", &self.palette.name())
            .field("x_range", &self.x_range)
            .field("y_range", &self.y_range)
            .field("padding", &self.padding)
            .field("hover", &self.hover)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
