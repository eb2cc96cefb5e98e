use chartwell_paint::{Color, DrawContext, Path, Point, Rect, StrokeStyle, TextStyle};

use crate::error::{ChartError, Result};
use crate::format::TicFormat;
use crate::layout::{text_size, PlotLayout, LABEL_SPACING};
use crate::mapping::CoordinateMapper;
use crate::object::{ChartObject, Drawable};
use crate::range::AxisKind;

pub const MIN_TIC_SIZE: f32 = 1.0;
pub const MAX_TIC_SIZE: f32 = 100.0;

/// A tic that was actually drawn, with its pixel position along the axis.
#[derive(Clone, Debug, PartialEq)]
pub struct TicMark {
    pub value: f64,
    pub px: f32,
    pub label: String,
}

/// Per-frame input for drawing an axis.
#[derive(Clone, Copy, Debug)]
pub struct AxisFrame<'a> {
    pub marks: &'a [TicMark],
    /// Space reserved for tic labels, from [`PlotLayout`].
    pub tic_label_offset: f32,
}

/// One chart axis: line, tics, tic labels and a title label.
#[derive(Debug)]
pub struct Axis {
    object: ChartObject,
    kind: AxisKind,
    label: String,
    show_label: bool,
    show_tics: bool,
    show_tic_labels: bool,
    show_on_both_sides: bool,
    tic_size: f32,
    min_tic_spacing: f32,
    tic_format: TicFormat,
    logscale: bool,
    color: Color,
    label_size: f32,
    tic_label_size: f32,
}

impl Axis {
    pub fn new(kind: AxisKind) -> Self {
        let mut object = ChartObject::new();
        object.set_antialias(false);
        Self {
            object,
            kind,
            label: match kind {
                AxisKind::X => "x".to_string(),
                AxisKind::Y => "y".to_string(),
            },
            show_label: true,
            show_tics: true,
            show_tic_labels: true,
            show_on_both_sides: false,
            tic_size: 3.0,
            min_tic_spacing: 20.0,
            tic_format: TicFormat::Default,
            logscale: false,
            color: Color::BLACK,
            label_size: 12.0,
            tic_label_size: 10.0,
        }
    }

    pub fn x() -> Self {
        Self::new(AxisKind::X)
    }

    pub fn y() -> Self {
        Self::new(AxisKind::Y)
    }

    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.object.mark_changed();
    }

    pub fn show_label(&self) -> bool {
        self.show_label
    }

    pub fn set_show_label(&mut self, show: bool) {
        self.show_label = show;
        self.object.mark_changed();
    }

    pub fn show_tics(&self) -> bool {
        self.show_tics
    }

    pub fn set_show_tics(&mut self, show: bool) {
        self.show_tics = show;
        self.object.mark_changed();
    }

    pub fn show_tic_labels(&self) -> bool {
        self.show_tic_labels
    }

    pub fn set_show_tic_labels(&mut self, show: bool) {
        self.show_tic_labels = show;
        self.object.mark_changed();
    }

    pub fn show_on_both_sides(&self) -> bool {
        self.show_on_both_sides
    }

    pub fn set_show_on_both_sides(&mut self, show: bool) {
        self.show_on_both_sides = show;
        self.object.mark_changed();
    }

    pub fn tic_size(&self) -> f32 {
        self.tic_size
    }

    pub fn set_tic_size(&mut self, size: f32) -> Result<()> {
        if !(MIN_TIC_SIZE..=MAX_TIC_SIZE).contains(&size) {
            return Err(ChartError::OutOfRange {
                name: "tic size",
                value: size as f64,
                min: MIN_TIC_SIZE as f64,
                max: MAX_TIC_SIZE as f64,
            });
        }
        self.tic_size = size;
        self.object.mark_changed();
        Ok(())
    }

    pub fn min_tic_spacing(&self) -> f32 {
        self.min_tic_spacing
    }

    pub fn set_min_tic_spacing(&mut self, spacing: f32) -> Result<()> {
        if spacing.is_nan() || spacing < 0.0 {
            return Err(ChartError::InvalidArgument(format!(
                "minimum tic spacing must be non-negative, got {spacing}"
            )));
        }
        self.min_tic_spacing = spacing;
        self.object.mark_changed();
        Ok(())
    }

    pub fn tic_format(&self) -> &TicFormat {
        &self.tic_format
    }

    pub fn set_tic_format(&mut self, format: TicFormat) {
        self.tic_format = format;
        self.object.mark_changed();
    }

    pub fn is_logscale(&self) -> bool {
        self.logscale
    }

    /// Map data through log10 on this axis and label tics as `10^v`.
    ///
    /// Automatic ranges are log-transformed too. A fixed range is not: it is
    /// taken to be in log10 units already, so a fixed `(0, 2)` shows data
    /// from 1 to 100.
    pub fn set_logscale(&mut self, logscale: bool) {
        self.logscale = logscale;
        self.object.mark_changed();
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.object.mark_changed();
    }

    /// Label is drawn only when enabled and non-empty.
    pub fn shows_label(&self) -> bool {
        self.show_label && !self.label.is_empty()
    }

    /// Tic labels need the tics themselves to be shown.
    pub fn shows_tic_labels(&self) -> bool {
        self.show_tics && self.show_tic_labels
    }

    pub fn label_style(&self) -> TextStyle {
        TextStyle::new(self.label_size).with_color(self.color)
    }

    pub fn tic_label_style(&self) -> TextStyle {
        TextStyle::new(self.tic_label_size).with_color(self.color)
    }

    /// Label text for a tic value. On a log axis `value` is an exponent.
    pub fn format_tic(&self, value: f64) -> String {
        if self.logscale {
            self.tic_format.format(10f64.powf(value))
        } else {
            self.tic_format.format(value)
        }
    }

    fn tic_px(&self, value: f64, mapper: &CoordinateMapper) -> f32 {
        match self.kind {
            AxisKind::X => mapper.x_to_px(value),
            AxisKind::Y => mapper.y_to_px(value),
        }
    }

    /// Tics that survive thinning: walking in order, a tic is kept only if it
    /// is at least `min_tic_spacing` pixels from the last kept one. Empty when
    /// tics are hidden.
    pub fn tic_marks(&self, tics: &[f64], mapper: &CoordinateMapper) -> Vec<TicMark> {
        if !self.show_tics {
            return Vec::new();
        }
        let mut marks: Vec<TicMark> = Vec::new();
        let mut last: Option<f32> = None;
        for &value in tics {
            let px = self.tic_px(value, mapper);
            if last.map_or(true, |l| (px - l).abs() >= self.min_tic_spacing) {
                marks.push(TicMark {
                    value,
                    px,
                    label: self.format_tic(value),
                });
                last = Some(px);
            }
        }
        marks
    }

    /// Draw the axis around `layout.plot` and return the tics drawn.
    ///
    /// A hidden axis draws nothing and reports no tics.
    pub fn draw_axis(
        &mut self,
        ctx: &mut dyn DrawContext,
        layout: &PlotLayout,
        tics: &[f64],
        mapper: &CoordinateMapper,
    ) -> Vec<TicMark> {
        if !self.object.is_visible() {
            return Vec::new();
        }
        let marks = self.tic_marks(tics, mapper);
        let tic_label_offset = match self.kind {
            AxisKind::X => layout.x_tic_label_offset,
            AxisKind::Y => layout.y_tic_label_offset,
        };
        self.draw(
            ctx,
            layout.plot,
            &AxisFrame {
                marks: &marks,
                tic_label_offset,
            },
        );
        marks
    }

    fn line(&self, ctx: &mut dyn DrawContext, from: Point, to: Point) {
        ctx.stroke_path(Path::polyline(&[from, to]), StrokeStyle::new(self.color, 1.0));
    }

    fn render_x(&self, ctx: &mut dyn DrawContext, plot: Rect, frame: &AxisFrame<'_>) {
        let bottom = plot.bottom() + 0.5;
        self.line(ctx, Point::new(plot.x, bottom), Point::new(plot.right(), bottom));
        if self.show_on_both_sides {
            let top = plot.y + 0.5;
            self.line(ctx, Point::new(plot.x, top), Point::new(plot.right(), top));
        }

        for mark in frame.marks {
            self.line(
                ctx,
                Point::new(mark.px, plot.bottom()),
                Point::new(mark.px, plot.bottom() - self.tic_size),
            );
            if self.show_on_both_sides {
                self.line(
                    ctx,
                    Point::new(mark.px, plot.y),
                    Point::new(mark.px, plot.y + self.tic_size),
                );
            }
        }

        if self.shows_tic_labels() {
            let style = self.tic_label_style();
            for mark in frame.marks {
                let size = text_size(ctx, &mark.label, &style);
                ctx.draw_text(
                    &mark.label,
                    Point::new(mark.px - size.width / 2.0, plot.bottom() + LABEL_SPACING),
                    &style,
                );
            }
        }

        if self.shows_label() {
            let style = self.label_style();
            let size = text_size(ctx, &self.label, &style);
            ctx.draw_text(
                &self.label,
                Point::new(
                    plot.center().x - size.width / 2.0,
                    plot.bottom() + frame.tic_label_offset + LABEL_SPACING,
                ),
                &style,
            );
        }
    }

    fn render_y(&self, ctx: &mut dyn DrawContext, plot: Rect, frame: &AxisFrame<'_>) {
        let left = plot.x + 0.5;
        self.line(ctx, Point::new(left, plot.y), Point::new(left, plot.bottom()));
        if self.show_on_both_sides {
            let right = plot.right() + 0.5;
            self.line(ctx, Point::new(right, plot.y), Point::new(right, plot.bottom()));
        }

        for mark in frame.marks {
            self.line(
                ctx,
                Point::new(plot.x, mark.px),
                Point::new(plot.x + self.tic_size, mark.px),
            );
            if self.show_on_both_sides {
                self.line(
                    ctx,
                    Point::new(plot.right(), mark.px),
                    Point::new(plot.right() - self.tic_size, mark.px),
                );
            }
        }

        if self.shows_tic_labels() {
            let style = self.tic_label_style();
            for mark in frame.marks {
                let size = text_size(ctx, &mark.label, &style);
                ctx.draw_text(
                    &mark.label,
                    Point::new(
                        plot.x - LABEL_SPACING - size.width,
                        mark.px - size.height / 2.0,
                    ),
                    &style,
                );
            }
        }

        if self.shows_label() {
            let style = self.label_style();
            let size = text_size(ctx, &self.label, &style);
            // Rotated 270 degrees about its anchor: the text runs upward and
            // its height becomes horizontal extent.
            let right = plot.x - frame.tic_label_offset - LABEL_SPACING;
            ctx.draw_text_rotated(
                &self.label,
                Point::new(right - size.height, plot.center().y + size.width / 2.0),
                270.0,
                &style,
            );
        }
    }
}

impl<'a> Drawable<AxisFrame<'a>> for Axis {
    fn object(&self) -> &ChartObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut ChartObject {
        &mut self.object
    }

    fn render(&mut self, ctx: &mut dyn DrawContext, rect: Rect, frame: &AxisFrame<'a>) {
        if rect.is_empty() {
            return;
        }
        if !self.object.antialias() {
            ctx.set_antialias(false);
        }
        match self.kind {
            AxisKind::X => self.render_x(ctx, rect, frame),
            AxisKind::Y => self.render_y(ctx, rect, frame),
        }
        if !self.object.antialias() {
            ctx.set_antialias(true);
        }
    }
}
