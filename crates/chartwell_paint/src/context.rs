//! Paint context - the main drawing API

use crate::color::Color;
use crate::gradient::Gradient;
use crate::path::{Path, Point};
use crate::primitives::*;
use crate::raster::ImageData;
use crate::text::TextStyle;

/// Fill style for shapes
#[derive(Clone, Debug, PartialEq)]
pub enum FillStyle {
    Color(Color),
    Gradient(Gradient),
}

impl From<Color> for FillStyle {
    fn from(color: Color) -> Self {
        FillStyle::Color(color)
    }
}

impl From<Gradient> for FillStyle {
    fn from(gradient: Gradient) -> Self {
        FillStyle::Gradient(gradient)
    }
}

/// Stroke style
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    /// Alternating on/off lengths in pixels; empty means solid.
    pub dash: Vec<f32>,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Default::default()
        }
    }

    pub fn with_dash(mut self, dash: &[f32]) -> Self {
        self.dash = dash.to_vec();
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            dash: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// A paint command for the renderer
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    FillRect {
        rect: Rect,
        style: FillStyle,
    },
    StrokeRect {
        rect: Rect,
        style: StrokeStyle,
    },
    FillCircle {
        circle: Circle,
        style: FillStyle,
    },
    FillPath {
        path: Path,
        style: FillStyle,
    },
    StrokePath {
        path: Path,
        style: StrokeStyle,
    },
    DrawText {
        text: String,
        position: Point,
        /// Clockwise rotation in degrees around `position`.
        rotation: f32,
        style: TextStyle,
    },
    DrawImage {
        image: ImageData,
        rect: Rect,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
    PushTransform {
        transform: Transform2D,
    },
    PopTransform,
    SetAntialias(bool),
}

/// 2D affine transform
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: x,
            f: y,
        }
    }

    pub fn transform_point(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }
}

/// Rendering backend consumed by chart objects.
///
/// Text positions are the top-left corner of the text box. Implementations
/// that cannot measure text return `None` from [`DrawContext::measure_text`];
/// callers then fall back to an estimate.
pub trait DrawContext {
    fn fill_rect(&mut self, rect: Rect, style: FillStyle);
    fn stroke_rect(&mut self, rect: Rect, style: StrokeStyle);
    fn fill_circle(&mut self, circle: Circle, style: FillStyle);
    fn fill_path(&mut self, path: Path, style: FillStyle);
    fn stroke_path(&mut self, path: Path, style: StrokeStyle);
    fn draw_text_rotated(&mut self, text: &str, position: Point, rotation: f32, style: &TextStyle);
    fn draw_image(&mut self, image: &ImageData, rect: Rect);
    fn push_clip(&mut self, rect: Rect);
    fn pop_clip(&mut self);
    fn push_transform(&mut self, transform: Transform2D);
    fn pop_transform(&mut self);
    fn set_antialias(&mut self, enabled: bool);
    fn measure_text(&self, text: &str, style: &TextStyle) -> Option<Size>;

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.draw_text_rotated(text, position, 0.0, style);
    }

    /// Play back previously recorded commands onto this context.
    fn replay(&mut self, commands: &[PaintCommand]) {
        for command in commands {
            match command {
                PaintCommand::FillRect { rect, style } => self.fill_rect(*rect, style.clone()),
                PaintCommand::StrokeRect { rect, style } => self.stroke_rect(*rect, style.clone()),
                PaintCommand::FillCircle { circle, style } => {
                    self.fill_circle(*circle, style.clone())
                }
                PaintCommand::FillPath { path, style } => self.fill_path(path.clone(), style.clone()),
                PaintCommand::StrokePath { path, style } => {
                    self.stroke_path(path.clone(), style.clone())
                }
                PaintCommand::DrawText {
                    text,
                    position,
                    rotation,
                    style,
                } => self.draw_text_rotated(text, *position, *rotation, style),
                PaintCommand::DrawImage { image, rect } => self.draw_image(image, *rect),
                PaintCommand::PushClip { rect } => self.push_clip(*rect),
                PaintCommand::PopClip => self.pop_clip(),
                PaintCommand::PushTransform { transform } => self.push_transform(*transform),
                PaintCommand::PopTransform => self.pop_transform(),
                PaintCommand::SetAntialias(enabled) => self.set_antialias(*enabled),
            }
        }
    }
}

/// Approximate glyph metrics used by [`PaintContext`] for measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Advance per character as a fraction of the font size
    pub advance: f32,
    /// Line height as a fraction of the font size
    pub line_height: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

/// A recording paint context.
///
/// Used as an offscreen layer for cached chart objects and as a
/// deterministic backend in tests.
pub struct PaintContext {
    commands: Vec<PaintCommand>,
    transform_stack: Vec<Transform2D>,
    clip_stack: Vec<Rect>,
    metrics: Option<TextMetrics>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            transform_stack: Vec::new(),
            clip_stack: Vec::new(),
            metrics: Some(TextMetrics::default()),
        }
    }

    /// A context whose backend reports no text metrics.
    pub fn without_text_metrics() -> Self {
        Self {
            metrics: None,
            ..Self::new()
        }
    }

    pub fn with_text_metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.transform_stack.clear();
        self.clip_stack.clear();
    }

    /// Texts drawn so far, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                PaintCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    pub fn transform_depth(&self) -> usize {
        self.transform_stack.len()
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawContext for PaintContext {
    fn fill_rect(&mut self, rect: Rect, style: FillStyle) {
        self.commands.push(PaintCommand::FillRect { rect, style });
    }

    fn stroke_rect(&mut self, rect: Rect, style: StrokeStyle) {
        self.commands.push(PaintCommand::StrokeRect { rect, style });
    }

    fn fill_circle(&mut self, circle: Circle, style: FillStyle) {
        self.commands.push(PaintCommand::FillCircle { circle, style });
    }

    fn fill_path(&mut self, path: Path, style: FillStyle) {
        self.commands.push(PaintCommand::FillPath { path, style });
    }

    fn stroke_path(&mut self, path: Path, style: StrokeStyle) {
        self.commands.push(PaintCommand::StrokePath { path, style });
    }

    fn draw_text_rotated(&mut self, text: &str, position: Point, rotation: f32, style: &TextStyle) {
        self.commands.push(PaintCommand::DrawText {
            text: text.to_string(),
            position,
            rotation,
            style: style.clone(),
        });
    }

    fn draw_image(&mut self, image: &ImageData, rect: Rect) {
        self.commands.push(PaintCommand::DrawImage {
            image: image.clone(),
            rect,
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_stack.push(rect);
        self.commands.push(PaintCommand::PushClip { rect });
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
        self.commands.push(PaintCommand::PopClip);
    }

    fn push_transform(&mut self, transform: Transform2D) {
        self.transform_stack.push(transform);
        self.commands.push(PaintCommand::PushTransform { transform });
    }

    fn pop_transform(&mut self) {
        self.transform_stack.pop();
        self.commands.push(PaintCommand::PopTransform);
    }

    fn set_antialias(&mut self, enabled: bool) {
        self.commands.push(PaintCommand::SetAntialias(enabled));
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> Option<Size> {
        let metrics = self.metrics?;
        let chars = text.chars().count() as f32;
        Some(Size::new(
            chars * style.size * metrics.advance,
            style.size * metrics.line_height,
        ))
    }
}
