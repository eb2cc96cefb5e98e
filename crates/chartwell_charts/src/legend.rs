use chartwell_paint::{Color, DrawContext, Path, Point, Rect, StrokeStyle, TextStyle};
use serde::{Deserialize, Serialize};

use crate::layout::text_size;
use crate::object::{ChartObject, Drawable};
use crate::style::{draw_marker, LineStyle, PointStyle};

const SAMPLE_WIDTH: f32 = 20.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// One row of the legend, resolved from a series at draw time.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub color: Color,
    pub line_style: LineStyle,
    pub line_width: f32,
    pub point_style: PointStyle,
    pub point_size: f32,
}

/// Key box listing series with a line sample and marker. Hidden by default.
#[derive(Debug)]
pub struct Legend {
    object: ChartObject,
    position: LegendPosition,
    padding: f32,
    text_size: f32,
    background: Color,
    border: Color,
}

impl Legend {
    pub fn new() -> Self {
        let mut object = ChartObject::new();
        object.set_visible(false);
        Self {
            object,
            position: LegendPosition::TopRight,
            padding: 6.0,
            text_size: 10.0,
            background: Color::WHITE.with_alpha(0.85),
            border: Color::gray(0.6),
        }
    }

    pub fn position(&self) -> LegendPosition {
        self.position
    }

    pub fn set_position(&mut self, position: LegendPosition) {
        self.position = position;
        self.object.mark_changed();
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.object.set_visible(visible);
    }

    fn text_style(&self) -> TextStyle {
        TextStyle::new(self.text_size)
    }

    /// Box occupied by the legend for `entries` inside `plot`.
    pub fn bounds(&self, ctx: &dyn DrawContext, plot: Rect, entries: &[LegendEntry]) -> Rect {
        let style = self.text_style();
        let mut text_w: f32 = 0.0;
        let mut row_h: f32 = 0.0;
        for e in entries {
            let size = text_size(ctx, &e.name, &style);
            text_w = text_w.max(size.width);
            row_h = row_h.max(size.height);
        }
        let width = self.padding * 3.0 + SAMPLE_WIDTH + text_w;
        let height = self.padding + entries.len() as f32 * (row_h + self.padding);

        let margin = self.padding;
        let x = match self.position {
            LegendPosition::TopLeft | LegendPosition::BottomLeft => plot.x + margin,
            LegendPosition::TopRight | LegendPosition::BottomRight => {
                plot.right() - margin - width
            }
        };
        let y = match self.position {
            LegendPosition::TopLeft | LegendPosition::TopRight => plot.y + margin,
            LegendPosition::BottomLeft | LegendPosition::BottomRight => {
                plot.bottom() - margin - height
            }
        };
        Rect::new(x, y, width, height)
    }
}

impl Default for Legend {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawable<[LegendEntry]> for Legend {
    fn object(&self) -> &ChartObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut ChartObject {
        &mut self.object
    }

    fn render(&mut self, ctx: &mut dyn DrawContext, plot: Rect, entries: &[LegendEntry]) {
        if entries.is_empty() {
            return;
        }
        let bounds = self.bounds(&*ctx, plot, entries);
        ctx.fill_rect(bounds, self.background.into());
        ctx.stroke_rect(bounds, StrokeStyle::new(self.border, 1.0));

        let style = self.text_style();
        let mut y = bounds.y + self.padding;
        for e in entries {
            let size = text_size(&*ctx, &e.name, &style);
            let mid = y + size.height / 2.0;
            let x0 = bounds.x + self.padding;

            if let Some(stroke) = e.line_style.stroke(e.color, e.line_width) {
                ctx.stroke_path(
                    Path::polyline(&[Point::new(x0, mid), Point::new(x0 + SAMPLE_WIDTH, mid)]),
                    stroke,
                );
            }
            let marker = e.point_size.min(size.height / 2.0);
            draw_marker(
                ctx,
                Point::new(x0 + SAMPLE_WIDTH / 2.0, mid),
                marker,
                &e.point_style,
                e.color,
            );
            ctx.draw_text(
                &e.name,
                Point::new(x0 + SAMPLE_WIDTH + self.padding, y),
                &style.clone().with_color(Color::BLACK),
            );
            y += size.height + self.padding;
        }
    }
}

#[cfg(test)]
mod tests {
    use chartwell_paint::PaintContext;

    use super::*;

    fn entry(name: &str) -> LegendEntry {
        LegendEntry {
            name: name.to_string(),
            color: Color::BLACK,
            line_style: LineStyle::Solid,
            line_width: 1.0,
            point_style: PointStyle::Circle,
            point_size: 2.0,
        }
    }

    #[test]
    fn hidden_by_default() {
        let mut legend = Legend::new();
        let mut ctx = PaintContext::new();
        let entries = vec![entry("a")];
        legend.draw(&mut ctx, Rect::new(0.0, 0.0, 100.0, 100.0), entries.as_slice());
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn lists_every_entry() {
        let mut legend = Legend::new();
        legend.set_visible(true);
        let mut ctx = PaintContext::new();
        let entries = vec![entry("first"), entry("second")];
        legend.draw(&mut ctx, Rect::new(0.0, 0.0, 300.0, 200.0), entries.as_slice());
        assert_eq!(ctx.texts(), vec!["first", "second"]);
    }

    #[test]
    fn corner_placement() {
        let mut legend = Legend::new();
        let ctx = PaintContext::new();
        let plot = Rect::new(0.0, 0.0, 300.0, 200.0);
        let entries = [entry("a")];

        let b = legend.bounds(&ctx, plot, &entries);
        assert!((b.right() - 294.0).abs() < 1e-3);
        assert_eq!(b.y, 6.0);

        legend.set_position(LegendPosition::BottomLeft);
        let b = legend.bounds(&ctx, plot, &entries);
        assert_eq!(b.x, 6.0);
        assert!((b.bottom() - 194.0).abs() < 1e-3);
    }
}
