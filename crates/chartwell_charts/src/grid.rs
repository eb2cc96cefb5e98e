use chartwell_paint::{Color, DrawContext, Path, Point, Rect};

use crate::axis::TicMark;
use crate::object::{ChartObject, Drawable};
use crate::style::LineStyle;

/// Per-frame input for drawing the grid: the tics the axes actually drew.
#[derive(Clone, Copy, Debug)]
pub struct GridFrame<'a> {
    pub x_marks: &'a [TicMark],
    pub y_marks: &'a [TicMark],
    /// Lines stop short of the axis tics.
    pub x_tic_size: f32,
    pub y_tic_size: f32,
}

#[derive(Debug)]
pub struct Grid {
    object: ChartObject,
    show_horizontal: bool,
    show_vertical: bool,
    horizontal_style: LineStyle,
    vertical_style: LineStyle,
    color: Color,
}

impl Grid {
    pub fn new() -> Self {
        Self {
            object: ChartObject::new(),
            show_horizontal: true,
            show_vertical: true,
            horizontal_style: LineStyle::Dotted,
            vertical_style: LineStyle::Dotted,
            color: Color::from_hex(0xcccccc),
        }
    }

    pub fn show_horizontal(&self) -> bool {
        self.show_horizontal
    }

    pub fn set_show_horizontal(&mut self, show: bool) {
        self.show_horizontal = show;
        self.object.mark_changed();
    }

    pub fn show_vertical(&self) -> bool {
        self.show_vertical
    }

    pub fn set_show_vertical(&mut self, show: bool) {
        self.show_vertical = show;
        self.object.mark_changed();
    }

    pub fn horizontal_style(&self) -> LineStyle {
        self.horizontal_style
    }

    pub fn set_horizontal_style(&mut self, style: LineStyle) {
        self.horizontal_style = style;
        self.object.mark_changed();
    }

    pub fn vertical_style(&self) -> LineStyle {
        self.vertical_style
    }

    pub fn set_vertical_style(&mut self, style: LineStyle) {
        self.vertical_style = style;
        self.object.mark_changed();
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.object.mark_changed();
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Drawable<GridFrame<'a>> for Grid {
    fn object(&self) -> &ChartObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut ChartObject {
        &mut self.object
    }

    fn render(&mut self, ctx: &mut dyn DrawContext, plot: Rect, frame: &GridFrame<'a>) {
        if self.show_vertical {
            if let Some(stroke) = self.vertical_style.stroke(self.color, 1.0) {
                let bottom = plot.bottom() - frame.x_tic_size;
                for mark in frame.x_marks {
                    ctx.stroke_path(
                        Path::polyline(&[Point::new(mark.px, plot.y), Point::new(mark.px, bottom)]),
                        stroke.clone(),
                    );
                }
            }
        }

        if self.show_horizontal {
            if let Some(stroke) = self.horizontal_style.stroke(self.color, 1.0) {
                let left = plot.x + frame.y_tic_size;
                for mark in frame.y_marks {
                    ctx.stroke_path(
                        Path::polyline(&[Point::new(left, mark.px), Point::new(plot.right(), mark.px)]),
                        stroke.clone(),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chartwell_paint::PaintContext;

    use super::*;

    fn mark(px: f32) -> TicMark {
        TicMark {
            value: 0.0,
            px,
            label: String::new(),
        }
    }

    #[test]
    fn one_line_per_drawn_tic() {
        let mut grid = Grid::new();
        let xs = [mark(10.0), mark(20.0), mark(30.0)];
        let ys = [mark(5.0)];
        let frame = GridFrame {
            x_marks: &xs,
            y_marks: &ys,
            x_tic_size: 3.0,
            y_tic_size: 3.0,
        };
        let mut ctx = PaintContext::new();
        grid.draw(&mut ctx, Rect::new(0.0, 0.0, 100.0, 50.0), &frame);
        assert_eq!(ctx.commands().len(), 4);

        grid.set_show_vertical(false);
        let mut ctx = PaintContext::new();
        grid.draw(&mut ctx, Rect::new(0.0, 0.0, 100.0, 50.0), &frame);
        assert_eq!(ctx.commands().len(), 1);
    }

    #[test]
    fn line_style_none_hides_lines() {
        let mut grid = Grid::new();
        grid.set_horizontal_style(LineStyle::None);
        grid.set_vertical_style(LineStyle::None);
        let xs = [mark(10.0)];
        let frame = GridFrame {
            x_marks: &xs,
            y_marks: &xs,
            x_tic_size: 3.0,
            y_tic_size: 3.0,
        };
        let mut ctx = PaintContext::new();
        grid.draw(&mut ctx, Rect::new(0.0, 0.0, 100.0, 50.0), &frame);
        assert!(ctx.commands().is_empty());
    }
}
