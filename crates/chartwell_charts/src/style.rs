//! Line dash styles and point markers.

use chartwell_paint::{
    Circle, Color, DrawContext, ImageData, LineCap, Path, Point, Rect, Size, StrokeStyle,
};
use serde::{Deserialize, Serialize};

use crate::hit_test::HitShape;

/// Dash pattern of a stroked line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    None,
    #[default]
    Solid,
    Dotted,
    Dashed,
    DashedAsymmetric,
}

impl LineStyle {
    /// On/off lengths, scaled by the line width.
    fn dash(&self, width: f32) -> Vec<f32> {
        let w = width.max(1.0);
        match self {
            LineStyle::None | LineStyle::Solid => Vec::new(),
            LineStyle::Dotted => vec![w, 2.0 * w],
            LineStyle::Dashed => vec![5.0 * w, 5.0 * w],
            LineStyle::DashedAsymmetric => vec![6.0 * w, 2.0 * w, 2.0 * w, 2.0 * w],
        }
    }

    /// Stroke for this style, or `None` when nothing should be drawn.
    pub fn stroke(&self, color: Color, width: f32) -> Option<StrokeStyle> {
        if *self == LineStyle::None || width <= 0.0 {
            return None;
        }
        let mut stroke = StrokeStyle::new(color, width).with_dash(&self.dash(width));
        if *self == LineStyle::Dotted {
            stroke.line_cap = LineCap::Round;
        }
        Some(stroke)
    }
}

/// Marker drawn at each data point.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PointStyle {
    None,
    #[default]
    Circle,
    Square,
    Cross,
    TriangleUp,
    TriangleDown,
    Diamond,
    /// Drawn at its natural size, centered on the point.
    Image(ImageData),
}

impl PointStyle {
    pub fn is_none(&self) -> bool {
        matches!(self, PointStyle::None)
    }

    /// Region a pointer must hit to select a marker of `size` at `center`.
    pub fn hit_shape(&self, center: Point, size: f32) -> HitShape {
        match self {
            PointStyle::Image(image) => HitShape::Rect(image_rect(image.size(), center)),
            _ => HitShape::Circle(Circle::new(center, size)),
        }
    }
}

fn image_rect(size: Size, center: Point) -> Rect {
    Rect::new(
        center.x - size.width / 2.0,
        center.y - size.height / 2.0,
        size.width,
        size.height,
    )
}

/// Draw one marker. `size` is the marker radius in pixels.
pub fn draw_marker(ctx: &mut dyn DrawContext, center: Point, size: f32, style: &PointStyle, color: Color) {
    let Point { x, y } = center;
    let r = size;
    match style {
        PointStyle::None => {}
        PointStyle::Circle => ctx.fill_circle(Circle::new(center, r), color.into()),
        PointStyle::Square => {
            let a = r / std::f32::consts::SQRT_2;
            ctx.fill_rect(Rect::new(x - a, y - a, 2.0 * a, 2.0 * a), color.into());
        }
        PointStyle::Cross => {
            let a = r / std::f32::consts::SQRT_2;
            let stroke = StrokeStyle::new(color, (r / 3.0).max(1.0));
            ctx.stroke_path(
                Path::polyline(&[Point::new(x - a, y - a), Point::new(x + a, y + a)]),
                stroke.clone(),
            );
            ctx.stroke_path(
                Path::polyline(&[Point::new(x - a, y + a), Point::new(x + a, y - a)]),
                stroke,
            );
        }
        PointStyle::TriangleUp | PointStyle::TriangleDown => {
            // Equilateral triangle inscribed in the marker circle.
            let side = 3f32.sqrt() * r;
            let h = r / 2.0;
            let dir = if matches!(style, PointStyle::TriangleUp) { 1.0 } else { -1.0 };
            ctx.fill_path(
                Path::polygon(&[
                    Point::new(x - side / 2.0, y + dir * h),
                    Point::new(x + side / 2.0, y + dir * h),
                    Point::new(x, y - dir * r),
                ]),
                color.into(),
            );
        }
        PointStyle::Diamond => {
            ctx.fill_path(
                Path::polygon(&[
                    Point::new(x, y - r),
                    Point::new(x + r, y),
                    Point::new(x, y + r),
                    Point::new(x - r, y),
                ]),
                color.into(),
            );
        }
        PointStyle::Image(image) => ctx.draw_image(image, image_rect(image.size(), center)),
    }
}

#[cfg(test)]
mod tests {
    use chartwell_paint::{PaintCommand, PaintContext};

    use super::*;

    #[test]
    fn none_style_has_no_stroke() {
        assert!(LineStyle::None.stroke(Color::BLACK, 2.0).is_none());
        assert!(LineStyle::Solid.stroke(Color::BLACK, 2.0).unwrap().dash.is_empty());
        assert!(!LineStyle::Dashed.stroke(Color::BLACK, 2.0).unwrap().dash.is_empty());
    }

    #[test]
    fn markers_emit_one_shape_each() {
        let styles = [
            PointStyle::Circle,
            PointStyle::Square,
            PointStyle::TriangleUp,
            PointStyle::TriangleDown,
            PointStyle::Diamond,
        ];
        for style in styles {
            let mut ctx = PaintContext::new();
            draw_marker(&mut ctx, Point::new(10.0, 10.0), 4.0, &style, Color::BLACK);
            assert_eq!(ctx.commands().len(), 1, "{style:?}");
        }

        let mut ctx = PaintContext::new();
        draw_marker(&mut ctx, Point::new(10.0, 10.0), 4.0, &PointStyle::Cross, Color::BLACK);
        assert_eq!(ctx.commands().len(), 2);
    }

    #[test]
    fn image_marker_is_centered() {
        let image = ImageData::from_rgba(4, 2, vec![0; 32]).unwrap();
        let mut ctx = PaintContext::new();
        draw_marker(
            &mut ctx,
            Point::new(10.0, 10.0),
            4.0,
            &PointStyle::Image(image.clone()),
            Color::BLACK,
        );
        assert_eq!(
            ctx.commands()[0],
            PaintCommand::DrawImage {
                image: image.clone(),
                rect: Rect::new(8.0, 9.0, 4.0, 2.0)
            }
        );
        assert_eq!(
            PointStyle::Image(image).hit_shape(Point::new(10.0, 10.0), 4.0),
            HitShape::Rect(Rect::new(8.0, 9.0, 4.0, 2.0))
        );
    }
}
