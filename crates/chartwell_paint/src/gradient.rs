//! Gradient fills

use crate::color::Color;
use crate::path::Point;

/// A gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32, // 0.0 to 1.0
    pub color: Color,
}

/// Gradient type
#[derive(Clone, Debug, PartialEq)]
pub enum Gradient {
    Linear {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
}

impl Gradient {
    /// Create a simple linear gradient between two colors
    pub fn linear_simple(start: Point, end: Point, from: Color, to: Color) -> Self {
        Gradient::Linear {
            start,
            end,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: from,
                },
                GradientStop {
                    offset: 1.0,
                    color: to,
                },
            ],
        }
    }

    /// Vertical gradient from `top` (y = `y0`) to `bottom` (y = `y1`).
    pub fn vertical(y0: f32, y1: f32, top: Color, bottom: Color) -> Self {
        Self::linear_simple(Point::new(0.0, y0), Point::new(0.0, y1), top, bottom)
    }
}
