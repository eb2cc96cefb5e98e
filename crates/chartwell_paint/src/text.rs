//! Text styling

use crate::color::Color;

/// Style used for drawing and measuring text
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    pub bold: bool,
    pub color: Color,
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            bold: false,
            color: Color::BLACK,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(10.0)
    }
}
