//! Named color palettes used to assign colors to series.

use chartwell_paint::Color;

use crate::error::{ChartError, Result};

const TANGO: [u32; 7] = [
    0xcc0000, 0x3465a4, 0x73d216, 0xf57900, 0x75507b, 0xc17d11, 0xedd400,
];
const SIMPLE: [u32; 6] = [0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF];
const GRAYSCALE: [u32; 4] = [0x000000, 0x6D6D6D, 0x969696, 0xC6C6C6];

/// Names accepted by [`Palette::by_name`].
pub const BUILTIN_PALETTES: [&str; 3] = ["tango", "simple", "grayscale"];

/// Ordered list of colors with a cursor for sequential assignment.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    name: String,
    colors: Vec<Color>,
    cursor: usize,
}

impl Palette {
    /// A palette needs at least one color.
    pub fn new(name: impl Into<String>, colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(ChartError::InvalidArgument(
                "palette must contain at least one color".to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            colors,
            cursor: 0,
        })
    }

    fn builtin(name: &str, hex: &[u32]) -> Self {
        Self {
            name: name.to_string(),
            colors: hex.iter().map(|&h| Color::from_hex(h)).collect(),
            cursor: 0,
        }
    }

    pub fn tango() -> Self {
        Self::builtin("tango", &TANGO)
    }

    pub fn simple() -> Self {
        Self::builtin("simple", &SIMPLE)
    }

    pub fn grayscale() -> Self {
        Self::builtin("grayscale", &GRAYSCALE)
    }

    /// Look up a built-in palette. Case-insensitive.
    pub fn by_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tango" => Ok(Self::tango()),
            "simple" => Ok(Self::simple()),
            "grayscale" | "greyscale" => Ok(Self::grayscale()),
            _ => Err(ChartError::UnknownPalette(name.to_string())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for the series at `index`, wrapping around.
    pub fn color_at(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    /// Return the color under the cursor and advance it, wrapping around.
    pub fn next_color(&mut self) -> Color {
        let color = self.color_at(self.cursor);
        self.cursor = (self.cursor + 1) % self.colors.len();
        color
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::tango()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sizes() {
        assert_eq!(Palette::tango().len(), 7);
        assert_eq!(Palette::simple().len(), 6);
        assert_eq!(Palette::grayscale().len(), 4);
    }

    #[test]
    fn next_color_cycles_and_reset_rewinds() {
        let mut p = Palette::grayscale();
        let first: Vec<Color> = (0..4).map(|_| p.next_color()).collect();
        assert_eq!(first, p.colors());
        assert_eq!(p.next_color(), Color::from_hex(0x000000));
        p.reset();
        assert_eq!(p.next_color(), Color::from_hex(0x000000));
        assert_eq!(p.next_color(), Color::from_hex(0x6D6D6D));
    }

    #[test]
    fn color_at_wraps() {
        let p = Palette::tango();
        assert_eq!(p.color_at(7), Color::from_hex(0xcc0000));
        assert_eq!(p.color_at(8), Color::from_hex(0x3465a4));
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(Palette::by_name("Tango").unwrap().name(), "tango");
        for name in BUILTIN_PALETTES {
            assert!(Palette::by_name(name).is_ok());
        }
        assert!(matches!(
            Palette::by_name("neon"),
            Err(ChartError::UnknownPalette(_))
        ));
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(Palette::new("none", Vec::new()).is_err());
    }
}
