use chartwell_paint::{Point, Rect};

use crate::range::Range;

/// Maps data coordinates into a plot rectangle and back.
///
/// Pixel y grows downward, so larger data values sit visually higher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    x: Range,
    y: Range,
    rect: Rect,
}

impl CoordinateMapper {
    /// Both ranges must have a non-zero span.
    pub fn new(x: Range, y: Range, rect: Rect) -> Self {
        Self { x, y, rect }
    }

    pub fn x_range(&self) -> Range {
        self.x
    }

    pub fn y_range(&self) -> Range {
        self.y
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Pixels per data unit along x.
    pub fn ppu_x(&self) -> f64 {
        self.rect.width as f64 / self.x.span().abs()
    }

    /// Pixels per data unit along y.
    pub fn ppu_y(&self) -> f64 {
        self.rect.height as f64 / self.y.span().abs()
    }

    pub fn x_to_px(&self, x: f64) -> f32 {
        (self.rect.x as f64 + self.ppu_x() * (x - self.x.min)) as f32
    }

    pub fn y_to_px(&self, y: f64) -> f32 {
        (self.rect.y as f64 + self.rect.height as f64 - self.ppu_y() * (y - self.y.min)) as f32
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> Point {
        Point::new(self.x_to_px(x), self.y_to_px(y))
    }

    /// Inverse of [`to_pixel`](Self::to_pixel). Not clamped to the rect.
    pub fn to_data(&self, p: Point) -> (f64, f64) {
        let x = self.x.min + (p.x as f64 - self.rect.x as f64) / self.ppu_x();
        let y = self.y.min + (self.rect.y as f64 + self.rect.height as f64 - p.y as f64) / self.ppu_y();
        (x, y)
    }

    pub fn contains_x(&self, x: f64) -> bool {
        self.x.contains(x)
    }

    pub fn contains_y(&self, y: f64) -> bool {
        self.y.contains(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(
            Range::new(0.0, 10.0),
            Range::new(0.0, 10.0),
            Rect::new(0.0, 0.0, 100.0, 100.0),
        )
    }

    #[test]
    fn corners_map_to_rect_corners() {
        let m = mapper();
        assert_eq!(m.to_pixel(0.0, 0.0), Point::new(0.0, 100.0));
        assert_eq!(m.to_pixel(10.0, 10.0), Point::new(100.0, 0.0));
        assert_eq!(m.to_pixel(5.0, 5.0), Point::new(50.0, 50.0));
    }

    #[test]
    fn pixels_per_unit() {
        let m = CoordinateMapper::new(
            Range::new(-1.0, 1.0),
            Range::new(0.0, 4.0),
            Rect::new(10.0, 20.0, 200.0, 80.0),
        );
        assert_eq!(m.ppu_x(), 100.0);
        assert_eq!(m.ppu_y(), 20.0);
    }

    #[test]
    fn to_data_inverts_to_pixel() {
        let m = CoordinateMapper::new(
            Range::new(-3.0, 7.0),
            Range::new(2.0, 12.0),
            Rect::new(15.0, 5.0, 250.0, 120.0),
        );
        let (x, y) = m.to_data(m.to_pixel(1.5, 9.25));
        assert!((x - 1.5).abs() < 1e-4);
        assert!((y - 9.25).abs() < 1e-4);
    }

    #[test]
    fn contains_x_is_inclusive() {
        let m = mapper();
        assert!(m.contains_x(0.0));
        assert!(m.contains_x(10.0));
        assert!(!m.contains_x(10.5));
    }
}
