//! Path building and representation

use smallvec::SmallVec;

/// A 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Path command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    ArcTo {
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    Close,
}

/// A 2D path composed of commands
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: SmallVec<[PathCommand; 16]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open polyline through `points`.
    pub fn polyline(points: &[Point]) -> Self {
        let mut path = Path::new();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                path.commands.push(PathCommand::MoveTo(*p));
            } else {
                path.commands.push(PathCommand::LineTo(*p));
            }
        }
        path
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: &[Point]) -> Self {
        let mut path = Self::polyline(points);
        if !path.is_empty() {
            path.commands.push(PathCommand::Close);
        }
        path
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Builder for constructing paths
pub struct PathBuilder {
    path: Path,
    current: Point,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            path: Path::new(),
            current: Point::ZERO,
        }
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        let point = Point::new(x, y);
        self.path.commands.push(PathCommand::MoveTo(point));
        self.current = point;
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        let point = Point::new(x, y);
        self.path.commands.push(PathCommand::LineTo(point));
        self.current = point;
        self
    }

    /// Line relative to the current point.
    pub fn rel_line_to(self, dx: f32, dy: f32) -> Self {
        let (x, y) = (self.current.x + dx, self.current.y + dy);
        self.line_to(x, y)
    }

    pub fn arc_to(mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32) -> Self {
        self.path.commands.push(PathCommand::ArcTo {
            center: Point::new(cx, cy),
            radius,
            start_angle: start,
            end_angle: end,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.path.commands.push(PathCommand::Close);
        self
    }

    pub fn build(self) -> Path {
        self.path
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}
