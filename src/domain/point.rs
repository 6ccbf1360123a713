use std::fmt;

/// A 2D coordinate as read from the report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for geo::Coord<f64> {
    fn from(p: Point) -> Self {
        geo::coord! { x: p.x, y: p.y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// A test point together with the classification recorded for it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestPoint {
    pub point: Point,
    /// Whether the upstream test placed the point inside the polygon
    pub inside: bool,
}

impl TestPoint {
    pub fn new(point: Point, inside: bool) -> Self {
        Self { point, inside }
    }

    pub fn label(&self) -> &'static str {
        if self.inside { "INSIDE" } else { "OUTSIDE" }
    }
}
