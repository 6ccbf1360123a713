use geo::algorithm::winding_order::{Winding, WindingOrder};
use geo::{Area, LineString};

use super::Point;

/// Minimum number of distinct vertices a polygon needs
pub const MIN_VERTICES: usize = 3;

/// A closed polygon ring
///
/// The ring always ends with a copy of its first vertex, so a polygon with
/// `n` corners holds `n + 1` points. The only constructor is [`Polygon::close`],
/// which refuses fewer than [`MIN_VERTICES`] corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    ring: Vec<Point>,
}

impl Polygon {
    /// Close an open vertex list into a ring
    ///
    /// Returns `None` when fewer than three vertices are given.
    pub fn close(mut vertices: Vec<Point>) -> Option<Self> {
        if vertices.len() < MIN_VERTICES {
            return None;
        }
        let first = vertices[0];
        vertices.push(first);
        Some(Self { ring: vertices })
    }

    /// The closed ring, first point repeated at the end
    pub fn ring(&self) -> &[Point] {
        &self.ring
    }

    /// The corners without the closing duplicate
    pub fn vertices(&self) -> &[Point] {
        &self.ring[..self.ring.len() - 1]
    }

    pub fn vertex_count(&self) -> usize {
        self.ring.len() - 1
    }

    fn to_line_string(&self) -> LineString<f64> {
        self.ring.iter().map(|&p| geo::Coord::from(p)).collect()
    }

    /// Enclosed area, regardless of winding direction
    pub fn area(&self) -> f64 {
        geo::Polygon::new(self.to_line_string(), vec![]).unsigned_area()
    }

    /// Winding direction of the ring, `None` for degenerate (collinear) rings
    pub fn winding(&self) -> Option<WindingOrder> {
        self.to_line_string().winding_order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ]
    }

    #[test]
    fn test_close_appends_first_vertex() {
        let polygon = Polygon::close(square()).unwrap();
        assert_eq!(polygon.ring().len(), 5);
        assert_eq!(polygon.ring().first(), polygon.ring().last());
        assert_eq!(polygon.vertex_count(), 4);
        assert_eq!(polygon.vertices(), square().as_slice());
    }

    #[test]
    fn test_close_rejects_too_few_vertices() {
        assert!(Polygon::close(vec![]).is_none());
        assert!(Polygon::close(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_none());
    }

    #[test]
    fn test_area_and_winding() {
        let polygon = Polygon::close(square()).unwrap();
        assert!((polygon.area() - 16.0).abs() < 1e-9);
        assert_eq!(polygon.winding(), Some(WindingOrder::CounterClockwise));

        let mut reversed = square();
        reversed.reverse();
        let polygon = Polygon::close(reversed).unwrap();
        assert_eq!(polygon.winding(), Some(WindingOrder::Clockwise));
    }
}
