use super::{Polygon, TestPoint};

/// Everything read from one result report
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReport {
    pub polygon: Polygon,
    /// Test points in file order
    pub test_points: Vec<TestPoint>,
    /// Vertex count announced by the header line, if it carried one
    pub declared_vertex_count: Option<usize>,
}

impl ParsedReport {
    pub fn new(polygon: Polygon, test_points: Vec<TestPoint>) -> Self {
        Self {
            polygon,
            test_points,
            declared_vertex_count: None,
        }
    }

    pub fn inside_count(&self) -> usize {
        self.test_points.iter().filter(|p| p.inside).count()
    }

    pub fn outside_count(&self) -> usize {
        self.test_points.len() - self.inside_count()
    }

    /// True when the header announced a vertex count that was not what we read
    pub fn vertex_count_mismatch(&self) -> bool {
        self.declared_vertex_count
            .is_some_and(|n| n != self.polygon.vertex_count())
    }
}
