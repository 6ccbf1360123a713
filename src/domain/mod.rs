pub mod point;
pub mod polygon;
pub mod report;

pub use point::{Point, TestPoint};
pub use polygon::{MIN_VERTICES, Polygon};
pub use report::ParsedReport;
