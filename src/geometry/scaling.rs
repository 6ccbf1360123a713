use geo::{BoundingRect, MultiPoint};

use crate::domain::Point;

/// Axis-aligned bounding box in data coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds from a set of points
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let multi: MultiPoint<f64> = points
            .into_iter()
            .map(|p| geo::Point::new(p.x, p.y))
            .collect();
        let rect = multi.bounding_rect()?;

        Some(Self {
            min_x: rect.min().x,
            max_x: rect.max().x,
            min_y: rect.min().y,
            max_y: rect.max().y,
        })
    }

    /// Pad each axis by `ratio` of its own extent
    ///
    /// A flat axis (zero extent) gets `min_margin` instead, which defaults to
    /// zero in the CLI and leaves the axis collapsed.
    pub fn with_margin(&self, ratio: f64, min_margin: f64) -> Self {
        let margin_x = (self.width() * ratio).max(min_margin);
        let margin_y = (self.height() * ratio).max(min_margin);

        Self {
            min_x: self.min_x - margin_x,
            max_x: self.max_x + margin_x,
            min_y: self.min_y - margin_y,
            max_y: self.max_y + margin_y,
        }
    }

    /// True when every edge and both extents are finite numbers
    pub fn is_finite(&self) -> bool {
        [self.min_x, self.max_x, self.min_y, self.max_y, self.width(), self.height()]
            .iter()
            .all(|v| v.is_finite())
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Maps data coordinates to screen pixels
///
/// The y axis is flipped so larger values are drawn higher up.
#[derive(Debug, Clone)]
pub struct Scaler {
    /// Pixels per data unit along x
    scale_x: f64,
    /// Pixels per data unit along y
    scale_y: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Scaler {
    /// Fit `bounds` inside a `width_px` x `height_px` area with one scale for
    /// both axes, centred, leaving `padding_px` free on every side
    pub fn from_bounds(bounds: &Bounds, width_px: f64, height_px: f64, padding_px: f64) -> Self {
        let (usable_w, usable_h) = usable_area(width_px, height_px, padding_px);

        let scale = axis_scale(usable_w, bounds.width()).min(axis_scale(usable_h, bounds.height()));
        let scale = if scale.is_finite() { scale } else { 1.0 };

        Self::centred(bounds, scale, scale, usable_w, usable_h, padding_px)
    }

    fn centred(
        bounds: &Bounds,
        scale_x: f64,
        scale_y: f64,
        usable_w: f64,
        usable_h: f64,
        padding_px: f64,
    ) -> Self {
        let scaled_width = bounds.width() * scale_x;
        let scaled_height = bounds.height() * scale_y;

        let offset_x = padding_px + (usable_w - scaled_width) / 2.0 - bounds.min_x * scale_x;
        let offset_y = padding_px + (usable_h - scaled_height) / 2.0 + bounds.max_y * scale_y;

        Self {
            scale_x,
            scale_y,
            offset_x,
            offset_y,
        }
    }

    /// Scale a data point to pixel coordinates
    pub fn scale(&self, p: Point) -> (f64, f64) {
        (self.x_to_px(p.x), self.y_to_px(p.y))
    }

    pub fn x_to_px(&self, x: f64) -> f64 {
        x * self.scale_x + self.offset_x
    }

    pub fn y_to_px(&self, y: f64) -> f64 {
        self.offset_y - y * self.scale_y
    }
}

fn usable_area(width_px: f64, height_px: f64, padding_px: f64) -> (f64, f64) {
    (
        (width_px - 2.0 * padding_px).max(1.0),
        (height_px - 2.0 * padding_px).max(1.0),
    )
}

/// Pixels per unit for one axis; infinite when the axis has no extent
fn axis_scale(usable_px: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        usable_px / extent
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_bounds_from_points() {
        let bounds =
            Bounds::from_points(points(&[(0.0, 0.0), (1000.0, 2000.0), (500.0, -10.0)])).unwrap();

        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_x, 1000.0);
        assert_eq!(bounds.min_y, -10.0);
        assert_eq!(bounds.max_y, 2000.0);
    }

    #[test]
    fn test_bounds_from_no_points() {
        assert!(Bounds::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_margin_is_ten_percent_per_axis() {
        let bounds = Bounds::from_points(points(&[(0.0, 0.0), (10.0, 4.0)])).unwrap();
        let padded = bounds.with_margin(0.1, 0.0);

        assert!((padded.min_x + 1.0).abs() < 1e-12);
        assert!((padded.max_x - 11.0).abs() < 1e-12);
        assert!((padded.min_y + 0.4).abs() < 1e-12);
        assert!((padded.max_y - 4.4).abs() < 1e-12);
    }

    #[test]
    fn test_flat_axis_collapses_without_min_margin() {
        let bounds = Bounds::from_points(points(&[(0.0, 3.0), (10.0, 3.0)])).unwrap();

        let padded = bounds.with_margin(0.1, 0.0);
        assert_eq!(padded.min_y, 3.0);
        assert_eq!(padded.max_y, 3.0);

        let padded = bounds.with_margin(0.1, 0.5);
        assert_eq!(padded.min_y, 2.5);
        assert_eq!(padded.max_y, 3.5);
        assert!((padded.min_x + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_padded_bounds_contain_all_points() {
        let pts = points(&[(-3.5, 2.0), (7.25, -1.0), (0.0, 9.5), (1.0, 1.0)]);
        let padded = Bounds::from_points(pts.clone()).unwrap().with_margin(0.1, 0.0);
        for p in pts {
            assert!(p.x >= padded.min_x && p.x <= padded.max_x);
            assert!(p.y >= padded.min_y && p.y <= padded.max_y);
        }
    }

    #[test]
    fn test_is_finite() {
        let bounds = Bounds::from_points(points(&[(0.0, 0.0), (10.0, 4.0)])).unwrap();
        assert!(bounds.is_finite());

        // both corners are finite but the width overflows
        let huge = Bounds::from_points(points(&[(-1e308, 0.0), (1e308, 1.0)])).unwrap();
        assert!(!huge.is_finite());

        let infinite = Bounds::from_points(points(&[(0.0, 0.0), (f64::INFINITY, 1.0)])).unwrap();
        assert!(!infinite.is_finite());
    }

    #[test]
    fn test_scaler_equal_aspect() {
        let bounds = Bounds {
            min_x: 0.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 5.0,
        };
        let scaler = Scaler::from_bounds(&bounds, 1000.0, 1000.0, 0.0);

        // Width is the limiting axis: 1000px / 10 units
        let (x0, _) = scaler.scale(Point::new(0.0, 0.0));
        let (x10, _) = scaler.scale(Point::new(10.0, 0.0));
        assert!((x10 - x0 - 1000.0).abs() < 1e-9);

        let (x0, y0) = scaler.scale(Point::new(0.0, 0.0));
        let (x1, y1) = scaler.scale(Point::new(1.0, 1.0));
        assert!(((x1 - x0) - (y0 - y1)).abs() < 1e-9);

        // Vertically centred, y flipped
        let (_, top) = scaler.scale(Point::new(0.0, 5.0));
        let (_, bottom) = scaler.scale(Point::new(0.0, 0.0));
        assert!((top - 250.0).abs() < 1e-9);
        assert!((bottom - 750.0).abs() < 1e-9);
    }

    #[test]
    fn test_scaler_degenerate_bounds() {
        let bounds = Bounds {
            min_x: 2.0,
            max_x: 2.0,
            min_y: 2.0,
            max_y: 2.0,
        };
        let scaler = Scaler::from_bounds(&bounds, 200.0, 100.0, 10.0);
        let (x0, _) = scaler.scale(Point::new(0.0, 0.0));
        let (x1, _) = scaler.scale(Point::new(1.0, 0.0));
        assert!((x1 - x0 - 1.0).abs() < 1e-9);

        let (x, y) = scaler.scale(Point::new(2.0, 2.0));
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 50.0).abs() < 1e-9);
    }
}
