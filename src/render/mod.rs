//! Turns a parsed report into a plot
//!
//! # Layers (bottom to top)
//! 1. Polygon interior, low-opacity fill
//! 2. Polygon outline
//! 3. Inside / outside test points (z 5)
//! 4. Polygon corners (z 6)

pub mod html;
pub mod summary;
pub mod surface;
pub mod viewer;

pub use html::HtmlSurface;
pub use summary::write_summary;
pub use surface::{
    Color, Fill, HoverReadout, Labels, LegendEntry, Marker, Series, Stroke, Surface, Swatch,
    ViewerOutcome,
};

use anyhow::{Context, Result, bail};
use std::io::Write;

use crate::domain::{ParsedReport, Point, TestPoint};
use crate::geometry::Bounds;

pub const DEFAULT_MARGIN_RATIO: f64 = 0.1;

const TEST_POINT_Z: i32 = 5;
const CORNER_Z: i32 = 6;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Fraction of each axis' extent added on both sides
    pub margin_ratio: f64,
    /// Lower bound for the per-axis margin, in data units
    pub min_margin: f64,
    /// Colour the console summary
    pub color: bool,
    pub title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin_ratio: DEFAULT_MARGIN_RATIO,
            min_margin: 0.0,
            color: true,
            title: "Point-in-Polygon Test Visualization".to_string(),
        }
    }
}

/// How a render call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The report had no test points; nothing was drawn
    NothingToShow,
    Shown(ViewerOutcome),
}

/// Test points split by classification, file order kept within each side
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    pub inside: Vec<Point>,
    pub outside: Vec<Point>,
}

pub fn partition(test_points: &[TestPoint]) -> Partition {
    let (inside, outside): (Vec<&TestPoint>, Vec<&TestPoint>) =
        test_points.iter().partition(|tp| tp.inside);

    Partition {
        inside: inside.into_iter().map(|tp| tp.point).collect(),
        outside: outside.into_iter().map(|tp| tp.point).collect(),
    }
}

/// Visible data range: every vertex and test point plus the margin
pub fn viewport(report: &ParsedReport, options: &RenderOptions) -> Option<Bounds> {
    let all_points = report
        .polygon
        .ring()
        .iter()
        .copied()
        .chain(report.test_points.iter().map(|tp| tp.point));

    Bounds::from_points(all_points)
        .map(|b| b.with_margin(options.margin_ratio, options.min_margin))
}

/// Readout attached to every marker: both coordinates, two decimals
pub fn coordinate_readout() -> HoverReadout {
    Box::new(|p: Point| format!("x={:.2}\ny={:.2}", p.x, p.y))
}

/// Draw `report` on `surface`, print the console summary to `summary_out`,
/// then hand control to the surface's viewer
pub fn render<S, W>(
    report: &ParsedReport,
    surface: &mut S,
    options: &RenderOptions,
    summary_out: &mut W,
) -> Result<RenderOutcome>
where
    S: Surface + ?Sized,
    W: Write,
{
    if report.test_points.is_empty() {
        eprintln!("Warning: no test points found in the report, nothing to display");
        return Ok(RenderOutcome::NothingToShow);
    }

    let view = viewport(report, options);
    if let Some(bounds) = view
        && !bounds.is_finite()
    {
        bail!(
            "Coordinates too large to display: viewport x {}..{}, y {}..{}",
            bounds.min_x,
            bounds.max_x,
            bounds.min_y,
            bounds.max_y
        );
    }

    let Partition { inside, outside } = partition(&report.test_points);
    let polygon = &report.polygon;

    surface.set_labels(Labels {
        title: options.title.clone(),
        x_axis: "X coordinate".to_string(),
        y_axis: "Y coordinate".to_string(),
    });

    let mut legend = Vec::new();

    surface.fill_polygon(
        polygon.ring(),
        Fill {
            color: Color::BLUE,
            opacity: 0.1,
        },
    );
    surface.line_loop(
        polygon.ring(),
        Stroke {
            color: Color::BLUE,
            width: 2.0,
        },
    );
    legend.push(LegendEntry {
        label: "Polygon edges".to_string(),
        swatch: Swatch::Line(Color::BLUE),
    });

    let corners = Series {
        label: format!("Polygon vertices ({} corners)", polygon.vertex_count()),
        points: polygon.vertices().to_vec(),
        color: Color::BLUE,
        marker: Marker::Circle,
        size: 60.0,
        edge: Some(Color::BLACK),
        z_order: CORNER_Z,
    };
    legend.push(LegendEntry {
        label: corners.label.clone(),
        swatch: Swatch::Marker(Marker::Circle, Color::BLUE),
    });
    surface.scatter(corners);

    for (points, label, color, marker) in [
        (inside, "Inside", Color::GREEN, Marker::Circle),
        (outside, "Outside", Color::RED, Marker::Cross),
    ] {
        if points.is_empty() {
            continue;
        }
        let label = format!("{} ({})", label, points.len());
        legend.push(LegendEntry {
            label: label.clone(),
            swatch: Swatch::Marker(marker, color),
        });
        surface.scatter(Series {
            label,
            points,
            color,
            marker,
            size: 50.0,
            edge: None,
            z_order: TEST_POINT_Z,
        });
    }

    if let Some(bounds) = view {
        surface.set_view(bounds);
    }
    surface.set_hover_readout(coordinate_readout());
    surface.legend(legend);

    write_summary(summary_out, &report.test_points, options.color)
        .context("Failed to write test point summary")?;

    let outcome = surface.show()?;
    Ok(RenderOutcome::Shown(outcome))
}
