//! Drawing interface the renderer talks to
//!
//! A [`Surface`] is the plotting engine: the renderer only decides what to
//! draw and where, the surface decides how it ends up on screen.

use anyhow::Result;

use crate::domain::Point;
use crate::geometry::Bounds;

/// An sRGB colour as a CSS hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub &'static str);

impl Color {
    pub const BLUE: Color = Color("#1f4fd8");
    pub const GREEN: Color = Color("#1a9e3f");
    pub const RED: Color = Color("#d62728");
    pub const BLACK: Color = Color("#000000");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Cross,
}

/// Line style for outlines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// Fill style for areas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub color: Color,
    pub opacity: f64,
}

/// A set of markers drawn with one style
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<Point>,
    pub color: Color,
    pub marker: Marker,
    /// Marker area in square pixels
    pub size: f64,
    pub edge: Option<Color>,
    /// Higher values are drawn on top
    pub z_order: i32,
}

/// What a legend row looks like
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Swatch {
    Line(Color),
    Marker(Marker, Color),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub swatch: Swatch,
}

/// Title and axis captions
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
}

/// Text shown when the user hovers or selects a marker
pub type HoverReadout = Box<dyn Fn(Point) -> String>;

/// How the blocking display ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerOutcome {
    /// The user closed the viewer
    Dismissed,
    /// The user interrupted the viewer (Ctrl-C)
    Cancelled,
    /// The viewer was not waited on
    Detached,
}

pub trait Surface {
    fn set_labels(&mut self, labels: Labels);

    /// Draw a closed outline through `ring`
    fn line_loop(&mut self, ring: &[Point], stroke: Stroke);

    fn fill_polygon(&mut self, ring: &[Point], fill: Fill);

    fn scatter(&mut self, series: Series);

    fn legend(&mut self, entries: Vec<LegendEntry>);

    /// Visible data range, drawn with one unit the same length on both axes
    fn set_view(&mut self, bounds: Bounds);

    fn set_hover_readout(&mut self, readout: HoverReadout);

    /// Present everything drawn so far and block until the viewer is done with it
    fn show(&mut self) -> Result<ViewerOutcome>;
}
