//! Self-contained HTML page with an inline SVG plot
//!
//! Every marker carries a `<title>` with its readout (native hover tooltip)
//! and a `data-idx` into an embedded JSON table, which a small script shows
//! in a fixed panel on hover or click.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use super::surface::{
    Color, Fill, HoverReadout, Labels, LegendEntry, Marker, Series, Stroke, Surface, Swatch,
    ViewerOutcome,
};
use super::viewer::{open_in_browser, wait_for_dismissal};
use crate::domain::Point;
use crate::geometry::{Bounds, Scaler, format_tick, nice_step, ticks};

/// Space around the plot frame for title, ticks and axis captions
const PADDING_PX: f64 = 70.0;
const TARGET_TICKS: usize = 8;
const LEGEND_ROW_PX: f64 = 20.0;

const SCRIPT: &str = r#"
const readouts = JSON.parse(document.getElementById("readouts").textContent);
const panel = document.getElementById("readout");
document.querySelectorAll("g.pt").forEach((g) => {
  const show = () => {
    const r = readouts[Number(g.dataset.idx)];
    panel.textContent = r.series + "\n" + r.text;
  };
  g.addEventListener("mouseenter", show);
  g.addEventListener("click", show);
});
"#;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 16px; }
#readout { position: fixed; top: 16px; right: 16px; min-width: 140px; padding: 8px 12px;
  background: #fffbe6; border: 1px solid #ccc; border-radius: 4px; white-space: pre; }
g.pt { cursor: crosshair; }
"#;

/// Entry of the embedded readout table
#[derive(Debug, Serialize)]
struct MarkerReadout<'a> {
    series: &'a str,
    x: f64,
    y: f64,
    text: String,
}

pub struct HtmlSurface {
    path: PathBuf,
    width: u32,
    height: u32,
    open: bool,
    wait: bool,
    labels: Option<Labels>,
    fills: Vec<(Vec<Point>, Fill)>,
    outlines: Vec<(Vec<Point>, Stroke)>,
    series: Vec<Series>,
    legend: Vec<LegendEntry>,
    view: Option<Bounds>,
    readout: Option<HoverReadout>,
}

impl HtmlSurface {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            open: false,
            wait: true,
            labels: None,
            fills: Vec::new(),
            outlines: Vec::new(),
            series: Vec::new(),
            legend: Vec::new(),
            view: None,
            readout: None,
        }
    }

    /// Open the written page in the system browser
    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Block in `show` until the user dismisses the viewer
    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    /// Visible range: the requested view, or everything drawn
    fn view_bounds(&self) -> Option<Bounds> {
        if self.view.is_some() {
            return self.view;
        }
        let drawn = self
            .fills
            .iter()
            .flat_map(|(ring, _)| ring)
            .chain(self.outlines.iter().flat_map(|(ring, _)| ring))
            .chain(self.series.iter().flat_map(|s| &s.points))
            .copied();
        Bounds::from_points(drawn)
    }

    /// Render the full HTML document
    pub fn to_html(&self) -> Result<String> {
        let title = self
            .labels
            .as_ref()
            .map(|l| l.title.as_str())
            .unwrap_or("Plot");
        let (svg, readouts) = self.to_svg()?;
        let readouts_json = serde_json::to_string(&readouts)
            .context("Failed to serialize marker readouts")?
            .replace("</", "<\\/");

        let mut html = String::new();
        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">")?;
        writeln!(html, "<head>")?;
        writeln!(html, "<meta charset=\"utf-8\">")?;
        writeln!(html, "<title>{}</title>", escape(title))?;
        writeln!(html, "<style>{}</style>", STYLE)?;
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;
        writeln!(html, "{}", svg)?;
        writeln!(
            html,
            "<pre id=\"readout\">Hover or click a point to read its coordinates</pre>"
        )?;
        writeln!(
            html,
            "<script type=\"application/json\" id=\"readouts\">{}</script>",
            readouts_json
        )?;
        writeln!(html, "<script>{}</script>", SCRIPT)?;
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")?;
        Ok(html)
    }

    fn to_svg(&self) -> Result<(String, Vec<MarkerReadout<'_>>)> {
        let (w, h) = (self.width as f64, self.height as f64);
        let mut svg = String::new();
        let mut readouts = Vec::new();

        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#
        )?;
        writeln!(svg, r#"<rect width="{w}" height="{h}" fill="white"/>"#)?;

        if let Some(labels) = &self.labels {
            writeln!(
                svg,
                r#"<text x="{:.1}" y="30" text-anchor="middle" font-size="16" font-weight="bold">{}</text>"#,
                w / 2.0,
                escape(&labels.title)
            )?;
            writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
                w / 2.0,
                h - 16.0,
                escape(&labels.x_axis)
            )?;
            writeln!(
                svg,
                r#"<text x="20" y="{:.1}" text-anchor="middle" transform="rotate(-90 20 {:.1})">{}</text>"#,
                h / 2.0,
                h / 2.0,
                escape(&labels.y_axis)
            )?;
        }

        let Some(bounds) = self.view_bounds() else {
            writeln!(svg, "</svg>")?;
            return Ok((svg, readouts));
        };
        if !bounds.is_finite() {
            bail!(
                "Cannot plot a non-finite view: x {}..{}, y {}..{}",
                bounds.min_x,
                bounds.max_x,
                bounds.min_y,
                bounds.max_y
            );
        }

        let scaler = Scaler::from_bounds(&bounds, w, h, PADDING_PX);

        let (left, top) = scaler.scale(Point::new(bounds.min_x, bounds.max_y));
        let (right, bottom) = scaler.scale(Point::new(bounds.max_x, bounds.min_y));

        self.write_grid(&mut svg, &bounds, &scaler, (left, top, right, bottom))?;

        for (ring, fill) in &self.fills {
            writeln!(
                svg,
                r#"<polygon points="{}" fill="{}" fill-opacity="{}" stroke="none"/>"#,
                svg_points(ring, &scaler),
                fill.color.0,
                fill.opacity
            )?;
        }

        for (ring, stroke) in &self.outlines {
            writeln!(
                svg,
                r#"<polygon points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
                svg_points(ring, &scaler),
                stroke.color.0,
                stroke.width
            )?;
        }

        let mut layered: Vec<&Series> = self.series.iter().collect();
        layered.sort_by_key(|s| s.z_order);

        for series in layered {
            let radius = series.size.sqrt() * 0.66;
            writeln!(svg, r#"<g class="series" data-label="{}">"#, escape(&series.label))?;
            for &point in &series.points {
                let (cx, cy) = scaler.scale(point);
                match &self.readout {
                    Some(readout) => {
                        let text = readout(point);
                        writeln!(
                            svg,
                            r#"<g class="pt" data-idx="{}"><title>{}</title>"#,
                            readouts.len(),
                            escape(&text)
                        )?;
                        readouts.push(MarkerReadout {
                            series: &series.label,
                            x: point.x,
                            y: point.y,
                            text,
                        });
                    }
                    None => writeln!(svg, r#"<g>"#)?,
                }
                write_marker(
                    &mut svg,
                    series.marker,
                    series.color,
                    series.edge,
                    (cx, cy),
                    radius,
                )?;
                writeln!(svg, "</g>")?;
            }
            writeln!(svg, "</g>")?;
        }

        self.write_legend(&mut svg, right)?;

        writeln!(svg, "</svg>")?;
        Ok((svg, readouts))
    }

    fn write_grid(
        &self,
        svg: &mut String,
        bounds: &Bounds,
        scaler: &Scaler,
        (left, top, right, bottom): (f64, f64, f64, f64),
    ) -> Result<()> {
        let x_step = nice_step(bounds.width(), TARGET_TICKS);
        let y_step = nice_step(bounds.height(), TARGET_TICKS);

        writeln!(svg, r##"<g class="grid" stroke="#808080" stroke-opacity="0.3">"##)?;
        for x in ticks(bounds.min_x, bounds.max_x, TARGET_TICKS) {
            let px = scaler.x_to_px(x);
            writeln!(
                svg,
                r#"<line x1="{px:.2}" y1="{top:.2}" x2="{px:.2}" y2="{bottom:.2}"/>"#
            )?;
        }
        for y in ticks(bounds.min_y, bounds.max_y, TARGET_TICKS) {
            let py = scaler.y_to_px(y);
            writeln!(
                svg,
                r#"<line x1="{left:.2}" y1="{py:.2}" x2="{right:.2}" y2="{py:.2}"/>"#
            )?;
        }
        writeln!(svg, "</g>")?;

        writeln!(svg, r##"<g class="ticks" fill="#333333">"##)?;
        for x in ticks(bounds.min_x, bounds.max_x, TARGET_TICKS) {
            writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                scaler.x_to_px(x),
                bottom + 16.0,
                format_tick(x, x_step)
            )?;
        }
        for y in ticks(bounds.min_y, bounds.max_y, TARGET_TICKS) {
            writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" text-anchor="end" dominant-baseline="middle">{}</text>"#,
                left - 6.0,
                scaler.y_to_px(y),
                format_tick(y, y_step)
            )?;
        }
        writeln!(svg, "</g>")?;

        writeln!(
            svg,
            r#"<rect x="{left:.2}" y="{top:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="black"/>"#,
            right - left,
            bottom - top
        )?;
        Ok(())
    }

    fn write_legend(&self, svg: &mut String, frame_right: f64) -> Result<()> {
        if self.legend.is_empty() {
            return Ok(());
        }

        let longest = self
            .legend
            .iter()
            .map(|e| e.label.chars().count())
            .max()
            .unwrap_or(0);
        let box_w = 40.0 + longest as f64 * 7.0;
        let box_h = 10.0 + self.legend.len() as f64 * LEGEND_ROW_PX;
        let x = (frame_right - box_w - 10.0).max(10.0);
        let y = PADDING_PX + 10.0;

        writeln!(svg, r#"<g class="legend" transform="translate({x:.2} {y:.2})">"#)?;
        writeln!(
            svg,
            r##"<rect width="{box_w:.2}" height="{box_h:.2}" fill="white" fill-opacity="0.85" stroke="#cccccc" rx="4"/>"##
        )?;
        for (i, entry) in self.legend.iter().enumerate() {
            let cy = 15.0 + i as f64 * LEGEND_ROW_PX;
            match entry.swatch {
                Swatch::Line(color) => writeln!(
                    svg,
                    r#"<line x1="8" y1="{cy:.2}" x2="28" y2="{cy:.2}" stroke="{}" stroke-width="2"/>"#,
                    color.0
                )?,
                Swatch::Marker(marker, color) => {
                    write_marker(svg, marker, color, None, (18.0, cy), 4.0)?
                }
            }
            writeln!(
                svg,
                r#"<text x="36" y="{cy:.2}" dominant-baseline="middle">{}</text>"#,
                escape(&entry.label)
            )?;
        }
        writeln!(svg, "</g>")?;
        Ok(())
    }
}

impl Surface for HtmlSurface {
    fn set_labels(&mut self, labels: Labels) {
        self.labels = Some(labels);
    }

    fn line_loop(&mut self, ring: &[Point], stroke: Stroke) {
        self.outlines.push((ring.to_vec(), stroke));
    }

    fn fill_polygon(&mut self, ring: &[Point], fill: Fill) {
        self.fills.push((ring.to_vec(), fill));
    }

    fn scatter(&mut self, series: Series) {
        self.series.push(series);
    }

    fn legend(&mut self, entries: Vec<LegendEntry>) {
        self.legend = entries;
    }

    fn set_view(&mut self, bounds: Bounds) {
        self.view = Some(bounds);
    }

    fn set_hover_readout(&mut self, readout: HoverReadout) {
        self.readout = Some(readout);
    }

    fn show(&mut self) -> Result<ViewerOutcome> {
        let html = self.to_html()?;
        fs::write(&self.path, html)
            .with_context(|| format!("Failed to write plot: {}", self.path.display()))?;
        println!("Plot written to {}", self.path.display());

        if self.open
            && let Err(e) = open_in_browser(&self.path)
        {
            eprintln!("Warning: {:#}", e);
        }

        if !self.wait {
            return Ok(ViewerOutcome::Detached);
        }

        println!("Press Enter to close the viewer (Ctrl-C to cancel)...");
        wait_for_dismissal()
    }
}

fn write_marker(
    svg: &mut String,
    marker: Marker,
    color: Color,
    edge: Option<Color>,
    (cx, cy): (f64, f64),
    r: f64,
) -> Result<()> {
    let color = color.0;
    match marker {
        Marker::Circle => {
            let edge = edge
                .map(|c| format!(r#" stroke="{}" stroke-width="1""#, c.0))
                .unwrap_or_default();
            writeln!(
                svg,
                r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{color}"{edge}/>"#
            )?;
        }
        Marker::Cross => {
            writeln!(
                svg,
                r#"<path d="M{:.2} {:.2}L{:.2} {:.2}M{:.2} {:.2}L{:.2} {:.2}" stroke="{color}" stroke-width="2" stroke-linecap="round"/>"#,
                cx - r,
                cy - r,
                cx + r,
                cy + r,
                cx - r,
                cy + r,
                cx + r,
                cy - r
            )?;
        }
    }
    Ok(())
}

fn svg_points(ring: &[Point], scaler: &Scaler) -> String {
    ring.iter()
        .map(|&p| {
            let (x, y) = scaler.scale(p);
            format!("{x:.2},{y:.2}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text for use inside XML content and attributes
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{coordinate_readout, Color};
    use tempfile::tempdir;

    fn triangle() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 0.0),
        ]
    }

    fn drawn_surface(path: PathBuf) -> HtmlSurface {
        let mut surface = HtmlSurface::new(path, 800, 600).with_wait(false);
        surface.set_labels(Labels {
            title: "Inside & <outside>".to_string(),
            x_axis: "X".to_string(),
            y_axis: "Y".to_string(),
        });
        surface.fill_polygon(
            &triangle(),
            Fill {
                color: Color::BLUE,
                opacity: 0.1,
            },
        );
        surface.line_loop(
            &triangle(),
            Stroke {
                color: Color::BLUE,
                width: 2.0,
            },
        );
        surface.scatter(Series {
            label: "Outside (1)".to_string(),
            points: vec![Point::new(9.0, 9.0)],
            color: Color::RED,
            marker: Marker::Cross,
            size: 50.0,
            edge: None,
            z_order: 5,
        });
        surface.scatter(Series {
            label: "Inside (1)".to_string(),
            points: vec![Point::new(3.0, 1.0)],
            color: Color::GREEN,
            marker: Marker::Circle,
            size: 50.0,
            edge: None,
            z_order: 5,
        });
        surface.legend(vec![LegendEntry {
            label: "Inside (1)".to_string(),
            swatch: Swatch::Marker(Marker::Circle, Color::GREEN),
        }]);
        surface.set_hover_readout(coordinate_readout());
        surface
    }

    #[test]
    fn test_html_contains_layers() {
        let surface = drawn_surface(PathBuf::from("unused.html"));
        let html = surface.to_html().unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Inside &amp; &lt;outside&gt;</title>"));
        assert!(html.contains(r#"fill-opacity="0.1""#));
        assert!(html.contains(r#"stroke-width="2""#));
        assert!(html.contains("<circle"));
        assert!(html.contains("<path d=\"M"));
        assert!(html.contains(r#"class="legend""#));
    }

    #[test]
    fn test_readouts_embedded_for_every_marker() {
        let surface = drawn_surface(PathBuf::from("unused.html"));
        let html = surface.to_html().unwrap();

        assert!(html.contains("<title>x=3.00\ny=1.00</title>"));
        assert!(html.contains("<title>x=9.00\ny=9.00</title>"));
        assert!(html.contains(r#"data-idx="0""#));
        assert!(html.contains(r#"data-idx="1""#));
        assert!(html.contains(r#""text":"x=9.00\ny=9.00""#));
    }

    #[test]
    fn test_without_readout_markers_have_no_index() {
        let mut surface = HtmlSurface::new("unused.html", 400, 400);
        surface.scatter(Series {
            label: "Inside (1)".to_string(),
            points: vec![Point::new(1.0, 1.0)],
            color: Color::GREEN,
            marker: Marker::Circle,
            size: 50.0,
            edge: None,
            z_order: 5,
        });
        let html = surface.to_html().unwrap();
        assert!(!html.contains("data-idx"));
        assert!(html.contains("<circle"));
    }

    #[test]
    fn test_view_falls_back_to_drawn_extent() {
        let surface = drawn_surface(PathBuf::from("unused.html"));
        let bounds = surface.view_bounds().unwrap();
        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_y, 9.0);
    }

    #[test]
    fn test_empty_surface_still_renders() {
        let surface = HtmlSurface::new("unused.html", 400, 400);
        let html = surface.to_html().unwrap();
        assert!(html.contains("</svg>"));
        assert!(html.contains(r#"id="readouts">[]</script>"#));
    }

    #[test]
    fn test_show_writes_file_without_waiting() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plot.html");
        let mut surface = drawn_surface(path.clone());

        let outcome = surface.show().unwrap();
        assert_eq!(outcome, ViewerOutcome::Detached);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
    }

    #[test]
    fn test_non_finite_view_fails_without_writing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plot.html");
        let mut surface = drawn_surface(path.clone());
        surface.set_view(Bounds {
            min_x: -1e308,
            max_x: 1e308,
            min_y: 0.0,
            max_y: 1.0,
        });

        assert!(surface.to_html().is_err());
        let err = surface.show().unwrap_err();
        assert!(err.to_string().contains("non-finite"), "{err}");
        assert!(!path.exists());
    }

    #[test]
    fn test_infinite_point_without_view_is_an_error() {
        let mut surface = HtmlSurface::new("unused.html", 400, 400);
        surface.scatter(Series {
            label: "Inside (1)".to_string(),
            points: vec![Point::new(f64::INFINITY, 1.0), Point::new(0.0, 0.0)],
            color: Color::GREEN,
            marker: Marker::Circle,
            size: 50.0,
            edge: None,
            z_order: 5,
        });
        assert!(surface.to_html().is_err());
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&#39;");
    }
}
