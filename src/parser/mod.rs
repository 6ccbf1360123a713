//! Reader for point-in-polygon result reports
//!
//! A report looks like:
//!
//! ```text
//! Polygon Points (count: 3):
//! 0.00 0.00
//! 4.00 0.00
//! 4.00 4.00
//!
//! Test Points:
//! 2.00 1.00 => EVET
//! 9.00 9.00 => HAYIR
//! ```
//!
//! The polygon section is all-or-nothing: any broken vertex aborts the
//! parse. Test-point records are independent, so a bad one is dropped and
//! reported as a [`RecordWarning`] while the rest are still read.

pub mod error;
pub mod line;

pub use error::{FormatError, RecordWarning};
pub use line::{INSIDE_TOKEN, MARKER, RecordOutcome, VertexOutcome};

use crate::domain::{ParsedReport, Point, Polygon};
use line::{header_vertex_count, is_marker, parse_record_line, parse_vertex_line};

/// Minimum number of lines a report can have
pub const MIN_LINES: usize = 3;

/// Where the reader is in the report
enum Section {
    Header,
    Vertices(Vec<Point>),
    /// Polygon is complete; `from` is the index the marker search started at
    SeekMarker { polygon: Polygon, from: usize },
    Records(Polygon),
    Done(Polygon),
}

/// Parse report text, printing a warning for each dropped record
pub fn parse(text: &str) -> Result<ParsedReport, FormatError> {
    let lines: Vec<&str> = text.lines().collect();
    parse_lines(&lines)
}

/// Parse pre-split lines, printing a warning for each dropped record
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<ParsedReport, FormatError> {
    let (report, warnings) = parse_with_warnings(lines)?;
    for warning in &warnings {
        eprintln!("Warning: error reading {}", warning);
    }
    Ok(report)
}

/// Parse pre-split lines and hand back dropped records instead of printing them
///
/// # Algorithm
/// 1. Skip the header (but note any "count: N" it carries)
/// 2. Read vertices until the first blank line or end of input
/// 3. Close the ring, failing if fewer than 3 vertices were read
/// 4. Skip forward to the line containing "Test Points:"
/// 5. Read every remaining line as a record, dropping malformed ones
pub fn parse_with_warnings<S: AsRef<str>>(
    lines: &[S],
) -> Result<(ParsedReport, Vec<RecordWarning>), FormatError> {
    if lines.len() < MIN_LINES {
        return Err(FormatError::TooShort { lines: lines.len() });
    }

    let mut declared_vertex_count = None;
    let mut test_points = Vec::new();
    let mut warnings = Vec::new();
    let mut cursor = 0;
    let mut section = Section::Header;

    let polygon = loop {
        section = match section {
            Section::Header => {
                declared_vertex_count = header_vertex_count(lines[0].as_ref());
                cursor = 1;
                Section::Vertices(Vec::new())
            }
            Section::Vertices(mut vertices) => match lines.get(cursor).map(|l| l.as_ref()) {
                Some(line) if !line.trim().is_empty() => {
                    if let VertexOutcome::Accepted(point) = parse_vertex_line(cursor + 1, line)? {
                        vertices.push(point);
                    }
                    cursor += 1;
                    Section::Vertices(vertices)
                }
                _ => {
                    let found = vertices.len();
                    let polygon = Polygon::close(vertices)
                        .ok_or(FormatError::TooFewVertices { found, line: cursor })?;
                    Section::SeekMarker {
                        polygon,
                        from: cursor,
                    }
                }
            },
            Section::SeekMarker { polygon, from } => match lines.get(cursor).map(|l| l.as_ref()) {
                Some(line) if is_marker(line) => {
                    cursor += 1;
                    Section::Records(polygon)
                }
                Some(_) => {
                    cursor += 1;
                    Section::SeekMarker { polygon, from }
                }
                None => {
                    return Err(FormatError::MissingMarker {
                        line: (from + 1).min(lines.len()),
                    });
                }
            },
            Section::Records(polygon) => match lines.get(cursor).map(|l| l.as_ref()) {
                Some(line) => {
                    match parse_record_line(cursor + 1, line) {
                        RecordOutcome::Accepted(test_point) => test_points.push(test_point),
                        RecordOutcome::Rejected(warning) => warnings.push(warning),
                        RecordOutcome::Skipped => {}
                    }
                    cursor += 1;
                    Section::Records(polygon)
                }
                None => Section::Done(polygon),
            },
            Section::Done(polygon) => break polygon,
        };
    };

    let mut report = ParsedReport::new(polygon, test_points);
    report.declared_vertex_count = declared_vertex_count;
    Ok((report, warnings))
}
