//! Single-line readers for each section of a report

use super::error::{FormatError, RecordWarning};
use crate::domain::{Point, TestPoint};

/// Substring that opens the test-point section
pub const MARKER: &str = "Test Points:";

/// Separator between coordinates and classification on a record line
pub const SEPARATOR: &str = "=>";

/// Classification token meaning "inside"; anything else reads as outside
pub const INSIDE_TOKEN: &str = "EVET";

/// What a vertex line turned into
#[derive(Debug, Clone, PartialEq)]
pub enum VertexOutcome {
    Accepted(Point),
    /// Fewer than two tokens on the line
    Skipped,
}

/// What a test-point line turned into
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Accepted(TestPoint),
    /// Blank, no separator, wrong segment count or missing coordinates
    Skipped,
    /// Coordinates present but not numeric
    Rejected(RecordWarning),
}

/// Read the "count: N" annotation the producer writes into the header
pub fn header_vertex_count(header: &str) -> Option<usize> {
    let (_, rest) = header.split_once("count:")?;
    let digits: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Parse a polygon vertex line; numeric failure is fatal
pub fn parse_vertex_line(line_no: usize, line: &str) -> Result<VertexOutcome, FormatError> {
    let trimmed = line.trim();
    let mut tokens = trimmed.split_whitespace();
    let (Some(x), Some(y)) = (tokens.next(), tokens.next()) else {
        return Ok(VertexOutcome::Skipped);
    };

    let parse = |token: &str| {
        token
            .parse::<f64>()
            .map_err(|e| FormatError::InvalidVertex {
                line: line_no,
                content: trimmed.to_string(),
                reason: format!("'{}': {}", token, e),
            })
    };

    Ok(VertexOutcome::Accepted(Point::new(parse(x)?, parse(y)?)))
}

pub fn is_marker(line: &str) -> bool {
    line.contains(MARKER)
}

/// Parse a `<x> <y> => <TOKEN>` record line
///
/// Never fails: malformed lines are either skipped silently or rejected
/// with a warning the caller collects.
pub fn parse_record_line(line_no: usize, line: &str) -> RecordOutcome {
    let trimmed = line.trim();
    if trimmed.is_empty() || !trimmed.contains(SEPARATOR) {
        return RecordOutcome::Skipped;
    }

    let segments: Vec<&str> = trimmed.split(SEPARATOR).collect();
    let [coords, token] = segments.as_slice() else {
        return RecordOutcome::Skipped;
    };

    let mut tokens = coords.split_whitespace();
    let (Some(x), Some(y)) = (tokens.next(), tokens.next()) else {
        return RecordOutcome::Skipped;
    };

    let point = match (x.parse::<f64>(), y.parse::<f64>()) {
        (Ok(x), Ok(y)) => Point::new(x, y),
        (Err(e), _) | (_, Err(e)) => {
            return RecordOutcome::Rejected(RecordWarning {
                line: line_no,
                excerpt: trimmed.to_string(),
                reason: e.to_string(),
            });
        }
    };

    let inside = token.trim().to_uppercase() == INSIDE_TOKEN;
    RecordOutcome::Accepted(TestPoint::new(point, inside))
}
