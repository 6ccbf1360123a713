use thiserror::Error;

/// Structural failure that aborts the whole parse
///
/// Line numbers are 1-based, matching what an editor shows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("malformed or empty report: {lines} line(s), at least 3 required")]
    TooShort { lines: usize },

    #[error("invalid polygon vertex on line {line}: '{content}' ({reason})")]
    InvalidVertex {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("at least 3 polygon points required, found {found} (vertex section ends at line {line})")]
    TooFewVertices { found: usize, line: usize },

    #[error("'Test Points:' section not found (searched from line {line} to end of input)")]
    MissingMarker { line: usize },
}

impl FormatError {
    /// The line the error points at, when there is one
    pub fn line(&self) -> Option<usize> {
        match self {
            FormatError::TooShort { .. } => None,
            FormatError::InvalidVertex { line, .. }
            | FormatError::TooFewVertices { line, .. }
            | FormatError::MissingMarker { line } => Some(*line),
        }
    }
}

/// A test-point record that was dropped because its coordinates did not parse
#[derive(Debug, Clone, PartialEq)]
pub struct RecordWarning {
    /// 1-based line number
    pub line: usize,
    /// Trimmed line content
    pub excerpt: String,
    pub reason: String,
}

impl std::fmt::Display for RecordWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: '{}' - {}", self.line, self.excerpt, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_accessor() {
        assert_eq!(FormatError::TooShort { lines: 1 }.line(), None);
        assert_eq!(FormatError::MissingMarker { line: 7 }.line(), Some(7));
        assert_eq!(
            FormatError::TooFewVertices { found: 2, line: 4 }.line(),
            Some(4)
        );
    }

    #[test]
    fn test_messages_name_the_problem() {
        let err = FormatError::TooFewVertices { found: 2, line: 4 };
        assert!(err.to_string().contains("at least 3 polygon points required"));

        let err = FormatError::InvalidVertex {
            line: 3,
            content: "1 x".to_string(),
            reason: "invalid float literal".to_string(),
        };
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_warning_display() {
        let warning = RecordWarning {
            line: 9,
            excerpt: "abc def => HAYIR".to_string(),
            reason: "invalid float literal".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "line 9: 'abc def => HAYIR' - invalid float literal"
        );
    }
}
