use std::io::{self, Write};

use crate::domain::TestPoint;

const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

/// Print every test point with its classification, in file order
pub fn write_summary<W: Write>(out: &mut W, test_points: &[TestPoint], color: bool) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Test Point Results ---")?;
    for tp in test_points {
        let line = format!("{} => {}", tp.point, tp.label());
        if color {
            let code = if tp.inside { GREEN } else { RED };
            writeln!(out, "{}{}{}", code, line, RESET)?;
        } else {
            writeln!(out, "{}", line)?;
        }
    }
    writeln!(out, "--------------------------")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;

    fn sample() -> Vec<TestPoint> {
        vec![
            TestPoint::new(Point::new(2.0, 1.0), true),
            TestPoint::new(Point::new(9.125, -3.0), false),
        ]
    }

    #[test]
    fn test_plain_summary() {
        let mut out = Vec::new();
        write_summary(&mut out, &sample(), false).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().filter(|l| l.contains("=>")).collect();
        assert_eq!(lines, vec!["(2.00, 1.00) => INSIDE", "(9.13, -3.00) => OUTSIDE"]);
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_colored_summary() {
        let mut out = Vec::new();
        write_summary(&mut out, &sample(), true).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("\x1b[92m(2.00, 1.00) => INSIDE\x1b[0m"));
        assert!(text.contains("\x1b[91m(9.13, -3.00) => OUTSIDE\x1b[0m"));
    }
}
