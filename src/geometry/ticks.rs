/// Pick a grid step of the form 1, 2 or 5 x 10^n giving roughly `target` ticks over `span`
pub fn nice_step(span: f64, target: usize) -> f64 {
    if !(span.is_finite() && span > 0.0) || target == 0 {
        return 1.0;
    }

    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;

    let nice = if residual < 1.5 {
        1.0
    } else if residual < 3.0 {
        2.0
    } else if residual < 7.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

/// Upper bound on the number of ticks `ticks` will produce
pub const MAX_TICKS: i64 = 1000;

/// Tick positions covering `[min, max]`, aligned to multiples of the step
///
/// Non-finite ranges, and ranges that would need more than [`MAX_TICKS`]
/// ticks, yield no ticks at all.
pub fn ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) {
        return Vec::new();
    }
    let step = nice_step(max - min, target);
    if max <= min {
        return vec![min];
    }

    let first = (min / step).ceil();
    let last = (max / step).floor();
    if !(first.is_finite() && last.is_finite()) || last - first >= MAX_TICKS as f64 {
        return Vec::new();
    }

    let (first, last) = (first as i64, last as i64);
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Format a tick value with just enough decimals for the step
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10() - 1e-9).ceil() as usize
    };
    let rounded = format!("{:.*}", decimals, value);
    // avoid "-0"
    if rounded.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        format!("{:.*}", decimals, 0.0)
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(10.0, 10), 1.0);
        assert_eq!(nice_step(100.0, 10), 10.0);
        assert_eq!(nice_step(20.0, 10), 2.0);
        assert_eq!(nice_step(48.0, 10), 5.0);
        assert!((nice_step(0.5, 5) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_nice_step_degenerate_span() {
        assert_eq!(nice_step(0.0, 10), 1.0);
        assert_eq!(nice_step(f64::NAN, 10), 1.0);
    }

    #[test]
    fn test_ticks_inside_range() {
        let t = ticks(-0.4, 4.4, 5);
        assert_eq!(t.len(), 5);
        for (i, v) in t.iter().enumerate() {
            assert!((v - i as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ticks_non_finite_range_is_empty() {
        assert!(ticks(f64::NEG_INFINITY, 1.0, 8).is_empty());
        assert!(ticks(0.0, f64::INFINITY, 8).is_empty());
        assert!(ticks(f64::NAN, f64::NAN, 8).is_empty());
    }

    #[test]
    fn test_ticks_huge_finite_range_is_bounded() {
        // width overflows to inf, so the step falls back to 1.0
        let t = ticks(-1e308, 1e308, 8);
        assert!(t.len() as i64 <= MAX_TICKS);
    }

    #[test]
    fn test_ticks_flat_range() {
        assert_eq!(ticks(3.0, 3.0, 5), vec![3.0]);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(4.0, 1.0), "4");
        assert_eq!(format_tick(0.30000000000000004, 0.1), "0.3");
        assert_eq!(format_tick(-0.0, 0.5), "0.0");
    }
}
