pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-2..=1e4).contains(&magnitude) {
        // Format in scientific notation with 4 significant digits
        format!("{:.4e}", value)
    } else {
        // Format with up to 4 decimal places, removing trailing zeros
        let s = format!("{:.4}", value)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string();
        if s == "-0" { "0".to_string() } else { s }
    }
}

/// Formats a pair as `(a, b)` using [`format_number`]
pub fn format_pair(pair: (f64, f64)) -> String {
    format!("({}, {})", format_number(pair.0), format_number(pair.1))
}

pub fn assert_equal(left: f64, right: f64) {
    let max = left.abs().max(right.abs());
    if max < f64::EPSILON {
        // If both values are close to zero, we consider them equal
        return;
    }
    let rel_diff = (left - right).abs() / max;
    assert!(
        rel_diff < 1e-9,
        "Assertion failed: left ({}) and right ({}) are not approximately equal. Relative difference: {}",
        left,
        right,
        rel_diff
    );
}

pub fn assert_close(left: f64, right: f64, abs_tol: f64) {
    let abs_diff = (left - right).abs();
    assert!(
        abs_diff <= abs_tol,
        "Assertion failed: left ({}) and right ({}) differ by {}, more than {}",
        left,
        right,
        abs_diff,
        abs_tol,
    );
}

pub fn assert_pair_close(left: (f64, f64), right: (f64, f64), abs_tol: f64) {
    assert_close(left.0, right.0, abs_tol);
    assert_close(left.1, right.1, abs_tol);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(19.62), "19.62");
        assert_eq!(format_number(4.905), "4.905");
        assert_eq!(format_number(-1.5), "-1.5");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(6.0e-17), "6.0000e-17");
    }

    #[test]
    fn test_format_pair() {
        assert_eq!(format_pair((14.715, 0.0)), "(14.715, 0)");
    }

    #[test]
    fn test_assert_close_passes() {
        assert_close(1.0, 1.0 + 1e-12, 1e-9);
        assert_pair_close((0.0, 0.5), (1e-16, 0.5), 1e-9);
    }

    #[test]
    #[should_panic]
    fn test_assert_close_fails() {
        assert_close(1.0, 1.1, 1e-9);
    }
}
