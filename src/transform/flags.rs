//! Reference-range flagging shared by vitals and labs.
//!
//! A total function: every (value, range) pair yields exactly one of
//! normal/low/high. `critical` is never derived here — it only enters a
//! record when set explicitly upstream.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Flag;

static BOUNDED_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*-\s*(\d+(?:\.\d+)?)\s*$").expect("valid range pattern")
});

static LOWER_BOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*>\s*(\d+(?:\.\d+)?)\s*$").expect("valid lower-bound pattern")
});

static UPPER_BOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*<\s*(\d+(?:\.\d+)?)\s*$").expect("valid upper-bound pattern")
});

/// Classify a measured value against its reference-range string.
///
/// Range shapes: `"min-max"`, `">N"` (value must exceed N), `"<N"` (value
/// must stay under N). A missing/`"N/A"` range or a non-numeric value is
/// unclassifiable and reads as normal.
pub fn flag_for(value: &str, reference_range: &str) -> Flag {
    let Ok(value) = value.trim().parse::<f64>() else {
        return Flag::Normal;
    };
    let range = reference_range.trim();
    if range.is_empty() || range.eq_ignore_ascii_case("n/a") {
        return Flag::Normal;
    }

    if let Some(caps) = BOUNDED_RANGE.captures(range) {
        let min: f64 = caps[1].parse().unwrap_or(f64::NEG_INFINITY);
        let max: f64 = caps[2].parse().unwrap_or(f64::INFINITY);
        if value < min {
            return Flag::Low;
        }
        if value > max {
            return Flag::High;
        }
        return Flag::Normal;
    }

    if let Some(caps) = LOWER_BOUND.captures(range) {
        let bound: f64 = caps[1].parse().unwrap_or(f64::NEG_INFINITY);
        if value <= bound {
            return Flag::Low;
        }
        return Flag::Normal;
    }

    if let Some(caps) = UPPER_BOUND.captures(range) {
        let bound: f64 = caps[1].parse().unwrap_or(f64::INFINITY);
        if value >= bound {
            return Flag::High;
        }
        return Flag::Normal;
    }

    Flag::Normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_range_boundaries() {
        // 60-100: exactly on a bound is normal, just outside is not.
        assert_eq!(flag_for("60", "60-100"), Flag::Normal);
        assert_eq!(flag_for("100", "60-100"), Flag::Normal);
        assert_eq!(flag_for("59.9", "60-100"), Flag::Low);
        assert_eq!(flag_for("100.1", "60-100"), Flag::High);
        assert_eq!(flag_for("78", "60-100"), Flag::Normal);
    }

    #[test]
    fn bounded_range_with_decimals() {
        assert_eq!(flag_for("36.8", "36.1-37.2"), Flag::Normal);
        assert_eq!(flag_for("4.2", "0.7-1.3"), Flag::High);
        assert_eq!(flag_for("10.2", "12.0-15.5"), Flag::Low);
    }

    #[test]
    fn lower_bound_range() {
        // ">60": the value must exceed 60; exactly 60 reads low.
        assert_eq!(flag_for("61", ">60"), Flag::Normal);
        assert_eq!(flag_for("60", ">60"), Flag::Low);
        assert_eq!(flag_for("18", ">60"), Flag::Low);
    }

    #[test]
    fn upper_bound_range() {
        // "<5": the value must stay under 5; exactly 5 reads high.
        assert_eq!(flag_for("4.9", "<5"), Flag::Normal);
        assert_eq!(flag_for("5", "<5"), Flag::High);
        assert_eq!(flag_for("7.2", "<5"), Flag::High);
    }

    #[test]
    fn missing_range_is_normal() {
        assert_eq!(flag_for("72.5", "N/A"), Flag::Normal);
        assert_eq!(flag_for("72.5", "n/a"), Flag::Normal);
        assert_eq!(flag_for("72.5", ""), Flag::Normal);
        assert_eq!(flag_for("72.5", "   "), Flag::Normal);
    }

    #[test]
    fn non_numeric_value_is_normal() {
        assert_eq!(flag_for("positive", "0.7-1.3"), Flag::Normal);
        assert_eq!(flag_for("", "60-100"), Flag::Normal);
        assert_eq!(flag_for("trace", ">60"), Flag::Normal);
    }

    #[test]
    fn malformed_range_is_normal() {
        assert_eq!(flag_for("42", "sixty to one hundred"), Flag::Normal);
        assert_eq!(flag_for("42", "60-"), Flag::Normal);
        assert_eq!(flag_for("42", ">="), Flag::Normal);
    }

    #[test]
    fn whitespace_tolerated() {
        assert_eq!(flag_for(" 78 ", " 60 - 100 "), Flag::Normal);
        assert_eq!(flag_for("18", " > 60 "), Flag::Low);
    }

    #[test]
    fn never_derives_critical() {
        for (value, range) in [
            ("9999", "60-100"),
            ("0", "60-100"),
            ("0", ">60"),
            ("9999", "<5"),
        ] {
            assert_ne!(flag_for(value, range), Flag::Critical);
        }
    }
}
