//! Semester GPA arithmetic
//!
//! The GPA is a unit-weighted mean computed in two passes over the semester's
//! subject grades. Subjects whose code matches the exclusion pattern (by
//! default `^NSTP|PHED`: codes starting with NSTP, or containing PHED
//! anywhere) take no part in either pass.
//!
//! 1. Total units: every remaining entry whose grade is not exactly one of the
//!    configured markers (`P`, `W`, `D`, `NOT S`, `INC`, empty).
//! 2. Raw sum: `grade * units` for every remaining entry whose grade parses as
//!    a finite number.
//!
//! An entry with an unrecognised grade such as `ABC` therefore counts towards
//! the units without adding to the sum. When the total is zero the result is
//! the empty string. Otherwise the mean is rounded to the configured number of
//! decimal places and rendered with at least one fractional digit (`2.0`,
//! `1.5`, `1.25`).

use regex::Regex;
use std::collections::HashSet;

use crate::config::GradingConfig;
use crate::errors::{AppError, AppResult};
use crate::models::GradeEntry;

#[derive(Debug, Clone)]
pub struct GpaCalculator {
    excluded_subjects: Regex,
    non_gradable_marks: HashSet<String>,
    decimal_places: u32,
}

impl GpaCalculator {
    pub fn new(config: &GradingConfig) -> AppResult<Self> {
        let excluded_subjects = Regex::new(&config.excluded_subject_pattern).map_err(|e| {
            AppError::configuration(format!("Invalid excluded_subject_pattern: {e}"))
        })?;
        let non_gradable_marks = config.non_gradable_marks.iter().cloned().collect();
        Ok(Self {
            excluded_subjects,
            non_gradable_marks,
            decimal_places: config.decimal_places,
        })
    }

    pub fn is_excluded_subject(&self, subject_code: &str) -> bool {
        self.excluded_subjects.is_match(subject_code)
    }

    /// Exact, case-sensitive match against the configured markers
    pub fn is_non_gradable_mark(&self, final_grade: &str) -> bool {
        self.non_gradable_marks.contains(final_grade)
    }

    /// The numeric value of a grade, or `None` when it does not parse
    pub fn numeric_grade(&self, final_grade: &str) -> Option<f64> {
        final_grade
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|g| g.is_finite())
    }

    /// Unit-weighted mean, unrounded. `None` when no units count.
    pub fn weighted_average(&self, entries: &[GradeEntry]) -> Option<f64> {
        let graded: Vec<&GradeEntry> = entries
            .iter()
            .filter(|entry| !self.is_excluded_subject(&entry.subject_code))
            .collect();

        let total_units: i64 = graded
            .iter()
            .filter(|entry| !self.is_non_gradable_mark(&entry.final_grade))
            .map(|entry| i64::from(entry.units))
            .sum();
        if total_units == 0 {
            return None;
        }

        let raw_sum: f64 = graded
            .iter()
            .filter_map(|entry| {
                self.numeric_grade(&entry.final_grade)
                    .map(|grade| grade * f64::from(entry.units))
            })
            .sum();

        Some(raw_sum / total_units as f64)
    }

    /// The rendered GPA, or `""` when nothing is gradable
    pub fn compute(&self, entries: &[GradeEntry]) -> String {
        match self.weighted_average(entries) {
            Some(average) => format_grade(round_to(average, self.decimal_places)),
            None => String::new(),
        }
    }
}

/// Round to `places` decimals, ties to even on the exact binary value
pub fn round_to(value: f64, places: u32) -> f64 {
    let rendered = format!("{:.*}", places as usize, value);
    rendered.parse().unwrap_or(value)
}

/// Shortest representation, always with a fractional part
pub fn format_grade(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn calculator() -> GpaCalculator {
        GpaCalculator::new(&GradingConfig::default()).unwrap()
    }

    fn entry(code: &str, units: i32, grade: &str) -> GradeEntry {
        GradeEntry::new(code, units, grade)
    }

    #[rstest]
    #[case(vec![entry("MATH 11", 3, "1.0"), entry("ENG 1", 3, "2.0")], "1.5")]
    #[case(vec![entry("MATH 11", 3, "1.25"), entry("HIST 1", 2, "2.75")], "1.85")]
    #[case(vec![entry("A", 3, "1.0"), entry("B", 3, "2.0"), entry("C", 3, "2.0")], "1.67")]
    #[case(vec![entry("MATH 11", 3, "2.0")], "2.0")]
    #[case(vec![entry("MATH 11", 3, "1.0"), entry("NSTP 1", 3, "5.0")], "1.0")]
    #[case(vec![entry("MATH 11", 3, "1.0"), entry("PHED 101", 2, "5.0")], "1.0")]
    #[case(vec![entry("MATH 11", 3, "1.0"), entry("ADV-PHED", 2, "5.0")], "1.0")]
    #[case(vec![entry("MATH 11", 3, "1.0"), entry("CWTS-NSTP", 3, "3.0")], "2.0")]
    #[case(vec![entry("MATH 11", 3, "1.5"), entry("ENG 1", 3, "INC")], "1.5")]
    #[case(vec![entry("MATH 11", 3, "1.5"), entry("ENG 1", 3, "NOT S")], "1.5")]
    #[case(vec![entry("MATH 11", 3, "1.5"), entry("ENG 1", 3, "")], "1.5")]
    #[case(vec![entry("MATH 11", 3, "1.5"), entry("ENG 1", 3, "P"), entry("FIL 1", 3, "W"), entry("SCI 1", 3, "D")], "1.5")]
    #[case(vec![entry("MATH 11", 3, "1.0"), entry("ENG 1", 3, "ABC")], "0.5")]
    #[case(vec![entry("MATH 11", 3, "1.0"), entry("ENG 1", 3, "inc")], "0.5")]
    #[case(vec![entry("ENG 1", 3, "ABC")], "0.0")]
    #[case(vec![entry("MATH 11", 3, "1.0"), entry("ENG 1", 3, "1.25")], "1.12")]
    #[case(vec![entry("MATH 11", 3, "1.25"), entry("ENG 1", 3, "1.5")], "1.38")]
    fn computes_weighted_gpa(#[case] entries: Vec<GradeEntry>, #[case] expected: &str) {
        assert_eq!(calculator().compute(&entries), expected);
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![entry("ENG 1", 3, "INC"), entry("MATH 11", 3, "W")])]
    #[case(vec![entry("NSTP 1", 3, "1.0"), entry("PHED 1", 2, "1.0")])]
    fn no_gradable_units_gives_empty_string(#[case] entries: Vec<GradeEntry>) {
        assert_eq!(calculator().compute(&entries), "");
        assert_eq!(calculator().weighted_average(&entries), None);
    }

    #[test]
    fn markers_match_exactly() {
        let calc = calculator();
        assert!(calc.is_non_gradable_mark("INC"));
        assert!(calc.is_non_gradable_mark("NOT S"));
        assert!(calc.is_non_gradable_mark(""));
        assert!(!calc.is_non_gradable_mark(" inc "));
        assert!(!calc.is_non_gradable_mark("not s"));
        assert_eq!(calc.numeric_grade(" 1.75 "), Some(1.75));
        assert_eq!(calc.numeric_grade("INC"), None);
        assert_eq!(calc.numeric_grade("inf"), None);
        assert_eq!(calc.numeric_grade("NaN"), None);
    }

    #[test]
    fn exclusion_pattern_is_anchored_only_for_nstp() {
        let calc = calculator();
        assert!(calc.is_excluded_subject("NSTP 2"));
        assert!(!calc.is_excluded_subject("CWTS NSTP"));
        assert!(calc.is_excluded_subject("PHED 4"));
        assert!(calc.is_excluded_subject("INTRO PHED"));
        assert!(!calc.is_excluded_subject("MATH 17"));
    }

    #[test]
    fn decimal_places_follow_config() {
        let config = GradingConfig {
            decimal_places: 3,
            ..GradingConfig::default()
        };
        let calc = GpaCalculator::new(&config).unwrap();
        let entries = vec![entry("A", 3, "1.0"), entry("B", 3, "2.0"), entry("C", 3, "2.0")];
        assert_eq!(calc.compute(&entries), "1.667");
    }

    #[test]
    fn invalid_pattern_is_a_configuration_error() {
        let config = GradingConfig {
            excluded_subject_pattern: "[".to_string(),
            ..GradingConfig::default()
        };
        assert!(matches!(
            GpaCalculator::new(&config),
            Err(AppError::Configuration { .. })
        ));
    }

    #[rstest]
    #[case(2.0, "2.0")]
    #[case(1.5, "1.5")]
    #[case(1.25, "1.25")]
    #[case(3.0, "3.0")]
    fn formats_like_a_float_literal(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_grade(value), expected);
    }

    #[test]
    fn rounding_keeps_requested_precision() {
        assert_eq!(round_to(1.666_666, 2), 1.67);
        assert_eq!(round_to(1.234_4, 2), 1.23);
        assert_eq!(round_to(2.0, 2), 2.0);
    }

    #[rstest]
    #[case(1.125, "1.12")]
    #[case(1.375, "1.38")]
    #[case(2.625, "2.62")]
    #[case(0.5, "0.5")]
    fn halfway_values_round_to_even(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_grade(round_to(value, 2)), expected);
    }
}
