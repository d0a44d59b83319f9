//! Input validation and normalisation utilities
//!
//! Account fields are normalised before they are stored: names are
//! title-cased, the domain part of an email address is lower-cased, and
//! phone numbers are checked against the configured pattern.
//!
//! # Usage
//!
//! ```rust
//! use grading_system::utils::validation::{normalize_email, title_case};
//!
//! assert_eq!(title_case("juan dela cruz"), "Juan Dela Cruz");
//! assert_eq!(normalize_email("Juan@Example.EDU"), "Juan@example.edu");
//! ```

use regex::Regex;
use thiserror::Error;

/// Validation errors that can occur during input validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field value is too long
    #[error("Field '{field}' must be at most {max} characters long (got {actual})")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    /// Field value doesn't match required pattern
    #[error("Field '{field}' has invalid format{hint}")]
    InvalidFormat { field: String, hint: String },
}

impl ValidationError {
    pub fn invalid_format<F: Into<String>>(field: F) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            hint: String::new(),
        }
    }

    pub fn invalid_format_with_hint<F: Into<String>, H: AsRef<str>>(field: F, hint: H) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            hint: format!(" ({})", hint.as_ref()),
        }
    }
}

/// Capitalise the first letter of every word and lower-case the rest.
///
/// A word starts after any non-alphabetic character, so `o'neil` becomes
/// `O'Neil` and `mary-ann` becomes `Mary-Ann`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_cased = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if previous_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_cased = true;
        } else {
            out.push(ch);
            previous_cased = false;
        }
    }
    out
}

/// Lower-case the domain part of an email address, keeping the local part as given
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Minimal structural check: one `@` with non-empty local and domain parts,
/// and a dot somewhere in the domain
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::invalid_format("email"));
    };
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || email.chars().any(char::is_whitespace)
    {
        return Err(ValidationError::invalid_format("email"));
    }
    Ok(())
}

pub fn validate_max_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
            actual,
        });
    }
    Ok(())
}

/// Phone numbers are optional; a non-empty value must match `pattern`
pub fn validate_phone_number(phone: &str, pattern: &Regex) -> Result<(), ValidationError> {
    if phone.is_empty() || pattern.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::invalid_format_with_hint(
            "phone_number",
            "Format: +63-999-9999-999",
        ))
    }
}

/// Returns the trimmed value when present and not blank
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("juan", "Juan")]
    #[case("DELA CRUZ", "Dela Cruz")]
    #[case("o'neil", "O'Neil")]
    #[case("mary-ann", "Mary-Ann")]
    #[case("", "")]
    #[case("ñino", "Ñino")]
    fn title_cases_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(title_case(input), expected);
    }

    #[test]
    fn email_domain_is_lowercased() {
        assert_eq!(normalize_email(" Juan.Cruz@UP.EDU.PH "), "Juan.Cruz@up.edu.ph");
        assert_eq!(normalize_email("no-at-sign"), "no-at-sign");
    }

    #[rstest]
    #[case("juan@example.edu", true)]
    #[case("juan@example", false)]
    #[case("@example.edu", false)]
    #[case("juan@@example.edu", false)]
    #[case("juan example@edu.ph", false)]
    #[case("juan", false)]
    fn email_structure(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(validate_email(email).is_ok(), valid);
    }

    #[test]
    fn phone_number_pattern() {
        let pattern = Regex::new(crate::config::defaults::DEFAULT_PHONE_PATTERN).unwrap();
        assert!(validate_phone_number("", &pattern).is_ok());
        assert!(validate_phone_number("+63-917-1234-567", &pattern).is_ok());
        assert!(validate_phone_number("09171234567", &pattern).is_err());
        assert!(validate_phone_number("+63-917-1234-5678", &pattern).is_err());
    }

    #[test]
    fn length_limits_count_characters() {
        assert!(validate_max_length("username", &"a".repeat(25), 25).is_ok());
        let err = validate_max_length("username", &"a".repeat(26), 25).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLong {
                field: "username".to_string(),
                max: 25,
                actual: 26
            }
        );
    }

    #[test]
    fn blank_values_are_missing() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" x ")), Some("x"));
    }
}
