use crate::utils::error::{BookingError, Result, Violation};
use regex::Regex;
use std::sync::LazyLock;

static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{9,10}$").expect("phone number pattern is valid"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn is_valid_phone_number(value: &str) -> bool {
    PHONE_NUMBER.is_match(value)
}

// Draft checks: report a violation instead of failing fast so the form can
// show every problem at once.

pub fn check_required_text(field_name: &str, value: &str) -> Option<Violation> {
    if value.trim().is_empty() {
        Some(Violation::new(field_name, "must not be blank"))
    } else {
        None
    }
}

pub fn check_phone_number(field_name: &str, value: &str) -> Option<Violation> {
    if is_valid_phone_number(value) {
        None
    } else {
        Some(Violation::new(field_name, "must be 9 to 10 digits"))
    }
}

pub fn check_at_least(field_name: &str, value: u32, min_value: u32) -> Option<Violation> {
    if value < min_value {
        Some(Violation::new(
            field_name,
            format!("must be at least {}", min_value),
        ))
    } else {
        None
    }
}

// Configuration checks: fail on the first problem.

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number_pattern() {
        assert!(is_valid_phone_number("0812345678"));
        assert!(is_valid_phone_number("021234567"));
        assert!(!is_valid_phone_number("12345"));
        assert!(!is_valid_phone_number("08123456789"));
        assert!(!is_valid_phone_number("081-234-5678"));
        assert!(!is_valid_phone_number(""));
    }

    #[test]
    fn test_check_required_text() {
        assert!(check_required_text("topic", "สัมมนา").is_none());
        assert_eq!(
            check_required_text("topic", "   "),
            Some(Violation::new("topic", "must not be blank"))
        );
        assert_eq!(
            check_required_text("course", "").map(|v| v.reason),
            Some("must not be blank".to_string())
        );
    }

    #[test]
    fn test_check_at_least() {
        assert!(check_at_least("attendees", 1, 1).is_none());
        assert!(check_at_least("attendees", 0, 1).is_some());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("schedule.period_minutes", 60, 15, 240).is_ok());
        assert!(validate_range("schedule.period_minutes", 5, 15, 240).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("submission.output_path", "./bookings").is_ok());
        assert!(validate_path("submission.output_path", "").is_err());
    }
}
