use std::fmt;
use thiserror::Error;

/// A single field-level problem found while validating a booking draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub reason: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Always holds at least one violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Returns `None` when there is nothing to report.
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    pub fn single(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation failed: {0}")]
    Validation(ValidationError),

    #[error("Field '{field}' is not used by booking type '{booking_type}'")]
    InactiveField { field: String, booking_type: String },

    #[error("Periods cannot be chosen for a multi-day booking")]
    PeriodsDisabled,

    #[error("Invalid period {value}: must be between {min} and {max}")]
    InvalidPeriod { value: u8, min: u8, max: u8 },

    #[error("Invalid calendar slot '{value}': {reason}")]
    InvalidSlot { value: String, reason: String },

    #[error("No booking draft is active")]
    NoActiveDraft,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Usage,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BookingError::Validation(_) | BookingError::InvalidSlot { .. } => ErrorCategory::Input,
            BookingError::InactiveField { .. }
            | BookingError::PeriodsDisabled
            | BookingError::InvalidPeriod { .. }
            | BookingError::NoActiveDraft => ErrorCategory::Usage,
            BookingError::TomlError(_) | BookingError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            BookingError::IoError(_) | BookingError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Usage => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BookingError::Validation(err) => {
                format!("The booking form has {} problem(s): {}", err.violations().len(), err)
            }
            BookingError::InvalidSlot { value, .. } => {
                format!("The selected calendar slot could not be read: {}", value)
            }
            BookingError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            BookingError::TomlError(_) => "The TOML file could not be parsed".to_string(),
            BookingError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Correct the highlighted fields and submit again",
            ErrorCategory::Usage => "Check the booking type and date range before editing this field",
            ErrorCategory::Configuration => "Check the configuration file syntax and values",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        BookingError::Validation(err)
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_violation_list_is_not_an_error() {
        assert!(ValidationError::from_violations(Vec::new()).is_none());
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let err = ValidationError::from_violations(vec![
            Violation::new("course", "required"),
            Violation::new("phoneNumber", "must be 9-10 digits"),
        ])
        .unwrap();

        assert!(err.has_field("course"));
        assert!(!err.has_field("topic"));
        assert_eq!(err.to_string(), "course: required; phoneNumber: must be 9-10 digits");
    }

    #[test]
    fn test_severity_follows_category() {
        let err = BookingError::PeriodsDisabled;
        assert_eq!(err.category(), ErrorCategory::Usage);
        assert_eq!(err.severity(), ErrorSeverity::Low);

        let err = BookingError::InvalidConfigValueError {
            field: "schedule.day_start".to_string(),
            value: "8.30".to_string(),
            reason: "expected HH:MM".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
