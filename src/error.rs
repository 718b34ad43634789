//! Error types for analytics and capacity-planning operations

use thiserror::Error;

/// Result type for analytics operations
pub type AnalyticsResult<T> = std::result::Result<T, AnalyticsError>;

/// Errors that can occur in analytics operations
///
/// Degenerate numeric inputs (zero traffic, an unstable queue, ...) are not
/// errors: the solvers answer those with documented sentinel values. This type
/// only covers malformed requests that a caller has to fix.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// One or more validation rules failed; every message is kept
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Insufficient data for analysis
    #[error("Insufficient data for analysis: {0}")]
    InsufficientData(String),

    /// Input contains values the calculation cannot use
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AnalyticsError {
    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AnalyticsError::Validation(_) => "VALIDATION_ERROR",
            AnalyticsError::InsufficientData(_) => "INSUFFICIENT_DATA",
            AnalyticsError::InvalidInput(_) => "INVALID_INPUT",
            AnalyticsError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// All human-readable messages carried by this error
    pub fn messages(&self) -> Vec<String> {
        match self {
            AnalyticsError::Validation(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for AnalyticsError {
    fn from(err: config::ConfigError) -> Self {
        AnalyticsError::Configuration(err.to_string())
    }
}

/// Conversion from toml::de::Error
impl From<toml::de::Error> for AnalyticsError {
    fn from(err: toml::de::Error) -> Self {
        AnalyticsError::Configuration(err.to_string())
    }
}

/// Conversion from validator::ValidationErrors
impl From<validator::ValidationErrors> for AnalyticsError {
    fn from(err: validator::ValidationErrors) -> Self {
        AnalyticsError::Validation(validation_messages(&err))
    }
}

/// Flatten validator field errors into `field: message` strings, sorted by field
pub(crate) fn validation_messages(err: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<(String, String)> = Vec::new();

    for (field, errors) in err.field_errors() {
        for error in errors.iter() {
            let message = match &error.message {
                Some(message) => message.to_string(),
                None => format!("failed `{}` check", error.code),
            };
            fields.push((field.to_string(), message));
        }
    }

    fields.sort();
    fields
        .into_iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AnalyticsError::Validation(vec![]).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AnalyticsError::InsufficientData("x".to_string()).error_code(),
            "INSUFFICIENT_DATA"
        );
        assert_eq!(
            AnalyticsError::Configuration("x".to_string()).error_code(),
            "CONFIGURATION_ERROR"
        );
    }

    #[test]
    fn test_validation_display_joins_messages() {
        let err = AnalyticsError::Validation(vec![
            "AHT must be greater than 0".to_string(),
            "SLA target must be greater than 0 and at most 1".to_string(),
        ]);

        let text = err.to_string();
        assert!(text.contains("AHT must be greater than 0"));
        assert!(text.contains("; SLA target"));
        assert_eq!(err.messages().len(), 2);
    }

    #[test]
    fn test_messages_for_single_error() {
        let err = AnalyticsError::InvalidInput("NaN at index 3".to_string());
        assert_eq!(err.messages(), vec!["Invalid input: NaN at index 3".to_string()]);
    }
}
