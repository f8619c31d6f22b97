//! Advisory error taxonomy

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisoryError {
    /// One of the five required inputs is absent
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A value could not be converted for its field
    #[error("Invalid input values: {field} cannot use value {value}")]
    InvalidInput { field: String, value: String },

    /// Model artifact could not be loaded (fatal at startup)
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Vector shape disagrees with the trained feature schema (fatal)
    #[error("Feature schema mismatch: model expects {expected} features {detail}")]
    SchemaMismatch { expected: usize, detail: String },

    /// Unanticipated failure inside the pipeline
    #[error("Internal prediction error: {0}")]
    Internal(String),
}

impl AdvisoryError {
    /// Validation failures are reported verbatim to the caller
    pub fn is_validation(&self) -> bool {
        matches!(self, AdvisoryError::MissingField(_) | AdvisoryError::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let missing = AdvisoryError::MissingField("attendance");
        assert_eq!(missing.to_string(), "Missing required field: attendance");

        let invalid = AdvisoryError::InvalidInput {
            field: "study_hours".to_string(),
            value: "\"abc\"".to_string(),
        };
        assert!(invalid.to_string().contains("study_hours"));
        assert!(invalid.to_string().contains("abc"));
    }

    #[test]
    fn test_validation_kinds() {
        assert!(AdvisoryError::MissingField("internet").is_validation());
        assert!(!AdvisoryError::Internal("boom".into()).is_validation());
        assert!(!AdvisoryError::ModelUnavailable("gone".into()).is_validation());
    }
}
