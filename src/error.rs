//! Error types for Recovery Flux

use thiserror::Error;

/// Errors that can occur during computation
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Invalid input for `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

impl ComputeError {
    /// Build an `InvalidInput` error for the named field
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ComputeError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending input field, if this error is about one
    pub fn field(&self) -> Option<&str> {
        match self {
            ComputeError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_only_for_input_errors() {
        let err = ComputeError::invalid("wake_count", "required");
        assert_eq!(err.field(), Some("wake_count"));
        assert_eq!(err.to_string(), "Invalid input for `wake_count`: required");

        assert_eq!(ComputeError::ConfigError("bad".to_string()).field(), None);
        assert_eq!(ComputeError::EncodingError("bad".to_string()).field(), None);
    }
}
