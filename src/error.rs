//! Engine error taxonomy.
//!
//! Every public operation returns either a result or one of these variants.
//! Each variant renders a human-readable reason; the CLI maps them to exit
//! codes via [`EngineError::exit_code`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Bad, missing or out-of-range input. Correctable by the caller.
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("UnitPrice {price} exceeds maximum allowed price of {max}")]
    PriceTooHigh { price: f64, max: f64 },

    /// Unknown categorical value.
    #[error("{0}")]
    Encoding(String),

    #[error("Failed to load {artifact} from '{path}': {reason}")]
    ModelLoad {
        artifact: String,
        path: String,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid metric '{0}': expected 'revenue' or 'profit'")]
    InvalidMetric(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    /// File/stdin handling in the CLI front-end.
    #[error("{0}")]
    Io(String),
}

impl EngineError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn model_load(
        artifact: impl Into<String>,
        path: impl std::fmt::Display,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::ModelLoad {
            artifact: artifact.into(),
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Stable machine-readable tag for structured output.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Validation { .. } => "validation_error",
            EngineError::PriceTooHigh { .. } => "price_too_high",
            EngineError::Encoding(_) => "encoding_error",
            EngineError::ModelLoad { .. } => "model_load_error",
            EngineError::Configuration(_) => "configuration_error",
            EngineError::InvalidMetric(_) => "invalid_metric",
            EngineError::Unexpected(_) => "unexpected_error",
            EngineError::Io(_) => "io_error",
        }
    }

    /// Process exit code used by the `pricecast` binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            EngineError::Validation { .. }
            | EngineError::PriceTooHigh { .. }
            | EngineError::Encoding(_)
            | EngineError::InvalidMetric(_)
            | EngineError::Io(_) => 2,
            EngineError::ModelLoad { .. } => 3,
            EngineError::Configuration(_) => 4,
            EngineError::Unexpected(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_field_and_rule() {
        let err = EngineError::validation("Month", "must be between 1 and 12");
        assert_eq!(err.to_string(), "Invalid Month: must be between 1 and 12");
        assert_eq!(err.kind(), "validation_error");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn model_load_names_artifact_and_exits_with_three() {
        let load = EngineError::model_load("regressor", "models/x.json", "missing");
        assert_eq!(load.kind(), "model_load_error");
        assert_eq!(load.exit_code(), 3);
        assert!(load.to_string().contains("models/x.json"));
    }
}
