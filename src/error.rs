//! Crate-level error type

use crate::config::ValidationError;
use crate::train::TrainError;
use crate::tune::ScaleError;

/// Errors surfaced by the autobatch entry points
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid config: {0}")]
    Validation(#[from] ValidationError),

    #[error("Batch size scaling failed: {0}")]
    Scale(#[from] ScaleError),

    #[error("Training failed: {0}")]
    Train(#[from] TrainError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for autobatch operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ConfigError("missing field".to_string());
        assert!(err.to_string().contains("missing field"));

        let err = Error::from(ValidationError::InvalidEpochs(0));
        assert!(err.to_string().starts_with("Invalid config"));

        let err = Error::from(ScaleError::Configuration("no batch_size".to_string()));
        assert!(err.to_string().contains("no batch_size"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
