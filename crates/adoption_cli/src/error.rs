//! Error types for the adoption CLI.

use adoption_engine::EngineError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Run configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Simulation failed
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialisation error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use adoption_models::scenarios::ScenarioError;

    #[test]
    fn test_error_display() {
        let err = CliError::InvalidArgument("format 'xml'".to_string());
        assert_eq!(err.to_string(), "Invalid argument: format 'xml'");
    }

    #[test]
    fn test_engine_error_conversion() {
        let engine: EngineError = ScenarioError::UnknownScenario("boom".to_string()).into();
        let err: CliError = engine.into();
        assert!(matches!(err, CliError::Engine(_)));
        assert!(err.to_string().contains("boom"));
    }
}
