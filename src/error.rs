//! Error types for wapi

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wapi operations
pub type Result<T> = std::result::Result<T, WapiError>;

/// Main error type for wapi
#[derive(Error, Debug)]
pub enum WapiError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Argument model misuse
    #[error("Argument error: {0}")]
    Argument(#[from] ArgumentError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Line editor errors
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// A submitted line named a command the shell does not know
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to determine a config root (no --root, no WAPI_ROOT, no home directory)")]
    RootNotFound,

    #[error("Module '{0}' is not defined")]
    ModuleNotFound(String),

    #[error("Failed to read '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Argument parser errors
///
/// These are programming errors in how a parser was assembled, never
/// problems with user input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("no positional command argument has been registered")]
    MissingPositional,
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for argument parsing
pub type ArgumentResult<T> = std::result::Result<T, ArgumentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_wraps_into_wapi_error() {
        let err: WapiError = ConfigError::ModuleNotFound("user".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Module 'user' is not defined"
        );
    }

    #[test]
    fn test_argument_error_message() {
        let err: WapiError = ArgumentError::MissingPositional.into();
        assert!(err.to_string().contains("positional"));
    }
}
