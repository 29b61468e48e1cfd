//! Configuration error types.

use thiserror::Error;

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadError {
        /// File path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A config file is not valid TOML or does not match the schema.
    #[error("failed to parse {path}: {source}")]
    ParseError {
        /// File path, or a marker such as `<merged config>`.
        path: String,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range or inconsistent.
    #[error("invalid value for {field}: {message}")]
    ValidationError {
        /// Dotted field path.
        field: String,
        /// What is wrong.
        message: String,
    },

    /// An explicitly requested config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = ConfigError::ValidationError {
            field: "wizard.page_char_limit".into(),
            message: "must be at least 100".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for wizard.page_char_limit: must be at least 100"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigError>();
    }
}
