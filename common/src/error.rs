//! Error handling for the rddsort-common crate.

use thiserror::Error;

/// Common error type that abstracts over underlying library errors.
///
/// Each variant carries a human-readable message and an optional source
/// error so that callers can keep the full chain when reporting.
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Storage operation failed: {message}")]
    StorageError {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Invalid configuration: {message}")]
    ConfigurationError {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("IO operation failed: {message}")]
    IoError {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

/// Result type alias for common operations.
pub type Result<T> = std::result::Result<T, CommonError>;

impl CommonError {
    /// Create a storage error with a custom message.
    pub fn storage_error<S: Into<String>>(message: S) -> Self {
        Self::StorageError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error with a custom message and source error.
    pub fn storage_error_with_source<S: Into<String>, E: Into<anyhow::Error>>(
        message: S,
        source: E,
    ) -> Self {
        Self::StorageError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a configuration error with a custom message.
    pub fn configuration_error<S: Into<String>>(message: S) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with a custom message and source error.
    pub fn configuration_error_with_source<S: Into<String>, E: Into<anyhow::Error>>(
        message: S,
        source: E,
    ) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an IO error with a custom message.
    pub fn io_error<S: Into<String>>(message: S) -> Self {
        Self::IoError {
            message: message.into(),
            source: None,
        }
    }

    /// Create an IO error with a custom message and source error.
    pub fn io_error_with_source<S: Into<String>, E: Into<anyhow::Error>>(
        message: S,
        source: E,
    ) -> Self {
        Self::IoError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an internal error with a custom message.
    pub fn internal_error<S: Into<String>>(message: S) -> Self {
        Self::InternalError {
            message: message.into(),
            source: None,
        }
    }

    /// Returns the message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::StorageError { message, .. }
            | Self::ConfigurationError { message, .. }
            | Self::IoError { message, .. }
            | Self::InternalError { message, .. } => message,
        }
    }
}

impl From<std::io::Error> for CommonError {
    fn from(err: std::io::Error) -> Self {
        Self::io_error_with_source(err.to_string(), err)
    }
}

impl From<object_store::Error> for CommonError {
    fn from(err: object_store::Error) -> Self {
        Self::storage_error_with_source(format!("Object store operation failed: {}", err), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_includes_message() {
        let err = CommonError::storage_error("bucket missing");
        assert_eq!(err.to_string(), "Storage operation failed: bucket missing");
        assert_eq!(err.message(), "bucket missing");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = CommonError::from(io);
        assert!(matches!(err, CommonError::IoError { .. }));
        let source = err.source().expect("source should be kept");
        assert_eq!(source.to_string(), "no such file");
    }

    #[test]
    fn test_configuration_error() {
        let err = CommonError::configuration_error("partitions must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: partitions must be positive"
        );
    }
}
