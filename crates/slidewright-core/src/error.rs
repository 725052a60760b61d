//! Error types for the Slidewright core library.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for Slidewright.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A document identifier did not resolve to anything in the namespace.
    #[error("Document not found: {identifier} (expected {filename})")]
    NotFound { identifier: String, filename: String },

    /// Structured header block could not be parsed.
    #[error("Frontmatter error in {identifier}: {message}")]
    Frontmatter { identifier: String, message: String },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error for `identifier` stored under `filename`.
    pub fn not_found(identifier: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::NotFound {
            identifier: identifier.into(),
            filename: filename.into(),
        }
    }

    /// Create a new frontmatter error.
    pub fn frontmatter(identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            identifier: identifier.into(),
            message: message.into(),
        }
    }

    /// Whether this error means the document is simply absent.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CoreError::config("missing field");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_not_found_error() {
        let err = CoreError::not_found("q4-review", "q4-review.mdx");
        assert_eq!(
            err.to_string(),
            "Document not found: q4-review (expected q4-review.mdx)"
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_frontmatter_error() {
        let err = CoreError::frontmatter("deck", "mapping values are not allowed");
        assert!(err.to_string().contains("Frontmatter error in deck"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CoreError = io_err.into();
        assert!(err.to_string().contains("IO error"));
        assert!(err.is_not_found());
    }
}
