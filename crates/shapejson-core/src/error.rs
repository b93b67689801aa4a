//! Error types for shapejson operations
//!
//! Only two conditions are errors: input text that is not JSON, and a root
//! that violates a requested validation rule. Everything else (missing keys,
//! failed coercions, unresolved paths, unavailable cached descriptors)
//! degrades to a default or `None`.

/// Result type alias for shapejson operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for shapejson operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Input text is not valid JSON
    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    Parse {
        /// 1-based line reported by the decoder
        line: usize,
        /// 1-based column reported by the decoder
        column: usize,
        /// Decoder message
        message: String,
    },

    /// Root violates a requested validation rule
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Tree could not be rendered as JSON text
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a parse error
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a serialization error from an encoder failure
    pub fn serialization(err: impl std::fmt::Display) -> Self {
        Self::Serialization(err.to_string())
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization(_))
    }
}

/// Decoder failures become [`Error::Parse`] with the decoder's position
///
/// Only decoding goes through this conversion; encoding failures are mapped
/// explicitly with [`Error::serialization`].
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
