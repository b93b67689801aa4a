//! shapejson Domain Layer - Pure Value Objects
//!
//! This crate contains the value types shared by every shapejson component:
//! the typed JSON tree, its value-stripped structural descriptor, the change
//! records produced when two shapes are compared, and the dot/bracket path
//! syntax used to navigate a tree.
//!
//! Nothing here performs I/O, logging or locking. Parsing text, diffing and
//! session state live in the `shapejson` crate.
//!
//! ## Architecture
//!
//! - **Value Objects**: Immutable data defined purely by their attributes
//!   (`JsonNode`, `SchemaDescriptor`, `SchemaChange`, `JsonPath`)
//! - **Errors**: `DomainError`, raised only by constructors that validate input

#![warn(missing_docs)]

pub mod value_objects;

// Re-export core types
pub use value_objects::{
    ChangeKind, JsonNode, JsonPath, NodeKind, PathSegment, SchemaChange, SchemaDescriptor,
};

/// Domain Result type
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-specific errors
///
/// Value objects never fail on read access; these errors are limited to
/// parsing textual representations (paths, kind labels).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DomainError {
    /// Path text does not follow `segment(.segment)*` with optional `[index]`
    #[error("Invalid JSON path: {0}")]
    InvalidPath(String),

    /// Unrecognised node kind label
    #[error("Invalid node kind: {0}")]
    InvalidKind(String),
}

impl DomainError {
    /// Create an invalid path error
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_creation() {
        let err = DomainError::invalid_path("a..b");
        assert!(matches!(err, DomainError::InvalidPath(_)));
        assert_eq!(err.to_string(), "Invalid JSON path: a..b");
    }

    #[test]
    fn test_domain_result() {
        let result: DomainResult<u32> = Ok(42);
        assert!(result.is_ok());

        let result: DomainResult<u32> = Err(DomainError::InvalidKind("tuple".to_string()));
        assert!(result.is_err());
    }
}
