//! # shapejson
//!
//! Typed access to dynamic, evolving JSON without declaring model types.
//!
//! - [`parser`] turns JSON text, bytes or `serde_json::Value` into a
//!   [`JsonNode`] tree with defaulting, coercing accessors and dot/bracket
//!   path navigation.
//! - [`diff`] compares two trees, or two structural descriptors, and
//!   classifies every added, removed or retyped key.
//! - [`session`] tracks the shape of successive payloads and notifies a
//!   listener when the backend's shape changes.
//!
//! ```
//! use shapejson::prelude::*;
//!
//! let session = SchemaSession::new();
//! let user = session.parse(r#"{"id": "7", "profile": {"vip": "1"}}"#).unwrap();
//! assert_eq!(user.get_int("id", 0), 7);
//! assert!(user.get_nested("profile").is_some_and(|p| p.get_bool("vip", false)));
//! ```

#![warn(rust_2018_idioms)]
#![warn(missing_docs)]

pub mod config;
pub mod diff;
pub mod error;
pub mod infrastructure;
pub mod parser;
pub mod session;

/// Value objects from the domain crate
pub use shapejson_domain as domain;

// Domain exports
pub use domain::{
    ChangeKind, DomainError, DomainResult, JsonNode, JsonPath, NodeKind, PathSegment, SchemaChange,
    SchemaDescriptor,
};

// Core exports
pub use config::{DetectionConfig, ParseOptions};
pub use diff::{
    ChangeSummary, breaking_changes, compare, compare_descriptors, has_breaking_changes, summarize,
};
pub use error::{Error, Result};
pub use infrastructure::{CacheMetadata, InMemorySchemaStore, SchemaStore, StoreError};
pub use parser::{
    JsonParser, RawInput, extract_schema, get_all_paths, get_value_at_path, node_at_path, parse,
    parse_with_validation, to_json_string,
};
pub use session::{SchemaChangeListener, SchemaSession, SessionStatus};

/// Re-export commonly used types
pub mod prelude {
    pub use super::{
        ChangeKind, ChangeSummary, DetectionConfig, Error, JsonNode, JsonParser, NodeKind,
        ParseOptions, Result, SchemaChange, SchemaChangeListener, SchemaDescriptor, SchemaSession,
        SchemaStore,
    };
}
